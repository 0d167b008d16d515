use omdb_core::{display_fields, meta_chips, ClientConfig, OmdbApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api = OmdbApi::new(ClientConfig::from_env()?)?;

    println!("🔍 Searching for 'Batman Begins'...\n");

    let page = api.search("Batman Begins").await?;
    let first = page.items.first().ok_or("no results")?;

    println!("🎬 Loading details for {} ({})\n", first.title, first.imdb_id);

    let details = api.details(&first.imdb_id).await?;

    println!("{}", details.title);
    let chips = meta_chips(&details);
    if !chips.is_empty() {
        println!("{}", chips.join(" · "));
    }
    if let Some(plot) = &details.plot {
        println!("\n{}\n", plot);
    }

    for field in display_fields(&details) {
        println!("{}: {}", field.label, field.value);
    }

    if !details.ratings.is_empty() {
        println!("\nRatings:");
        for rating in &details.ratings {
            println!("  {}: {}", rating.source, rating.value);
        }
    }

    Ok(())
}
