use omdb_core::{ClientConfig, OmdbApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api = OmdbApi::new(ClientConfig::from_env()?)?;

    println!("🔍 Searching for 'batman'...\n");

    let page = api.search("batman").await?;

    println!(
        "Found {} matches ({} pages):",
        page.total_results,
        page.total_pages()
    );
    for (i, item) in page.items.iter().enumerate() {
        let year = item.year.as_deref().unwrap_or("—");
        println!(
            "  {:2}. {} ({}) [{}] - {}",
            i + 1,
            item.title,
            year,
            item.media_type.label(),
            item.imdb_id
        );
    }

    if page.has_next_page() {
        println!("\n📄 Loading page 2...\n");
        let next = api.search_page("batman", 2).await?;
        for (i, item) in next.items.iter().enumerate() {
            println!("  {:2}. {} - {}", i + 11, item.title, item.imdb_id);
        }
    }

    Ok(())
}
