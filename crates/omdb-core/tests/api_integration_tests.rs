use std::sync::Arc;
use std::time::Duration;

use omdb_core::{
    display_fields, ClientConfig, DetailsController, MediaType, OmdbApi, OmdbError,
    SearchController,
};
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

/// Client configuration pointed at the mock server, with the rate limiter
/// effectively disabled so multi-request tests run fast
fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        requests_per_second: 1000.0,
        ..ClientConfig::new("test-key")
    }
}

fn api_for(server: &MockServer) -> Arc<OmdbApi> {
    Arc::new(OmdbApi::new(config_for(server)).unwrap())
}

/// Build an OMDb search body with sequentially numbered items
fn search_body(prefix: &str, count: usize, total: u32) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            json!({
                "Title": format!("{} {}", prefix, i),
                "Year": "2005",
                "imdbID": format!("tt-{}-{}", prefix, i),
                "Type": "movie",
                "Poster": "N/A"
            })
        })
        .collect();

    json!({
        "Search": items,
        "totalResults": total.to_string(),
        "Response": "True"
    })
}

// ============================================================================
// API Tests
// ============================================================================

#[tokio::test]
async fn test_search_maps_items_and_total() {
    let server = MockServer::start().await;

    let body = json!({
        "Search": [
            {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784",
             "Type": "movie", "Poster": "https://example.com/p.jpg"},
            {"Title": "Batman: The Animated Series", "Year": "1992–1995",
             "imdbID": "tt0103359", "Type": "series", "Poster": "N/A"}
        ],
        "totalResults": "15",
        "Response": "True"
    });

    Mock::given(method("GET"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("s", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let page = api.search("batman").await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_results, 15);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages(), 2);
    assert!(page.has_next_page());
    assert_eq!(page.items[0].imdb_id, "tt0372784");
    assert_eq!(page.items[0].poster_url.as_deref(), Some("https://example.com/p.jpg"));
    assert_eq!(page.items[1].media_type, MediaType::Series);
    assert_eq!(page.items[1].poster_url, None);
}

#[tokio::test]
async fn test_search_not_found_surfaces_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("s", "zzxyqq123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Movie not found!"
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.search("zzxyqq123").await.unwrap_err();

    match err {
        OmdbError::Api(msg) => assert_eq!(msg, "Movie not found!"),
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_query_makes_no_request() {
    let server = MockServer::start().await;

    // Any request at all fails the test
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let result = api.search("   ").await;

    assert!(matches!(result, Err(OmdbError::EmptyQuery)));
}

#[tokio::test]
async fn test_search_page_sends_page_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("batman", 5, 15)))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let page = api.search_page("batman", 2).await.unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.page, 2);
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_details_requests_full_plot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("i", "tt0372784"))
        .and(query_param("plot", "full"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "Batman Begins",
            "Year": "2005",
            "Runtime": "140 min",
            "Director": "Christopher Nolan",
            "Plot": "N/A",
            "Production": "N/A",
            "imdbID": "tt0372784",
            "Type": "movie",
            "Ratings": [{"Source": "Internet Movie Database", "Value": "8.2/10"}],
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let details = api.details("tt0372784").await.unwrap();

    assert_eq!(details.title, "Batman Begins");
    // "N/A" plot is absent and never rendered
    assert_eq!(details.plot, None);
    assert_eq!(details.ratings.len(), 1);

    let labels: Vec<&str> = display_fields(&details).iter().map(|f| f.label).collect();
    assert_eq!(labels, vec!["Director"]);
}

#[tokio::test]
async fn test_details_blank_id_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let controller = DetailsController::new(api_for(&server));
    let snapshot = controller.fetch("   ").await;

    assert!(snapshot.details.is_none());
    assert_eq!(snapshot.error.as_deref(), Some("No movie id was provided."));
}

#[tokio::test]
async fn test_details_unknown_id_surfaces_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("i", "tt0000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Error getting data."
        })))
        .mount(&server)
        .await;

    let controller = DetailsController::new(api_for(&server));
    let snapshot = controller.fetch("tt0000000").await;

    assert!(snapshot.details.is_none());
    assert_eq!(snapshot.error.as_deref(), Some("Error getting data."));
}

// ============================================================================
// Retry Tests
// ============================================================================

#[tokio::test]
async fn test_server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    // First attempt hits the one-shot 500, the retry hits the success mock
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("batman", 1, 1)))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let page = api.search("batman").await.unwrap();

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn test_rate_limit_exhaustion_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(4) // initial attempt + 3 retries
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.search("batman").await.unwrap_err();

    assert!(matches!(err, OmdbError::RateLimited));
}

// ============================================================================
// Controller Tests
// ============================================================================

#[tokio::test]
async fn test_controller_pagination_scenario() {
    let server = MockServer::start().await;

    // Page 1: 10 of 15 results. The page-2 mock is registered first so the
    // page-1 mock (no page param constraint) does not shadow it.
    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("more", 5, 15)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("batman", 10, 15)))
        .expect(1)
        .mount(&server)
        .await;

    let controller = SearchController::new(api_for(&server));

    let snapshot = controller.submit("batman").await;
    assert_eq!(snapshot.items.len(), 10);
    assert_eq!(snapshot.current_page, 1);
    assert_eq!(snapshot.total_results, 15);
    assert_eq!(snapshot.total_pages, 2);

    let snapshot = controller.load_more().await;
    assert_eq!(snapshot.items.len(), 15);
    assert_eq!(snapshot.current_page, 2);
    // Prior items keep their order, new page is appended
    assert_eq!(snapshot.items[0].imdb_id, "tt-batman-1");
    assert_eq!(snapshot.items[10].imdb_id, "tt-more-1");

    // Last page reached: further load_more calls issue no request
    // (the .expect(1) counts above fail the test otherwise)
    let snapshot = controller.load_more().await;
    assert_eq!(snapshot.items.len(), 15);
    assert_eq!(snapshot.current_page, 2);
}

#[tokio::test]
async fn test_controller_load_more_failure_keeps_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "False",
            "Error": "Too many results."
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("batman", 10, 15)))
        .mount(&server)
        .await;

    let controller = SearchController::new(api_for(&server));

    controller.submit("batman").await;
    let snapshot = controller.load_more().await;

    // Append mode never clears prior results
    assert_eq!(snapshot.items.len(), 10);
    assert_eq!(snapshot.current_page, 1);
    assert_eq!(snapshot.error.as_deref(), Some("Too many results."));
}

#[tokio::test]
async fn test_overlapping_submits_last_wins() {
    let server = MockServer::start().await;

    // The older query's response arrives after the newer one
    Mock::given(method("GET"))
        .and(query_param("s", "alien"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body("alien", 3, 3))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body("batman", 2, 2)))
        .mount(&server)
        .await;

    let controller = SearchController::new(api_for(&server));

    let slow = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit("alien").await })
    };
    // Make sure the slow submit is issued first
    tokio::time::sleep(Duration::from_millis(50)).await;

    let snapshot = controller.submit("batman").await;
    assert_eq!(snapshot.query, "batman");
    assert_eq!(snapshot.items.len(), 2);

    // The stale response is discarded even though it completes last
    let stale_view = slow.await.unwrap();
    assert_eq!(stale_view.query, "batman");
    assert_eq!(stale_view.items.len(), 2);

    let final_view = controller.snapshot().await;
    assert_eq!(final_view.query, "batman");
    assert_eq!(final_view.items[0].imdb_id, "tt-batman-1");
    assert!(!final_view.in_flight);
}
