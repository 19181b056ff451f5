#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Route;
use poem_openapi::OpenApiService;

use crate::utils::store::BookStore;

pub mod add_book;
pub mod landing;
pub mod retrieve;
pub mod user_lookup;

use add_book::AddBookApi;
use landing::LandingApi;
use retrieve::RetrieveApi;
use user_lookup::UserLookupApi;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Version advertised in the generated OpenAPI document.
const API_VERSION: &str = "1.0.0";
const API_DESCRIPTION: &str = "Documentation regarding the various queries";

// ***************************************************************************
//                              Route Assembly
// ***************************************************************************
// ---------------------------------------------------------------------------
// build_routes:
// ---------------------------------------------------------------------------
/** Assemble the complete route table around an injected book store.  The
 * endpoints are mounted at the root, the interactive documentation under
 * /docs, and the raw generated specs at /spec and /spec_yaml.  Tests call
 * this with their own stores to get independent applications.
 */
pub fn build_routes(title: &str, server_url: &str, store: Arc<BookStore>) -> Route {
    // Create a tuple with all endpoint structs, sharing the one store.
    let endpoints = (
        LandingApi,
        UserLookupApi,
        RetrieveApi::new(store.clone()),
        AddBookApi::new(store),
    );
    let api_service = OpenApiService::new(endpoints, title, API_VERSION)
        .description(API_DESCRIPTION)
        .server(server_url.to_string());

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();

    // Serve the interactive documentation alongside the api itself.
    let ui = api_service.swagger_ui();
    Route::new()
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/", api_service)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use futures::future::join_all;
    use poem::http::StatusCode;
    use poem::test::TestClient;

    use super::*;

    // Build a test client around a freshly seeded, independent store.
    fn test_client() -> TestClient<Route> {
        let store = Arc::new(BookStore::seeded());
        TestClient::new(build_routes("Documentation", "http://localhost:3000", store))
    }

    #[tokio::test]
    async fn landing_page_returns_hello_world() {
        let cli = test_client();
        let resp = cli.get("/").send().await;
        resp.assert_status_is_ok();
        resp.assert_text("Hello world").await;
    }

    #[tokio::test]
    async fn user_lookup_rejects_small_ids() {
        let cli = test_client();
        let resp = cli.get("/user/1200").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_text("Invalid id").await;
    }

    #[tokio::test]
    async fn user_lookup_echoes_large_and_non_numeric_ids() {
        let cli = test_client();

        let resp = cli.get("/user/9999").send().await;
        resp.assert_status_is_ok();
        resp.assert_text("Your name is 9999").await;

        // Non-numeric ids fall outside the numeric floor check.
        let resp = cli.get("/user/abc").send().await;
        resp.assert_status_is_ok();
        resp.assert_text("Your name is abc").await;
    }

    #[tokio::test]
    async fn retrieve_without_auth_is_unauthorized() {
        let cli = test_client();

        let resp = cli.get("/retrieve").send().await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
        let json = resp.json().await;
        assert_eq!(json.value().object().get("error").string(), "Unauthorized");

        // An empty auth value is treated the same as an absent one.
        let resp = cli.get("/retrieve").query("auth", &"").send().await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn retrieve_returns_seeded_books_in_order() {
        let cli = test_client();
        let resp = cli.get("/retrieve").query("auth", &"x").send().await;
        resp.assert_status_is_ok();

        let json = resp.json().await;
        let books = json.value().array();
        assert_eq!(books.len(), 5);
        let first = books.get(0);
        assert_eq!(first.object().get("id").string(), "1200");
        assert_eq!(first.object().get("description").string(), "twelve hundred");
        let last = books.get(4);
        assert_eq!(last.object().get("id").string(), "1600");
        assert_eq!(last.object().get("description").string(), "sixteen hundred");
    }

    #[tokio::test]
    async fn add_appends_and_retrieve_sees_it() {
        let cli = test_client();

        let resp = cli.post("/add/9999").send().await;
        resp.assert_status_is_ok();
        let json = resp.json().await;
        let books = json.value().array();
        assert_eq!(books.len(), 6);
        let added = books.get(5);
        assert_eq!(added.object().get("id").string(), "9999");
        assert_eq!(added.object().get("description").string(), "New book");

        // The mutation is visible through the retrieve route.
        let resp = cli.get("/retrieve").query("auth", &"1").send().await;
        resp.assert_status_is_ok();
        let json = resp.json().await;
        let books = json.value().array();
        assert_eq!(books.len(), 6);
        assert_eq!(books.get(5).object().get("id").string(), "9999");
    }

    #[tokio::test]
    async fn duplicate_adds_are_not_deduplicated() {
        let cli = test_client();
        cli.post("/add/100").send().await.assert_status_is_ok();
        let resp = cli.post("/add/100").send().await;
        resp.assert_status_is_ok();

        let json = resp.json().await;
        let books = json.value().array();
        assert_eq!(books.len(), 7);
        assert_eq!(books.get(5).object().get("id").string(), "100");
        assert_eq!(books.get(6).object().get("id").string(), "100");
    }

    #[tokio::test]
    async fn concurrent_adds_lose_no_updates() {
        const NUM_ADDS: usize = 50;

        let cli = test_client();
        let posts: Vec<_> = (0..NUM_ADDS)
            .map(|i| cli.post(format!("/add/{}", i)).send())
            .collect();
        for resp in join_all(posts).await {
            resp.assert_status_is_ok();
        }

        let resp = cli.get("/retrieve").query("auth", &"1").send().await;
        resp.assert_status_is_ok();
        let json = resp.json().await;
        assert_eq!(json.value().array().len(), 5 + NUM_ADDS);
    }

    #[tokio::test]
    async fn unmatched_routes_fall_through_to_404() {
        let cli = test_client();
        let resp = cli.get("/no/such/route").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn documentation_and_spec_are_served() {
        let cli = test_client();
        cli.get("/docs").send().await.assert_status_is_ok();
        cli.get("/spec").send().await.assert_status_is_ok();
        cli.get("/spec_yaml").send().await.assert_status_is_ok();
    }
}
