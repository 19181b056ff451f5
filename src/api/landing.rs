#![forbid(unsafe_code)]

use poem_openapi::{payload::PlainText, OpenApi};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct LandingApi;

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl LandingApi {
    /// Landing page of the website
    ///
    /// It is the first page that gets displayed
    #[oai(path = "/", method = "get")]
    async fn get_landing(&self) -> PlainText<String> {
        PlainText("Hello world".to_string())
    }
}
