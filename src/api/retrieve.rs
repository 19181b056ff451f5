#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Query, payload::Json, ApiResponse, OpenApi};

use crate::utils::errors::HttpError;
use crate::utils::store::{Book, BookStore};
use crate::utils::web_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct RetrieveApi {
    store: Arc<BookStore>,
}

impl RetrieveApi {
    pub fn new(store: Arc<BookStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug)]
struct ReqRetrieve {
    auth: Option<String>,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqRetrieve {
    type Req = ReqRetrieve;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Query parameters:");
        s.push_str("\n    auth: ");
        s.push_str(self.auth.as_deref().unwrap_or("<absent>"));
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum RetrieveResponse {
    #[oai(status = 200)]
    Http200(Json<Vec<Book>>),
    #[oai(status = 401)]
    Http401(Json<HttpError>),
}

fn make_http_200(books: Vec<Book>) -> RetrieveResponse {
    RetrieveResponse::Http200(Json(books))
}
fn make_http_401(msg: &str) -> RetrieveResponse {
    RetrieveResponse::Http401(Json(HttpError::new(msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl RetrieveApi {
    /// Retrieve all the orders
    ///
    /// This api endpoint returns all the orders based on authentication id provided.
    #[oai(path = "/retrieve", method = "get")]
    async fn retrieve(&self, http_req: &Request, auth: Query<Option<String>>) -> RetrieveResponse {
        // Package the request parameters.
        let req = ReqRetrieve { auth: auth.0 };

        // Conditional logging depending on log level.
        web_utils::debug_request(http_req, &req);

        // -------------------- Authorize ----------------------------
        // Any non-empty auth value authorizes; the value itself is not
        // validated further.
        if !is_authorized(&req) {
            return make_http_401("Unauthorized");
        }

        // -------------------- Process Request ----------------------
        make_http_200(self.store.list())
    }
}

// ***************************************************************************
//                          Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// is_authorized:
// ---------------------------------------------------------------------------
fn is_authorized(req: &ReqRetrieve) -> bool {
    matches!(req.auth.as_deref(), Some(a) if !a.is_empty())
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_auth_is_unauthorized() {
        assert!(!is_authorized(&ReqRetrieve { auth: None }));
        assert!(!is_authorized(&ReqRetrieve { auth: Some(String::new()) }));
    }

    #[test]
    fn any_non_empty_auth_is_authorized() {
        assert!(is_authorized(&ReqRetrieve { auth: Some("x".to_string()) }));
        assert!(is_authorized(&ReqRetrieve { auth: Some("1".to_string()) }));
        assert!(is_authorized(&ReqRetrieve { auth: Some("anything at all".to_string()) }));
    }
}
