#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{param::Path, payload::PlainText, ApiResponse, OpenApi};

use crate::utils::web_utils::{self, RequestDebug};

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Ids at or below this value are rejected.
const MIN_USER_ID: f64 = 1200.0;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct UserLookupApi;

#[derive(Debug)]
struct ReqUserLookup {
    id: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqUserLookup {
    type Req = ReqUserLookup;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Path parameters:");
        s.push_str("\n    id: ");
        s.push_str(&self.id);
        s
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum UserResponse {
    #[oai(status = 200)]
    Http200(PlainText<String>),
    #[oai(status = 400)]
    Http400(PlainText<String>),
}

fn make_http_200(msg: String) -> UserResponse {
    UserResponse::Http200(PlainText(msg))
}
fn make_http_400(msg: String) -> UserResponse {
    UserResponse::Http400(PlainText(msg))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl UserLookupApi {
    /// Fetch the user Id
    ///
    /// This api endpoint returns the id of the user
    #[oai(path = "/user/:id", method = "get")]
    async fn get_user(&self, http_req: &Request, id: Path<String>) -> UserResponse {
        // Package the request parameters.
        let req = ReqUserLookup { id: id.0 };

        // Conditional logging depending on log level.
        web_utils::debug_request(http_req, &req);

        // -------------------- Process Request ----------------------
        process(&req)
    }
}

// ***************************************************************************
//                          Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// process:
// ---------------------------------------------------------------------------
fn process(req: &ReqUserLookup) -> UserResponse {
    if id_too_small(&req.id) {
        return make_http_400("Invalid id".to_string());
    }
    make_http_200(format!("Your name is {}", req.id))
}

// ---------------------------------------------------------------------------
// id_too_small:
// ---------------------------------------------------------------------------
/** An id is rejected only when it parses as a number at or below
 * MIN_USER_ID.  Ids that do not parse are accepted unchanged: the size
 * check applies exclusively to numeric-looking ids.  Note that "NaN"
 * parses, but every comparison against NaN is false, so it is accepted.
 */
fn id_too_small(id: &str) -> bool {
    match id.trim().parse::<f64>() {
        Ok(n) => n <= MIN_USER_ID,
        Err(_) => false,
    }
}
