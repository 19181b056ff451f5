#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi};

use crate::utils::store::{Book, BookStore};
use crate::utils::web_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct AddBookApi {
    store: Arc<BookStore>,
}

impl AddBookApi {
    pub fn new(store: Arc<BookStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug)]
struct ReqAddBook {
    id: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqAddBook {
    type Req = ReqAddBook;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Path parameters:");
        s.push_str("\n    id: ");
        s.push_str(&self.id);
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl AddBookApi {
    /// Adds a new book
    ///
    /// This route adds a new book to the list
    #[oai(path = "/add/:id", method = "post")]
    async fn add_book(&self, http_req: &Request, id: Path<String>) -> Json<Vec<Book>> {
        // Package the request parameters.
        let req = ReqAddBook { id: id.0 };

        // Conditional logging depending on log level.
        web_utils::debug_request(http_req, &req);

        // -------------------- Process Request ----------------------
        // Any id is accepted, including one already in the list.
        Json(self.store.append(&req.id))
    }
}
