#![forbid(unsafe_code)]

use poem_openapi::Object;
use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("bookshelf_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Logging subsystem could not be brought up.
    #[error("Unable to initialize log4rs logging: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),
}

// ***************************************************************************
//                             HTTP Error Body
// ***************************************************************************
/** JSON body returned by endpoints that refuse a request.  The wire shape
 * is fixed: a single "error" field carrying a short message.
 */
#[derive(Object, Debug)]
pub struct HttpError {
    error: String,
}

impl HttpError {
    pub fn new(msg: &str) -> Self {
        Self { error: msg.to_string() }
    }
}
