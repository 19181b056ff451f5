#![forbid(unsafe_code)]

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::{error, info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as Log4rsConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Deserialize;
use std::{fs, path::Path};
use structopt::StructOpt;
use toml;

use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// File locations, both relative to the server's working directory.  Neither
// file has to exist: compiled-in defaults are used in their place.
const DEFAULT_CONFIG_FILE  : &str = "bookshelf.toml";
const LOG4RS_CONFIG_FILE   : &str = "log4rs.yml";

// Console log line format used when no log4rs config file is present.
const CONSOLE_LOG_PATTERN  : &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "http://localhost";
const DEFAULT_HTTP_PORT    : u16  = 3000;

// Shown as the title of the generated API documentation.
const DEFAULT_TITLE        : &str = "Documentation";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref SERVER_ARGS: ServerArgs = init_server_args();
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// CommandLineArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "bookshelf_args", about = "Command line arguments for the bookshelf server.")]
pub struct ServerArgs {
    /// Path to the server's TOML configuration file.
    ///
    /// When not given, ./bookshelf.toml is tried.  A missing or unreadable
    /// file is not an error; the compiled-in defaults take over.
    #[structopt(short, long)]
    pub config_file: Option<String>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub server_args: &'static ServerArgs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                             Argument Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_server_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_server_args() -> ServerArgs {
    let args = ServerArgs::from_args();
    println!("{:?}", args);
    args
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs logging.  A log4rs.yml file in the working directory
 * takes precedence; without one a console appender is installed so the
 * server never runs unlogged.
 */
pub fn init_log() {
    if Path::new(LOG4RS_CONFIG_FILE).is_file() {
        match log4rs::init_file(LOG4RS_CONFIG_FILE, Default::default()) {
            Ok(_) => (),
            Err(e) => {
                println!("{}", e);
                let s = format!("{}", Errors::Log4rsInitialization(LOG4RS_CONFIG_FILE.to_string()));
                panic!("{}", s);
            },
        }
        info!("Log4rs initialized using: {}", LOG4RS_CONFIG_FILE);
        return;
    }

    // Fall back to console logging at info level.
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_LOG_PATTERN)))
        .build();
    let logconfig = Log4rsConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .unwrap_or_else(|e| {
            panic!("{}", Errors::Log4rsInitialization(e.to_string()));
        });
    match log4rs::init_config(logconfig) {
        Ok(_) => (),
        Err(e) => {
            panic!("{}", Errors::Log4rsInitialization(e.to_string()));
        },
    }
    info!("Log4rs initialized with default console logging.");
}

/// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file specified
 * on the command line or at the default path.  If the file cannot be read,
 * the default parameter values are used.
 */
fn get_parms() -> Result<Parms> {
    // Get the config file path from the command line or use the default.
    let config_file = match &SERVER_ARGS.config_file {
        Some(f) => f.clone(),
        None => DEFAULT_CONFIG_FILE.to_string(),
    };

    // Read the configuration file.
    info!("{}", Errors::ReadingConfigFile(config_file.clone()));
    let contents = match fs::read_to_string(&config_file) {
        Ok(c) => c,
        Err(_) => {
            println!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config : Config = match toml::from_str(&contents) {
        Ok(c)  => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file, config })
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If this fails the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    RuntimeCtx { parms, server_args: &SERVER_ARGS }
}
