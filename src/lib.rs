// Bizkit business utility library

pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod http;
pub mod id;
pub mod json;
pub mod logging;
pub mod net;
pub mod response;
pub mod table;
pub mod throttle;
pub mod thumbnail;
pub mod watermark;

pub use error::{BizkitError, Result};
pub use response::ResponseMsg;
