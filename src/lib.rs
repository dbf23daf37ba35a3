mod app;
pub mod cli;
pub mod config;
mod error;
mod record;
pub mod ssh;
mod store;
mod target;

pub use app::{write_record, App, EXIT_FAILURE, EXIT_OK};
pub use config::Settings;
pub use error::{Error, Result};
pub use record::*;
pub use store::*;
pub use target::Target;
