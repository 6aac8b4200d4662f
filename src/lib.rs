pub mod config;
pub mod error;
pub mod io_atomic;
pub mod links;
pub mod paths;

pub use config::FetchConfig;
pub use error::LinkError;
pub use paths::AppPaths;

pub const APP_TITLE: &str = "QUICK LINKS";
