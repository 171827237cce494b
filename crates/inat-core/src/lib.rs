pub mod config;
pub mod logging;

pub mod api;
pub mod downloader;
pub mod fetch;
pub mod loader;
pub mod observation;
