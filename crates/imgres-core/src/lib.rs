pub mod config;
pub mod logging;

pub mod image_url;
pub mod load_failure;
pub mod records;
