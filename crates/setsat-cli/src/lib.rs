pub mod batch;
pub mod config;
pub mod logging;
pub mod report;
