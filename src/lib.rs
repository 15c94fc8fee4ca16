pub mod api;
pub mod config;
pub mod session;
pub mod submission;
pub mod telemetry;
