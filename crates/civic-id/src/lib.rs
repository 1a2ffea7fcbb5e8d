pub mod config;
pub mod documents;
pub mod error;
pub mod records;
pub mod repository;
pub mod telemetry;
