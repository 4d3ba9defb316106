pub mod applicants;
pub mod config;
pub mod directory;
pub mod error;
pub mod reviews;
pub mod storage;
pub mod telemetry;
