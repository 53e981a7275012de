pub mod container;
pub mod error;
pub mod plugin;
pub mod readiness;
pub mod report;
pub mod status;
pub mod summary;
