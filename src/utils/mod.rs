pub mod config;
pub mod deserialize;
pub mod launch;
pub mod logger;
