pub mod cluster;
pub mod runtime;
