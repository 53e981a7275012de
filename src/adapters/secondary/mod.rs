pub mod docker;
pub mod elasticsearch;
