//! Provisioning of a local, single node Elasticsearch running in a container,
//! with the Vietnamese analysis plugin installed.
//!
//! The crate is organized around ports and adapters: the workflows in
//! [`domain::usecases`] only see the [`ContainerRuntime`] and [`Cluster`]
//! ports, implemented in [`adapters::secondary`] by the docker command line
//! client and a plain HTTP client.
//!
//! [`ContainerRuntime`]: domain::ports::secondary::runtime::ContainerRuntime
//! [`Cluster`]: domain::ports::secondary::cluster::Cluster

pub mod adapters;
pub mod domain;
pub mod settings;
pub mod utils;
