use std::time::Duration;

/// Outcome of a successful provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub container_id: String,
    pub runtime_version: String,
    /// Time until the cluster first answered.
    pub ready_after: Duration,
    /// Time until the cluster answered again after the restart.
    pub restarted_after: Duration,
    /// Output of the plugin manager listing, one plugin per line.
    pub plugin_listing: Vec<String>,
}
