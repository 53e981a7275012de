use serde::{Deserialize, Serialize};
use url::Url;

/// Plugin manager shipped with the Elasticsearch image, relative to its home.
pub const PLUGIN_MANAGER: &str = "bin/elasticsearch-plugin";

/// An Elasticsearch plugin installed from a remote archive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluginSpec {
    /// Name reported by the plugin manager once installed.
    pub name: String,
    pub url: Url,
}

impl PluginSpec {
    /// Non interactive installation, the `--batch` flag accepts the
    /// extra permissions prompt.
    pub fn install_command(&self) -> Vec<String> {
        vec![
            String::from(PLUGIN_MANAGER),
            String::from("install"),
            String::from("--batch"),
            self.url.to_string(),
        ]
    }

    pub fn list_command() -> Vec<String> {
        vec![String::from(PLUGIN_MANAGER), String::from("list")]
    }

    /// True if one line of the plugin manager listing is exactly this plugin.
    pub fn is_listed<S: AsRef<str>>(&self, listing: &[S]) -> bool {
        listing
            .iter()
            .any(|line| line.as_ref().trim() == self.name)
    }
}
