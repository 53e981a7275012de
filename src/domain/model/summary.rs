use std::fmt;

use super::{container::ContainerSpec, plugin::PluginSpec};

const RULE: &str = "======================================================================";

/// Operator facing recap printed at the end of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub url: String,
    pub container: String,
    pub volume: String,
    pub plugin: String,
    pub program: String,
    pub next_steps: Vec<String>,
}

impl Summary {
    pub fn new(
        url: &url::Url,
        container: &ContainerSpec,
        plugin: &PluginSpec,
        program: &str,
        next_steps: &[String],
    ) -> Self {
        Summary {
            url: url.to_string(),
            container: container.name.clone(),
            volume: container.volume.name.clone(),
            plugin: plugin.name.clone(),
            program: program.to_string(),
            next_steps: next_steps.to_vec(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Summary {
            url,
            container,
            volume,
            plugin,
            program,
            next_steps,
        } = self;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Elasticsearch is ready")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  URL       : {}", url)?;
        writeln!(f, "  Container : {}", container)?;
        writeln!(f, "  Volume    : {}", volume)?;
        writeln!(f, "  Plugin    : {}", plugin)?;
        if !next_steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "Next steps:")?;
            for (rank, step) in next_steps.iter().enumerate() {
                writeln!(f, "  {}. {}", rank + 1, step)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Maintenance:")?;
        writeln!(f, "  logs     : {} logs -f {}", program, container)?;
        writeln!(f, "  stop     : {} stop {}", program, container)?;
        writeln!(f, "  start    : {} start {}", program, container)?;
        writeln!(
            f,
            "  teardown : {p} stop {c} && {p} rm {c} && {p} volume rm {v}",
            p = program,
            c = container,
            v = volume
        )?;
        write!(f, "             (or: esvi teardown --volume)")
    }
}
