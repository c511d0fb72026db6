//! Build plan manifest parsing
//!
//! The manifest is the JSON action graph a build tool dumps for a build
//! (for Go: `go build -debug-actiongraph=actiongraph.json`). Only four
//! fields are read; everything else in each object is ignored.

use crate::error::{CarryError, CarryResult};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// One action from the build plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildPlanEntry {
    /// Base64 action id, empty for actions that never touch the cache
    #[serde(rename = "ActionID", default)]
    pub action_id: String,

    /// Import path of the package
    #[serde(default)]
    pub package: String,

    /// Action mode (build, link, ...)
    #[serde(default)]
    pub mode: String,

    /// Whether the build had to run this action
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub need_build: bool,
}

/// Older tool versions write `NeedBuild` as a string, some as `null`
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(de::Error::invalid_value(
                Unexpected::Str(&text),
                &"a boolean or \"true\"/\"false\"",
            )),
        },
    }
}

/// Parse a build plan from JSON text
pub fn parse_plan(content: &str) -> Result<Vec<BuildPlanEntry>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Load the full build plan from a manifest file
pub fn load_plan(path: &Path) -> CarryResult<Vec<BuildPlanEntry>> {
    let file = File::open(path).map_err(|e| CarryError::PlanRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let entries: Vec<BuildPlanEntry> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| CarryError::PlanRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!("Loaded {} build plan entries from {}", entries.len(), path.display());
    Ok(entries)
}
