//! Session configuration file.
//!
//! ```yaml
//! map: map.geojson          # optional
//! types: types.txt          # optional
//! instance: I_20_4_4_4_3.txt
//! solution: sol_20_4_4_4_3.txt   # optional
//! output: edited.txt        # optional, default solution.txt
//! draw_policy: exactly_one  # optional, default at_most_one
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tn_check::DrawPolicy;

use crate::error::{AppError, AppResult};

const DEFAULT_OUTPUT: &str = "solution.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<PathBuf>,
    pub instance: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub draw_policy: DrawPolicy,
}

impl SessionConfig {
    /// Config with only an instance file and defaults elsewhere.
    pub fn for_instance(instance: impl Into<PathBuf>) -> Self {
        Self {
            map: None,
            types: None,
            instance: instance.into(),
            solution: None,
            output: None,
            draw_policy: DrawPolicy::default(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Make every relative path absolute under `base`.
    pub fn resolve_against(mut self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.map = self.map.map(join);
        self.types = self.types.map(join);
        self.instance = join(self.instance);
        self.solution = self.solution.map(join);
        self.output = Some(join(self.output_path()));
        self
    }
}

/// Load a config from YAML and resolve its paths.
pub fn load_config(path: &Path) -> AppResult<SessionConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: SessionConfig = serde_yaml::from_str(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_against(base))
}
