// config.rs — Tracker configuration.
//
// TrackerConfig determines where the goal table lives and how exports are
// written. `for_project()` gives the default `.gt/` layout; `load()` applies
// overrides from `.gt/tracker.toml` when that file exists.
//
//   [storage]
//   database = "data/metas.db"   # relative paths resolve against the project root
//
//   [export]
//   delimiter = ";"

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Resolved configuration for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// SQLite file holding the `metas` table.
    pub db_path: PathBuf,

    /// Location of the optional `tracker.toml`.
    pub config_file: PathBuf,

    /// Field delimiter for `gt goal export`.
    pub export_delimiter: u8,
}

/// On-disk shape of `.gt/tracker.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerFile {
    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Database path override.
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

impl TrackerConfig {
    /// Standard `.gt/` layout for a project, without reading any file.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let gt_dir = root.join(".gt");
        Self {
            db_path: gt_dir.join("metas.db"),
            config_file: gt_dir.join("tracker.toml"),
            export_delimiter: b',',
            project_root: root,
        }
    }

    /// Defaults plus whatever `.gt/tracker.toml` overrides. A missing file is
    /// not an error; a malformed one is.
    pub fn load(project_root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let mut config = Self::for_project(project_root);
        if !config.config_file.exists() {
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config.config_file)
            .with_context(|| format!("reading {}", config.config_file.display()))?;
        let file: TrackerFile = toml::from_str(&content)
            .with_context(|| format!("parsing {}", config.config_file.display()))?;
        config.apply(file)?;
        tracing::debug!(db = %config.db_path.display(), "loaded tracker config");
        Ok(config)
    }

    fn apply(&mut self, file: TrackerFile) -> anyhow::Result<()> {
        if let Some(database) = file.storage.database {
            self.db_path = if database.is_absolute() {
                database
            } else {
                self.project_root.join(database)
            };
        }
        let delimiter = file.export.delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
            bail!(
                "export delimiter must be an ASCII character other than a quote or line break, got {:?}",
                delimiter
            );
        }
        self.export_delimiter = delimiter as u8;
        Ok(())
    }
}
