use crate::ids::MIN_ID_LENGTH;
use crate::resolver::ColumnDropPlacement;
use crate::store::TitleTemplates;
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_DIR: &str = ".dragboard";
const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    pub column_title: String,
    pub task_title: String,
    pub id_length: usize,
    pub column_drop: ColumnDropPlacement,
    pub log: LogConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Project,
    Global,
}

#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub scope: ConfigScope,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let titles = TitleTemplates::default();
        BoardConfig {
            column_title: titles.column,
            task_title: titles.task,
            id_length: 6,
            column_drop: ColumnDropPlacement::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".into(),
            dir: None,
        }
    }
}

impl BoardConfig {
    pub fn titles(&self) -> TitleTemplates {
        TitleTemplates {
            column: self.column_title.clone(),
            task: self.task_title.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id_length < MIN_ID_LENGTH {
            bail!(
                "id_length must be at least {} (got {})",
                MIN_ID_LENGTH,
                self.id_length
            );
        }
        Ok(())
    }
}

pub fn init_project_config(force: bool) -> Result<ConfigLocation> {
    let cwd = env::current_dir()?;
    let dir = cwd.join(PROJECT_DIR);
    fs::create_dir_all(&dir).context("failed to create .dragboard directory")?;
    let location = ConfigLocation {
        path: dir.join(CONFIG_FILE),
        scope: ConfigScope::Project,
    };
    if force || !location.path.exists() {
        save_config(&location, &BoardConfig::default())?;
    }
    Ok(location)
}

pub fn locate_config(start: &Path) -> Result<ConfigLocation> {
    if let Some(project_path) = find_project_config(start) {
        return Ok(ConfigLocation {
            path: project_path,
            scope: ConfigScope::Project,
        });
    }
    Ok(ConfigLocation {
        path: global_config_path()?,
        scope: ConfigScope::Global,
    })
}

/// Reads the config at `location`, falling back to defaults when the file
/// does not exist.
pub fn load_config(location: &ConfigLocation) -> Result<BoardConfig> {
    if !location.path.exists() {
        return Ok(BoardConfig::default());
    }
    let data = fs::read_to_string(&location.path)
        .with_context(|| format!("reading {:?}", location.path))?;
    let config: BoardConfig = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing config file {:?}", location.path))?;
    config
        .validate()
        .with_context(|| format!("invalid config in {:?}", location.path))?;
    Ok(config)
}

pub fn save_config(location: &ConfigLocation, config: &BoardConfig) -> Result<()> {
    if let Some(parent) = location.path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let serialized = serde_yaml::to_string(config).context("serializing config")?;
    fs::write(&location.path, serialized)
        .with_context(|| format!("writing {:?}", location.path))?;
    Ok(())
}

/// Log directory: the configured one, or `logs/` under the platform data dir.
pub fn log_dir(config: &LogConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.dir {
        return Ok(dir.clone());
    }
    let dirs = project_dirs()?;
    Ok(dirs.data_dir().join("logs"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(PROJECT_DIR).join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

fn global_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "dragboard").context("locating data directory")
}
