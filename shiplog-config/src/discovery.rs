//! Configuration file discovery
//!
//! Looks for `shiplog.{toml,yaml,yml,json}` in the global directory
//! (`~/.shiplog/`) and the project directory (`./.shiplog/`). Project files
//! override global ones when merged.

use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Directory name searched in the home and working directories
pub const CONFIG_DIR_NAME: &str = ".shiplog";

const CONFIG_FILE_NAMES: [&str; 4] = [
    "shiplog.toml",
    "shiplog.yaml",
    "shiplog.yml",
    "shiplog.json",
];

/// Represents a discovered configuration file with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Full path to the configuration file
    pub path: PathBuf,
    /// Detected format of the file (TOML, YAML, JSON)
    pub format: ConfigFormat,
    /// Scope indicating where the file was found
    pub scope: ConfigScope,
    /// Priority for ordering (higher values take precedence)
    pub priority: u8,
}

impl ConfigFile {
    pub fn new(path: PathBuf, format: ConfigFormat, scope: ConfigScope) -> Self {
        let priority = scope.priority();
        Self {
            path,
            format,
            scope,
            priority,
        }
    }
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }
}

/// Where a configuration file was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `~/.shiplog/`
    Global,
    /// `./.shiplog/`
    Project,
    /// A file named explicitly by the caller
    Explicit,
}

impl ConfigScope {
    /// Higher values override lower ones
    pub fn priority(self) -> u8 {
        match self {
            Self::Global => 10,
            Self::Project => 20,
            Self::Explicit => 30,
        }
    }
}

/// File discovery service for finding configuration files
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
    /// Fall back to the working and home directories when a directory is unset
    resolve_defaults: bool,
}

impl FileDiscovery {
    /// Directories are resolved at discovery time, not here.
    pub fn new() -> Self {
        debug!("FileDiscovery created");

        Self {
            project_dir: None,
            global_dir: None,
            resolve_defaults: true,
        }
    }

    /// Search only the given directories. `None` disables that scope.
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
            resolve_defaults: false,
        }
    }

    /// Discover all configuration files, lowest priority first.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let (project_dir, global_dir) = if self.resolve_defaults {
            (
                self.project_dir.clone().or_else(Self::resolve_project_dir),
                self.global_dir.clone().or_else(Self::resolve_global_dir),
            )
        } else {
            (self.project_dir.clone(), self.global_dir.clone())
        };

        let mut files = Vec::new();

        if let Some(ref global_dir) = global_dir {
            files.extend(self.search_directory(global_dir, ConfigScope::Global));
        }

        if let Some(ref project_dir) = project_dir {
            files.extend(self.search_directory(project_dir, ConfigScope::Project));
        }

        files.sort_by_key(|f| f.priority);

        debug!("Discovered {} configuration files", files.len());
        for file in &files {
            trace!("Found config: {} ({:?})", file.path.display(), file.format);
        }

        files
    }

    fn search_directory(&self, dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.exists() {
            debug!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        if !dir.is_dir() {
            warn!("Path exists but is not a directory: {}", dir.display());
            return Vec::new();
        }

        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .filter_map(|candidate| {
                let format = ConfigFormat::from_path(&candidate)?;
                Some(ConfigFile::new(candidate, format, scope))
            })
            .collect()
    }

    fn resolve_project_dir() -> Option<PathBuf> {
        let dir = std::env::current_dir().ok()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }

    fn resolve_global_dir() -> Option<PathBuf> {
        let dir = dirs::home_dir()?.join(CONFIG_DIR_NAME);
        dir.is_dir().then_some(dir)
    }
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}
