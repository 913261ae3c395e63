//! File-based flag source (YAML or JSON)
//!
//! Supports a user-level (~/.config/kube-gate/bootstrap.yaml) and a
//! workspace-level (config/bootstrap.yaml) property file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_yaml::Value;

use super::traits::{FlagError, FlagResult, FlagSource};

/// File level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLevel {
    /// User-level file (~/.config/kube-gate/bootstrap.yaml)
    User,
    /// Workspace-level file (config/bootstrap.yaml under the workspace root)
    Workspace,
}

impl FileLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileLevel::User => "user",
            FileLevel::Workspace => "workspace",
        }
    }
}

/// On-disk format of a property file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Pick the format from the file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// Flag source backed by a YAML or JSON property file
///
/// Nested maps are flattened into dotted keys, so both of these set the
/// root flag:
///
/// ```yaml
/// spring:
///   cloud:
///     kubernetes:
///       enabled: false
/// ```
///
/// ```yaml
/// spring.cloud.kubernetes.enabled: false
/// ```
///
/// The file is read when the source is created. A missing file is an empty
/// source; a file that fails to parse is an error.
///
/// # Example
///
/// ```no_run
/// use kube_gate_core::flags::FileFlagSource;
///
/// let user = FileFlagSource::user()?;
/// let workspace = FileFlagSource::workspace("/path/to/app")?;
/// # Ok::<(), kube_gate_core::flags::FlagError>(())
/// ```
pub struct FileFlagSource {
    path: PathBuf,
    level: FileLevel,
    name: String,
    values: RwLock<HashMap<String, String>>,
}

impl FileFlagSource {
    /// Create a file source for a specific path and load it
    pub fn new(path: impl Into<PathBuf>, level: FileLevel) -> FlagResult<Self> {
        let source = Self {
            path: path.into(),
            level,
            name: format!("file:{}", level.as_str()),
            values: RwLock::new(HashMap::new()),
        };
        source.reload()?;
        Ok(source)
    }

    /// User-level source (~/.config/kube-gate/bootstrap.yaml)
    pub fn user() -> FlagResult<Self> {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("kube-gate").join("bootstrap.yaml"), FileLevel::User)
    }

    /// Workspace-level source (config/bootstrap.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> FlagResult<Self> {
        let path = workspace_root.as_ref().join("config").join("bootstrap.yaml");
        Self::new(path, FileLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> FileLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Number of properties currently loaded
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-read the file from disk, replacing the loaded properties
    ///
    /// On error the previously loaded properties are kept.
    pub fn reload(&self) -> FlagResult<usize> {
        let values = self.load()?;
        let count = values.len();
        *self.values.write() = values;
        Ok(count)
    }

    fn load(&self) -> FlagResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| FlagError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        parse_properties(&content, FileFormat::from_path(&self.path))
            .map_err(|message| FlagError::Parse {
                path: self.path.display().to_string(),
                message,
            })
    }
}

impl std::fmt::Debug for FileFlagSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileFlagSource")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

impl FlagSource for FileFlagSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

/// Parse property file content into flattened dotted keys
pub fn parse_properties(content: &str, format: FileFormat) -> Result<HashMap<String, String>, String> {
    let mut out = HashMap::new();
    if content.trim().is_empty() {
        return Ok(out);
    }

    let root: Value = match format {
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
        FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
    };

    match root {
        Value::Mapping(_) | Value::Null => flatten("", &root, &mut out),
        _ => return Err("top level must be a mapping".to_string()),
    }
    Ok(out)
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{i}]"), item, out);
            }
        }
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(k) = scalar_key(k) else { continue };
                let full = if prefix.is_empty() { k } else { format!("{prefix}.{k}") };
                flatten(&full, v, out);
            }
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, out),
    }
}

fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
