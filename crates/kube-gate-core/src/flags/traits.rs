//! Core traits and types for flag lookup

use std::fmt;

use thiserror::Error;

/// Dotted identifier naming a boolean setting
///
/// The three keys that drive gate resolution are provided as constants.
/// Any other dotted name can be wrapped with [`FlagKey::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagKey(&'static str);

impl FlagKey {
    /// Overall platform-integration enablement
    pub const ROOT: FlagKey = FlagKey("spring.cloud.kubernetes.enabled");
    /// ConfigMap-source enablement
    pub const CONFIG: FlagKey = FlagKey("spring.cloud.kubernetes.config.enabled");
    /// Secret-source enablement
    pub const SECRETS: FlagKey = FlagKey("spring.cloud.kubernetes.secrets.enabled");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Environment variable form of this key (`SPRING_CLOUD_KUBERNETES_ENABLED`)
    pub fn env_var_name(&self) -> String {
        relaxed_env_name(self.0)
    }
}

impl fmt::Display for FlagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Map a dotted property name to its environment variable form.
///
/// Dots become underscores, dashes are dropped and letters are upper-cased.
pub fn relaxed_env_name(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-')
        .map(|c| if c == '.' { '_' } else { c.to_ascii_uppercase() })
        .collect()
}

/// Information about where a flag value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    /// Whether the key has an explicit value
    pub set: bool,
    /// Which source provided the value (useful for chain sources)
    pub source: String,
}

impl FlagInfo {
    pub fn new(set: bool, source: impl Into<String>) -> Self {
        Self {
            set,
            source: source.into(),
        }
    }

    pub fn not_set() -> Self {
        Self {
            set: false,
            source: "none".to_string(),
        }
    }
}

/// Errors that can occur while reading flags
#[derive(Error, Debug)]
pub enum FlagError {
    #[error("Invalid boolean value '{value}' for {key} (from {origin})")]
    InvalidValue {
        key: String,
        value: String,
        origin: String,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type FlagResult<T> = Result<T, FlagError>;

/// Coerce a raw property value into a flag.
///
/// Accepts `true`/`on`/`yes`/`1` and `false`/`off`/`no`/`0`, ignoring case and
/// surrounding whitespace. An empty value counts as unset. Anything else is an
/// error naming the key, so a typo never silently falls back to the default.
pub fn parse_flag(key: &str, raw: &str, origin: &str) -> FlagResult<Option<bool>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(Some(true)),
        "false" | "off" | "no" | "0" => Ok(Some(false)),
        _ => Err(FlagError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            origin: origin.to_string(),
        }),
    }
}

/// Read-only lookup of raw property values
///
/// Implementations:
/// - `MemoryFlagSource`: In-memory, for tests and programmatic overrides
/// - `EnvFlagSource`: Snapshot of the process environment
/// - `FileFlagSource`: YAML or JSON property file
/// - `ChainFlagSource`: Ordered layers, first match wins
///
/// # Example
///
/// ```
/// use kube_gate_core::flags::{FlagKey, FlagSource, MemoryFlagSource};
///
/// let flags = MemoryFlagSource::new().with(FlagKey::ROOT.as_str(), "false");
/// assert_eq!(flags.get(&FlagKey::ROOT).unwrap(), Some(false));
/// assert_eq!(flags.get(&FlagKey::CONFIG).unwrap(), None);
/// ```
pub trait FlagSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Raw value for a dotted key, if explicitly set
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Look a flag up and coerce it to a boolean
    ///
    /// `Ok(None)` means the key is not set. A value that is not a boolean
    /// is reported as [`FlagError::InvalidValue`].
    fn get(&self, key: &FlagKey) -> FlagResult<Option<bool>> {
        match self.get_raw(key.as_str()) {
            Some(raw) => parse_flag(key.as_str(), &raw, self.name()),
            None => Ok(None),
        }
    }

    /// Trimmed, non-empty string value for a key
    fn get_string(&self, key: &str) -> Option<String> {
        self.get_raw(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Check if a key has an explicit value
    fn has(&self, key: &str) -> bool {
        self.get_raw(key).is_some()
    }

    /// Get information about a key
    fn get_info(&self, key: &str) -> FlagInfo {
        if self.has(key) {
            FlagInfo::new(true, self.name())
        } else {
            FlagInfo::not_set()
        }
    }
}
