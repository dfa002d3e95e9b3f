use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const FORMAT_RUNTIME_CONFIG_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    FORMAT_RUNTIME_CONFIG_SCHEMA_VERSION
}

fn default_include_builtins() -> bool {
    true
}

/// Runtime configuration for platform → format resolution.
///
/// `platforms` maps a platform identifier (matched case-insensitively) to a
/// format target string such as `slack-markdown` or `html`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct FormatRuntimeConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub default_format: Option<String>,
    #[serde(default = "default_include_builtins")]
    pub include_builtins: bool,
    #[serde(default)]
    pub platforms: BTreeMap<String, String>,
}

impl Default for FormatRuntimeConfig {
    fn default() -> Self {
        Self {
            schema_version: FORMAT_RUNTIME_CONFIG_SCHEMA_VERSION,
            default_format: None,
            include_builtins: true,
            platforms: BTreeMap::new(),
        }
    }
}

impl FormatRuntimeConfig {
    pub fn validate(&self) -> Result<(), FormatConfigError> {
        if self.schema_version != FORMAT_RUNTIME_CONFIG_SCHEMA_VERSION {
            return Err(FormatConfigError::UnsupportedSchemaVersion {
                expected: FORMAT_RUNTIME_CONFIG_SCHEMA_VERSION,
                got: self.schema_version,
            });
        }
        if let Some(default_format) = &self.default_format {
            if default_format.trim().is_empty() {
                return Err(FormatConfigError::EmptyTarget {
                    platform: "default_format".to_string(),
                });
            }
        }
        for (platform, target) in &self.platforms {
            if platform.trim().is_empty() {
                return Err(FormatConfigError::EmptyPlatform);
            }
            if target.trim().is_empty() {
                return Err(FormatConfigError::EmptyTarget {
                    platform: platform.clone(),
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, FormatConfigError> {
        let cfg: Self =
            serde_json::from_str(raw).map_err(|err| FormatConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(raw: &str) -> Result<Self, FormatConfigError> {
        let cfg: Self = serde_yaml_bw::from_str(raw)
            .map_err(|err| FormatConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file; `.yaml`/`.yml` files are read as YAML, everything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormatConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|err| FormatConfigError::Io(format!("{}: {err}", path.display())))?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);
        if is_yaml {
            Self::from_yaml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatConfigError {
    UnsupportedSchemaVersion { expected: u32, got: u32 },
    EmptyPlatform,
    EmptyTarget { platform: String },
    Parse(String),
    Io(String),
}

impl std::fmt::Display for FormatConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatConfigError::UnsupportedSchemaVersion { expected, got } => write!(
                f,
                "unsupported schema version: expected {expected}, got {got}"
            ),
            FormatConfigError::EmptyPlatform => write!(f, "platform identifier must not be empty"),
            FormatConfigError::EmptyTarget { platform } => {
                write!(f, "format target for `{platform}` must not be empty")
            }
            FormatConfigError::Parse(msg) => write!(f, "invalid format config: {msg}"),
            FormatConfigError::Io(msg) => write!(f, "failed to read format config: {msg}"),
        }
    }
}

impl std::error::Error for FormatConfigError {}
