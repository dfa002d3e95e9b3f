//! Platform identifier → preferred [`FormatTarget`] lookup.
//!
//! A [`FormatRegistry`] is an explicit table: populated from the built-in list,
//! a [`FormatRuntimeConfig`] or [`FormatRegistry::register`] calls. Lookups take
//! a read lock, registration a write lock.

use crate::errors::FormatError;
use crate::target::{self, FormatTarget};
use messaging_format_config::FormatRuntimeConfig;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, trace};

/// Platforms known out of the box.
pub const BUILTIN_PLATFORMS: &[(&str, &str)] = &[
    ("discord", target::DISCORD_MARKDOWN),
    ("slack", target::SLACK_MARKDOWN),
    ("symphony", target::SYMPHONY_MESSAGEML),
    ("matrix", target::HTML),
    ("irc", target::PLAINTEXT),
    ("email", target::HTML),
];

#[derive(Debug)]
pub struct FormatRegistry {
    formats: RwLock<HashMap<String, FormatTarget>>,
    fallback: FormatTarget,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FormatRegistry {
    /// Empty registry falling back to markdown.
    pub fn new() -> Self {
        Self {
            formats: RwLock::new(HashMap::new()),
            fallback: FormatTarget::MARKDOWN,
        }
    }

    pub fn with_builtins() -> Self {
        let formats = BUILTIN_PLATFORMS
            .iter()
            .map(|(platform, target)| ((*platform).to_string(), FormatTarget::new(*target)))
            .collect();
        Self {
            formats: RwLock::new(formats),
            fallback: FormatTarget::MARKDOWN,
        }
    }

    /// Build a registry from runtime config. Config entries override built-ins.
    pub fn from_config(config: &FormatRuntimeConfig) -> Result<Self, FormatError> {
        config.validate()?;
        let mut registry = if config.include_builtins {
            Self::with_builtins()
        } else {
            Self::new()
        };
        if let Some(default_format) = config.default_format.as_deref() {
            registry.fallback = non_blank_target("default_format", default_format)?;
        }
        for (platform, target) in &config.platforms {
            registry.register(platform, FormatTarget::parse(target))?;
        }
        debug!(
            platforms = config.platforms.len(),
            include_builtins = config.include_builtins,
            fallback = %registry.fallback,
            "applied format config"
        );
        Ok(registry)
    }

    /// Load a JSON or YAML config file and build a registry from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let config = FormatRuntimeConfig::from_path(path)?;
        Self::from_config(&config)
    }

    /// Built-ins with the fallback taken from `MESSAGING_FORMAT_TARGET` when set.
    pub fn from_env() -> Self {
        let registry = Self::with_builtins();
        match FormatTarget::from_env() {
            Some(target) => registry.with_fallback(target),
            None => registry,
        }
    }

    pub fn with_fallback(mut self, fallback: FormatTarget) -> Self {
        self.fallback = fallback;
        self
    }

    /// Map `platform` (case-insensitive) to `target`, replacing any earlier entry.
    pub fn register(&self, platform: &str, target: FormatTarget) -> Result<(), FormatError> {
        let key = normalize(platform);
        if key.is_empty() {
            return Err(FormatError::EmptyPlatform);
        }
        if target.as_str().trim().is_empty() {
            return Err(FormatError::EmptyTarget { platform: key });
        }
        debug!(platform = %key, target = %target, "registered platform format");
        self.formats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, target);
        Ok(())
    }

    pub fn unregister(&self, platform: &str) -> Option<FormatTarget> {
        self.formats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&normalize(platform))
    }

    /// Registered target for `platform`, or `None` when the platform is unknown.
    pub fn lookup(&self, platform: &str) -> Option<FormatTarget> {
        self.formats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&normalize(platform))
            .cloned()
    }

    /// Registered target for `platform`, or the fallback target.
    pub fn resolve(&self, platform: &str) -> FormatTarget {
        match self.lookup(platform) {
            Some(target) => {
                trace!(platform, target = %target, "resolved platform format");
                target
            }
            None => {
                debug!(platform, fallback = %self.fallback, "unknown platform, using fallback format");
                self.fallback.clone()
            }
        }
    }

    /// Registered platform identifiers, sorted.
    pub fn platforms(&self) -> Vec<String> {
        let mut platforms: Vec<String> = self
            .formats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        platforms.sort();
        platforms
    }

    pub fn fallback(&self) -> &FormatTarget {
        &self.fallback
    }
}

fn normalize(platform: &str) -> String {
    platform.trim().to_ascii_lowercase()
}

fn non_blank_target(platform: &str, value: &str) -> Result<FormatTarget, FormatError> {
    if value.trim().is_empty() {
        return Err(FormatError::EmptyTarget {
            platform: platform.to_string(),
        });
    }
    Ok(FormatTarget::parse(value))
}

static GLOBAL_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_builtins);

/// The process-wide registry used by [`FormattedMessage::render_for`](crate::FormattedMessage::render_for).
pub fn global_registry() -> &'static FormatRegistry {
    &GLOBAL_REGISTRY
}

/// Register a platform in the process-wide registry.
pub fn register_format(platform: &str, target: FormatTarget) -> Result<(), FormatError> {
    GLOBAL_REGISTRY.register(platform, target)
}

pub fn resolve_format(platform: &str) -> FormatTarget {
    GLOBAL_REGISTRY.resolve(platform)
}

pub fn lookup_format(platform: &str) -> Option<FormatTarget> {
    GLOBAL_REGISTRY.lookup(platform)
}
