//! Formatting options and their configuration files.
//!
//! Loads config from:
//! 1. Global: ~/.config/normalize/yang.toml
//! 2. Per-project: .normalize/yang.toml (overrides global)
//!
//! Example yang.toml:
//! ```toml
//! [format]
//! canonical_order = true
//! remove_unused_imports = true
//! line_length = 72
//! indent = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options consumed by the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    /// Reorder substatements into the grammar's canonical order.
    pub canonical_order: bool,
    /// Drop imports whose prefix is never used.
    pub remove_unused_imports: bool,
    /// Wrap heuristically at this length. `None` disables length-driven
    /// wrapping; narrative keywords still break.
    pub max_line_length: Option<usize>,
    /// Spaces per indent step.
    pub indent: usize,
    /// Keywords whose argument is a schema path and may be split between
    /// path tokens.
    pub path_keywords: Vec<String>,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            canonical_order: false,
            remove_unused_imports: false,
            max_line_length: None,
            indent: 2,
            path_keywords: Vec::new(),
        }
    }
}

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// `[format]` table. Unset keys leave the option unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub canonical_order: Option<bool>,
    pub remove_unused_imports: Option<bool>,
    pub line_length: Option<usize>,
    pub indent: Option<usize>,
    pub path_keywords: Option<Vec<String>>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct YangConfig {
    pub format: FormatConfig,
}

impl YangConfig {
    /// Load configuration for a project.
    ///
    /// Global config first, then `.normalize/yang.toml` under `root`.
    /// Missing files are skipped; unreadable or invalid ones are logged and
    /// skipped.
    pub fn load(root: &Path) -> Self {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    fn load_from(global: Option<&Path>, root: &Path) -> Self {
        let project = Self::project_config_path(root);
        global
            .into_iter()
            .chain(std::iter::once(project.as_path()))
            .filter_map(Self::load_optional)
            .fold(Self::default(), Self::merge)
    }

    fn load_optional(path: &Path) -> Option<Self> {
        match Self::load_file(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                None
            }
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        }
    }

    /// Load a single config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the global config path.
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("normalize").join("yang.toml"))
    }

    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(".normalize").join("yang.toml")
    }

    /// Merge another config into this one; keys set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        let (base, over) = (self.format, other.format);
        Self {
            format: FormatConfig {
                canonical_order: over.canonical_order.or(base.canonical_order),
                remove_unused_imports: over.remove_unused_imports.or(base.remove_unused_imports),
                line_length: over.line_length.or(base.line_length),
                indent: over.indent.or(base.indent),
                path_keywords: over.path_keywords.or(base.path_keywords),
            },
        }
    }

    /// Formatting options with this config applied over the defaults.
    pub fn options(&self) -> FormattingOptions {
        let defaults = FormattingOptions::default();
        let format = &self.format;
        FormattingOptions {
            canonical_order: format.canonical_order.unwrap_or(defaults.canonical_order),
            remove_unused_imports: format
                .remove_unused_imports
                .unwrap_or(defaults.remove_unused_imports),
            max_line_length: format.line_length.or(defaults.max_line_length),
            indent: format.indent.unwrap_or(defaults.indent),
            path_keywords: format.path_keywords.clone().unwrap_or(defaults.path_keywords),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "{content}").unwrap();
    }

    #[test]
    fn test_default_options() {
        let options = YangConfig::default().options();
        assert_eq!(options, FormattingOptions::default());
        assert_eq!(options.indent, 2);
        assert!(options.max_line_length.is_none());
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        write_config(
            &YangConfig::project_config_path(dir.path()),
            r#"
[format]
canonical_order = true
line_length = 72
"#,
        );

        let options = YangConfig::load_from(None, dir.path()).options();
        assert!(options.canonical_order);
        assert!(!options.remove_unused_imports);
        assert_eq!(options.max_line_length, Some(72));
        assert_eq!(options.indent, 2); // default
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global").join("yang.toml");
        write_config(
            &global,
            r#"
[format]
indent = 4
line_length = 100
remove_unused_imports = true
"#,
        );
        write_config(
            &YangConfig::project_config_path(dir.path()),
            r#"
[format]
line_length = 60
"#,
        );

        let options = YangConfig::load_from(Some(&global), dir.path()).options();
        assert_eq!(options.indent, 4);
        assert_eq!(options.max_line_length, Some(60));
        assert!(options.remove_unused_imports);
    }

    #[test]
    fn test_invalid_config_is_reported_and_skipped() {
        let dir = TempDir::new().unwrap();
        let path = YangConfig::project_config_path(dir.path());
        write_config(&path, "[format]\nindent = \"wide\"");

        assert!(matches!(
            YangConfig::load_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(YangConfig::load_from(None, dir.path()), YangConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = YangConfig::load_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
