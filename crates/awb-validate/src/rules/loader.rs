//! Rule File Loader
//!
//! Reads rule collections from JSON or YAML files and writes manifests back
//! out. A file holds either a bare list of rules or a document with a
//! `rules` key (an exported manifest loads as-is).

use awb_domain::rules::{Rule, RuleManifest};
use awb_domain::{Error, Result};
use std::path::{Path, PathBuf};

/// On-disk encoding of a rule file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFileFormat {
    Json,
    Yaml,
}

impl RuleFileFormat {
    /// Format from the file extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(Error::invalid_argument(format!(
                "unsupported rule file extension: {}",
                path.display()
            ))),
        }
    }
}

/// Decode rules from text
pub fn parse_rules(content: &str, format: RuleFileFormat, origin: &str) -> Result<Vec<Rule>> {
    let document: serde_json::Value = match format {
        RuleFileFormat::Json => serde_json::from_str(content)
            .map_err(|e| Error::parse(origin, e.to_string()))?,
        RuleFileFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::parse(origin, e.to_string()))?,
    };
    let rules = match document {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut map) => map.remove("rules").ok_or_else(|| {
            Error::parse(origin, "expected a list of rules or a document with 'rules'")
        })?,
        serde_json::Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(Error::parse(
                origin,
                "expected a list of rules or a document with 'rules'",
            ));
        }
    };
    serde_json::from_value(rules).map_err(|e| Error::parse(origin, e.to_string()))
}

/// Loader for rule files and directories of rule files
#[derive(Debug, Clone)]
pub struct RuleFileLoader {
    root: PathBuf,
}

impl RuleFileLoader {
    /// Loader resolving relative paths against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Load one rule file
    pub fn load_file(&self, path: &Path) -> Result<Vec<Rule>> {
        let path = self.resolve(path);
        let format = RuleFileFormat::from_path(&path)?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::io_with_source(format!("failed to read rule file {}", path.display()), e)
        })?;
        let rules = parse_rules(&content, format, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), count = rules.len(), "rules loaded");
        Ok(rules)
    }

    /// Load every rule file in a directory, in file-name order
    ///
    /// Files with other extensions are skipped.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<Rule>> {
        let dir = self.resolve(dir);
        let entries = std::fs::read_dir(&dir).map_err(|e| {
            Error::io_with_source(format!("failed to read rule directory {}", dir.display()), e)
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && RuleFileFormat::from_path(path).is_ok())
            .collect();
        files.sort();

        let mut rules = Vec::new();
        for file in files {
            rules.extend(self.load_file(&file)?);
        }
        Ok(rules)
    }

    /// Write a manifest, encoded by the target extension
    pub fn write_manifest(&self, path: &Path, manifest: &RuleManifest) -> Result<()> {
        let path = self.resolve(path);
        let content = match RuleFileFormat::from_path(&path)? {
            RuleFileFormat::Json => serde_json::to_string_pretty(manifest)?,
            RuleFileFormat::Yaml => serde_yaml::to_string(manifest)
                .map_err(|e| Error::internal(format!("failed to encode manifest: {e}")))?,
        };
        std::fs::write(&path, content).map_err(|e| {
            Error::io_with_source(format!("failed to write manifest {}", path.display()), e)
        })?;
        tracing::info!(path = %path.display(), rules = manifest.rules.len(), "manifest written");
        Ok(())
    }
}

impl Default for RuleFileLoader {
    fn default() -> Self {
        Self::new(".")
    }
}
