use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use catalog::{CatalogConfig, LoadPolicy, LoadedCatalog, MscLabels, load_records};

use crate::error_utils::ErrorContext;
use crate::template_utils::expand_yaml_template;

/// Everything a command needs to locate configuration and data.
///
/// Paths written in `catalog.yaml` are relative to the file itself;
/// command-line overrides are taken as given.
#[derive(Debug, Clone, Default)]
pub struct CatalogContext {
    pub config_path: Option<PathBuf>,
    pub variables: HashMap<String, String>,
    pub theorems: Option<PathBuf>,
    pub msc: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl CatalogContext {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            ..Self::default()
        }
    }

    /// Read, expand and validate the configuration, or the defaults without one.
    pub fn load_config(&self) -> Result<CatalogConfig> {
        let Some(path) = &self.config_path else {
            return Ok(CatalogConfig::default());
        };
        let path_str = path.display().to_string();
        let raw = std::fs::read_to_string(path).file_context("read", &path_str)?;
        let expanded = expand_yaml_template(&path_str, &raw, &self.variables)?;
        let config = CatalogConfig::from_yaml(&expanded).config_context(&path_str)?;
        diagnostics::debug!("Loaded configuration {path} with {views} views", path: path_str.as_str(), views: config.views.len());
        Ok(config)
    }

    fn config_base(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    fn resolve(&self, configured: &str) -> PathBuf {
        self.config_base().join(configured)
    }

    pub fn theorems_dir(&self, config: &CatalogConfig) -> PathBuf {
        self.theorems
            .clone()
            .unwrap_or_else(|| self.resolve(&config.theorems))
    }

    pub fn msc_path(&self, config: &CatalogConfig) -> Option<PathBuf> {
        self.msc
            .clone()
            .or_else(|| config.msc.as_deref().map(|msc| self.resolve(msc)))
    }

    pub fn output_dir(&self, config: &CatalogConfig) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.resolve(&config.output))
    }
}

/// Load the theorem directory, reporting each rejected file through `output`.
pub fn load_theorems<F>(dir: &Path, policy: LoadPolicy, handler: &mut F) -> Result<LoadedCatalog>
where
    F: FnMut(&str),
{
    let catalog = load_records(dir, policy).load_context(&dir.display().to_string())?;
    for rejected in &catalog.rejected {
        handler(&format!("warning: {}", rejected));
    }
    Ok(catalog)
}

/// The MSC label table, or an empty one when none is configured.
pub fn load_msc(path: Option<&Path>) -> Result<MscLabels> {
    match path {
        Some(path) => MscLabels::load(path).file_context("read MSC table", &path.display().to_string()),
        None => Ok(MscLabels::default()),
    }
}
