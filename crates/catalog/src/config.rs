// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Catalog configuration, parsed from `catalog.yaml` after template expansion.

use crate::error::{CatalogError, Result};
use crate::layouts::is_known_layout;
use crate::links::WIKIPEDIA_BASE;
use crate::model::ProofAssistant;
use crate::render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Top-level configuration.
///
/// ```yaml
/// site:
///   title: "1000+ theorems"
///   layout: page
///
/// theorems: "_thm"
/// msc: "_data/msc.yaml"
/// output: "_site"
///
/// views:
///   - name: all
///     file: index.html
///     title: "All theorems"
///   - name: formalized
///     file: formalized.html
///     only_formalized: true
///     columns: [isabelle, lean]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub site: SiteMeta,
    /// Directory holding one `*.md` file per theorem
    #[serde(default = "default_theorems")]
    pub theorems: String,
    /// MSC code to label table
    #[serde(default)]
    pub msc: Option<String>,
    /// Directory the views are written to
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_wikipedia_base")]
    pub wikipedia_base: String,
    #[serde(default = "default_views")]
    pub views: Vec<ViewConfig>,
}

/// Site-wide metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    #[serde(default = "default_layout")]
    pub layout: String,
}

/// One rendered table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    pub name: String,
    /// Output file name, relative to `output`
    pub file: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub only_formalized: bool,
    /// Proof-assistant columns; empty means all of them
    #[serde(default)]
    pub columns: Vec<ProofAssistant>,
}

fn default_theorems() -> String {
    "_thm".to_string()
}

fn default_output() -> String {
    "_site".to_string()
}

fn default_layout() -> String {
    "page".to_string()
}

fn default_wikipedia_base() -> String {
    WIKIPEDIA_BASE.to_string()
}

fn default_views() -> Vec<ViewConfig> {
    vec![
        ViewConfig {
            name: "all".to_string(),
            file: "index.html".to_string(),
            title: Some("All theorems".to_string()),
            only_formalized: false,
            columns: Vec::new(),
        },
        ViewConfig {
            name: "formalized".to_string(),
            file: "formalized.html".to_string(),
            title: Some("Formalized theorems".to_string()),
            only_formalized: true,
            columns: Vec::new(),
        },
    ]
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            site: SiteMeta {
                title: "1000+ theorems".to_string(),
                layout: default_layout(),
            },
            theorems: default_theorems(),
            msc: None,
            output: default_output(),
            wikipedia_base: default_wikipedia_base(),
            views: default_views(),
        }
    }
}

impl CatalogConfig {
    /// Parse and validate already-expanded YAML.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: CatalogConfig = serde_yaml_ng::from_str(text)
            .map_err(|e| CatalogError::config(format!("invalid catalog.yaml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(CatalogError::config("site title cannot be empty"));
        }
        if !is_known_layout(&self.site.layout) {
            return Err(CatalogError::config(format!(
                "unknown layout '{}': expected 'page' or 'fragment'",
                self.site.layout
            )));
        }
        if self.views.is_empty() {
            return Err(CatalogError::config("at least one view is required"));
        }

        let mut files = BTreeSet::new();
        for view in &self.views {
            if !is_relative_file(&view.file) {
                return Err(CatalogError::config(format!(
                    "view '{}' has an invalid file name '{}'",
                    view.name, view.file
                )));
            }
            if !files.insert(view.file.as_str()) {
                return Err(CatalogError::config(format!(
                    "views write the same file '{}'",
                    view.file
                )));
            }
        }
        Ok(())
    }
}

impl ViewConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn render_options(&self, wikipedia_base: &str) -> RenderOptions {
        let columns = if self.columns.is_empty() {
            ProofAssistant::ALL.to_vec()
        } else {
            self.columns.clone()
        };
        RenderOptions {
            columns,
            only_formalized: self.only_formalized,
            wikipedia_base: wikipedia_base.to_string(),
            caption: None,
        }
    }
}

/// A non-empty path that stays below the output directory.
fn is_relative_file(file: &str) -> bool {
    let path = Path::new(file);
    !file.trim().is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}
