// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! MSC code to label lookup, used only for cell tooltips.
//!
//! ```yaml
//! "05": Combinatorics
//! "11": Number theory
//! 51: Geometry
//! ```

use crate::error::{CatalogError, Result};
use crate::model::scalar_to_string;
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MscLabels {
    labels: BTreeMap<String, String>,
}

impl MscLabels {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: Value = serde_yaml_ng::from_str(text)?;
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            _ => return Err(CatalogError::config("MSC table must be a mapping of code to label")),
        };

        let mut labels = BTreeMap::new();
        for (key, label) in &mapping {
            let (Some(code), Some(label)) = (scalar_to_string(key), scalar_to_string(label)) else {
                return Err(CatalogError::config(format!(
                    "MSC table entry {:?}: {:?} is not a scalar pair",
                    key, label
                )));
            };
            labels.insert(code, label);
        }
        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let labels = Self::from_yaml(&text)?;
        diagnostics::debug!("Loaded {count} MSC labels", count: labels.len());
        Ok(labels)
    }

    pub fn insert(&mut self, code: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(code.into(), label.into());
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.labels.get(code.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_and_numeric_codes() {
        let labels = MscLabels::from_yaml("\"05\": Combinatorics\n51: Geometry\n").expect("parse");
        assert_eq!(labels.label("05"), Some("Combinatorics"));
        assert_eq!(labels.label("51"), Some("Geometry"));
        assert_eq!(labels.label("99"), None);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_empty_document() {
        assert!(MscLabels::from_yaml("").expect("parse").is_empty());
    }

    #[test]
    fn test_rejects_non_mapping() {
        assert!(matches!(
            MscLabels::from_yaml("- 05\n- 11\n"),
            Err(CatalogError::Config { .. })
        ));
        assert!(MscLabels::from_yaml("\"05\": [a, b]\n").is_err());
    }
}
