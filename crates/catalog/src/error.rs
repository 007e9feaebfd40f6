// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

// Error types for catalog operations

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Missing required field, unknown field or enum value, bad identifier or date.
    #[error("Malformed record {file}: {message}")]
    MalformedRecord { file: String, message: String },

    #[error("Duplicate record {id}: {second} repeats the identifier of {first}")]
    DuplicateRecord {
        id: String,
        first: String,
        second: String,
    },

    /// Empty or malformed Wikipedia link specification.
    #[error("Unresolved Wikipedia link {spec:?}: {reason}")]
    UnresolvedLink { spec: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CatalogError {
    pub fn malformed(file: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::MalformedRecord {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn unresolved(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::UnresolvedLink {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CatalogError::Config {
            message: message.into(),
        }
    }
}
