// Error handling utilities to eliminate repetitive error mapping patterns

use anyhow::{Result, anyhow};

/// Extension trait for Results to provide standardized error mapping
/// Eliminates repetitive `.map_err(|e| anyhow!("Failed to ..."))` patterns
pub trait ErrorContext<T> {
    /// Map error with a context message for common "Failed to..." patterns
    fn with_context_msg(self, msg: &str) -> Result<T>;

    /// Map error with a formatted context message
    fn with_context_fmt(self, msg: &str, args: &dyn std::fmt::Display) -> Result<T>;

    /// Common error mapping for file operations
    fn file_context(self, operation: &str, path: &str) -> Result<T>;

    /// Common error mapping for loading theorem records
    fn load_context(self, dir: &str) -> Result<T>;

    /// Common error mapping for configuration files
    fn config_context(self, path: &str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_context_msg(self, msg: &str) -> Result<T> {
        self.map_err(|e| anyhow!("{}: {}", msg, e))
    }

    fn with_context_fmt(self, msg: &str, args: &dyn std::fmt::Display) -> Result<T> {
        self.map_err(|e| anyhow!("{} {}: {}", msg, args, e))
    }

    fn file_context(self, operation: &str, path: &str) -> Result<T> {
        self.with_context_fmt(&format!("Failed to {}", operation), &path)
    }

    fn load_context(self, dir: &str) -> Result<T> {
        self.with_context_fmt("Failed to load theorems from", &dir)
    }

    fn config_context(self, path: &str) -> Result<T> {
        self.with_context_fmt("Invalid configuration", &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_file_context() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let result: std::result::Result<(), _> = Err(io_error);

        let mapped = result.file_context("write", "_site/index.html");
        assert!(
            mapped
                .expect_err("expected error")
                .to_string()
                .contains("Failed to write _site/index.html: file not found")
        );
    }

    #[test]
    fn test_load_context() {
        let result: std::result::Result<(), _> = Err("duplicate record Q1");
        let mapped = result.load_context("_thm");
        assert_eq!(
            mapped.expect_err("expected error").to_string(),
            "Failed to load theorems from _thm: duplicate record Q1"
        );
    }
}
