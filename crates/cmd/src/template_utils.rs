//! Template expansion for `catalog.yaml`
//!
//! The configuration file is rendered with Tera before it is parsed, so it
//! can use variables passed with `-v key=value` and the `env` function.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Tera, Value};

/// Expand a YAML configuration file using Tera templates
///
/// `source` names the file in error messages, normally `catalog.yaml`.
///
/// # Example
///
/// ```text
/// # Input YAML with templates:
/// site:
///   title: "{{ title }}"
/// output: "{{ env(name='CATALOG_OUT', default='_site') }}"
///
/// # With variables: {"title": "1000+ theorems"}
/// # Output:
/// site:
///   title: "1000+ theorems"
/// output: "_site"
/// ```
pub fn expand_yaml_template(
    source: &str,
    yaml_content: &str,
    variables: &HashMap<String, String>,
) -> Result<String> {
    let mut tera = Tera::default();
    tera.register_function("env", env_function());

    let mut context = tera::Context::new();
    for (key, value) in variables {
        context.insert(key, value);
    }

    tera.render_str(yaml_content, &context).map_err(|e| {
        let mut error_parts = vec![format!("Template expansion of {} failed: {}", source, e)];

        let chain = collect_error_chain(&e);
        if chain.len() > 1 {
            error_parts.push(format!("Error chain ({} levels):", chain.len()));
            for (i, err_msg) in chain.iter().enumerate() {
                if i == 0 {
                    error_parts.push(format!("  → {}", err_msg));
                } else {
                    error_parts.push(format!("  ├─ Level {}: {}", i, err_msg));
                }
            }
        }

        if variables.is_empty() {
            error_parts.push("No template variables provided (use -v key=value to provide)".to_string());
        } else {
            let mut names: Vec<_> = variables.keys().collect();
            names.sort();
            error_parts.push(format!("Available variables: {:?}", names));
        }

        anyhow::anyhow!("{}", error_parts.join("\n"))
    })
}

/// Parse `key=value` pairs from the command line
pub fn parse_variables(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut variables = HashMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid variable '{}': expected key=value", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow::anyhow!("Invalid variable '{}': empty key", pair));
        }
        _ = variables.insert(key.to_string(), value.to_string());
    }
    Ok(variables)
}

/// Collect complete error chain as strings
fn collect_error_chain(err: &dyn std::error::Error) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();

    while let Some(err) = source {
        chain.push(err.to_string());
        source = err.source();
    }

    chain
}

/// Built-in function to read environment variables
///
/// - `{{ env(name="VAR_NAME") }}` - error if not set
/// - `{{ env(name="VAR_NAME", default="fallback") }}`
fn env_function() -> impl tera::Function {
    Box::new(
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let var_name = args
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| tera::Error::msg("env function requires 'name' parameter"))?;
            let default_value = args.get("default").and_then(|v| v.as_str());

            match std::env::var(var_name) {
                Ok(value) => Ok(Value::String(value)),
                Err(std::env::VarError::NotPresent) => match default_value {
                    Some(default) => Ok(Value::String(default.to_string())),
                    None => Err(tera::Error::msg(format!(
                        "Environment variable '{}' not set and no default provided",
                        var_name
                    ))),
                },
                Err(e) => Err(tera::Error::msg(format!(
                    "Failed to read environment variable '{}': {}",
                    var_name, e
                ))),
            }
        },
    )
}
