use crate::common::{CatalogContext, load_theorems};
use crate::error_utils::ErrorContext;
use anyhow::Result;
use catalog::LoadPolicy;
use catalog::sync::generate_downstream;
use std::path::Path;

/// Export the Lean formalizations in mathlib's `1000.yaml` format.
pub fn downstream_command<F>(ctx: &CatalogContext, output: &Path, mut handler: F) -> Result<()>
where
    F: FnMut(&str),
{
    let config = ctx.load_config()?;
    let theorems = ctx.theorems_dir(&config);
    let catalog = load_theorems(&theorems, LoadPolicy::Lenient, &mut handler)?;

    let yaml = generate_downstream(&catalog.records).with_context_msg("Failed to generate downstream YAML")?;
    std::fs::write(output, yaml).file_context("write", &output.display().to_string())?;

    handler(&format!(
        "Wrote {} entries to {}",
        catalog.records.len(),
        output.display()
    ));
    Ok(())
}
