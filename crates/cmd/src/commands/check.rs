use crate::common::{CatalogContext, load_theorems};
use anyhow::{Result, anyhow};
use catalog::LoadPolicy;

/// Load every theorem file and report each one that would be rejected.
///
/// Unlike `render --strict`, all files are examined before failing.
pub fn check_command<F>(ctx: &CatalogContext, mut handler: F) -> Result<()>
where
    F: FnMut(&str),
{
    let config = ctx.load_config()?;
    let theorems = ctx.theorems_dir(&config);
    let catalog = load_theorems(&theorems, LoadPolicy::Lenient, &mut handler)?;

    let formalized = catalog
        .records
        .iter()
        .filter(|record| !record.formalizations.is_empty())
        .count();
    handler(&format!(
        "{} theorems, {} with formalizations, {} rejected",
        catalog.records.len(),
        formalized,
        catalog.rejected.len()
    ));

    if catalog.rejected.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} theorem files in {} were rejected",
            catalog.rejected.len(),
            theorems.display()
        ))
    }
}
