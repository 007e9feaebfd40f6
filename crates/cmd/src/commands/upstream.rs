use crate::common::CatalogContext;
use crate::error_utils::ErrorContext;
use anyhow::Result;
use catalog::sync::{SyncAction, sync_upstream};
use std::path::Path;

/// Import Lean data from a mathlib `1000.yaml` into the theorem files.
pub fn upstream_command<F>(ctx: &CatalogContext, input: &Path, dry_run: bool, mut handler: F) -> Result<()>
where
    F: FnMut(&str),
{
    let config = ctx.load_config()?;
    let theorems = ctx.theorems_dir(&config);
    let input_str = input.display().to_string();
    let text = std::fs::read_to_string(input).file_context("read", &input_str)?;

    let report = sync_upstream(&theorems, &text, dry_run)
        .with_context_fmt("Failed to sync", &input_str)?;

    for (id, action) in &report.actions {
        if let Some(line) = describe_action(id, action) {
            handler(&line);
        }
    }
    for id in &report.missing {
        handler(&format!("{}: no theorem file", id));
    }
    for err in &report.failed {
        handler(&format!("warning: {}", err));
    }

    let verb = if dry_run { "Would rewrite" } else { "Rewrote" };
    handler(&format!("{} {} theorem files", verb, report.rewritten.len()));
    Ok(())
}

fn describe_action(id: &str, action: &SyncAction) -> Option<String> {
    match action {
        SyncAction::Add(_) => Some(format!("{}: add Lean formalization", id)),
        SyncAction::Replace { fields, .. } => {
            Some(format!("{}: update {}", id, fields.join(", ")))
        }
        SyncAction::UpstreamOnly => Some(format!("{}: not in mathlib", id)),
        SyncAction::Ambiguous { upstream } => Some(format!(
            "{}: {} Lean entries, merge manually",
            id, upstream
        )),
        SyncAction::Nothing | SyncAction::Unchanged => None,
    }
}
