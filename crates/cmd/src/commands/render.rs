// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::common::{CatalogContext, load_msc, load_theorems};
use crate::error_utils::ErrorContext;
use anyhow::Result;
use catalog::{LoadPolicy, build_views};
use std::path::Path;

const STYLE_CSS: &str = include_str!("../../assets/style.css");
const SORT_JS: &str = include_str!("../../assets/sort.js");

/// Render every configured view into the output directory.
///
/// With `strict`, the first malformed or duplicate theorem file aborts the
/// run; otherwise rejected files are reported and left out of the tables.
pub fn render_command<F>(ctx: &CatalogContext, strict: bool, mut handler: F) -> Result<()>
where
    F: FnMut(&str),
{
    let config = ctx.load_config()?;
    let theorems = ctx.theorems_dir(&config);
    let output_dir = ctx.output_dir(&config);
    let policy = if strict {
        LoadPolicy::Strict
    } else {
        LoadPolicy::Lenient
    };

    let catalog = load_theorems(&theorems, policy, &mut handler)?;
    let msc = load_msc(ctx.msc_path(&config).as_deref())?;

    let output_str = output_dir.display().to_string();
    std::fs::create_dir_all(&output_dir).file_context("create", &output_str)?;

    for view in build_views(&config, &catalog.records, &msc) {
        let path = output_dir.join(&view.file);
        write_file(&path, &view.html)?;
        handler(&format!("{}: {} theorems -> {}", view.name, view.rows, path.display()));
    }

    if config.site.layout != "fragment" {
        write_file(&output_dir.join("style.css"), STYLE_CSS)?;
        write_file(&output_dir.join("sort.js"), SORT_JS)?;
    }

    diagnostics::info!(
        "Rendered {records} theorems into {output}",
        records: catalog.records.len(),
        output: output_str.as_str()
    );
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let path_str = path.display().to_string();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).file_context("create", &path_str)?;
    }
    std::fs::write(path, contents).file_context("write", &path_str)
}
