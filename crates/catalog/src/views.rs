// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Rendering every configured view of a catalog.

use crate::config::CatalogConfig;
use crate::layouts::{LayoutContext, apply_layout};
use crate::model::TheoremRecord;
use crate::msc::MscLabels;
use crate::render::{TableRenderer, select_rows};

/// One finished view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub name: String,
    /// File name relative to the output directory
    pub file: String,
    pub html: String,
    pub rows: usize,
}

/// Render each view of `config` over `records`.
pub fn build_views(config: &CatalogConfig, records: &[TheoremRecord], msc: &MscLabels) -> Vec<RenderedView> {
    config
        .views
        .iter()
        .map(|view| {
            let options = view.render_options(&config.wikipedia_base);
            let rows = select_rows(records, &options).len();
            let table = TableRenderer::new(msc, &options).render(records).into_string();
            let html = apply_layout(
                &config.site.layout,
                &LayoutContext {
                    title: view.title(),
                    site_title: &config.site.title,
                    content: &table,
                    rows,
                },
            );
            diagnostics::debug!("Rendered view {view} with {rows} rows", view: view.name.as_str(), rows: rows);
            RenderedView {
                name: view.name.clone(),
                file: view.file.clone(),
                html,
                rows,
            }
        })
        .collect()
}
