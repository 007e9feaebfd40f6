// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Maud page layouts for rendered views.
//!
//! Selected by `site.layout` in `catalog.yaml`: `page` wraps the table in a
//! complete HTML document, `fragment` emits the table alone for inclusion in
//! a site built elsewhere.

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Tool version baked into generated HTML as `<meta name="generator">`.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Context passed to layout functions.
pub struct LayoutContext<'a> {
    /// View title
    pub title: &'a str,
    /// Site title (from catalog.yaml)
    pub site_title: &'a str,
    /// Rendered table markup
    pub content: &'a str,
    /// Number of theorems in the table
    pub rows: usize,
}

/// Apply a named layout. Unknown names fall back to `page`.
pub fn apply_layout(name: &str, ctx: &LayoutContext) -> String {
    match name {
        "fragment" => ctx.content.to_string(),
        _ => page_layout(ctx).into_string(),
    }
}

/// Whether `name` is a known layout.
pub fn is_known_layout(name: &str) -> bool {
    matches!(name, "page" | "fragment")
}

/// Standalone document: title, count line, table, and the column sorter.
fn page_layout(ctx: &LayoutContext) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="generator" content=(format!("thmcat v{}", VERSION));
                title { (ctx.title) " — " (ctx.site_title) }
                link rel="stylesheet" href="style.css";
            }
            body {
                main class="catalog" {
                    h1 { (ctx.title) }
                    p class="count" { (ctx.rows) " theorems" }
                    (PreEscaped(ctx.content))
                }
                script src="sort.js" defer {}
            }
        }
    }
}
