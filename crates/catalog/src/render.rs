// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Maud table markup for catalog views.
//!
//! Columns are MSC, Name, then one column per configured proof assistant.
//! A formalization cell holds one anchor per entry: the library code as text,
//! the entry URL as target, the authors as tooltip.

use crate::links::{WIKIPEDIA_BASE, resolve_or_fallback};
use crate::model::{FormalizationEntry, ProofAssistant, TheoremRecord};
use crate::msc::MscLabels;
use crate::order::{filter_has_formalization, sort_records};
use maud::{Markup, html};

const WIKIDATA_BASE: &str = "https://www.wikidata.org/wiki/";

/// What a table view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Proof-assistant columns, in display order.
    pub columns: Vec<ProofAssistant>,
    /// Keep only records with at least one formalization.
    pub only_formalized: bool,
    pub wikipedia_base: String,
    pub caption: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            columns: ProofAssistant::ALL.to_vec(),
            only_formalized: false,
            wikipedia_base: WIKIPEDIA_BASE.to_string(),
            caption: None,
        }
    }
}

/// Records a view shows, in display order.
pub fn select_rows<'a>(records: &'a [TheoremRecord], options: &RenderOptions) -> Vec<&'a TheoremRecord> {
    let sorted = sort_records(records);
    if options.only_formalized {
        filter_has_formalization(&sorted)
    } else {
        sorted
    }
}

/// Renders rows and tables against one MSC table and one set of options.
pub struct TableRenderer<'a> {
    msc: &'a MscLabels,
    options: &'a RenderOptions,
}

impl<'a> TableRenderer<'a> {
    pub fn new(msc: &'a MscLabels, options: &'a RenderOptions) -> Self {
        Self { msc, options }
    }

    pub fn render_header(&self) -> Markup {
        html! {
            thead {
                tr {
                    th class="msc" { "MSC" }
                    th class="name" data-sort-key="id" { "Name" }
                    @for assistant in &self.options.columns {
                        th class=(assistant.key()) { (assistant.display_name()) }
                    }
                }
            }
        }
    }

    /// One `<tr>`: MSC cell, name cell, then a cell per configured column.
    pub fn render_row(&self, record: &TheoremRecord) -> Markup {
        let id = record.display_id();
        let msc_label = self.msc.label(&record.msc_classification);
        let links: Vec<_> = record
            .wikipedia_links
            .iter()
            .map(|spec| resolve_or_fallback(spec, &id))
            .collect();

        html! {
            tr id=(id) {
                td class="msc" title=[msc_label] { (record.msc_classification) }
                td class="name" data-sort=(id) {
                    @for (i, link) in links.iter().enumerate() {
                        @if i > 0 { ", " }
                        a href=(link.url(&self.options.wikipedia_base)) { (link.label) }
                    }
                    @if links.is_empty() { (id) }
                    " "
                    a class="wikidata" href=(format!("{}{}", WIKIDATA_BASE, record.wikidata)) { (id) }
                }
                @for assistant in &self.options.columns {
                    (render_cell(*assistant, record.formalizations.get(*assistant)))
                }
            }
        }
    }

    /// The full table: header plus the selected rows.
    pub fn render(&self, records: &[TheoremRecord]) -> Markup {
        let rows = select_rows(records, self.options);
        html! {
            table class="sortable theorems" {
                @if let Some(caption) = &self.options.caption {
                    caption { (caption) }
                }
                (self.render_header())
                tbody {
                    @for record in rows {
                        (self.render_row(record))
                    }
                }
            }
        }
    }
}

fn render_cell(assistant: ProofAssistant, entries: &[FormalizationEntry]) -> Markup {
    html! {
        td class=(assistant.key()) {
            @for (i, entry) in entries.iter().enumerate() {
                @if i > 0 { " " }
                a class=(entry.status.as_str()) href=(entry.url) title=[entry.authors_joined(", ")] {
                    (entry.library.code())
                }
            }
        }
    }
}

/// Render a row with all defaults but `columns`.
pub fn render_row(record: &TheoremRecord, columns: &[ProofAssistant]) -> Markup {
    let msc = MscLabels::default();
    let options = RenderOptions {
        columns: columns.to_vec(),
        ..RenderOptions::default()
    };
    TableRenderer::new(&msc, &options).render_row(record)
}

/// Render a table view of `records`.
pub fn render(records: &[TheoremRecord], msc: &MscLabels, options: &RenderOptions) -> Markup {
    TableRenderer::new(msc, options).render(records)
}
