// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Catalog: theorem formalization tables
//!
//! Loads one front-matter file per theorem, orders and filters the records,
//! and renders HTML table views with Maud. Also keeps the Lean data in sync
//! with mathlib's `1000.yaml`.
//!
//! ## Usage
//!
//! ```bash
//! thmcat render --config catalog.yaml
//! thmcat downstream --theorems _thm
//! ```

pub mod config;
pub mod error;
pub mod layouts;
pub mod links;
pub mod load;
pub mod model;
pub mod msc;
pub mod order;
pub mod render;
pub mod sync;
pub mod views;

pub use config::{CatalogConfig, ViewConfig};
pub use error::{CatalogError, Result};
pub use links::{WikiLink, resolve_wikipedia_link};
pub use load::{LoadPolicy, LoadedCatalog, load_records, parse_record};
pub use model::{
    FormalizationDate, FormalizationEntry, FormalizationStatus, Formalizations, Library,
    ProofAssistant, TheoremRecord,
};
pub use msc::MscLabels;
pub use order::{filter_has_formalization, sort_records};
pub use render::{RenderOptions, TableRenderer, render, render_row};
pub use views::{RenderedView, build_views};
