// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Two-way sync of Lean formalization data with mathlib's `1000.yaml`.
//!
//! Downstream: generate the mathlib file from the theorem directory.
//! Upstream: read a mathlib file and rewrite the `lean` list of theorem
//! files whose data differs. Only Lean data is ever touched.

use crate::error::{CatalogError, Result};
use crate::links::theorem_title;
use crate::load::{parse_record, split_front_matter};
use crate::model::{
    FormalizationDate, FormalizationEntry, FormalizationStatus, Library, ProofAssistant,
    TheoremRecord, is_valid_display_id, opt_scalar_string,
};
use crate::order::sort_records;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// mathlib's rendered 1000-theorems page; entries link to `#<id>` anchors.
pub const MATHLIB_1000_URL: &str = "https://leanprover-community.github.io/1000.html";

/// One entry of mathlib's `1000.yaml`.
///
/// `decl`, `decls` and `statement` name Lean declarations; only their
/// presence matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownstreamRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decl: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decls: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Names joined with " and "
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The Lean entry mathlib should describe: first standard-library entry,
/// else first main-library entry, else the first entry.
pub fn choose_lean_entry(entries: &[FormalizationEntry]) -> Option<&FormalizationEntry> {
    entries
        .iter()
        .find(|e| e.library == Library::Standard)
        .or_else(|| entries.iter().find(|e| e.library == Library::Main))
        .or_else(|| entries.first())
}

/// Downstream entry for one theorem.
pub fn downstream_entry(record: &TheoremRecord) -> DownstreamRecord {
    let mut entry = DownstreamRecord {
        title: Some(theorem_title(&record.wikipedia_links).unwrap_or_else(|| record.display_id())),
        ..DownstreamRecord::default()
    };

    let lean = record.formalizations.get(ProofAssistant::Lean);
    let Some(chosen) = choose_lean_entry(lean) else {
        return entry;
    };
    if lean.len() > 1 {
        let id = record.display_id();
        diagnostics::warn!(
            "Theorem {id} has {count} Lean formalizations, exporting only one",
            id: id.as_str(),
            count: lean.len()
        );
    }

    // mathlib links its own declarations by name, which these URLs do not carry.
    let exports_url = chosen.status == FormalizationStatus::Formalized
        && matches!(chosen.library, Library::Standard | Library::External);
    if exports_url {
        entry.url = Some(chosen.url.clone());
    }
    entry.authors = chosen.authors_joined(" and ");
    entry.date = chosen.date.map(|d| d.to_string());
    entry.comment = chosen.comment.clone();
    entry
}

/// The mathlib `1000.yaml` text for `records`, sorted by wikidata identifier.
pub fn generate_downstream(records: &[TheoremRecord]) -> Result<String> {
    let mut chunks = Vec::with_capacity(records.len());
    for record in sort_records(records) {
        let mut single = BTreeMap::new();
        single.insert(record.display_id(), downstream_entry(record));
        chunks.push(serde_yaml_ng::to_string(&single)?);
    }
    Ok(chunks.join("\n"))
}

/// Parse mathlib's `1000.yaml`: a mapping from theorem id to entry.
pub fn parse_downstream(text: &str) -> Result<BTreeMap<String, DownstreamRecord>> {
    let parsed: Option<BTreeMap<String, DownstreamRecord>> = serde_yaml_ng::from_str(text)?;
    Ok(parsed.unwrap_or_default())
}

/// Canonical catalog URL of a theorem on mathlib's 1000 page.
pub fn mathlib_url(id: &str) -> String {
    format!("{}#{}", MATHLIB_1000_URL, id)
}

/// Catalog entry described by a downstream record, if any.
///
/// `statement` means statement-only in mathlib, `decl`/`decls` a full proof
/// in mathlib, a bare `url` a full proof elsewhere.
pub fn downstream_to_entry(id: &str, record: &DownstreamRecord) -> Result<Option<FormalizationEntry>> {
    let (status, library) = if record.statement.is_some() {
        (FormalizationStatus::Statement, Library::Main)
    } else if record.decl.is_some() || record.decls.is_some() {
        (FormalizationStatus::Formalized, Library::Main)
    } else if record.url.is_some() {
        (FormalizationStatus::Formalized, Library::External)
    } else {
        return Ok(None);
    };

    let authors = record.authors.as_deref().map(|joined| {
        joined
            .split(" and ")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect::<Vec<_>>()
    });
    let date = record
        .date
        .as_deref()
        .map(FormalizationDate::parse)
        .transpose()
        .map_err(|e| CatalogError::malformed(id, e))?;

    Ok(Some(FormalizationEntry {
        status,
        library,
        url: mathlib_url(id),
        authors: authors.filter(|a| !a.is_empty()),
        date,
        comment: record.comment.clone(),
    }))
}

/// What upstream sync does with one theorem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// No Lean data on either side.
    Nothing,
    /// New downstream formalization, none upstream.
    Add(FormalizationEntry),
    /// Both sides have one entry and they differ in `fields`.
    Replace {
        entry: FormalizationEntry,
        fields: Vec<&'static str>,
    },
    Unchanged,
    /// Upstream lists a formalization mathlib does not.
    UpstreamOnly,
    /// Upstream has several entries; left for manual merging.
    Ambiguous { upstream: usize },
}

impl SyncAction {
    /// The entry to write, for actions that rewrite the file.
    pub fn replacement(&self) -> Option<&FormalizationEntry> {
        match self {
            SyncAction::Add(entry) | SyncAction::Replace { entry, .. } => Some(entry),
            _ => None,
        }
    }
}

/// Names of the fields in which two entries differ.
pub fn differing_fields(a: &FormalizationEntry, b: &FormalizationEntry) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if a.status != b.status {
        fields.push("status");
    }
    if a.library != b.library {
        fields.push("library");
    }
    if a.url != b.url {
        fields.push("url");
    }
    if a.authors != b.authors {
        fields.push("authors");
    }
    if a.date != b.date {
        fields.push("date");
    }
    if a.comment != b.comment {
        fields.push("comment");
    }
    fields
}

pub fn compare_lean(downstream: Option<&FormalizationEntry>, upstream: &[FormalizationEntry]) -> SyncAction {
    match (downstream, upstream) {
        (None, []) => SyncAction::Nothing,
        (None, _) => SyncAction::UpstreamOnly,
        (Some(entry), []) => SyncAction::Add(entry.clone()),
        (Some(entry), [existing]) => {
            let fields = differing_fields(entry, existing);
            if fields.is_empty() {
                SyncAction::Unchanged
            } else {
                SyncAction::Replace {
                    entry: entry.clone(),
                    fields,
                }
            }
        }
        (Some(_), several) => SyncAction::Ambiguous {
            upstream: several.len(),
        },
    }
}

/// Replace the `lean` list of a theorem file with `entry`.
///
/// Other keys keep their values and order. The heading is regenerated from
/// the first Wikipedia link; YAML comments other than the heading are lost.
pub fn rewrite_lean(file: &str, contents: &str, entry: &FormalizationEntry) -> Result<String> {
    let front = split_front_matter(file, contents)?;
    let mut data: Value = serde_yaml_ng::from_str(&front.body)?;
    let Value::Mapping(mapping) = &mut data else {
        return Err(CatalogError::malformed(file, "front matter is not a mapping"));
    };

    let links: Vec<String> = match mapping.get("wikipedia_links") {
        Some(value) => serde_yaml_ng::from_value(value.clone())?,
        None => Vec::new(),
    };
    mapping.insert(
        Value::String(ProofAssistant::Lean.key().to_string()),
        serde_yaml_ng::to_value(vec![entry])?,
    );

    let title = theorem_title(&links)
        .or_else(|| front.heading())
        .unwrap_or_else(|| file.trim_end_matches(".md").to_string());
    let yaml = serde_yaml_ng::to_string(&data)?;
    Ok(format!("---\n{} {}\n\n{}---\n", front.heading_marker(), title, yaml))
}

/// Outcome of an upstream sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub actions: Vec<(String, SyncAction)>,
    /// Downstream ids without a theorem file
    pub missing: Vec<String>,
    pub failed: Vec<CatalogError>,
    /// Files rewritten (or that would be, in a dry run)
    pub rewritten: Vec<String>,
}

/// Apply a mathlib `1000.yaml` to the theorem files in `dir`.
pub fn sync_upstream(dir: &Path, downstream_text: &str, dry_run: bool) -> Result<SyncReport> {
    let downstream = parse_downstream(downstream_text)?;
    let mut report = SyncReport::default();

    for (id, record) in &downstream {
        let file = format!("{}.md", id);
        if !is_valid_display_id(id) {
            diagnostics::warn!("Skipping downstream key {id}: not a theorem identifier", id: id.as_str());
            report
                .failed
                .push(CatalogError::malformed(&file, "downstream key is not a theorem identifier"));
            continue;
        }
        let path = dir.join(&file);
        if !path.is_file() {
            diagnostics::warn!("No theorem file for downstream entry {id}", id: id.as_str());
            report.missing.push(id.clone());
            continue;
        }

        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| CatalogError::malformed(&file, format!("unreadable: {}", e)))
            .and_then(|contents| {
                let upstream = parse_record(&file, &contents)?;
                Ok((contents, upstream, downstream_to_entry(id, record)?))
            });
        let (contents, action) = match loaded {
            Ok((contents, upstream, entry)) => {
                let action = compare_lean(entry.as_ref(), upstream.formalizations.get(ProofAssistant::Lean));
                (contents, action)
            }
            Err(err) => {
                let reason = err.to_string();
                diagnostics::warn!("Skipping {id}: {reason}", id: id.as_str(), reason: reason.as_str());
                report.failed.push(err);
                continue;
            }
        };

        match &action {
            SyncAction::Replace { fields, .. } => {
                let fields = fields.join(", ");
                diagnostics::info!("Lean data of {id} differs in {fields}", id: id.as_str(), fields: fields.as_str());
            }
            SyncAction::Add(_) => {
                diagnostics::info!("New Lean formalization of {id} in mathlib", id: id.as_str());
            }
            SyncAction::UpstreamOnly => {
                diagnostics::warn!("Lean formalization of {id} is listed here but not in mathlib", id: id.as_str());
            }
            SyncAction::Ambiguous { upstream } => {
                diagnostics::warn!(
                    "Theorem {id} has {upstream} Lean formalizations here, merge manually",
                    id: id.as_str(),
                    upstream: *upstream
                );
            }
            SyncAction::Nothing | SyncAction::Unchanged => {
                diagnostics::debug!("Lean data of {id} is up to date", id: id.as_str());
            }
        }

        if let Some(entry) = action.replacement() {
            if !dry_run {
                std::fs::write(&path, rewrite_lean(&file, &contents, entry)?)?;
            }
            report.rewritten.push(id.clone());
        }
        report.actions.push((id.clone(), action));
    }

    diagnostics::info!(
        "Synced {total} downstream entries, rewrote {rewritten}",
        total: downstream.len(),
        rewritten: report.rewritten.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: FormalizationStatus, library: Library, url: &str) -> FormalizationEntry {
        FormalizationEntry::new(status, library, url)
    }

    fn theorem(id: &str, lean: Vec<FormalizationEntry>) -> TheoremRecord {
        TheoremRecord::new(id, "11")
            .with_link(format!("[[Theorem {}]]", id))
            .with_entries(ProofAssistant::Lean, lean)
    }

    #[test]
    fn test_choose_prefers_standard_then_main() {
        let ext = entry(FormalizationStatus::Formalized, Library::External, "x");
        let main = entry(FormalizationStatus::Formalized, Library::Main, "l");
        let stdlib = entry(FormalizationStatus::Formalized, Library::Standard, "s");

        assert_eq!(choose_lean_entry(&[ext.clone(), main.clone(), stdlib.clone()]), Some(&stdlib));
        assert_eq!(choose_lean_entry(&[ext.clone(), main.clone()]), Some(&main));
        assert_eq!(choose_lean_entry(&[ext.clone()]), Some(&ext));
        assert_eq!(choose_lean_entry(&[]), None);
    }

    #[test]
    fn test_downstream_url_rules() {
        let main = theorem("Q1", vec![entry(FormalizationStatus::Formalized, Library::Main, "l")]);
        assert_eq!(downstream_entry(&main).url, None);

        let external = theorem(
            "Q2",
            vec![entry(FormalizationStatus::Formalized, Library::External, "https://x.example")
                .with_authors(["Ann", "Bo"])],
        );
        let out = downstream_entry(&external);
        assert_eq!(out.url.as_deref(), Some("https://x.example"));
        assert_eq!(out.authors.as_deref(), Some("Ann and Bo"));
        assert_eq!(out.title.as_deref(), Some("Theorem Q2"));

        let statement = theorem("Q3", vec![entry(FormalizationStatus::Statement, Library::External, "x")]);
        assert_eq!(downstream_entry(&statement).url, None);
    }

    #[test]
    fn test_generate_downstream_is_sorted_and_keyed() {
        let mut later = theorem("Q5", vec![]);
        later.id_suffix = Some("X".to_string());
        let records = vec![
            later,
            theorem(
                "Q3",
                vec![entry(FormalizationStatus::Formalized, Library::Standard, "https://s.example")],
            ),
        ];
        let text = generate_downstream(&records).expect("generate");
        let q3 = text.find("Q3:").expect("Q3 key");
        let q5 = text.find("Q5X:").expect("Q5X key");
        assert!(q3 < q5);
        assert!(text.contains("https://s.example"));

        let parsed = parse_downstream(&text).expect("reparse");
        assert_eq!(parsed["Q5X"].title.as_deref(), Some("Theorem Q5"));
        assert_eq!(parsed["Q5X"].url, None);
    }

    #[test]
    fn test_downstream_to_entry_kinds() {
        let parsed = parse_downstream(
            r#"
Q1:
  title: One
  statement: Nat.one
Q2:
  title: Two
  decls:
    - Nat.two
    - Nat.two'
  authors: Ann and Bo
  date: 2020
Q3:
  title: Three
  url: https://x.example
Q4:
  title: Four
"#,
        )
        .expect("parse");

        let q1 = downstream_to_entry("Q1", &parsed["Q1"]).expect("q1").expect("entry");
        assert_eq!((q1.status, q1.library), (FormalizationStatus::Statement, Library::Main));

        let q2 = downstream_to_entry("Q2", &parsed["Q2"]).expect("q2").expect("entry");
        assert_eq!((q2.status, q2.library), (FormalizationStatus::Formalized, Library::Main));
        assert_eq!(q2.authors, Some(vec!["Ann".to_string(), "Bo".to_string()]));
        assert_eq!(q2.date, Some(FormalizationDate::Year(2020)));
        assert_eq!(q2.url, "https://leanprover-community.github.io/1000.html#Q2");

        let q3 = downstream_to_entry("Q3", &parsed["Q3"]).expect("q3").expect("entry");
        assert_eq!(q3.library, Library::External);

        assert_eq!(downstream_to_entry("Q4", &parsed["Q4"]).expect("q4"), None);
    }

    #[test]
    fn test_compare_lean_outcomes() {
        let a = entry(FormalizationStatus::Formalized, Library::Main, "u");
        let b = entry(FormalizationStatus::Statement, Library::Main, "v");

        assert_eq!(compare_lean(None, &[]), SyncAction::Nothing);
        assert_eq!(compare_lean(None, &[a.clone()]), SyncAction::UpstreamOnly);
        assert_eq!(compare_lean(Some(&a), &[]), SyncAction::Add(a.clone()));
        assert_eq!(compare_lean(Some(&a), &[a.clone()]), SyncAction::Unchanged);
        assert_eq!(
            compare_lean(Some(&a), &[b.clone()]),
            SyncAction::Replace {
                entry: a.clone(),
                fields: vec!["status", "url"],
            }
        );
        assert_eq!(
            compare_lean(Some(&a), &[a.clone(), b.clone()]),
            SyncAction::Ambiguous { upstream: 2 }
        );
    }

    #[test]
    fn test_rewrite_lean_preserves_other_keys() {
        let contents = "---\n## Old title\n\nwikidata: Q7\nmsc_classification: \"11\"\nwikipedia_links:\n  - \"[[Seven theorem]]\"\nisabelle:\n  - status: formalized\n    library: L\n    url: https://isa.example\nlean:\n  - status: statement\n    library: X\n    url: https://old.example\nmizar: []\n---\n";
        let new = entry(FormalizationStatus::Formalized, Library::Main, &mathlib_url("Q7"))
            .with_authors(["Ann"]);

        let rewritten = rewrite_lean("Q7.md", contents, &new).expect("rewrite");
        assert!(rewritten.starts_with("---\n## Seven theorem\n\n"));
        assert!(rewritten.ends_with("---\n"));
        assert!(!rewritten.contains("old.example"));

        let record = parse_record("Q7.md", &rewritten).expect("reparse");
        assert_eq!(record.formalizations.get(ProofAssistant::Lean), &[new][..]);
        assert_eq!(record.formalizations.get(ProofAssistant::Isabelle).len(), 1);

        let isabelle = rewritten.find("isabelle:").expect("isabelle");
        let lean = rewritten.find("lean:").expect("lean");
        let mizar = rewritten.find("mizar:").expect("mizar");
        assert!(isabelle < lean && lean < mizar);
    }

    #[test]
    fn test_sync_upstream_skips_bad_keys_and_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let thm = tmp.path().join("_thm");
        std::fs::create_dir(&thm).expect("mkdir");
        std::fs::write(
            thm.join("Q1.md"),
            "---\nwikidata: Q1\nmsc_classification: \"11\"\nwikipedia_links: []\n---\n",
        )
        .expect("write Q1");
        std::fs::write(thm.join("Q2.md"), b"---\n\xff\xfe\n---\n").expect("write Q2");
        std::fs::write(tmp.path().join("x.md"), "outside").expect("write x");

        let text = "Q1:\n  title: One\n  decl: One.one\nQ2:\n  title: Two\n  decl: Two.two\n\"../x\":\n  title: Escape\n  decl: Bad.bad\n";
        let report = sync_upstream(&thm, text, false).expect("sync");

        assert_eq!(report.rewritten, vec!["Q1".to_string()]);
        assert_eq!(report.failed.len(), 2);
        assert!(report.missing.is_empty());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("x.md")).expect("read x"),
            "outside"
        );
        let q1 = parse_record("Q1.md", &std::fs::read_to_string(thm.join("Q1.md")).expect("read Q1"))
            .expect("reparse");
        assert_eq!(q1.formalizations.get(ProofAssistant::Lean).len(), 1);
    }
}
