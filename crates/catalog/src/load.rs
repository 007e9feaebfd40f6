// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Loading theorem files.
//!
//! Each theorem lives in its own file under the theorem directory:
//!
//! ```text
//! ---
//! # Pythagorean theorem
//!
//! wikidata: Q11518
//! msc_classification: "51"
//! wikipedia_links:
//!   - "[[Pythagorean theorem]]"
//! lean:
//!   - status: formalized
//!     library: L
//!     url: https://leanprover-community.github.io/1000.html#Q11518
//! ---
//! ```
//!
//! One bad file does not abort the batch: under [`LoadPolicy::Lenient`] it is
//! logged and kept in [`LoadedCatalog::rejected`].

use crate::error::{CatalogError, Result};
use crate::model::{
    FormalizationEntry, Formalizations, ProofAssistant, TheoremRecord, is_valid_wikidata,
    scalar_string,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Log and collect rejections, keep loading.
    #[default]
    Lenient,
    /// Fail on the first rejection.
    Strict,
}

/// Records that loaded, plus the reasons others did not.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub records: Vec<TheoremRecord>,
    pub rejected: Vec<CatalogError>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTheorem {
    wikidata: String,
    #[serde(default)]
    id_suffix: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    msc_classification: String,
    wikipedia_links: Vec<String>,
    #[serde(default)]
    isabelle: Option<Vec<FormalizationEntry>>,
    #[serde(default)]
    hol_light: Option<Vec<FormalizationEntry>>,
    #[serde(default)]
    coq: Option<Vec<FormalizationEntry>>,
    #[serde(default)]
    lean: Option<Vec<FormalizationEntry>>,
    #[serde(default)]
    metamath: Option<Vec<FormalizationEntry>>,
    #[serde(default)]
    mizar: Option<Vec<FormalizationEntry>>,
}

impl RawTheorem {
    fn into_record(self, heading: Option<String>) -> TheoremRecord {
        let mut formalizations = Formalizations::default();
        for (assistant, entries) in [
            (ProofAssistant::Isabelle, self.isabelle),
            (ProofAssistant::HolLight, self.hol_light),
            (ProofAssistant::Coq, self.coq),
            (ProofAssistant::Lean, self.lean),
            (ProofAssistant::Metamath, self.metamath),
            (ProofAssistant::Mizar, self.mizar),
        ] {
            formalizations.set(assistant, entries.unwrap_or_default());
        }

        TheoremRecord {
            wikidata: self.wikidata,
            id_suffix: self.id_suffix.filter(|s| !s.is_empty()),
            msc_classification: self.msc_classification,
            wikipedia_links: self.wikipedia_links,
            formalizations,
            heading,
        }
    }
}

/// The `---` delimited block at the top of a theorem file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// `# Title` or `## Title` line, verbatim.
    pub heading_line: Option<&'a str>,
    /// YAML between the delimiters.
    pub body: String,
}

impl FrontMatter<'_> {
    /// Heading text without its `#` marker.
    pub fn heading(&self) -> Option<String> {
        self.heading_line
            .map(|line| line.trim_start_matches('#').trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// `#` or `##`, defaulting to `#`.
    pub fn heading_marker(&self) -> &str {
        self.heading_line
            .and_then(|line| line.split_whitespace().next())
            .filter(|marker| marker.chars().all(|c| c == '#'))
            .unwrap_or("#")
    }
}

/// Split a theorem file into its front matter. Anything after the closing
/// `---` is ignored.
pub fn split_front_matter<'a>(file: &str, contents: &'a str) -> Result<FrontMatter<'a>> {
    let mut lines = contents.lines().skip_while(|line| line.trim().is_empty());

    match lines.next() {
        Some(line) if line.trim_end() == "---" => {}
        _ => return Err(CatalogError::malformed(file, "expected opening '---' line")),
    }

    let mut heading_line = None;
    let mut body = String::new();
    let mut first = true;
    for line in lines {
        if line.trim_end() == "---" {
            return Ok(FrontMatter { heading_line, body });
        }
        if first && line.starts_with('#') {
            heading_line = Some(line.trim_end());
        }
        first = false;
        body.push_str(line);
        body.push('\n');
    }

    Err(CatalogError::malformed(file, "missing closing '---' line"))
}

/// Parse one theorem file. `file` names it in error messages.
pub fn parse_record(file: &str, contents: &str) -> Result<TheoremRecord> {
    let front = split_front_matter(file, contents)?;
    if front.body.trim().is_empty() {
        return Err(CatalogError::malformed(file, "empty front matter"));
    }

    let raw: RawTheorem = serde_yaml_ng::from_str(&front.body)
        .map_err(|e| CatalogError::malformed(file, e.to_string()))?;

    if !is_valid_wikidata(&raw.wikidata) {
        return Err(CatalogError::malformed(
            file,
            format!(
                "invalid wikidata identifier '{}': must be the letter 'Q' followed by a number",
                raw.wikidata
            ),
        ));
    }

    Ok(raw.into_record(front.heading()))
}

/// Load every `*.md` file in `dir`, in file-name order.
///
/// Duplicate display identifiers are rejected; the first file wins.
pub fn load_records(dir: &Path, policy: LoadPolicy) -> Result<LoadedCatalog> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut catalog = LoadedCatalog::default();
    let mut seen: HashMap<String, String> = HashMap::new();

    for path in paths {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let outcome = std::fs::read_to_string(&path)
            .map_err(|e| CatalogError::malformed(&file, format!("unreadable: {}", e)))
            .and_then(|contents| parse_record(&file, &contents))
            .and_then(|record| {
                let id = record.display_id();
                match seen.get(&id) {
                    Some(first) => Err(CatalogError::DuplicateRecord {
                        id,
                        first: first.clone(),
                        second: file.clone(),
                    }),
                    None => {
                        seen.insert(id, file.clone());
                        Ok(record)
                    }
                }
            });

        match outcome {
            Ok(record) => {
                let id = record.display_id();
                diagnostics::debug!("Loaded {id} from {file}", id: id.as_str(), file: file.as_str());
                catalog.records.push(record);
            }
            Err(err) if policy == LoadPolicy::Strict => return Err(err),
            Err(err) => {
                let reason = err.to_string();
                diagnostics::warn!("Skipping theorem file {file}: {reason}", file: file.as_str(), reason: reason.as_str());
                catalog.rejected.push(err);
            }
        }
    }

    diagnostics::info!(
        "Loaded {loaded} theorem records, rejected {rejected}",
        loaded: catalog.records.len(),
        rejected: catalog.rejected.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormalizationDate, FormalizationStatus, Library};

    const PYTHAGORAS: &str = r#"---
# Pythagorean theorem

wikidata: Q11518
msc_classification: "51"
wikipedia_links:
  - "[[Pythagorean theorem]]"
isabelle:
  - status: formalized
    library: L
    url: https://isa-afp.org/entries/Pythagoras.html
    authors:
      - Alice
lean:
  - status: formalized
    library: L
    url: https://leanprover-community.github.io/1000.html#Q11518
    date: 2019-05
  - status: statement
    library: X
    url: https://example.org/pythagoras
coq:
---
"#;

    #[test]
    fn test_parse_full_record() {
        let record = parse_record("Q11518.md", PYTHAGORAS).expect("parse");
        assert_eq!(record.wikidata, "Q11518");
        assert_eq!(record.id_suffix, None);
        assert_eq!(record.msc_classification, "51");
        assert_eq!(record.heading.as_deref(), Some("Pythagorean theorem"));

        let lean = record.formalizations.get(ProofAssistant::Lean);
        assert_eq!(lean.len(), 2);
        assert_eq!(lean[0].date, Some(FormalizationDate::Month(2019, 5)));
        assert_eq!(lean[1].status, FormalizationStatus::Statement);
        assert_eq!(lean[1].library, Library::External);

        let isabelle = record.formalizations.get(ProofAssistant::Isabelle);
        assert_eq!(isabelle[0].authors, Some(vec!["Alice".to_string()]));
        assert!(record.formalizations.get(ProofAssistant::Coq).is_empty());
        assert!(record.formalizations.get(ProofAssistant::Mizar).is_empty());
    }

    #[test]
    fn test_unquoted_msc_keeps_two_digits() {
        let text = "---\nwikidata: Q1\nmsc_classification: 05\nwikipedia_links: []\n---\n";
        let record = parse_record("Q1.md", text).expect("parse");
        assert_eq!(record.msc_classification, "05");
        assert_eq!(record.heading, None);
    }

    #[test]
    fn test_missing_required_field() {
        let text = "---\nwikidata: Q1\nwikipedia_links: []\n---\n";
        let err = parse_record("Q1.md", text).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { .. }));
        assert!(err.to_string().contains("msc_classification"));
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let text = "---\nwikidata: Q1\nmsc_classification: \"11\"\nwikipedia_links: []\nlean:\n  - status: proved\n    library: L\n    url: u\n---\n";
        let err = parse_record("Q1.md", text).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRecord { ref file, .. } if file == "Q1.md"));
    }

    #[test]
    fn test_unknown_proof_assistant_key_is_malformed() {
        let text = "---\nwikidata: Q1\nmsc_classification: \"11\"\nwikipedia_links: []\nagda: []\n---\n";
        assert!(parse_record("Q1.md", text).is_err());
    }

    #[test]
    fn test_invalid_wikidata() {
        let text = "---\nwikidata: P31\nmsc_classification: \"11\"\nwikipedia_links: []\n---\n";
        let err = parse_record("P31.md", text).unwrap_err();
        assert!(err.to_string().contains("letter 'Q'"));
    }

    #[test]
    fn test_front_matter_delimiters() {
        assert!(split_front_matter("a", "wikidata: Q1\n").is_err());
        assert!(split_front_matter("a", "---\nwikidata: Q1\n").is_err());

        let front = split_front_matter("a", "\n---\n## Sub theorem\nx: 1\n---\nbody text\n")
            .expect("split");
        assert_eq!(front.heading().as_deref(), Some("Sub theorem"));
        assert_eq!(front.heading_marker(), "##");
        assert_eq!(front.body, "## Sub theorem\nx: 1\n");
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).expect("write fixture");
    }

    fn minimal(id: &str, suffix: Option<&str>) -> String {
        let suffix = suffix
            .map(|s| format!("id_suffix: {}\n", s))
            .unwrap_or_default();
        format!(
            "---\n# T\nwikidata: {}\n{}msc_classification: \"11\"\nwikipedia_links: []\n---\n",
            id, suffix
        )
    }

    #[test]
    fn test_lenient_load_collects_rejections() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "Q1.md", &minimal("Q1", None));
        write(tmp.path(), "Q2.md", "---\nwikidata: Q2\n---\n");
        write(tmp.path(), "Q3.md", &minimal("Q3", None));
        write(tmp.path(), "notes.txt", "not a theorem");

        let catalog = load_records(tmp.path(), LoadPolicy::Lenient).expect("load");
        let ids: Vec<_> = catalog.records.iter().map(|r| r.wikidata.as_str()).collect();
        assert_eq!(ids, ["Q1", "Q3"]);
        assert_eq!(catalog.rejected.len(), 1);
        assert!(catalog.rejected[0].to_string().contains("Q2.md"));
    }

    #[test]
    fn test_lenient_load_rejects_non_utf8_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "Q1.md", &minimal("Q1", None));
        std::fs::write(tmp.path().join("Q2.md"), b"---\n\xff\xfe\n---\n").expect("write bytes");

        let catalog = load_records(tmp.path(), LoadPolicy::Lenient).expect("load");
        assert_eq!(catalog.records.len(), 1);
        assert_eq!(catalog.rejected.len(), 1);
        assert!(matches!(
            &catalog.rejected[0],
            CatalogError::MalformedRecord { file, .. } if file == "Q2.md"
        ));

        let err = load_records(tmp.path(), LoadPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("Q2.md"));
    }

    #[test]
    fn test_strict_load_fails_on_first_rejection() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "Q1.md", &minimal("Q1", None));
        write(tmp.path(), "Q2.md", "no front matter");

        let err = load_records(tmp.path(), LoadPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("Q2.md"));
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(tmp.path(), "Q5.md", &minimal("Q5", None));
        write(tmp.path(), "Q5X.md", &minimal("Q5", Some("X")));
        write(tmp.path(), "Q5_again.md", &minimal("Q5", None));

        let catalog = load_records(tmp.path(), LoadPolicy::Lenient).expect("load");
        assert_eq!(catalog.records.len(), 2);
        assert!(matches!(
            &catalog.rejected[..],
            [CatalogError::DuplicateRecord { id, first, second }]
                if id == "Q5" && first == "Q5.md" && second == "Q5_again.md"
        ));
    }
}
