// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Wikipedia link specifications: `[[Page]]`, `[[Page|Label]]`, `[[Page]]s`.

use crate::error::{CatalogError, Result};
use url::Url;

/// Article path of the English Wikipedia.
pub const WIKIPEDIA_BASE: &str = "https://en.wikipedia.org/wiki/";

/// A resolved link: the page it points to and the text shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    pub target: String,
    pub label: String,
}

impl WikiLink {
    /// Article URL under `base`.
    pub fn url(&self, base: &str) -> String {
        wikipedia_url(base, &self.target)
    }
}

/// Resolve a link specification into target page and label.
///
/// The brackets are optional. A trailing run of letters after `]]` is
/// appended to the label, as MediaWiki renders `[[Theorem]]s`.
pub fn resolve_wikipedia_link(spec: &str) -> Result<WikiLink> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::unresolved(spec, "empty link"));
    }

    let (inner, trail) = match trimmed.strip_prefix("[[") {
        Some(rest) => {
            let Some(end) = rest.find("]]") else {
                return Err(CatalogError::unresolved(spec, "missing closing ]]"));
            };
            let trail = &rest[end + 2..];
            if !trail.chars().all(char::is_alphabetic) {
                return Err(CatalogError::unresolved(spec, "unexpected text after ]]"));
            }
            (&rest[..end], trail)
        }
        None => (trimmed, ""),
    };

    if inner.contains("[[") || inner.contains("]]") {
        return Err(CatalogError::unresolved(spec, "unbalanced brackets"));
    }

    let (target, label) = match inner.split_once('|') {
        Some((target, label)) => (target.trim(), label.trim()),
        None => (inner.trim(), inner.trim()),
    };
    if target.is_empty() {
        return Err(CatalogError::unresolved(spec, "empty page name"));
    }
    if label.is_empty() {
        return Err(CatalogError::unresolved(spec, "empty label"));
    }
    if label.contains('|') {
        return Err(CatalogError::unresolved(spec, "more than one '|'"));
    }

    Ok(WikiLink {
        target: target.to_string(),
        label: format!("{}{}", label, trail),
    })
}

/// Resolve a link, or fall back to its raw text (`fallback_id` when the text
/// is empty) as both target and label.
pub fn resolve_or_fallback(spec: &str, fallback_id: &str) -> WikiLink {
    match resolve_wikipedia_link(spec) {
        Ok(link) => link,
        Err(err) => {
            let reason = err.to_string();
            diagnostics::warn!("Rendering raw link text for {id}: {reason}", id: fallback_id, reason: reason.as_str());
            let raw = match spec.trim() {
                "" => fallback_id,
                raw => raw,
            };
            WikiLink {
                target: raw.to_string(),
                label: raw.to_string(),
            }
        }
    }
}

/// Embed a page name as a path segment under `base`; spaces become underscores.
pub fn wikipedia_url(base: &str, target: &str) -> String {
    let page = target.replace(' ', "_");
    match Url::parse(base) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(&page);
            }
            url.to_string()
        }
        Err(_) => format!("{}{}", base, page),
    }
}

/// Human title of a theorem: the label of its first link.
pub fn theorem_title(links: &[String]) -> Option<String> {
    links
        .first()
        .and_then(|spec| resolve_wikipedia_link(spec).ok())
        .map(|link| link.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_link() {
        let link = resolve_wikipedia_link("[[Fermat's Last Theorem]]").expect("resolve");
        assert_eq!(link.target, "Fermat's Last Theorem");
        assert_eq!(link.label, "Fermat's Last Theorem");
    }

    #[test]
    fn test_piped_link() {
        let link = resolve_wikipedia_link("[[Fermat's Last Theorem|FLT]]").expect("resolve");
        assert_eq!(link.target, "Fermat's Last Theorem");
        assert_eq!(link.label, "FLT");
    }

    #[test]
    fn test_link_trail_and_missing_brackets() {
        let link = resolve_wikipedia_link("[[Sylow theorem]]s").expect("resolve");
        assert_eq!(link.target, "Sylow theorem");
        assert_eq!(link.label, "Sylow theorems");

        let link = resolve_wikipedia_link("Ham sandwich theorem").expect("resolve");
        assert_eq!(link.target, "Ham sandwich theorem");
    }

    #[test]
    fn test_malformed_links() {
        for spec in ["", "   ", "[[Foo", "[[Foo]] bar", "[[|Label]]", "[[Foo|]]", "[[a|b|c]]", "Foo]]"] {
            assert!(
                matches!(resolve_wikipedia_link(spec), Err(CatalogError::UnresolvedLink { .. })),
                "{spec:?} should not resolve"
            );
        }
    }

    #[test]
    fn test_fallback_uses_raw_text_or_identifier() {
        let link = resolve_or_fallback("[[Broken", "Q9");
        assert_eq!(link.label, "[[Broken");
        assert_eq!(link.target, "[[Broken");

        let link = resolve_or_fallback("", "Q9X");
        assert_eq!(link.label, "Q9X");
    }

    #[test]
    fn test_url_encoding() {
        assert_eq!(
            wikipedia_url(WIKIPEDIA_BASE, "Fermat's Last Theorem"),
            "https://en.wikipedia.org/wiki/Fermat's_Last_Theorem"
        );
        assert_eq!(
            wikipedia_url(WIKIPEDIA_BASE, "Gödel's incompleteness theorems"),
            "https://en.wikipedia.org/wiki/G%C3%B6del's_incompleteness_theorems"
        );
        assert_eq!(
            wikipedia_url("https://de.wikipedia.org/wiki", "Satz/Beweis"),
            "https://de.wikipedia.org/wiki/Satz%2FBeweis"
        );
    }

    #[test]
    fn test_theorem_title() {
        let links = vec!["[[Four color theorem|Four colour theorem]]".to_string()];
        assert_eq!(theorem_title(&links).as_deref(), Some("Four colour theorem"));
        assert_eq!(theorem_title(&[]), None);
    }
}
