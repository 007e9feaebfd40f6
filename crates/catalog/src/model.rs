// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Theorem records and their per-proof-assistant formalization entries.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml_ng::Value;
use std::fmt;
use std::str::FromStr;

/// The proof assistants tracked by the catalog, in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ProofAssistant {
    Isabelle,
    HolLight,
    Coq,
    Lean,
    Metamath,
    Mizar,
}

impl ProofAssistant {
    pub const ALL: [ProofAssistant; 6] = [
        ProofAssistant::Isabelle,
        ProofAssistant::HolLight,
        ProofAssistant::Coq,
        ProofAssistant::Lean,
        ProofAssistant::Metamath,
        ProofAssistant::Mizar,
    ];

    /// Key used in theorem files and configuration (`hol_light`, `lean`, ...).
    pub fn key(self) -> &'static str {
        match self {
            ProofAssistant::Isabelle => "isabelle",
            ProofAssistant::HolLight => "hol_light",
            ProofAssistant::Coq => "coq",
            ProofAssistant::Lean => "lean",
            ProofAssistant::Metamath => "metamath",
            ProofAssistant::Mizar => "mizar",
        }
    }

    /// Column header text.
    pub fn display_name(self) -> &'static str {
        match self {
            ProofAssistant::Isabelle => "Isabelle",
            ProofAssistant::HolLight => "HOL Light",
            ProofAssistant::Coq => "Coq/Rocq",
            ProofAssistant::Lean => "Lean",
            ProofAssistant::Metamath => "Metamath",
            ProofAssistant::Mizar => "Mizar",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ProofAssistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProofAssistant {
    type Err = String;

    /// Accepts the file key, the column name, and `hol-light` / `rocq` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "isabelle" => Ok(ProofAssistant::Isabelle),
            "hol_light" | "hollight" => Ok(ProofAssistant::HolLight),
            "coq" | "rocq" | "coq/rocq" => Ok(ProofAssistant::Coq),
            "lean" => Ok(ProofAssistant::Lean),
            "metamath" => Ok(ProofAssistant::Metamath),
            "mizar" => Ok(ProofAssistant::Mizar),
            _ => Err(format!("unknown proof assistant '{}'", s)),
        }
    }
}

impl TryFrom<String> for ProofAssistant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether the proof or only the statement was formalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormalizationStatus {
    Formalized,
    Statement,
}

impl FormalizationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FormalizationStatus::Formalized => "formalized",
            FormalizationStatus::Statement => "statement",
        }
    }
}

/// Library tier of a formalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Library {
    /// The standard library ("S")
    #[serde(rename = "S")]
    Standard,
    /// The main community library: AFP, HOL Light outside its standard
    /// library, mathcomp, mathlib, MML, set.mm ("L")
    #[serde(rename = "L")]
    Main,
    /// A dedicated repository outside both ("X")
    #[serde(rename = "X")]
    External,
}

impl Library {
    pub fn code(self) -> &'static str {
        match self {
            Library::Standard => "S",
            Library::Main => "L",
            Library::External => "X",
        }
    }
}

/// Formalization date, kept at the granularity it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormalizationDate {
    Year(i32),
    Month(i32, u32),
    Day(NaiveDate),
}

impl FormalizationDate {
    /// Parse `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        let parts: Vec<&str> = input.split('-').collect();
        let bad = || format!("invalid date '{}': expected YYYY, YYYY-MM or YYYY-MM-DD", input);

        let year = parts
            .first()
            .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(bad)?;

        match parts.len() {
            1 => Ok(FormalizationDate::Year(year)),
            2 => {
                let month = parts[1]
                    .parse::<u32>()
                    .ok()
                    .filter(|m| parts[1].len() == 2 && (1..=12).contains(m))
                    .ok_or_else(bad)?;
                Ok(FormalizationDate::Month(year, month))
            }
            3 => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(FormalizationDate::Day)
                .map_err(|_| bad()),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for FormalizationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormalizationDate::Year(y) => write!(f, "{:04}", y),
            FormalizationDate::Month(y, m) => write!(f, "{:04}-{:02}", y, m),
            FormalizationDate::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for FormalizationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FormalizationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = scalar_string(deserializer)?;
        FormalizationDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Render a YAML scalar as text. Unquoted `2019` or `05` arrive as numbers;
/// integers below 100 are zero-padded to two digits, the MSC code width.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_u64() {
            Some(v) if v < 100 => format!("{:02}", v),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a scalar, found {:?}", value)))
}

pub(crate) fn opt_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a scalar, found {:?}", value))
        }),
    }
}

/// One formalization of a theorem in one proof assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormalizationEntry {
    pub status: FormalizationStatus,
    pub library: Library,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<FormalizationDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FormalizationEntry {
    pub fn new(status: FormalizationStatus, library: Library, url: impl Into<String>) -> Self {
        Self {
            status,
            library,
            url: url.into(),
            authors: None,
            date: None,
            comment: None,
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = Some(authors.into_iter().map(Into::into).collect());
        self
    }

    /// Authors joined with `separator`, `None` when there are none.
    pub fn authors_joined(&self, separator: &str) -> Option<String> {
        self.authors
            .as_ref()
            .filter(|authors| !authors.is_empty())
            .map(|authors| authors.join(separator))
    }
}

/// Entry lists indexed by proof assistant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formalizations([Vec<FormalizationEntry>; 6]);

impl Formalizations {
    pub fn get(&self, assistant: ProofAssistant) -> &[FormalizationEntry] {
        &self.0[assistant.index()]
    }

    pub fn set(&mut self, assistant: ProofAssistant, entries: Vec<FormalizationEntry>) {
        self.0[assistant.index()] = entries;
    }

    /// Every proof assistant with its (possibly empty) entry list, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ProofAssistant, &[FormalizationEntry])> {
        ProofAssistant::ALL
            .into_iter()
            .map(move |assistant| (assistant, self.get(assistant)))
    }

    /// True when every entry list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }
}

/// A theorem and its formalizations, as read from one theorem file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TheoremRecord {
    /// Wikidata identifier: `Q` followed by digits.
    pub wikidata: String,
    /// `X` for an extra theorem on a Wikipedia page, `A`/`B`/... for
    /// several theorems on a page without a main one.
    pub id_suffix: Option<String>,
    pub msc_classification: String,
    /// `[[Page name]]` or `[[Page name|Displayed name]]`.
    pub wikipedia_links: Vec<String>,
    pub formalizations: Formalizations,
    /// The `# Title` comment at the top of the front matter.
    pub heading: Option<String>,
}

impl TheoremRecord {
    pub fn new(wikidata: impl Into<String>, msc_classification: impl Into<String>) -> Self {
        Self {
            wikidata: wikidata.into(),
            id_suffix: None,
            msc_classification: msc_classification.into(),
            wikipedia_links: Vec::new(),
            formalizations: Formalizations::default(),
            heading: None,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.id_suffix = Some(suffix.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.wikipedia_links.push(link.into());
        self
    }

    pub fn with_entries(mut self, assistant: ProofAssistant, entries: Vec<FormalizationEntry>) -> Self {
        self.formalizations.set(assistant, entries);
        self
    }

    /// Identifier shown to readers: wikidata id followed by the suffix, e.g. `Q12345X`.
    pub fn display_id(&self) -> String {
        match &self.id_suffix {
            Some(suffix) => format!("{}{}", self.wikidata, suffix),
            None => self.wikidata.clone(),
        }
    }

    pub fn has_formalization(&self) -> bool {
        !self.formalizations.is_empty()
    }
}

/// Check for `Q` followed by one or more decimal digits.
pub fn is_valid_wikidata(id: &str) -> bool {
    id.strip_prefix('Q')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Whether `id` is a display identifier: a wikidata id plus an optional letter suffix.
pub fn is_valid_display_id(id: &str) -> bool {
    is_valid_wikidata(id.trim_end_matches(|c: char| c.is_ascii_alphabetic()))
}
