//! cBioPortal case list files
//!
//! A case list is six `key: value` lines naming a typed group of sample
//! ids for one study. Stable id, category, name and description are all
//! derived from the study id and the list type.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Required fields, in output order
pub const CASE_LIST_FIELDS: [&str; 6] = [
    "case_list_category",
    "stable_id",
    "case_list_name",
    "case_list_description",
    "cancer_study_identifier",
    "case_list_ids",
];

/// Kind of samples a case list covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseListType {
    All,
    CnaSeq,
    Cna,
    Seq,
}

impl CaseListType {
    /// All list types
    pub const ALL: [CaseListType; 4] = [
        CaseListType::All,
        CaseListType::CnaSeq,
        CaseListType::Cna,
        CaseListType::Seq,
    ];

    /// Command-line tag for this type
    pub fn tag(self) -> &'static str {
        match self {
            CaseListType::All => "all",
            CaseListType::CnaSeq => "cnaseq",
            CaseListType::Cna => "cna",
            CaseListType::Seq => "seq",
        }
    }

    fn labels(self) -> Labels {
        match self {
            CaseListType::All => Labels {
                suffix: "_all",
                category: "all_cases_in_study",
                name: "All Tumors",
                description: "All tumor samples",
            },
            CaseListType::CnaSeq => Labels {
                suffix: "_cnaseq",
                category: "all_cases_with_mutation_and_cna_data",
                name: "Tumors with sequencing and CNA data",
                description: "All tumor samples that have CNA and sequencing data",
            },
            CaseListType::Cna => Labels {
                suffix: "_cna",
                category: "all_cases_with_cna_data",
                name: "Tumors CNA",
                description: "All tumors with CNA data",
            },
            CaseListType::Seq => Labels {
                suffix: "_sequenced",
                category: "all_cases_with_mutation_data",
                name: "Sequenced Tumors",
                description: "All sequenced tumors",
            },
        }
    }

    /// Look up a type by its `case_list_category` value
    pub fn from_category(category: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.labels().category == category)
            .ok_or_else(|| Error::UnknownCaseListCategory(category.to_string()))
    }
}

impl FromStr for CaseListType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| Error::InvalidCaseListType(s.to_string()))
    }
}

impl fmt::Display for CaseListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

struct Labels {
    suffix: &'static str,
    category: &'static str,
    name: &'static str,
    description: &'static str,
}

/// Fields derived from a study id and list type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedFields {
    pub stable_id: String,
    pub category: String,
    pub name: String,
    pub description: String,
}

/// Derive stable id, category, name and description for a case list
///
/// Fails on anything but the four known type tags.
pub fn derive_fields(type_tag: &str, study_id: &str) -> Result<DerivedFields> {
    let case_list_type: CaseListType = type_tag.parse()?;
    Ok(derived(case_list_type, study_id))
}

fn derived(case_list_type: CaseListType, study_id: &str) -> DerivedFields {
    let labels = case_list_type.labels();
    DerivedFields {
        stable_id: format!("{}{}", study_id, labels.suffix),
        category: labels.category.to_string(),
        name: labels.name.to_string(),
        description: labels.description.to_string(),
    }
}

/// Append `incoming` after `existing`, skipping ids already seen
///
/// Order is first-seen; duplicates inside either list collapse too.
pub fn merge_ids<S: AsRef<str>>(existing: &[S], incoming: &[S]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());

    for id in existing.iter().chain(incoming) {
        let id = id.as_ref();
        if seen.insert(id) {
            merged.push(id.to_string());
        }
    }
    merged
}

/// Split a comma-separated id list, dropping blank entries
pub fn parse_id_list(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// A typed group of sample ids for one study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseList {
    study_id: String,
    case_list_type: CaseListType,
    ids: Vec<String>,
}

impl CaseList {
    /// Create a case list; repeated ids are dropped
    pub fn new<S: AsRef<str>>(study_id: impl Into<String>, ids: &[S], case_list_type: CaseListType) -> Self {
        Self {
            study_id: study_id.into(),
            case_list_type,
            ids: merge_ids(&[], ids),
        }
    }

    /// Merge more ids into the list
    pub fn add_ids<S: AsRef<str>>(&mut self, ids: &[S]) {
        let incoming: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
        let existing: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        self.ids = merge_ids(&existing, &incoming);
    }

    pub fn study_id(&self) -> &str {
        &self.study_id
    }

    pub fn case_list_type(&self) -> CaseListType {
        self.case_list_type
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Derived stable id, category, name and description
    pub fn derived(&self) -> DerivedFields {
        derived(self.case_list_type, &self.study_id)
    }

    /// The `case_list_ids` value: ids joined by tabs
    pub fn ids_string(&self) -> String {
        self.ids.join("\t")
    }

    /// Every field keyed by its file name
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let derived = self.derived();
        BTreeMap::from([
            ("case_list_category", derived.category),
            ("stable_id", derived.stable_id),
            ("case_list_name", derived.name),
            ("case_list_description", derived.description),
            ("cancer_study_identifier", self.study_id.clone()),
            ("case_list_ids", self.ids_string()),
        ])
    }

    /// Render the six `key: value` lines in file order
    pub fn to_lines(&self) -> Vec<String> {
        let map = self.to_map();
        CASE_LIST_FIELDS
            .iter()
            .map(|field| format!("{}: {}", field, map[field]))
            .collect()
    }

    /// Rebuild a case list from its fields
    ///
    /// The type is taken from `case_list_category`; the stored stable id,
    /// name and description must match what that type derives. Stored ids
    /// are kept as found.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        for field in CASE_LIST_FIELDS {
            if !map.contains_key(field) {
                return Err(Error::MissingField(field.to_string()));
            }
        }

        let study_id = map["cancer_study_identifier"].clone();
        let case_list_type = CaseListType::from_category(&map["case_list_category"])?;

        let expected = derived(case_list_type, &study_id);
        for (field, value) in [
            ("stable_id", &expected.stable_id),
            ("case_list_name", &expected.name),
            ("case_list_description", &expected.description),
        ] {
            if &map[field] != value {
                return Err(Error::CaseListMismatch {
                    field: field.to_string(),
                    expected: value.clone(),
                    found: map[field].clone(),
                });
            }
        }

        let ids_str = &map["case_list_ids"];
        let ids = if ids_str.is_empty() {
            Vec::new()
        } else {
            ids_str.split('\t').map(String::from).collect()
        };

        Ok(Self {
            study_id,
            case_list_type,
            ids,
        })
    }

    /// Parse `key: value` lines
    ///
    /// Each line is split on its first colon and both sides are trimmed.
    /// Blank lines are ignored.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = line.split_once(':').ok_or_else(|| Error::MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            })?;
            map.insert(key.trim().to_string(), value.trim().to_string());
        }

        Self::from_map(&map)
    }

    /// Load a case list from a stream
    ///
    /// Fails with [`Error::CaseListMismatch`] when the stored stable id, name
    /// or description differ from what the category and study id derive.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        Self::from_lines(lines)
    }

    /// Write the six lines to a stream
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for line in self.to_lines() {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PI_123_ALL: [&str; 6] = [
        "case_list_category: all_cases_in_study",
        "stable_id: pi_123_all",
        "case_list_name: All Tumors",
        "case_list_description: All tumor samples",
        "cancer_study_identifier: pi_123",
        "case_list_ids: Sample1\tSample2",
    ];

    #[test]
    fn test_new_all() {
        let c = CaseList::new("pi_123", &["Sample1", "Sample2"], CaseListType::All);
        let derived = c.derived();

        assert_eq!(c.study_id(), "pi_123");
        assert_eq!(derived.category, "all_cases_in_study");
        assert_eq!(derived.stable_id, "pi_123_all");
        assert_eq!(derived.name, "All Tumors");
        assert_eq!(derived.description, "All tumor samples");
        assert_eq!(c.ids(), ["Sample1", "Sample2"]);
    }

    #[test]
    fn test_derive_fields_table() {
        let cnaseq = derive_fields("cnaseq", "pi_123").unwrap();
        assert_eq!(cnaseq.stable_id, "pi_123_cnaseq");
        assert_eq!(cnaseq.category, "all_cases_with_mutation_and_cna_data");
        assert_eq!(cnaseq.name, "Tumors with sequencing and CNA data");
        assert_eq!(
            cnaseq.description,
            "All tumor samples that have CNA and sequencing data"
        );

        let cna = derive_fields("cna", "pi_123").unwrap();
        assert_eq!(cna.stable_id, "pi_123_cna");
        assert_eq!(cna.category, "all_cases_with_cna_data");
        assert_eq!(cna.name, "Tumors CNA");
        assert_eq!(cna.description, "All tumors with CNA data");

        let seq = derive_fields("seq", "pi_123").unwrap();
        assert_eq!(seq.stable_id, "pi_123_sequenced");
        assert_eq!(seq.category, "all_cases_with_mutation_data");
        assert_eq!(seq.name, "Sequenced Tumors");
        assert_eq!(seq.description, "All sequenced tumors");
    }

    #[test]
    fn test_invalid_type_tag() {
        assert!(matches!(
            derive_fields("bogus", "pi_123"),
            Err(Error::InvalidCaseListType(tag)) if tag == "bogus"
        ));
        assert!("ALL".parse::<CaseListType>().is_err());
    }

    #[test]
    fn test_add_ids() {
        let mut c = CaseList::new("pi_123", &["Sample1", "Sample2"], CaseListType::All);
        c.add_ids(&["Sample3", "Sample4"]);
        assert_eq!(c.ids(), ["Sample1", "Sample2", "Sample3", "Sample4"]);
    }

    #[test]
    fn test_add_present_id_is_noop() {
        let mut c = CaseList::new("pi_123", &["Sample1", "Sample2"], CaseListType::All);
        c.add_ids(&["Sample2", "Sample1"]);
        assert_eq!(c.ids(), ["Sample1", "Sample2"]);
    }

    #[test]
    fn test_new_drops_repeated_ids() {
        let c = CaseList::new("pi_123", &["Sample1", "Sample1", "Sample2"], CaseListType::Seq);
        assert_eq!(c.ids(), ["Sample1", "Sample2"]);
    }

    #[test]
    fn test_ids_string() {
        let c = CaseList::new("pi_123", &["Sample1", "Sample2"], CaseListType::All);
        assert_eq!(c.ids_string(), "Sample1\tSample2");
    }

    #[test]
    fn test_to_lines() {
        let c = CaseList::new("pi_123", &["Sample1", "Sample2"], CaseListType::All);
        assert_eq!(c.to_lines(), PI_123_ALL);
    }

    #[test]
    fn test_from_lines() {
        let c = CaseList::from_lines(PI_123_ALL).unwrap();
        assert_eq!(
            c,
            CaseList::new("pi_123", &["Sample1", "Sample2"], CaseListType::All)
        );
    }

    #[test]
    fn test_read_from_stream() {
        let content = PI_123_ALL.join("\n") + "\n";
        let c = CaseList::read_from(content.as_bytes()).unwrap();
        assert_eq!(c.case_list_type(), CaseListType::All);
        assert_eq!(c.ids(), ["Sample1", "Sample2"]);
    }

    #[test]
    fn test_round_trip_lines() {
        let c = CaseList::from_lines(PI_123_ALL).unwrap();
        assert_eq!(c.to_lines(), PI_123_ALL);

        let mut out = Vec::new();
        c.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), PI_123_ALL.join("\n") + "\n");
    }

    #[test]
    fn test_missing_field() {
        let lines: Vec<&str> = PI_123_ALL
            .iter()
            .copied()
            .filter(|l| !l.starts_with("case_list_name"))
            .collect();

        assert!(matches!(
            CaseList::from_lines(lines),
            Err(Error::MissingField(field)) if field == "case_list_name"
        ));
    }

    #[test]
    fn test_line_without_colon() {
        let mut lines = PI_123_ALL.to_vec();
        lines.push("garbage");

        assert!(matches!(
            CaseList::from_lines(lines),
            Err(Error::MalformedLine { line: 7, .. })
        ));
    }

    #[test]
    fn test_value_split_on_first_colon() {
        let lines = PI_123_ALL.map(|l| l.replace("Sample1", "S:1"));
        let c = CaseList::from_lines(&lines).unwrap();
        assert_eq!(c.ids(), ["S:1", "Sample2"]);
    }

    #[test]
    fn test_mismatched_stable_id() {
        let lines = PI_123_ALL.map(|l| l.replace("pi_123_all", "other_all"));
        assert!(matches!(
            CaseList::from_lines(&lines),
            Err(Error::CaseListMismatch { field, .. }) if field == "stable_id"
        ));
    }

    #[test]
    fn test_unknown_category() {
        let lines = PI_123_ALL.map(|l| l.replace("all_cases_in_study", "something_else"));
        assert!(matches!(
            CaseList::from_lines(&lines),
            Err(Error::UnknownCaseListCategory(_))
        ));
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("Sample3,Sample4"), vec!["Sample3", "Sample4"]);
        assert_eq!(parse_id_list(" a , ,b,"), vec!["a", "b"]);
        assert!(parse_id_list("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_merging_present_id_is_noop(
            ids in proptest::collection::vec("[A-Za-z0-9_-]{1,8}", 1..12),
            pick in any::<proptest::sample::Index>(),
        ) {
            let mut c = CaseList::new("study", &ids, CaseListType::All);
            let before = c.ids().to_vec();
            let present = before[pick.index(before.len())].clone();

            c.add_ids(&[present]);
            prop_assert_eq!(c.ids(), before.as_slice());
        }

        #[test]
        fn prop_lines_round_trip(
            kind in proptest::sample::select(CaseListType::ALL.to_vec()),
            study in "[a-z][a-z0-9_]{0,12}",
            ids in proptest::collection::vec("[A-Za-z0-9_:-]{1,8}", 0..10),
        ) {
            let lines = CaseList::new(study.as_str(), &ids, kind).to_lines();
            let back = CaseList::from_lines(&lines).unwrap();
            prop_assert_eq!(back.to_lines(), lines);
        }

        #[test]
        fn prop_merge_keeps_first_seen_order(
            existing in proptest::collection::vec("[a-e]{1,2}", 0..10),
            incoming in proptest::collection::vec("[a-e]{1,2}", 0..10),
        ) {
            let merged = merge_ids(&existing, &incoming);

            let unique: HashSet<&String> = merged.iter().collect();
            prop_assert_eq!(unique.len(), merged.len());

            let mut expected: Vec<String> = Vec::new();
            for id in existing.iter().chain(&incoming) {
                if !expected.contains(id) {
                    expected.push(id.clone());
                }
            }
            prop_assert_eq!(merged, expected);
        }
    }
}
