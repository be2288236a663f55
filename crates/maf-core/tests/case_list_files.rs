//! File-level tests for case list loading and updating.

use maf_core::{CaseList, CaseListType, Error};
use std::fs;
use std::io::BufReader;
use tempfile::tempdir;

#[test]
fn test_case_list_file_update() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cases_all.txt");

    let original = CaseList::new("pi_123", &["Sample1", "Sample2"], CaseListType::All);
    let mut file = fs::File::create(&path).unwrap();
    original.write_to(&mut file).unwrap();
    drop(file);

    let mut loaded = CaseList::read_from(BufReader::new(fs::File::open(&path).unwrap())).unwrap();
    assert_eq!(loaded, original);

    loaded.add_ids(&["Sample2", "Sample3"]);
    assert_eq!(
        loaded.to_lines().last().map(String::as_str),
        Some("case_list_ids: Sample1\tSample2\tSample3")
    );
}

#[test]
fn test_case_list_file_with_custom_labels_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cases_all.txt");
    fs::write(
        &path,
        "case_list_category: all_cases_in_study\n\
         stable_id: pi_123_all\n\
         case_list_name: My Tumors\n\
         case_list_description: All tumor samples\n\
         cancer_study_identifier: pi_123\n\
         case_list_ids: Sample1\n",
    )
    .unwrap();

    let err = CaseList::read_from(BufReader::new(fs::File::open(&path).unwrap())).unwrap_err();
    assert!(matches!(err, Error::CaseListMismatch { field, .. } if field == "case_list_name"));
}
