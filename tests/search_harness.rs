#![allow(unused)]
//! Search integration harness.
//!
//! # What this covers
//!
//! [`natega_core::search`] over realistic name lists:
//!
//! - **Letter folding**: alef, yaa and waw variants in either the query or
//!   the stored name still match.
//! - **Prefix anchoring**: only names that *start* with the query match;
//!   a trailing space anchors on a word boundary.
//! - **Ordering and duplicates**: matches come back in dataset order and
//!   duplicate names are all returned.
//! - **Validation**: blank queries are rejected before any scan.
//! - **Properties**: for arbitrary names and queries the result equals a
//!   naive filter over normalised names.
//!
//! # What this does NOT cover
//!
//! - Dispatch timing and last-write-wins delivery (see session_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;

use natega_core::normalizer::normalize;
use natega_core::{search, RecordSet, SearchError, SearchResult};
use proptest::prelude::*;
use rstest::rstest;

fn corpus() -> RecordSet {
    records_named(NAME_CORPUS)
}

// ---------------------------------------------------------------------------
// Examples
// ---------------------------------------------------------------------------

#[rstest]
#[case::plain_alef("احمد", &["أحمد علي حسن", "احمد محمود", "إحمد سامي", "أحمد علي حسن"])]
#[case::hamza_above("أحمد", &["أحمد علي حسن", "احمد محمود", "إحمد سامي", "أحمد علي حسن"])]
#[case::madda("امنة", &["آمنة يوسف"])]
#[case::dotless_yaa("مصطفي", &["مصطفى كمال", "مصطفي عبد الله"])]
#[case::waw_hamza("رؤوف", &["رؤوف سعيد", "رووف نبيل"])]
#[case::full_name("احمد علي حسن", &["أحمد علي حسن", "أحمد علي حسن"])]
#[case::leading_space("  زينب", &["زينب محمد"])]
#[case::collapsed_space("احمد   محمود", &["احمد محمود"])]
fn folded_prefix_matches(#[case] query: &str, #[case] expected: &[&str]) {
    let result = search(query, &corpus()).unwrap();
    let names: Vec<&str> = result.records().iter().map(|r| r.name.as_str()).collect();
    pretty_assertions::assert_eq!(names, expected);
}

#[rstest]
#[case::middle_of_name("علي")]
#[case::last_name("حسن")]
#[case::latin("Ahmed")]
#[case::longer_than_any("زينب محمد عبد الرحمن")]
fn non_prefix_queries_find_nothing(#[case] query: &str) {
    assert_no_match!(search(query, &corpus()).unwrap());
}

#[test]
fn trailing_space_anchors_on_word_boundary() {
    let records = records_named(&["سامي", "سامية", "سامي عادل"]);
    assert_names!(search("سامي", &records).unwrap(), ["سامي", "سامية", "سامي عادل"]);
    assert_names!(search("سامي ", &records).unwrap(), ["سامي عادل"]);
}

#[test]
fn single_letter_returns_every_name_with_that_initial() {
    let result = search("م", &corpus()).unwrap();
    assert_names!(result, ["مصطفى كمال", "مصطفي عبد الله"]);
}

#[test]
fn results_keep_every_field() {
    let records: RecordSet = sample_records().into_iter().collect();
    let result = search("آمنة", &records).unwrap();
    assert_eq!(result.records(), &sample_records()[3..4]);
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t\n ")]
fn blank_queries_are_rejected(#[case] query: &str) {
    assert_eq!(search(query, &corpus()), Err(SearchError::EmptyQuery));
    assert_eq!(
        search(query, &corpus()).unwrap_err().to_string(),
        "Please enter a student name"
    );
}

#[test]
fn empty_dataset_never_matches() {
    assert_no_match!(search("احمد", &RecordSet::default()).unwrap());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Letters drawn from the folded families plus a few others, and spaces.
fn arabic_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['ا', 'أ', 'إ', 'آ', 'ي', 'ى', 'ئ', 'و', 'ؤ', 'م', 'ح', 'د', ' ']),
        0..8,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn search_equals_naive_prefix_filter(
        names in prop::collection::vec(arabic_text(), 0..12),
        query in arabic_text(),
    ) {
        let records = RecordSet::new(names.iter().map(|n| record(n).build()).collect());
        match search(&query, &records) {
            Err(SearchError::EmptyQuery) => prop_assert!(query.trim().is_empty()),
            Ok(result) => {
                prop_assert!(!query.trim().is_empty());
                let prefix = normalize(&query);
                let expected: Vec<&str> = names
                    .iter()
                    .filter(|n| normalize(n).starts_with(&prefix))
                    .map(String::as_str)
                    .collect();
                let actual: Vec<&str> = result.records().iter().map(|r| r.name.as_str()).collect();
                prop_assert_eq!(&actual, &expected);
                prop_assert_eq!(result.is_no_match(), expected.is_empty());
            }
        }
    }

    #[test]
    fn every_name_finds_itself(names in prop::collection::vec(arabic_text(), 1..12)) {
        let records = RecordSet::new(names.iter().map(|n| record(n).build()).collect());
        for name in names.iter().filter(|n| !n.trim().is_empty()) {
            let result = search(name, &records).unwrap();
            prop_assert!(result.records().iter().any(|r| &r.name == name));
        }
    }
}
