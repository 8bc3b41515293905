//! Assertion macros for natega harnesses.
//!
//! These wrap `pretty_assertions` and say which search invariant failed.

/// Assert that a search result holds exactly the given names, in order.
///
/// ```rust
/// assert_names!(result, ["أحمد علي", "احمد محمود"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($result:expr, [$($name:expr),* $(,)?]) => {{
        let result: &natega_core::SearchResult = &$result;
        let actual: Vec<&str> = result.records().iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        assert!(
            !result.is_no_match(),
            "assert_names! failed: search returned NoMatch, expected {:?}",
            expected
        );
        pretty_assertions::assert_eq!(actual, expected, "assert_names! failed: wrong matches");
    }};
}

/// Assert that a search result is `NoMatch`.
#[macro_export]
macro_rules! assert_no_match {
    ($result:expr) => {{
        let result: &natega_core::SearchResult = &$result;
        if !result.is_no_match() {
            panic!(
                "assert_no_match! failed: got {} match(es): {:?}",
                result.len(),
                result.records().iter().map(|r| &r.name).collect::<Vec<_>>()
            );
        }
    }};
}

/// Assert that a load failed with a message containing `needle`.
#[macro_export]
macro_rules! assert_load_error {
    ($outcome:expr, $pattern:pat, $needle:expr) => {{
        match $outcome {
            Ok(records) => panic!(
                "assert_load_error! failed: load succeeded with {} records",
                natega_core::RecordSet::len(&records)
            ),
            Err(err) => {
                let msg = err.to_string();
                assert!(
                    matches!(err, $pattern),
                    "assert_load_error! failed: unexpected variant {:?}",
                    err
                );
                assert!(
                    msg.contains($needle),
                    "assert_load_error! failed: {:?} does not contain {:?}",
                    msg,
                    $needle
                );
            }
        }
    }};
}
