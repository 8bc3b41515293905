//! Static datasets used across harnesses.

use super::builders::record;
use natega_core::ResultRecord;

/// Names covering every folded letter family, duplicates and multi-word
/// names. Order matters: searches return matches in this order.
pub const NAME_CORPUS: &[&str] = &[
    "أحمد علي حسن",
    "احمد محمود",
    "إحمد سامي",
    "آمنة يوسف",
    "مصطفى كمال",
    "مصطفي عبد الله",
    "رؤوف سعيد",
    "رووف نبيل",
    "زينب محمد",
    "أحمد علي حسن",
];

/// A small, realistic dataset: mixed seat-number shapes, fractional scores,
/// and the full range from 0 to full marks.
pub fn sample_records() -> Vec<ResultRecord> {
    vec![
        record("أحمد علي حسن").seat(100101).score(350.0).build(),
        record("احمد محمود").seat(100102).score(205.0).status("دور ثان").build(),
        record("إحمد سامي").seat_text("100103").score(410.0).build(),
        record("آمنة يوسف").seat(100104).score(387.5).build(),
        record("مصطفى كمال").seat(100105).score(0.0).status("راسب").build(),
        record("زينب محمد").seat(100106).score(299.25).build(),
    ]
}
