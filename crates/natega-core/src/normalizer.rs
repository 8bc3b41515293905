//! Normalizer: canonicalizes Arabic names before comparison.
//!
//! Letters that are written differently but read the same are folded onto a
//! single base letter:
//!
//! | Input                                   | Output      |
//! |-----------------------------------------|-------------|
//! | `ا` `أ` `إ` `آ` `ٱ` (alef forms)          | `ا` U+0627  |
//! | `ي` `ى` `ئ` (yaa, dotless yaa, hamza)     | `ي` U+064A  |
//! | `و` `ؤ` (waw, waw with hamza)            | `و` U+0648  |
//!
//! Whitespace runs collapse to a single ASCII space and leading whitespace is
//! dropped. A trailing space survives so that `"احمد "` still anchors on a
//! word boundary when used as a prefix.
//!
//! [`normalize`] is idempotent: every output character is a fixed point of
//! the table, and the whitespace rules cannot produce a new run.

use phf::phf_map;

static CANONICAL_LETTERS: phf::Map<char, char> = phf_map! {
    // alef
    'أ' => 'ا',
    'إ' => 'ا',
    'آ' => 'ا',
    'ٱ' => 'ا',
    // yaa
    'ى' => 'ي',
    'ئ' => 'ي',
    // waw
    'ؤ' => 'و',
};

/// Map a single character onto its canonical form. Characters outside the
/// table are returned unchanged.
pub fn canonical_char(c: char) -> char {
    CANONICAL_LETTERS.get(&c).copied().unwrap_or(c)
}

/// Canonicalize `text` for prefix comparison.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.trim_start().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        out.push(canonical_char(c));
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
