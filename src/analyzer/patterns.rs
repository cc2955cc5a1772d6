//! Weak-pattern detectors
//!
//! All detectors take the password already lower-cased where case does not
//! matter, and operate on Unicode scalar values.

/// Keyboard walks and trivial runs
pub const KEYBOARD_PATTERNS: &[&str] = &[
    "qwerty", "asdf", "zxcv", "qwer", "123456", "abcdef", "qazwsx", "wsxedc",
];

/// Characters commonly used as letter substitutes (`@` for a, `3` for e, ...)
pub const SUBSTITUTION_MARKERS: &[char] = &['@', '3', '1', '0', '5', '7', '4', '8', '6', '2'];

/// Three or more consecutive ascending code points (`abc`, `123`)
pub fn has_sequential_chars(chars: &[char]) -> bool {
    let mut run = 0;
    for pair in chars.windows(2) {
        if (pair[0] as u32).checked_add(1) == Some(pair[1] as u32) {
            run += 1;
            if run >= 2 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Contains a known keyboard-adjacency substring
pub fn has_keyboard_pattern(lower: &str) -> bool {
    KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p))
}

/// At least two distinct substitution markers are present
pub fn has_common_substitutions(password: &str) -> bool {
    SUBSTITUTION_MARKERS
        .iter()
        .filter(|marker| password.contains(**marker))
        .count()
        >= 2
}

/// Some substring of length 2..=n/2 occurs again later without overlapping.
///
/// Any such repeat starts with a repeated, non-overlapping bigram, so it is
/// enough to look for a bigram whose earlier occurrence ends before the later
/// one begins.
pub fn has_repeated_pattern(chars: &[char]) -> bool {
    if chars.len() < 4 {
        return false;
    }

    let mut first_seen = std::collections::HashMap::new();
    for (pos, pair) in chars.windows(2).enumerate() {
        let key = (pair[0], pair[1]);
        match first_seen.get(&key) {
            Some(&earlier) if pos >= earlier + 2 => return true,
            Some(_) => {}
            None => {
                first_seen.insert(key, pos);
            }
        }
    }
    false
}
