// ── Employee identifier generator ──
//
// Pure apart from the random suffix. Output carries no uniqueness
// guarantee and must pass through the validator before it is accepted.

use rand::Rng;

/// Prefix used when the name yields no initials.
pub const FALLBACK_PREFIX: &str = "EMP";

const MAX_INITIALS: usize = 3;
const SUFFIX_RANGE: std::ops::RangeInclusive<u16> = 1000..=9999;

/// Generate a candidate identifier from a display name.
///
/// `"John Doe"` → `"JD"` + four random digits; a blank name, or one with
/// no letters, falls back to `"EMP"` + four digits. The suffix is drawn
/// fresh on every call.
pub fn generate(full_name: &str) -> String {
    generate_with(&mut rand::thread_rng(), full_name)
}

/// [`generate`] with a caller-supplied RNG.
pub fn generate_with<R: Rng>(rng: &mut R, full_name: &str) -> String {
    let prefix = initials(full_name);
    let prefix = if prefix.is_empty() {
        FALLBACK_PREFIX
    } else {
        &prefix
    };
    let suffix = rng.gen_range(SUFFIX_RANGE);
    format!("{prefix}{suffix}")
}

/// Up to three uppercase initials, one per word, ignoring anything that
/// is neither a letter nor whitespace.
fn initials(full_name: &str) -> String {
    let cleaned: String = full_name
        .to_uppercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(MAX_INITIALS)
        .collect()
}
