/// The fixed cipher alphabet. Keys map each of these symbols to exactly one other.
pub const ALPHABET: &[u8; ALPHABET_LEN] = b"abcdefghijklmnopqrstuvwxyz";

/// Number of symbols in the cipher alphabet (and mappings in a complete key).
pub const ALPHABET_LEN: usize = 26;

/// Fraction of the best stagnant fitness above which a member is discarded during a shock.
pub const SHOCK_DISCARD_RATIO: f64 = 0.9;

/// Tolerance used when checking that operator probabilities sum to one.
pub const PROBABILITY_EPSILON: f64 = 1e-9;

#[inline(always)]
pub fn in_alphabet(symbol: u8) -> bool {
    symbol.is_ascii_lowercase()
}
