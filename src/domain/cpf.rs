//! CPF validation and formatting.
//!
//! A CPF is the 11-digit Brazilian individual taxpayer number; the last two
//! digits are checksums over the first nine. All functions here are pure and
//! never fail: malformed input yields `false` from [`is_valid`] and passes
//! through [`format`] unchanged, so callers branch on the result instead of
//! handling errors.

/// Weights applied to the first nine digits for the first check digit.
const FIRST_DIGIT_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
/// Weights applied to the first ten digits for the second check digit.
const SECOND_DIGIT_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Strips `.`, `-` and spaces, returning the canonical digits-only form.
///
/// Whitespace-only input collapses to an empty string. Any other character
/// is passed through untouched; [`is_valid`] rejects it downstream.
pub fn normalize(cpf: &str) -> String {
    if cpf.trim().is_empty() {
        return String::new();
    }
    cpf.chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .collect()
}

/// Checks a CPF in either canonical or display form.
///
/// Structural rules first: exactly 11 digits after normalization and not all
/// identical (sequences like `11111111111` satisfy the checksum but are
/// invalid by policy). Then both check digits must match the two-pass
/// weighted checksum.
pub fn is_valid(cpf: &str) -> bool {
    let cpf = normalize(cpf);

    if cpf.len() != 11 || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if cpf.bytes().all(|b| b == cpf.as_bytes()[0]) {
        return false;
    }

    let digits: Vec<u32> = cpf.bytes().map(|b| u32::from(b - b'0')).collect();

    let first = check_digit(&digits[..9], &FIRST_DIGIT_WEIGHTS);
    let mut with_first = digits[..9].to_vec();
    with_first.push(first);
    let second = check_digit(&with_first, &SECOND_DIGIT_WEIGHTS);

    digits[9] == first && digits[10] == second
}

/// Formats a canonical CPF as `DDD.DDD.DDD-DD`.
///
/// Input that does not normalize to 11 characters is returned in its
/// normalized form unchanged.
pub fn format(cpf: &str) -> String {
    let cpf = normalize(cpf);

    if cpf.len() != 11 {
        return cpf;
    }

    format!("{}.{}.{}-{}", &cpf[..3], &cpf[3..6], &cpf[6..9], &cpf[9..])
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}
