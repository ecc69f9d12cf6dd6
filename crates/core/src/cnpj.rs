//! CNPJ codec: normalization, check-digit validation, display formatting.
//!
//! A CNPJ is the Brazilian 14-digit company registration number. The last
//! two digits are check digits computed from weighted sums of the preceding
//! digits, modulo 11. Canonical form is the bare digit string; the display
//! form is `DD.DDD.DDD/DDDD-DD`.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::DomainError;

/// Weights for the first check digit (over canonical positions 1..=12).
const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second check digit (over canonical positions 1..=13).
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// A validated CNPJ in canonical (digits-only) form.
///
/// Values of this type always hold exactly 14 ASCII digits with correct
/// check digits; formatting is therefore total and lookups can use
/// [`Cnpj::as_str`] directly as a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cnpj(String);

impl Cnpj {
    /// Normalize `raw` and validate it as a CNPJ.
    ///
    /// Accepts punctuated (`11.222.333/0001-81`) and bare
    /// (`11222333000181`) input alike.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits = normalize(raw);
        if !is_valid(&digits) {
            return Err(DomainError::invalid_cnpj(raw));
        }
        Ok(Self(digits))
    }

    /// Canonical 14-digit form (the storage key).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form: `DD.DDD.DDD/DDDD-DD`.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        )
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cnpj {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strip every character that is not an ASCII digit.
///
/// No length or content validation happens here; `normalize` is also used
/// for lookup keys supplied through URLs, where a stale or mistyped value
/// must fall through to a not-found rather than a validation error.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `digits` is a checksum-valid canonical CNPJ.
///
/// Expects the already-normalized form: anything that is not exactly 14
/// ASCII digits is invalid. Strings of one repeated digit are rejected
/// outright; several of them satisfy the mod-11 arithmetic but are not
/// issuable numbers.
pub fn is_valid(digits: &str) -> bool {
    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let d: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }

    d[12] == check_digit(&d[..12], &FIRST_WEIGHTS) && d[13] == check_digit(&d[..13], &SECOND_WEIGHTS)
}

/// Weighted mod-11 check digit; remainders 0 and 1 both map to 0.
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Append the two computed check digits to a 12-digit base.
    fn with_check_digits(base: &str) -> String {
        assert_eq!(base.len(), 12);
        let mut d: Vec<u32> = base.bytes().map(|b| u32::from(b - b'0')).collect();
        d.push(check_digit(&d, &FIRST_WEIGHTS));
        d.push(check_digit(&d, &SECOND_WEIGHTS));
        d.into_iter().map(|x| char::from_digit(x, 10).unwrap()).collect()
    }

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("11.222.333/0001-81"), "11222333000181");
        assert_eq!(normalize("  04 252 011/0001--10 "), "04252011000110");
        assert_eq!(normalize("abc"), "");
    }

    #[test]
    fn known_valid_cnpjs_validate() {
        assert!(is_valid("11222333000181"));
        assert!(is_valid("00000000000191"));
    }

    #[test]
    fn flipping_either_check_digit_invalidates() {
        assert!(is_valid("11222333000181"));
        assert!(!is_valid("11222333000191"));
        assert!(!is_valid("11222333000182"));
    }

    #[test]
    fn repeated_digit_strings_are_rejected() {
        for b in b'0'..=b'9' {
            let s: String = core::iter::repeat(char::from(b)).take(14).collect();
            assert!(!is_valid(&s), "{s} should be invalid");
        }
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        assert!(!is_valid(""));
        assert!(!is_valid("1122233300018"));
        assert!(!is_valid("112223330001811"));
    }

    #[test]
    fn parse_accepts_punctuated_input() {
        let cnpj = Cnpj::parse("11.222.333/0001-81").unwrap();
        assert_eq!(cnpj.as_str(), "11222333000181");
        assert_eq!(cnpj.formatted(), "11.222.333/0001-81");
    }

    #[test]
    fn parse_rejects_invalid_input() {
        let err = Cnpj::parse("11.222.333/0001-99").unwrap_err();
        assert!(matches!(err, crate::DomainError::InvalidCnpj(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: formatting then re-parsing never changes the
            /// canonical value (normalize/format round-trip).
            #[test]
            fn format_round_trips(base in "[0-9]{12}") {
                let digits = with_check_digits(&base);
                prop_assume!(is_valid(&digits));

                let cnpj = Cnpj::parse(&digits).unwrap();
                let reparsed = Cnpj::parse(&cnpj.formatted()).unwrap();
                prop_assert_eq!(cnpj, reparsed);
            }

            /// Property: normalize+format is idempotent for valid values.
            #[test]
            fn format_is_idempotent(base in "[0-9]{12}") {
                let digits = with_check_digits(&base);
                prop_assume!(is_valid(&digits));

                let once = Cnpj::parse(&digits).unwrap().formatted();
                let twice = Cnpj::parse(&once).unwrap().formatted();
                prop_assert_eq!(once, twice);
            }

            /// Property: formatting does not change validity for any
            /// 14-digit string (punctuation is transparent to `is_valid`
            /// after normalization).
            #[test]
            fn punctuation_is_transparent_to_validity(s in "[0-9]{14}") {
                let punctuated = format!(
                    "{}.{}.{}/{}-{}",
                    &s[..2], &s[2..5], &s[5..8], &s[8..12], &s[12..]
                );
                prop_assert_eq!(is_valid(&normalize(&punctuated)), is_valid(&s));
            }

            /// Property: a corrupted check digit never validates.
            #[test]
            fn corrupt_check_digit_never_validates(base in "[0-9]{12}", flip in 0u32..9) {
                let digits = with_check_digits(&base);
                prop_assume!(is_valid(&digits));

                let d13 = digits.as_bytes()[13] - b'0';
                let corrupted = format!(
                    "{}{}",
                    &digits[..13],
                    (u32::from(d13) + 1 + flip) % 10
                );
                if corrupted != digits {
                    prop_assert!(!is_valid(&corrupted));
                }
            }
        }
    }
}
