//! RFC (Registro Federal de Contribuyentes) format validation.
//!
//! Two shapes are accepted:
//! - Persona moral (company): 3 letters + 6 digits + 3 alphanumerics, 12 characters.
//! - Persona física (individual): 4 letters + 6 digits + 3 alphanumerics, 13 characters.
//!
//! Letters may also be `&` or `Ñ`. Matching is case-sensitive; callers
//! normalize with [`normalize_rfc`] first.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static MORAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z&Ñ]{3}[0-9]{6}[A-Z0-9]{3}$").unwrap());

static PHYSICAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z&Ñ]{4}[0-9]{6}[A-Z0-9]{3}$").unwrap());

/// Legal nature of the taxpayer, implied by the RFC length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxpayerKind {
    /// Legal entity, 12-character RFC.
    Moral,
    /// Individual, 13-character RFC.
    Physical,
}

/// Checks the format of an RFC.
///
/// Surrounding whitespace is ignored. Length is counted in characters, so
/// `Ñ` counts once.
pub fn is_valid_rfc(raw: &str) -> bool {
    let rfc = raw.trim();

    match rfc.chars().count() {
        12 => MORAL_PATTERN.is_match(rfc),
        13 => PHYSICAL_PATTERN.is_match(rfc),
        _ => false,
    }
}

/// Trims and uppercases user input.
pub fn normalize_rfc(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A normalized RFC known to be well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rfc(String);

impl Rfc {
    /// Normalizes and validates `raw`, returning `None` when the format is wrong.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_rfc(raw);
        is_valid_rfc(&normalized).then_some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> TaxpayerKind {
        if self.0.chars().count() == 12 {
            TaxpayerKind::Moral
        } else {
            TaxpayerKind::Physical
        }
    }
}

impl fmt::Display for Rfc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_moral_rfcs() {
        assert!(is_valid_rfc("ABC010101ABC"));
        assert!(is_valid_rfc("XYZ987654321"));
        assert!(is_valid_rfc("A&B010101AB1"));
        assert!(is_valid_rfc("ÑAB010101AB1"));
    }

    #[test]
    fn test_valid_physical_rfcs() {
        assert!(is_valid_rfc("XEXX010101000"));
        assert!(is_valid_rfc("ABCD123456H12"));
        assert!(is_valid_rfc("MUÑO800101AB1"));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert!(is_valid_rfc("  ABC010101ABC  "));
        assert!(is_valid_rfc("\tXEXX010101000\n"));
    }

    #[test]
    fn test_invalid_rfcs() {
        assert!(!is_valid_rfc(""));
        assert!(!is_valid_rfc("   "));
        assert!(!is_valid_rfc("12345"));
        assert!(!is_valid_rfc("RFC_INVALIDO"));
        assert!(!is_valid_rfc("ABCD123456789012"));
        assert!(!is_valid_rfc("ABCD12345A1AB"));
        assert!(!is_valid_rfc("123456789012"));
    }

    #[test]
    fn test_validation_is_case_sensitive() {
        assert!(!is_valid_rfc("abc010101abc"));
        assert!(!is_valid_rfc("xexx010101000"));
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let rfc = Rfc::parse("  abc010101abc ").unwrap();
        assert_eq!(rfc.as_str(), "ABC010101ABC");
        assert_eq!(rfc.kind(), TaxpayerKind::Moral);

        let rfc = Rfc::parse("muño800101ab1").unwrap();
        assert_eq!(rfc.as_str(), "MUÑO800101AB1");
        assert_eq!(rfc.kind(), TaxpayerKind::Physical);
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        assert_eq!(Rfc::parse("ABCD123456789012"), None);
        assert_eq!(Rfc::parse(""), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let rfc = Rfc::parse("ABC010101ABC").unwrap();
        assert_eq!(serde_json::to_value(&rfc).unwrap(), "ABC010101ABC");
    }
}
