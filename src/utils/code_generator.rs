//! Short code generation for tracking links.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Length of every generated code.
pub const CODE_LENGTH: usize = 12;

/// Generates a random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code. Uniqueness is not checked
/// here; the registry retries on conflict.
///
/// # Errors
///
/// Returns the underlying error if the system random source is unavailable.
pub fn generate_code() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `code` has the shape of a generated code.
///
/// Lets the redirect path reject obviously invalid codes without a store lookup.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code().unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        let code = generate_code().unwrap();
        assert!(
            code.chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        );
        assert!(!code.contains('='));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code().unwrap());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generated_codes_are_well_formed() {
        for _ in 0..100 {
            assert!(is_well_formed(&generate_code().unwrap()));
        }
    }

    #[test]
    fn test_is_well_formed_rejects_bad_shapes() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("health"));
        assert!(!is_well_formed("abcdefghijk!"));
        assert!(!is_well_formed("abcdefghijklm"));
        assert!(is_well_formed("abc-def_GHI9"));
    }
}
