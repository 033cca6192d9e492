//! Product identifier check (EAN-8, UPC-A, EAN-13).

/// Lengths accepted as product identifiers: EAN-8, UPC-A, EAN-13.
const IDENTIFIER_LENGTHS: [usize; 3] = [8, 12, 13];

/// Returns `true` iff `code` is all ASCII digits and 8, 12 or 13 long.
///
/// Only the shape is checked; the check digit is not verified.
pub fn is_valid_identifier(code: &str) -> bool {
    IDENTIFIER_LENGTHS.contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_known_formats() {
        assert!(is_valid_identifier("12345678"));
        assert!(is_valid_identifier("123456789012"));
        assert!(is_valid_identifier("1234567890123"));
    }

    #[test]
    fn rejects_empty_blank_and_short() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("    "));
        assert!(!is_valid_identifier("1234"));
    }

    #[test]
    fn rejects_digits_with_noise() {
        assert!(!is_valid_identifier("1234567a"));
        assert!(!is_valid_identifier(" 1234567"));
        assert!(!is_valid_identifier("12345678 "));
        // Non-ASCII digits are not accepted even when the char count fits.
        assert!(!is_valid_identifier("١٢٣٤٥٦٧٨"));
    }

    proptest! {
        #[test]
        fn digit_strings_of_accepted_length_are_valid(code in "([0-9]{8}|[0-9]{12}|[0-9]{13})") {
            prop_assert!(is_valid_identifier(&code));
        }

        #[test]
        fn digit_strings_of_other_lengths_are_invalid(len in 0usize..32) {
            prop_assume!(!IDENTIFIER_LENGTHS.contains(&len));
            let code = "7".repeat(len);
            prop_assert!(!is_valid_identifier(&code));
        }

        #[test]
        fn any_non_digit_makes_code_invalid(
            prefix in "[0-9]{0,12}",
            bad in "[^0-9]",
            suffix in "[0-9]{0,12}",
        ) {
            let code = format!("{prefix}{bad}{suffix}");
            prop_assert!(!is_valid_identifier(&code));
        }
    }
}
