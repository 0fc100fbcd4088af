//! Input validation and masking helpers

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of digits in a verification code
pub const OTP_LENGTH: usize = 6;

static OTP_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// Check that a string is a single ASCII digit
pub fn is_otp_digit(value: &str) -> bool {
    let mut chars = value.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

/// Check that a code is exactly six ASCII digits
pub fn is_valid_otp_code(code: &str) -> bool {
    OTP_CODE.is_match(code)
}

/// Mask a secret for logging, keeping only the last four characters
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_otp_digit() {
        assert!(is_otp_digit("0"));
        assert!(is_otp_digit("9"));
        assert!(!is_otp_digit(""));
        assert!(!is_otp_digit("12"));
        assert!(!is_otp_digit("a"));
        assert!(!is_otp_digit("٣"));
    }

    #[test]
    fn test_is_valid_otp_code() {
        assert!(is_valid_otp_code("123456"));
        assert!(is_valid_otp_code("000000"));
        assert!(!is_valid_otp_code("12345"));
        assert!(!is_valid_otp_code("1234567"));
        assert!(!is_valid_otp_code("12a456"));
        assert!(!is_valid_otp_code(" 123456"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh"), "****efgh");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }
}
