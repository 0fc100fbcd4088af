//! Error types shared by the flow and its collaborators

use ep_shared::Language;
use thiserror::Error;

/// Why a resend was refused without contacting the server
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendRefusal {
    #[error("Please wait {seconds_left} seconds before requesting a new code | Tunggu {seconds_left} detik sebelum meminta kode baru")]
    CoolingDown { seconds_left: u32 },

    #[error("No more resends are available for this session | Batas pengiriman ulang kode telah tercapai")]
    Exhausted,
}

/// Failure reported by an `OtpApiTrait` implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// The request never produced a response (connect error, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The server answered but the body had an unexpected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Pick one side of a bilingual `"English | Indonesian"` message
///
/// Strings without a separator are returned unchanged.
pub fn extract_message(message: &str, language: Language) -> String {
    match message.split_once(" | ") {
        Some((english, indonesian)) => match language {
            Language::English => english.to_string(),
            Language::Indonesian => indonesian.to_string(),
        },
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message() {
        assert_eq!(extract_message("Hello | Halo", Language::English), "Hello");
        assert_eq!(extract_message("Hello | Halo", Language::Indonesian), "Halo");
        assert_eq!(
            extract_message("Kode OTP tidak valid", Language::English),
            "Kode OTP tidak valid"
        );
    }
}
