//! Error types of the OTP flow.
//!
//! Locally generated errors carry bilingual messages in the form
//! `"English | Indonesian"`; [`OtpError::user_message`] picks one side.
//! Messages that came from the backend are passed through untouched.

mod types;

pub use types::{extract_message, ApiFailure, ResendRefusal};

use ep_shared::Language;
use thiserror::Error;

/// Errors surfaced by the verification flow
///
/// None of these are fatal: after any of them the flow stays interactable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Please enter all 6 digits of the code | Masukkan 6 digit kode OTP")]
    IncompleteCode { filled: usize },

    #[error(transparent)]
    ResendRefused(#[from] ResendRefusal),

    #[error("A resend is already in progress | Pengiriman ulang kode sedang diproses")]
    ResendInFlight,

    #[error("Verification is already in progress | Verifikasi sedang diproses")]
    VerifyInFlight,

    #[error("The code has already been verified | Kode sudah berhasil diverifikasi")]
    AlreadyVerified,

    #[error("Verification has already started | Verifikasi sudah dimulai")]
    AlreadyStarted,

    #[error("Verification has not started yet | Verifikasi belum dimulai")]
    NotStarted,

    #[error("This verification session has ended | Sesi verifikasi telah berakhir")]
    FlowClosed,

    #[error("Session not found. Please log in again | Sesi tidak ditemukan. Silakan masuk kembali")]
    MissingSession,

    #[error("Unable to reach the server. Check your connection and try again | Tidak dapat terhubung ke server. Periksa koneksi Anda dan coba lagi")]
    Transport { detail: String },

    /// Failure message written by the backend
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    /// Failure without a usable server message, or a malformed response
    #[error("Something went wrong. Please try again | Terjadi kesalahan. Silakan coba lagi")]
    Unexpected { detail: String },
}

pub type OtpResult<T> = Result<T, OtpError>;

impl OtpError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::IncompleteCode { .. } => "INCOMPLETE_CODE",
            OtpError::ResendRefused(ResendRefusal::CoolingDown { .. }) => "RESEND_COOLING_DOWN",
            OtpError::ResendRefused(ResendRefusal::Exhausted) => "RESEND_EXHAUSTED",
            OtpError::ResendInFlight => "RESEND_IN_FLIGHT",
            OtpError::VerifyInFlight => "VERIFY_IN_FLIGHT",
            OtpError::AlreadyVerified => "ALREADY_VERIFIED",
            OtpError::AlreadyStarted => "ALREADY_STARTED",
            OtpError::NotStarted => "NOT_STARTED",
            OtpError::FlowClosed => "FLOW_CLOSED",
            OtpError::MissingSession => "MISSING_SESSION",
            OtpError::Transport { .. } => "TRANSPORT_ERROR",
            OtpError::Server { .. } => "SERVER_REJECTED",
            OtpError::Unexpected { .. } => "UNEXPECTED_RESPONSE",
        }
    }

    /// Message to show the user in `language`
    pub fn user_message(&self, language: Language) -> String {
        match self {
            OtpError::Server { message, .. } => message.clone(),
            other => extract_message(&other.to_string(), language),
        }
    }
}

impl From<ApiFailure> for OtpError {
    fn from(failure: ApiFailure) -> Self {
        match failure {
            ApiFailure::Transport(detail) => OtpError::Transport { detail },
            ApiFailure::Rejected {
                status,
                message: Some(message),
            } if !message.trim().is_empty() => OtpError::Server {
                status: Some(status),
                message,
            },
            ApiFailure::Rejected { status, .. } => OtpError::Unexpected {
                detail: format!("request rejected with status {}", status),
            },
            ApiFailure::Malformed(detail) => OtpError::Unexpected { detail },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_errors_are_bilingual() {
        let error = OtpError::IncompleteCode { filled: 4 };
        assert_eq!(
            error.user_message(Language::English),
            "Please enter all 6 digits of the code"
        );
        assert_eq!(error.user_message(Language::Indonesian), "Masukkan 6 digit kode OTP");
    }

    #[test]
    fn test_server_message_passes_through() {
        let error = OtpError::from(ApiFailure::Rejected {
            status: 422,
            message: Some("Kode OTP tidak valid".to_string()),
        });
        assert_eq!(error.user_message(Language::English), "Kode OTP tidak valid");
        assert_eq!(error.error_code(), "SERVER_REJECTED");
    }

    #[test]
    fn test_rejection_without_message_falls_back() {
        let error = OtpError::from(ApiFailure::Rejected {
            status: 500,
            message: Some("  ".to_string()),
        });
        assert!(matches!(error, OtpError::Unexpected { .. }));
        assert_eq!(
            error.user_message(Language::Indonesian),
            "Terjadi kesalahan. Silakan coba lagi"
        );
    }

    #[test]
    fn test_transport_and_malformed_mapping() {
        let transport = OtpError::from(ApiFailure::Transport("connection refused".to_string()));
        assert_eq!(transport.error_code(), "TRANSPORT_ERROR");
        assert!(transport
            .user_message(Language::English)
            .starts_with("Unable to reach the server"));

        let malformed =
            OtpError::from(ApiFailure::Malformed("missing field `message`".to_string()));
        assert_eq!(malformed.error_code(), "UNEXPECTED_RESPONSE");
    }

    #[test]
    fn test_resend_refusal_codes() {
        let cooling: OtpError = ResendRefusal::CoolingDown { seconds_left: 12 }.into();
        assert_eq!(cooling.error_code(), "RESEND_COOLING_DOWN");
        assert_eq!(
            cooling.user_message(Language::English),
            "Please wait 12 seconds before requesting a new code"
        );

        let exhausted: OtpError = ResendRefusal::Exhausted.into();
        assert_eq!(exhausted.error_code(), "RESEND_EXHAUSTED");
    }
}
