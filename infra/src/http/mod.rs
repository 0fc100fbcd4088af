//! HTTP client for the backend OTP endpoints

pub mod dto;
mod otp_client;

#[cfg(test)]
mod tests;

pub use otp_client::HttpOtpApi;
