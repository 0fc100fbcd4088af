//! Tests for the verification flow

#[cfg(test)]
mod throttle_flow_tests;
