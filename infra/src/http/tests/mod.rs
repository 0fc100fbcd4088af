//! Tests for the backend HTTP client
