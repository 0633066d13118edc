//! Remote token validation
//!
//! This is the only part of the crate that performs I/O. Every failure of the
//! round trip resolves to an invalid-token answer instead of an error.

mod validation;

pub use self::validation::{validate_token, TokenValidator};
