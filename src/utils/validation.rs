//! Input validation utilities for eventboard.
//!
//! This module provides validation functions to ensure inputs meet
//! the engine's preconditions before processing.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Same shape check as the sign-up and event forms
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

// ═══════════════════════════════════════════════════════════════════════════════
// PAGINATION VALIDATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Validate that a page size is positive
pub fn validate_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        return Err(Error::InvalidPageSize(page_size));
    }
    Ok(())
}

/// Validate that a page number is 1-based
pub fn validate_page_number(page_number: usize) -> Result<()> {
    if page_number == 0 {
        return Err(Error::InvalidPageNumber(page_number));
    }
    Ok(())
}

/// Validate that a configured count is non-zero
pub fn validate_limit(limit: usize, name: &str) -> Result<()> {
    if limit == 0 {
        return Err(Error::InvalidParameter {
            name: name.into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIELD VALIDATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Validate that a required text field is present and not blank
pub fn validate_required(value: Option<&str>, name: &str) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(Error::MissingField(name.into())),
    }
}

/// Loose email shape check: `\S+@\S+\.\S+` anywhere in the input
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(Error::InvalidEmail(email.to_string()))
    }
}
