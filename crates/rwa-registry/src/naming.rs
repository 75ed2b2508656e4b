//! Name sanitization for the storage network
//!
//! The registry issues bucket and object names that may contain dots;
//! the storage network's naming rules do not allow them. Substitution is
//! dot to hyphen. A name that still contains characters outside the
//! allowed charset after substitution is rejected outright - guessing a
//! replacement could collide with another registry-issued name.

use crate::error::{RegistryError, Result};

/// Characters the storage network accepts in bucket and object names.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '/'
}

/// Sanitize a registry-issued name for use on the storage network.
pub fn sanitize_object_name(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(RegistryError::InvalidName("name is empty".to_string()));
    }

    let sanitized = raw.replace('.', "-");

    if let Some(bad) = sanitized.chars().find(|c| !is_allowed(*c)) {
        return Err(RegistryError::InvalidName(format!(
            "name {:?} contains disallowed character {:?}",
            raw, bad
        )));
    }

    Ok(sanitized)
}
