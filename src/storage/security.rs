//! Name validation keeping documents and assets inside their directories.

use crate::errors::{StoreError, StoreResult};
use std::path::{Component, Path};

/// Validates that `name` is a bare file name with no way out of its directory.
///
/// Rejects empty names, NUL bytes, either path separator, and anything that
/// does not parse as exactly one normal path component (`.`, `..`, roots).
pub fn validate_bare_file_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::invalid_asset_name(name, "name cannot be empty"));
    }

    if name.contains('\0') {
        return Err(StoreError::invalid_asset_name(name, "name contains null bytes"));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(StoreError::invalid_asset_name(
            name,
            "name contains a path separator",
        ));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(StoreError::invalid_asset_name(
            name,
            "name must be a single plain file name",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bare_file_name() {
        assert!(validate_bare_file_name("products.json").is_ok());
        assert!(validate_bare_file_name("3f2c9a.png").is_ok());
        assert!(validate_bare_file_name("with space.jpg").is_ok());

        assert!(validate_bare_file_name("").is_err());
        assert!(validate_bare_file_name("   ").is_err());
        assert!(validate_bare_file_name(".").is_err());
        assert!(validate_bare_file_name("..").is_err());
        assert!(validate_bare_file_name("../etc/passwd").is_err());
        assert!(validate_bare_file_name("images/a.png").is_err());
        assert!(validate_bare_file_name("..\\windows\\a.png").is_err());
        assert!(validate_bare_file_name("/etc/passwd").is_err());
        assert!(validate_bare_file_name("file\0.png").is_err());
    }
}
