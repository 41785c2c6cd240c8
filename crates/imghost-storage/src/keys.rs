//! Stored-name generation.

use uuid::Uuid;

/// Generate a fresh stored name: 32 hex characters of UUIDv4 randomness
/// plus the client's extension.
///
/// The name is never derived from the client filename, so collisions are
/// negligible and path traversal through the filename is impossible. The
/// extension keeps the client's casing; it has already passed the
/// allow-list.
pub fn generate_stored_name(extension: &str) -> String {
    format!("{}.{}", Uuid::new_v4().simple(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_distinct() {
        let names: HashSet<String> = (0..1000).map(|_| generate_stored_name("jpg")).collect();
        assert_eq!(names.len(), 1000);
    }

    #[test]
    fn test_name_shape() {
        let name = generate_stored_name("PNG");
        let (stem, ext) = name.split_once('.').unwrap();
        assert_eq!(stem.len(), 32);
        assert!(stem.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(ext, "PNG");
    }
}
