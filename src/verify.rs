// src/verify.rs
use crate::models::PasswordCollection;

/// Index of the first record whose website and password both match exactly.
pub fn find_match(collection: &PasswordCollection, website: &str, password: &str) -> Option<usize> {
    collection
        .iter()
        .position(|r| r.website == website && r.password == password)
}

/// Exact, case-sensitive check of `password` against the records stored for `website`.
/// Not a constant-time comparison.
pub fn verify(collection: &PasswordCollection, website: &str, password: &str) -> bool {
    find_match(collection, website, password).is_some()
}
