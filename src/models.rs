// src/models.rs
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One website/username/password triple. The password is kept as plain text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PasswordRecord {
    pub website: String,
    pub username: String,
    pub password: String,
}

impl PasswordRecord {
    /// Builds a record from user input. Website and username are trimmed,
    /// the password is taken verbatim. Empty fields are rejected in field order.
    pub fn new(website: &str, username: &str, password: &str) -> Result<Self, ValidationError> {
        let website = website.trim();
        let username = username.trim();
        if website.is_empty() {
            return Err(ValidationError::MissingWebsite);
        }
        if username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(Self {
            website: website.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Ordered list of records, persisted as a bare JSON array.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct PasswordCollection {
    pub records: Vec<PasswordRecord>,
}

impl PasswordCollection {
    pub fn new() -> Self {
        PasswordCollection::default()
    }

    pub fn push(&mut self, record: PasswordRecord) {
        self.records.push(record);
    }

    /// Removes the record at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<PasswordRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&PasswordRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PasswordRecord> {
        self.records.iter()
    }

    /// Website of every record in order, duplicates included.
    pub fn websites(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.website.as_str())
    }
}

impl From<Vec<PasswordRecord>> for PasswordCollection {
    fn from(records: Vec<PasswordRecord>) -> Self {
        PasswordCollection { records }
    }
}

impl<'a> IntoIterator for &'a PasswordCollection {
    type Item = &'a PasswordRecord;
    type IntoIter = std::slice::Iter<'a, PasswordRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_trims_website_and_username() {
        let record = PasswordRecord::new("  example.com ", " alice ", " secret ").unwrap();
        assert_eq!(record.website, "example.com");
        assert_eq!(record.username, "alice");
        assert_eq!(record.password, " secret ", "password must not be trimmed");
    }

    #[test]
    fn test_new_record_rejects_empty_fields() {
        assert_eq!(PasswordRecord::new("", "u", "p"), Err(ValidationError::MissingWebsite));
        assert_eq!(PasswordRecord::new("   ", "u", "p"), Err(ValidationError::MissingWebsite));
        assert_eq!(PasswordRecord::new("site", " ", "p"), Err(ValidationError::MissingUsername));
        assert_eq!(PasswordRecord::new("site", "u", ""), Err(ValidationError::MissingPassword));
    }

    #[test]
    fn test_collection_serializes_as_array() {
        let mut collection = PasswordCollection::new();
        collection.push(PasswordRecord::new("a.com", "ann", "pw").unwrap());
        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(json, r#"[{"website":"a.com","username":"ann","password":"pw"}]"#);
    }

    #[test]
    fn test_collection_accepts_any_field_order() {
        let json = r#"[{"password":"pw","website":"a.com","username":"ann"}]"#;
        let collection: PasswordCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(0).unwrap().website, "a.com");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut collection: PasswordCollection =
            vec![PasswordRecord::new("a.com", "ann", "pw").unwrap()].into();
        assert!(collection.remove(1).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_websites_keeps_duplicates_in_order() {
        let collection: PasswordCollection = vec![
            PasswordRecord::new("b.com", "bob", "1").unwrap(),
            PasswordRecord::new("a.com", "ann", "2").unwrap(),
            PasswordRecord::new("b.com", "bea", "3").unwrap(),
        ]
        .into();
        let sites: Vec<&str> = collection.websites().collect();
        assert_eq!(sites, vec!["b.com", "a.com", "b.com"]);
    }
}
