// src/commands.rs
//! User-facing actions shared by the CLI and the TUI.
//!
//! Each `on_*` method does one complete request: validate, call the store or
//! the strength engine, then notify the feedback sink. Confirmation prompts
//! stay with the caller.

use crate::error::{AppResult, TuiError, ValidationError};
use crate::feedback::{FeedbackEvent, FeedbackSink};
use crate::models::{PasswordCollection, PasswordRecord};
use crate::stats::Dashboard;
use crate::store::{RecordStore, SlotStorage};
use crate::strength;
use crate::verify;

/// Text shown by site selectors before anything is picked.
pub const SITE_PLACEHOLDER: &str = "Select saved site";

pub struct CommandHandler<S: SlotStorage, F: FeedbackSink> {
    store: RecordStore<S>,
    feedback: F,
}

impl<S: SlotStorage, F: FeedbackSink> CommandHandler<S, F> {
    pub fn new(store: RecordStore<S>, feedback: F) -> Self {
        CommandHandler { store, feedback }
    }

    #[cfg(test)]
    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn snapshot(&self) -> PasswordCollection {
        self.store.load()
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::compute(&self.store.load())
    }

    pub fn on_save(&self, website: &str, username: &str, password: &str) -> AppResult<PasswordRecord> {
        let record = PasswordRecord::new(website, username, password).map_err(|e| {
            log::warn!("Rejected save: {}", e);
            e
        })?;
        self.store.append(record.clone())?;
        log::info!("Saved password for '{}' ({})", record.website, record.username);
        self.feedback.notify(&FeedbackEvent::Saved);
        Ok(record)
    }

    /// `Ok(false)` when `index` does not name a record.
    pub fn on_delete(&self, index: usize) -> AppResult<bool> {
        let removed = self.store.delete_at(index)?;
        if removed.is_some() {
            self.feedback.notify(&FeedbackEvent::Deleted);
        }
        Ok(removed.is_some())
    }

    pub fn on_clear(&self) -> AppResult<()> {
        self.store.clear()?;
        self.feedback.notify(&FeedbackEvent::Cleared);
        Ok(())
    }

    pub fn on_verify(&self, site: Option<&str>, password: &str) -> AppResult<bool> {
        let site = match site {
            Some(s) if !s.is_empty() && s != SITE_PLACEHOLDER => s,
            _ => {
                log::warn!("Verification requested without a selected site");
                return Err(ValidationError::NoSiteSelected.into());
            }
        };
        let matched = verify::verify(&self.store.load(), site, password);
        log::info!("Verification for '{}': {}", site, if matched { "match" } else { "no match" });
        self.feedback.notify(if matched {
            &FeedbackEvent::Verified
        } else {
            &FeedbackEvent::Incorrect
        });
        Ok(matched)
    }

    pub fn on_check_strength(&self, password: &str) -> u8 {
        let score = strength::score(password);
        self.feedback.notify(&FeedbackEvent::StrengthChecked(score));
        score
    }

    /// Hands the password at `index` to `write` (the clipboard). `Copied`
    /// is announced only once the write succeeded; `Ok(false)` when `index`
    /// does not name a record.
    pub fn on_copy<W>(&self, index: usize, write: W) -> AppResult<bool>
    where
        W: FnOnce(&str) -> Result<(), TuiError>,
    {
        let collection = self.store.load();
        let Some(record) = collection.get(index) else {
            return Ok(false);
        };
        write(&record.password)?;
        log::info!("Copied password for '{}' to clipboard", record.website);
        self.feedback.notify(&FeedbackEvent::Copied);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::feedback::RecordingFeedback;
    use crate::store::{MemoryStorage, DEFAULT_SLOT};

    fn commands() -> CommandHandler<MemoryStorage, RecordingFeedback> {
        CommandHandler::new(
            RecordStore::new(MemoryStorage::new(), DEFAULT_SLOT),
            RecordingFeedback::new(),
        )
    }

    #[test]
    fn test_save_appends_and_notifies() {
        let cmd = commands();
        let record = cmd.on_save(" mail.com ", "ann", "Secret1!").unwrap();
        assert_eq!(record.website, "mail.com");
        assert_eq!(cmd.snapshot().len(), 1);
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::Saved));
    }

    #[test]
    fn test_save_rejects_missing_field_without_touching_store() {
        let cmd = commands();
        let err = cmd.on_save("mail.com", "", "pw").unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::MissingUsername)));
        assert!(cmd.snapshot().is_empty());
        assert!(cmd.feedback().last().is_none());
    }

    #[test]
    fn test_delete_reports_out_of_range() {
        let cmd = commands();
        cmd.on_save("a.com", "ann", "pw").unwrap();
        assert!(!cmd.on_delete(5).unwrap());
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::Saved));
        assert!(cmd.on_delete(0).unwrap());
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::Deleted));
        assert!(cmd.snapshot().is_empty());
    }

    #[test]
    fn test_clear_empties_store() {
        let cmd = commands();
        cmd.on_save("a.com", "ann", "pw").unwrap();
        cmd.on_save("b.com", "bob", "pw").unwrap();
        cmd.on_clear().unwrap();
        assert!(cmd.snapshot().is_empty());
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::Cleared));
    }

    #[test]
    fn test_verify_outcomes() {
        let cmd = commands();
        cmd.on_save("mail.com", "ann", "Secret1!").unwrap();
        assert!(cmd.on_verify(Some("mail.com"), "Secret1!").unwrap());
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::Verified));
        assert!(!cmd.on_verify(Some("mail.com"), "secret1!").unwrap());
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::Incorrect));
    }

    #[test]
    fn test_verify_requires_selected_site() {
        let cmd = commands();
        for site in [None, Some(""), Some(SITE_PLACEHOLDER)] {
            let err = cmd.on_verify(site, "pw").unwrap_err();
            assert!(matches!(err, AppError::Validation(ValidationError::NoSiteSelected)));
        }
        assert!(cmd.feedback().events().is_empty());
    }

    #[test]
    fn test_check_strength_announces_score() {
        let cmd = commands();
        assert_eq!(cmd.on_check_strength("Password1"), 75);
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::StrengthChecked(75)));
    }

    #[test]
    fn test_copy_writes_password_then_announces() {
        let cmd = commands();
        cmd.on_save("a.com", "ann", "pw1").unwrap();
        let mut copied = String::new();
        assert!(cmd
            .on_copy(0, |text| {
                copied = text.to_string();
                Ok(())
            })
            .unwrap());
        assert_eq!(copied, "pw1");
        assert_eq!(cmd.feedback().last(), Some(FeedbackEvent::Copied));

        assert!(!cmd.on_copy(1, |_| panic!("nothing to write")).unwrap());
    }

    #[test]
    fn test_copy_failure_is_not_announced() {
        let cmd = commands();
        cmd.on_save("a.com", "ann", "pw1").unwrap();
        let err = cmd
            .on_copy(0, |_| Err(TuiError::Clipboard("no display".to_string())))
            .unwrap_err();
        assert!(matches!(err, AppError::Tui(TuiError::Clipboard(_))));
        assert_eq!(cmd.feedback().events(), vec![FeedbackEvent::Saved]);
    }

    #[test]
    fn test_dashboard_reflects_scenario() {
        let cmd = commands();
        cmd.on_save("a.com", "ann", "abc").unwrap();
        cmd.on_save("b.com", "bob", "Password1").unwrap();
        cmd.on_save("c.com", "cat", "P@ssw0rd1").unwrap();
        let stats = cmd.dashboard().stats;
        assert_eq!((stats.total, stats.weak_count, stats.average_score), (3, 1, 58));
    }
}
