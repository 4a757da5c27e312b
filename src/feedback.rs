// src/feedback.rs
#[cfg(test)]
use std::cell::RefCell;
use std::fmt;

/// Named events the audio-feedback collaborator may announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    Saved,
    Deleted,
    Cleared,
    Verified,
    Incorrect,
    Copied,
    StrengthChecked(u8),
}

impl FeedbackEvent {
    /// Phrase spoken for this event.
    pub fn phrase(&self) -> String {
        match self {
            FeedbackEvent::Saved => "Password saved".to_string(),
            FeedbackEvent::Deleted => "Password deleted".to_string(),
            FeedbackEvent::Cleared => "All passwords cleared".to_string(),
            FeedbackEvent::Verified => "Password verified".to_string(),
            FeedbackEvent::Incorrect => "Password incorrect".to_string(),
            FeedbackEvent::Copied => "Password copied to clipboard".to_string(),
            FeedbackEvent::StrengthChecked(score) => {
                format!("Password strength is {} out of 100", score)
            }
        }
    }
}

impl fmt::Display for FeedbackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

/// Receives advisory notifications. Nothing is returned to the caller.
pub trait FeedbackSink {
    fn notify(&self, event: &FeedbackEvent);
}

/// Writes each phrase to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn notify(&self, event: &FeedbackEvent) {
        log::info!("feedback: {}", event.phrase());
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn notify(&self, _event: &FeedbackEvent) {}
}

/// Keeps every event, in order, for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    events: RefCell<Vec<FeedbackEvent>>,
}

#[cfg(test)]
impl RecordingFeedback {
    pub fn new() -> Self {
        RecordingFeedback::default()
    }

    pub fn last(&self) -> Option<FeedbackEvent> {
        self.events.borrow().last().copied()
    }

    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.borrow().clone()
    }
}

#[cfg(test)]
impl FeedbackSink for RecordingFeedback {
    fn notify(&self, event: &FeedbackEvent) {
        self.events.borrow_mut().push(*event);
    }
}

/// Either announces events or drops them, chosen at startup from config.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredFeedback {
    Log(LogFeedback),
    Silent(SilentFeedback),
}

impl ConfiguredFeedback {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            ConfiguredFeedback::Log(LogFeedback)
        } else {
            ConfiguredFeedback::Silent(SilentFeedback)
        }
    }
}

impl FeedbackSink for ConfiguredFeedback {
    fn notify(&self, event: &FeedbackEvent) {
        match self {
            ConfiguredFeedback::Log(sink) => sink.notify(event),
            ConfiguredFeedback::Silent(sink) => sink.notify(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases() {
        assert_eq!(FeedbackEvent::Saved.phrase(), "Password saved");
        assert_eq!(FeedbackEvent::Incorrect.to_string(), "Password incorrect");
        assert_eq!(
            FeedbackEvent::StrengthChecked(75).phrase(),
            "Password strength is 75 out of 100"
        );
    }

    #[test]
    fn test_recording_feedback_keeps_order() {
        let sink = RecordingFeedback::new();
        assert!(sink.last().is_none());
        sink.notify(&FeedbackEvent::Saved);
        sink.notify(&FeedbackEvent::Deleted);
        assert_eq!(sink.events(), vec![FeedbackEvent::Saved, FeedbackEvent::Deleted]);
        assert_eq!(sink.last(), Some(FeedbackEvent::Deleted));
    }

    #[test]
    fn test_configured_feedback_variant() {
        assert!(matches!(ConfiguredFeedback::from_enabled(true), ConfiguredFeedback::Log(_)));
        assert!(matches!(ConfiguredFeedback::from_enabled(false), ConfiguredFeedback::Silent(_)));
    }
}
