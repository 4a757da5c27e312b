// src/strength.rs
use std::fmt;

const LENGTH_BONUS: u8 = 30;
const UPPERCASE_BONUS: u8 = 20;
const DIGIT_BONUS: u8 = 25;
const SPECIAL_BONUS: u8 = 25;

const MIN_LENGTH: usize = 8;
const MAX_SCORE: u8 = 100;

/// Scores at or above this are labelled Strong.
pub const STRONG_THRESHOLD: u8 = 50;
const HIGH_TIER_THRESHOLD: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Weak => write!(f, "Weak"),
            Strength::Strong => write!(f, "Strong"),
        }
    }
}

/// Colour bucket for the strength meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterTier {
    Low,
    Medium,
    High,
}

/// Heuristic strength score in `0..=100`.
pub fn score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let mut total: u8 = 0;
    // length in UTF-16 code units, so astral characters count twice
    if password.encode_utf16().count() >= MIN_LENGTH {
        total += LENGTH_BONUS;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        total += UPPERCASE_BONUS;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        total += DIGIT_BONUS;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        total += SPECIAL_BONUS;
    }
    total.min(MAX_SCORE)
}

pub fn classify(score: u8) -> Strength {
    if score >= STRONG_THRESHOLD {
        Strength::Strong
    } else {
        Strength::Weak
    }
}

pub fn meter_tier(score: u8) -> MeterTier {
    if score < STRONG_THRESHOLD {
        MeterTier::Low
    } else if score < HIGH_TIER_THRESHOLD {
        MeterTier::Medium
    } else {
        MeterTier::High
    }
}
