// src/stats.rs
use chrono::{DateTime, Local};

use crate::models::PasswordCollection;
use crate::strength::{self, STRONG_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub weak_count: usize,
    pub average_score: u8,
}

impl Stats {
    pub fn from_collection(collection: &PasswordCollection) -> Self {
        let mut weak_count = 0;
        let mut sum: u64 = 0;
        for record in collection {
            let s = strength::score(&record.password);
            sum += u64::from(s);
            if s < STRONG_THRESHOLD {
                weak_count += 1;
            }
        }
        Stats {
            total: collection.len(),
            weak_count,
            average_score: rounded_mean(sum, collection.len()),
        }
    }

    pub fn strong_count(&self) -> usize {
        self.total - self.weak_count
    }
}

/// Mean rounded half-up; 0 when there is nothing to average.
fn rounded_mean(sum: u64, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    // floor(sum / count + 1/2) in integers
    let mean = (2 * sum + count) / (2 * count);
    mean.min(100) as u8
}

/// Stats plus the moment they were computed, as shown on the dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: Stats,
    pub last_check: DateTime<Local>,
}

impl Dashboard {
    pub fn compute(collection: &PasswordCollection) -> Self {
        Dashboard {
            stats: Stats::from_collection(collection),
            last_check: Local::now(),
        }
    }

    pub fn average_label(&self) -> String {
        format!("{}/100", self.stats.average_score)
    }

    pub fn last_check_label(&self) -> String {
        self.last_check.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
