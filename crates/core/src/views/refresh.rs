use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::settings::RefreshInterval;

/// Polling state owned by a single view.
///
/// A view is due when it has never been fetched, when a refresh was
/// requested (ticker/category/interval change, manual refresh), or when
/// auto-refresh is on and the interval has elapsed since the last fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshPolicy {
    pub auto_refresh: bool,
    pub interval: RefreshInterval,
    pub last_update: Option<DateTime<Utc>>,
    pending: bool,
}

impl RefreshPolicy {
    pub fn new(auto_refresh: bool, interval: RefreshInterval) -> Self {
        Self {
            auto_refresh,
            interval,
            last_update: None,
            pending: false,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_update {
            None => true,
            Some(_) if self.pending => true,
            Some(last) => self.auto_refresh && now >= last + self.interval.as_chrono(),
        }
    }

    /// When the next automatic refresh fires, if auto-refresh is on.
    pub fn next_update_at(&self) -> Option<DateTime<Utc>> {
        if !self.auto_refresh {
            return None;
        }
        self.last_update.map(|last| last + self.interval.as_chrono())
    }

    pub fn mark_refreshed(&mut self, now: DateTime<Utc>) {
        self.last_update = Some(now);
        self.pending = false;
    }

    pub fn request_refresh(&mut self) {
        self.pending = true;
    }

    /// Flipping auto-refresh also refetches immediately.
    pub fn toggle_auto_refresh(&mut self) {
        self.auto_refresh = !self.auto_refresh;
        self.pending = true;
    }

    pub fn set_interval(&mut self, interval: RefreshInterval) {
        if self.interval != interval {
            self.interval = interval;
            self.pending = true;
        }
    }

    /// "Next update in 4m 59s", or "Auto-refresh disabled".
    pub fn countdown_label(&self, now: DateTime<Utc>) -> String {
        if !self.auto_refresh {
            return "Auto-refresh disabled".to_string();
        }
        let remaining_ms = self
            .next_update_at()
            .map(|next| (next - now).num_milliseconds())
            .unwrap_or(0)
            .max(0);
        let minutes = remaining_ms / 60_000;
        let seconds = (remaining_ms % 60_000) / 1_000;
        format!("Next update in {minutes}m {seconds}s")
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(true, RefreshInterval::default())
    }
}
