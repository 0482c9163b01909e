use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::news::{NewsCategory, NewsItem};
use crate::models::settings::Settings;
use crate::services::news_service::NewsService;
use super::refresh::RefreshPolicy;

/// State of the news tab.
#[derive(Debug, Clone, Serialize)]
pub struct NewsView {
    pub selected: Vec<NewsCategory>,
    pub policy: RefreshPolicy,
    pub items: Vec<NewsItem>,
    pub show_more: bool,
    pub error: Option<String>,
}

impl NewsView {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            selected: NewsCategory::default_selection(),
            policy,
            items: Vec::new(),
            show_more: false,
            error: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(RefreshPolicy::new(settings.auto_refresh, settings.refresh_interval))
    }

    /// Add or remove a category; the feed refetches either way.
    pub fn toggle_category(&mut self, category: NewsCategory) {
        if let Some(pos) = self.selected.iter().position(|c| *c == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category);
        }
        self.policy.request_refresh();
    }

    pub fn is_selected(&self, category: NewsCategory) -> bool {
        self.selected.contains(&category)
    }

    pub fn apply_items(&mut self, items: Vec<NewsItem>, now: DateTime<Utc>, news_service: &NewsService) {
        self.items = news_service.filter_by_categories(items, &self.selected);
        self.error = None;
        self.policy.mark_refreshed(now);
    }

    pub fn record_error(&mut self, error: &CoreError, now: DateTime<Utc>) {
        self.error = Some(error.to_string());
        self.policy.mark_refreshed(now);
    }

    pub fn toggle_show_more(&mut self) {
        self.show_more = !self.show_more;
    }
}
