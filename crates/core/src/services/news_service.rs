use crate::models::news::{NewsCategory, NewsItem};

/// Filters the news feed to the categories a reader selected.
pub struct NewsService;

impl NewsService {
    pub fn new() -> Self {
        Self
    }

    /// Keep items whose category is selected, preserving feed order.
    pub fn filter_by_categories(&self, items: Vec<NewsItem>, selected: &[NewsCategory]) -> Vec<NewsItem> {
        items
            .into_iter()
            .filter(|item| selected.contains(&item.category))
            .collect()
    }
}

impl Default for NewsService {
    fn default() -> Self {
        Self::new()
    }
}
