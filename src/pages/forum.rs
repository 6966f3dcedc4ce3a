// 💬 Forum - "El Tatami Digital", static topic listing

use crate::entities::ForumTopic;
use crate::fallback::{FORUM_CATEGORIES, FORUM_TOPICS};

/// Pill that disables the category filter
pub const ALL_CATEGORIES: &str = "Todos";

#[derive(Debug, Clone)]
pub struct ForumPage {
    pub active_category: &'static str,
    pub search: String,
}

impl Default for ForumPage {
    fn default() -> Self {
        ForumPage {
            active_category: ALL_CATEGORIES,
            search: String::new(),
        }
    }
}

impl ForumPage {
    pub fn categories(&self) -> &'static [&'static str] {
        &FORUM_CATEGORIES
    }

    pub fn select_category(&mut self, category: &str) {
        if let Some(found) = FORUM_CATEGORIES.iter().find(|c| **c == category) {
            self.active_category = found;
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let len = FORUM_CATEGORIES.len();
        let current = FORUM_CATEGORIES
            .iter()
            .position(|c| *c == self.active_category)
            .unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.active_category = FORUM_CATEGORIES[next];
    }

    pub fn topics(&self) -> Vec<&'static ForumTopic> {
        let needle = self.search.to_lowercase();
        FORUM_TOPICS
            .iter()
            .filter(|t| self.active_category == ALL_CATEGORIES || t.category == self.active_category)
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_topics_by_default() {
        let page = ForumPage::default();
        assert_eq!(page.topics().len(), 5);
        assert_eq!(page.categories().len(), 6);
    }

    #[test]
    fn test_category_filter() {
        let mut page = ForumPage::default();
        page.select_category("Nutrición");
        let topics = page.topics();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, 3);

        page.select_category("Inexistente");
        assert_eq!(page.active_category, "Nutrición");
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let mut page = ForumPage::default();
        page.search = "GYAKU".to_string();
        assert_eq!(page.topics().len(), 1);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut page = ForumPage::default();
        page.cycle_category(false);
        assert_eq!(page.active_category, "Equipamiento");
        page.cycle_category(true);
        assert_eq!(page.active_category, ALL_CATEGORIES);
    }
}
