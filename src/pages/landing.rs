// 🏠 Landing - featured event, podium preview and the Instagram feed

use crate::api::LeagueClient;
use crate::entities::{top_ranked, RankingEntry, SocialConfig, Tournament};
use crate::fallback;
use crate::pages::events::local_date;
use chrono::NaiveDate;
use tracing::info;

#[derive(Debug, Clone)]
pub struct LandingPage {
    pub featured: Option<Tournament>,
    pub top_ranking: Vec<RankingEntry>,
    pub social: SocialConfig,
    pub loading_social: bool,
}

impl Default for LandingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LandingPage {
    pub fn new() -> Self {
        LandingPage {
            featured: fallback::upcoming_tournaments().into_iter().next(),
            top_ranking: top_ranked(&fallback::ranking_rows(), 3),
            social: fallback::default_social_config(),
            loading_social: true,
        }
    }

    pub async fn load(client: &LeagueClient) -> Self {
        let mut page = Self::new();
        page.apply_social_feed(client.fetch_social_feed().await);
        page
    }

    /// Server posts replace the defaults only when there are some
    pub fn apply_social_feed(&mut self, feed: Option<SocialConfig>) {
        self.loading_social = false;
        match feed {
            Some(feed) if !feed.posts.is_empty() => {
                info!(posts = feed.posts.len(), "social feed loaded");
                self.social = feed;
            }
            _ => self.social = fallback::default_social_config(),
        }
    }

    pub fn featured_date(&self) -> Option<NaiveDate> {
        self.featured.as_ref().and_then(|t| local_date(&t.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{SocialPost, DEFAULT_ACCOUNT_NAME};

    #[test]
    fn test_initial_state() {
        let page = LandingPage::new();
        assert_eq!(page.featured.as_ref().map(|t| t.name.as_str()), Some("COPA COBRA DO"));
        assert_eq!(page.top_ranking.len(), 3);
        assert_eq!(page.top_ranking[0].rank, 1);
        assert_eq!(page.featured_date(), NaiveDate::from_ymd_opt(2026, 2, 28));
    }

    #[test]
    fn test_server_feed_applied() {
        let mut page = LandingPage::new();
        let feed = SocialConfig::new("@dojo", vec![SocialPost::new("https://www.instagram.com/p/X")]);
        page.apply_social_feed(Some(feed));
        assert_eq!(page.social.account_name, "@dojo");
        assert_eq!(page.social.posts.len(), 1);
        assert!(!page.loading_social);
    }

    #[test]
    fn test_empty_or_missing_feed_uses_defaults() {
        let mut page = LandingPage::new();
        page.apply_social_feed(Some(SocialConfig::new("@dojo", Vec::new())));
        assert_eq!(page.social.account_name, DEFAULT_ACCOUNT_NAME);
        assert_eq!(page.social.posts.len(), 3);

        page.apply_social_feed(None);
        assert_eq!(page.social.posts.len(), 3);
    }
}
