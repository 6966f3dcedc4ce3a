// 📸 Social Feed - Instagram posts shown on the landing page
//
// The server only stores URLs. Post ids are local handles for the editor.

use serde::{Deserialize, Serialize};

/// Account shown when the server does not send one
pub const DEFAULT_ACCOUNT_NAME: &str = "@LINAMVEOFFICIAL";

/// Hard cap of posts in the feed
pub const MAX_SOCIAL_POSTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    pub post_url: String,
}

impl SocialPost {
    /// New post with a fresh local id
    pub fn new(post_url: &str) -> Self {
        SocialPost {
            id: uuid::Uuid::new_v4().to_string(),
            post_url: post_url.to_string(),
        }
    }

    pub fn with_id(id: &str, post_url: &str) -> Self {
        SocialPost {
            id: id.to_string(),
            post_url: post_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialConfig {
    pub account_name: String,
    pub posts: Vec<SocialPost>,
}

impl SocialConfig {
    pub fn new(account_name: &str, posts: Vec<SocialPost>) -> Self {
        SocialConfig {
            account_name: account_name.to_string(),
            posts,
        }
    }

    pub fn post_urls(&self) -> Vec<String> {
        self.posts.iter().map(|p| p.post_url.clone()).collect()
    }

    pub fn is_full(&self) -> bool {
        self.posts.len() >= MAX_SOCIAL_POSTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_posts_get_distinct_ids() {
        let a = SocialPost::new("https://www.instagram.com/p/A/");
        let b = SocialPost::new("https://www.instagram.com/p/A/");
        assert_ne!(a.id, b.id);
        assert_eq!(a.post_url, b.post_url);
    }

    #[test]
    fn test_full_at_cap() {
        let posts = (0..MAX_SOCIAL_POSTS)
            .map(|i| SocialPost::with_id(&i.to_string(), "u"))
            .collect();
        let config = SocialConfig::new(DEFAULT_ACCOUNT_NAME, posts);
        assert!(config.is_full());
    }
}
