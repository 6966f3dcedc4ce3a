// Entity Models - League view records
//
// Every record is an immutable value sourced fresh from the API or from the
// static fallback dataset on each load. Nothing here is persisted client-side.

pub mod athlete;
pub mod category;
pub mod forum;
pub mod ranking;
pub mod social;
pub mod tournament;

pub use athlete::{Athlete, AthletePerformance, UserRole};
pub use category::{
    CategoryDefinition, CategoryKind, CategoryRegistry, OfficialCategory, CATEGORY_DICTIONARY,
    OFFICIAL_CATEGORIES,
};
pub use forum::ForumTopic;
pub use ranking::{top_ranked, RankingEntry, Trend, PLACEHOLDER_AVATAR};
pub use social::{SocialConfig, SocialPost, DEFAULT_ACCOUNT_NAME, MAX_SOCIAL_POSTS};
pub use tournament::{Tournament, TournamentStatus, TournamentTier};
