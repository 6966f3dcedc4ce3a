// LINAMVE League - Core Library
// Exposes all modules for use in the terminal client, the dev server, and tests

pub mod adapter;         // Raw backend rows → domain records
pub mod api;             // `?action=` HTTP client
pub mod category_filter; // Cascading official-category selector
pub mod config;
pub mod entities;
pub mod error;
pub mod fallback;        // Built-in dataset used when the backend is empty or down
pub mod pages;
pub mod store;           // JSON-file store behind the dev server
pub mod validation;

// Dev backend router, only with the server feature
#[cfg(feature = "server")]
pub mod server;

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use api::{LeagueClient, MutationResponse, NewEvent};
pub use category_filter::{CategoryFilter, FilterError, FilterField};
pub use config::Config;
pub use entities::{
    Athlete, CategoryRegistry, OfficialCategory, RankingEntry, SocialConfig, SocialPost,
    Tournament, TournamentStatus, TournamentTier, Trend, UserRole,
};
pub use error::{LeagueError, Result};
pub use pages::Page;
pub use store::{LeagueStore, StoreData};
pub use validation::ValidationError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
