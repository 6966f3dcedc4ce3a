// 🏆 Ranking Entry - Denormalized athlete + category + points + rank

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Trend::Up),
            "down" => Some(Trend::Down),
            "stable" => Some(Trend::Stable),
            _ => None,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Stable => "■",
        }
    }
}

/// Placeholder avatar used when the server has no photo
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/150/0F0E17/FFFFFF?text=ATLETA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// Position in the category, starting at 1
    pub rank: u32,
    /// `None` when the server row carries no usable id
    pub athlete_id: Option<u64>,
    pub athlete_name: String,
    pub academy: String,
    pub points: f64,
    pub trend: Trend,
    pub avatar: String,
    pub category_code: String,
    /// Modality name, e.g. "Combate"
    pub category_label: String,
    pub age_group: String,
    pub belt: String,
}

impl RankingEntry {
    pub fn is_podium(&self) -> bool {
        (1..=3).contains(&self.rank)
    }
}

/// Top `n` entries ordered by rank
pub fn top_ranked(entries: &[RankingEntry], n: usize) -> Vec<RankingEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.rank);
    sorted.truncate(n);
    sorted
}
