// 📅 Tournament Entity - Calendar events with tier and status
//
// Tier and status are closed sets. Anything the server sends outside them is
// replaced by the default at the adapter boundary (see adapter.rs).

use serde::{Deserialize, Serialize};

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    #[default]
    Open,
    Closed,
    Finished,
}

impl TournamentStatus {
    pub const ALL: [TournamentStatus; 3] = [
        TournamentStatus::Open,
        TournamentStatus::Closed,
        TournamentStatus::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Open => "open",
            TournamentStatus::Closed => "closed",
            TournamentStatus::Finished => "finished",
        }
    }

    /// Exact match against the wire value
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Label shown in the calendar
    pub fn label(&self) -> &'static str {
        match self {
            TournamentStatus::Open => "Inscripciones abiertas",
            TournamentStatus::Closed => "Inscripciones cerradas",
            TournamentStatus::Finished => "Finalizado",
        }
    }
}

// ============================================================================
// TIER
// ============================================================================

/// Competitive level of a tournament (drives styling only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum TournamentTier {
    #[default]
    #[serde(rename = "3A")]
    ThreeA,
    #[serde(rename = "4A")]
    FourA,
    #[serde(rename = "5A")]
    FiveA,
}

impl TournamentTier {
    pub const ALL: [TournamentTier; 3] = [
        TournamentTier::ThreeA,
        TournamentTier::FourA,
        TournamentTier::FiveA,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentTier::ThreeA => "3A",
            TournamentTier::FourA => "4A",
            TournamentTier::FiveA => "5A",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Next tier in the selector, wrapping around
    pub fn next(&self) -> Self {
        match self {
            TournamentTier::ThreeA => TournamentTier::FourA,
            TournamentTier::FourA => TournamentTier::FiveA,
            TournamentTier::FiveA => TournamentTier::ThreeA,
        }
    }
}

// ============================================================================
// TOURNAMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: u64,
    pub name: String,
    /// ISO date, usually `YYYY-MM-DD`
    pub date: String,
    pub location: String,
    pub status: TournamentStatus,
    #[serde(rename = "type")]
    pub tier: TournamentTier,
    /// Flyer image URLs (at most 3 are uploaded from the admin panel)
    #[serde(default)]
    pub flyers: Vec<String>,

    // Contact fields (telefono / correo / whatsapp / pagina_web in the DB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Tournament {
    /// Open tournament with no flyers or contact data
    pub fn new(id: u64, name: &str, date: &str, location: &str, tier: TournamentTier) -> Self {
        Tournament {
            id,
            name: name.to_string(),
            date: date.to_string(),
            location: location.to_string(),
            status: TournamentStatus::Open,
            tier,
            flyers: Vec::new(),
            phone: None,
            email: None,
            whatsapp: None,
            website: None,
        }
    }

    /// Builder pattern: attach flyer URLs
    pub fn with_flyers(mut self, flyers: &[&str]) -> Self {
        self.flyers = flyers.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn has_contact(&self) -> bool {
        self.phone.is_some() || self.email.is_some() || self.whatsapp.is_some() || self.website.is_some()
    }
}
