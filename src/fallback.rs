// 🛟 Static fallback dataset
//
// Substituted whenever the matching endpoint answers with nothing (or fails),
// so every page always has something to show.

use crate::entities::{
    Athlete, AthletePerformance, ForumTopic, RankingEntry, SocialConfig, SocialPost, Tournament,
    TournamentTier, Trend, DEFAULT_ACCOUNT_NAME,
};

/// Return `fallback()` when `items` is empty
pub fn with_fallback<T>(items: Vec<T>, fallback: impl FnOnce() -> Vec<T>) -> Vec<T> {
    if items.is_empty() {
        fallback()
    } else {
        items
    }
}

// ============================================================================
// ATHLETE
// ============================================================================

pub fn featured_athlete() -> Athlete {
    Athlete {
        id: 101,
        first_name: "Alejandro".to_string(),
        last_name: "Velasquez".to_string(),
        belt_rank: "Verde".to_string(),
        age_label: "Adulto (+18)".to_string(),
        academy: "Dojo Cobra Kai".to_string(),
        team: Some("Team DKS".to_string()),
        photo_url: "https://images.unsplash.com/photo-1552072092-7f9b8d63efcb?q=80&w=800&auto=format&fit=crop"
            .to_string(),
        average: 0.75,
        performances: vec![
            AthletePerformance::new("K01", 570, 3, "+18"),
            AthletePerformance::new("C107", 1000, 1, "+18"),
            AthletePerformance::new("W01", 300, 5, "+18"),
        ],
    }
}

// ============================================================================
// CALENDAR 2026
// ============================================================================

pub fn upcoming_tournaments() -> Vec<Tournament> {
    use TournamentTier::*;

    vec![
        Tournament::new(1, "COPA COBRA DO", "2026-02-28", "Dtto Capital", FourA).with_flyers(&[
            "https://images.unsplash.com/photo-1599058945522-28d584b6f0ff?q=80&w=600&auto=format&fit=crop",
            "https://images.unsplash.com/photo-1555597673-b21d5c935865?q=80&w=600&auto=format&fit=crop",
        ]),
        Tournament::new(2, "BATALLA DE ARAGUA", "2026-03-21", "Aragua", ThreeA).with_flyers(&[
            "https://images.unsplash.com/photo-1517466787929-bc90951d0974?q=80&w=600&auto=format&fit=crop",
        ]),
        Tournament::new(3, "BATALLA DE GUERREROS", "2026-05-02", "Aragua", FiveA),
        Tournament::new(4, "FURIA DE DRAGONES", "2026-05-30", "Dtto Capital", FiveA),
        Tournament::new(5, "KARIKAN", "2026-06-27", "Dtto Capital", ThreeA),
        Tournament::new(6, "VARGA STAR", "2026-07-25", "Dtto Capital", FourA),
        Tournament::new(7, "BATALLA DE VENEZUELA", "2026-08-29", "Dtto Capital", FiveA),
        Tournament::new(8, "DK", "2026-09-26", "Dtto Capital", ThreeA),
        Tournament::new(9, "CCS OPEN MARTIAL ARTS", "2026-10-17", "Dtto Capital", FourA),
        Tournament::new(10, "UTV", "2026-11-21", "Dtto Capital", FiveA),
    ]
}

// ============================================================================
// RANKING
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn ranking_row(
    rank: u32,
    athlete_id: u64,
    name: &str,
    academy: &str,
    points: f64,
    trend: Trend,
    avatar: &str,
    code: &str,
) -> RankingEntry {
    let registry = crate::entities::CategoryRegistry::official();
    let official = registry.find_by_code(code);
    RankingEntry {
        rank,
        athlete_id: Some(athlete_id),
        athlete_name: name.to_string(),
        academy: academy.to_string(),
        points,
        trend,
        avatar: avatar.to_string(),
        category_code: code.to_string(),
        category_label: registry.label_for(code),
        age_group: official.map(|c| c.age).unwrap_or("+18").to_string(),
        belt: official.map(|c| c.belt).unwrap_or("N/A").to_string(),
    }
}

pub fn ranking_rows() -> Vec<RankingEntry> {
    vec![
        ranking_row(1, 201, "Alejandro Vargas", "Dojo Central", 1550.0, Trend::Stable,
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?q=80&w=150&auto=format&fit=crop", "C107"),
        ranking_row(2, 202, "Daniel Pérez", "Team Elite", 1450.0, Trend::Up,
            "https://images.unsplash.com/photo-1599566150163-29194dcaad36?q=80&w=150&auto=format&fit=crop", "C107"),
        ranking_row(3, 102, "Sofia Mendez", "Academia Tigre", 1250.0, Trend::Up,
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?q=80&w=150&auto=format&fit=crop", "C107"),
        ranking_row(4, 101, "Alejandro Velasquez", "Dojo Cobra Kai", 570.0, Trend::Up,
            "https://images.unsplash.com/photo-1583476348300-2c20842a8819?q=80&w=150&auto=format&fit=crop", "K01"),
        ranking_row(5, 105, "Juan Perez", "Dojo Cobra Kai", 900.0, Trend::Up,
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=150&auto=format&fit=crop", "K01"),
    ]
}

// ============================================================================
// SOCIAL FEED
// ============================================================================

pub const DEFAULT_POST_URLS: [&str; 3] = [
    "https://www.instagram.com/p/DGj8m9qTG_0/",
    "https://www.instagram.com/p/DGlx6mAzJtW/",
    "https://www.instagram.com/p/DGbN_lTz1e2/",
];

pub fn default_posts() -> Vec<SocialPost> {
    DEFAULT_POST_URLS
        .iter()
        .enumerate()
        .map(|(i, url)| SocialPost::with_id(&format!("def{}", i + 1), url))
        .collect()
}

pub fn default_social_config() -> SocialConfig {
    SocialConfig::new(DEFAULT_ACCOUNT_NAME, default_posts())
}

// ============================================================================
// FORUM
// ============================================================================

pub const FORUM_CATEGORIES: [&str; 6] = [
    "Todos",
    "Técnica",
    "Reglamento",
    "Nutrición",
    "Comunidad",
    "Equipamiento",
];

pub const FORUM_TOPICS: &[ForumTopic] = &[
    ForumTopic {
        id: 1,
        title: "Análisis: Nuevas Reglas de Puntuación 2026",
        category: "Reglamento",
        author: "Sensei Miguel",
        replies: 42,
        views: 1205,
        last_activity: "Hace 2 horas",
        is_hot: true,
    },
    ForumTopic {
        id: 2,
        title: "¿Cómo mejorar la explosividad en el Gyaku Tsuki?",
        category: "Técnica",
        author: "Alejandro V.",
        replies: 18,
        views: 850,
        last_activity: "Hace 5 horas",
        is_hot: false,
    },
    ForumTopic {
        id: 3,
        title: "Estrategias de hidratación para corte de peso",
        category: "Nutrición",
        author: "Dr. Fit",
        replies: 56,
        views: 2100,
        last_activity: "Hace 1 día",
        is_hot: true,
    },
    ForumTopic {
        id: 4,
        title: "Busco dojo competitivo en Valencia",
        category: "Comunidad",
        author: "NewFighter_99",
        replies: 8,
        views: 320,
        last_activity: "Hace 2 días",
        is_hot: false,
    },
    ForumTopic {
        id: 5,
        title: "Mejores protecciones homologadas: ¿Marca A o B?",
        category: "Equipamiento",
        author: "KarateKid",
        replies: 25,
        views: 1100,
        last_activity: "Hace 3 días",
        is_hot: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fallback_only_when_empty() {
        let kept = with_fallback(vec![1, 2], || vec![9]);
        assert_eq!(kept, vec![1, 2]);
        let replaced: Vec<i32> = with_fallback(Vec::new(), || vec![9]);
        assert_eq!(replaced, vec![9]);
    }

    #[test]
    fn test_fallback_dataset_is_non_empty() {
        assert_eq!(upcoming_tournaments().len(), 10);
        assert_eq!(ranking_rows().len(), 5);
        assert_eq!(default_posts().len(), 3);
        assert_eq!(featured_athlete().performances.len(), 3);
    }

    #[test]
    fn test_ranking_rows_backfilled_from_official_table() {
        let rows = ranking_rows();
        assert_eq!(rows[0].category_label, "Combate");
        assert_eq!(rows[0].belt, "Marrón-Negro");
        assert_eq!(rows[3].category_label, "Kata Tradicional");
    }
}
