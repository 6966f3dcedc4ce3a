// 🥋 Athlete Entity - Identity, belt rank and per-category performances

use serde::{Deserialize, Serialize};

/// Who is looking at the app (drives which header tabs are offered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Guest,
    Spectator,
    Athlete,
    Instructor,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Guest => "guest",
            UserRole::Spectator => "spectator",
            UserRole::Athlete => "athlete",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }

    pub fn can_administer(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// An athlete's standing in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthletePerformance {
    /// Key into the category dictionary
    pub category_code: String,
    pub points: u32,
    pub rank: u32,
    /// e.g. "+18", "14-17"
    pub age_group: String,
}

impl AthletePerformance {
    pub fn new(category_code: &str, points: u32, rank: u32, age_group: &str) -> Self {
        AthletePerformance {
            category_code: category_code.to_string(),
            points,
            rank,
            age_group: age_group.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub belt_rank: String,
    /// Global age label, e.g. "Adulto (+18)"
    pub age_label: String,
    pub academy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub performances: Vec<AthletePerformance>,
    pub photo_url: String,
    /// Efficiency across all categories, in [-1.0, 1.0]
    pub average: f64,
}

impl Athlete {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn total_points(&self) -> u32 {
        self.performances.iter().map(|p| p.points).sum()
    }

    /// Performance with the best (lowest) rank
    pub fn best_performance(&self) -> Option<&AthletePerformance> {
        self.performances.iter().min_by_key(|p| p.rank)
    }

    /// Performances ordered by rank, best first
    pub fn performances_by_rank(&self) -> Vec<&AthletePerformance> {
        let mut sorted: Vec<_> = self.performances.iter().collect();
        sorted.sort_by_key(|p| p.rank);
        sorted
    }

    /// Average clamped into its documented range
    pub fn clamped_average(&self) -> f64 {
        self.average.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Athlete {
        Athlete {
            id: 7,
            first_name: "Sofia".to_string(),
            last_name: "Mendez".to_string(),
            belt_rank: "Negro".to_string(),
            age_label: "Adulto (+18)".to_string(),
            academy: "Academia Tigre".to_string(),
            team: None,
            performances: vec![
                AthletePerformance::new("K01", 200, 4, "+18"),
                AthletePerformance::new("C107", 900, 2, "+18"),
            ],
            photo_url: String::new(),
            average: 1.4,
        }
    }

    #[test]
    fn test_totals_and_best() {
        let athlete = sample();
        assert_eq!(athlete.full_name(), "Sofia Mendez");
        assert_eq!(athlete.total_points(), 1100);
        assert_eq!(athlete.best_performance().unwrap().category_code, "C107");
        assert_eq!(athlete.performances_by_rank()[1].category_code, "K01");
        assert_eq!(athlete.clamped_average(), 1.0);
    }

    #[test]
    fn test_only_admin_administers() {
        assert!(UserRole::Admin.can_administer());
        assert!(!UserRole::Instructor.can_administer());
    }
}
