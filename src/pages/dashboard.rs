// 🥋 Dashboard - the featured athlete's profile and per-category results

use crate::entities::{Athlete, AthletePerformance, CategoryDefinition, CategoryKind};
use crate::fallback;

/// Image shown when the athlete photo cannot be loaded
pub const ATHLETE_PHOTO_PLACEHOLDER: &str = "https://via.placeholder.com/300/231F46/FFFFFF?text=ATLETA";

/// A performance joined with the category dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub code: String,
    pub label: String,
    pub kind: Option<CategoryKind>,
    pub points: u32,
    pub rank: u32,
    pub age_group: String,
}

impl PerformanceRow {
    fn resolve(performance: &AthletePerformance) -> Self {
        let definition = CategoryDefinition::find(&performance.category_code);
        PerformanceRow {
            code: performance.category_code.clone(),
            label: definition
                .map(|d| d.label.to_string())
                .unwrap_or_else(|| performance.category_code.clone()),
            kind: definition.map(|d| d.kind),
            points: performance.points,
            rank: performance.rank,
            age_group: performance.age_group.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub athlete: Athlete,
    pub rows: Vec<PerformanceRow>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new(fallback::featured_athlete())
    }
}

impl DashboardPage {
    pub fn new(athlete: Athlete) -> Self {
        let rows = athlete.performances.iter().map(PerformanceRow::resolve).collect();
        DashboardPage { athlete, rows }
    }

    pub fn total_points(&self) -> u32 {
        self.athlete.total_points()
    }

    pub fn best(&self) -> Option<&PerformanceRow> {
        self.rows.iter().min_by_key(|r| r.rank)
    }

    /// Efficiency as a 0-100 gauge value
    pub fn efficiency_percent(&self) -> u16 {
        ((self.athlete.clamped_average() + 1.0) / 2.0 * 100.0).round() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_resolved_against_dictionary() {
        let page = DashboardPage::default();
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.rows[0].label, "Kata Tradicional");
        assert_eq!(page.rows[1].kind, Some(CategoryKind::Combat));
        assert_eq!(page.rows[2].kind, Some(CategoryKind::Weapon));
    }

    #[test]
    fn test_totals_and_best() {
        let page = DashboardPage::default();
        assert_eq!(page.total_points(), 1870);
        let best = page.best().unwrap();
        assert_eq!(best.code, "C107");
        assert_eq!(best.rank, 1);
        assert_eq!(page.efficiency_percent(), 88);
    }

    #[test]
    fn test_unknown_code_shows_code() {
        let mut athlete = fallback::featured_athlete();
        athlete.performances = vec![AthletePerformance::new("X01", 10, 2, "+18")];
        let page = DashboardPage::new(athlete);
        assert_eq!(page.rows[0].label, "X01");
        assert_eq!(page.rows[0].kind, None);
    }
}
