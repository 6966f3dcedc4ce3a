// 🏆 Ranking - category filter plus per-category leaderboard

use crate::api::LeagueClient;
use crate::category_filter::{search_label, CategoryFilter, FilterError, FilterField};
use crate::entities::{CategoryRegistry, RankingEntry};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RankingPage {
    pub filter: CategoryFilter,
    pub active_field: FilterField,
    pub rows: Vec<RankingEntry>,
    pub search_label: Option<String>,
    pub searched: bool,
    pub loading: bool,
    /// Shown when the selections do not resolve to a category
    pub message: Option<String>,
    pub filters_expanded: bool,
}

impl Default for RankingPage {
    fn default() -> Self {
        Self::new(CategoryRegistry::official())
    }
}

impl RankingPage {
    pub fn new(registry: CategoryRegistry) -> Self {
        RankingPage {
            filter: CategoryFilter::new(registry.official_table()),
            active_field: FilterField::Modality,
            rows: Vec::new(),
            search_label: None,
            searched: false,
            loading: false,
            message: None,
            filters_expanded: true,
        }
    }

    pub fn focus_next_field(&mut self) {
        self.active_field = self.active_field.next();
    }

    pub fn focus_previous_field(&mut self) {
        self.active_field = self.active_field.previous();
    }

    pub fn cycle_active(&mut self, forward: bool) {
        self.filter.cycle(self.active_field, forward);
        self.message = None;
    }

    /// Resolve the selections; on success returns the code to fetch
    pub fn begin_search(&mut self) -> Result<&'static str, FilterError> {
        match self.filter.resolve() {
            Ok(category) => {
                self.message = None;
                self.loading = true;
                self.searched = true;
                self.filters_expanded = false;
                self.search_label = Some(search_label(category));
                Ok(category.code)
            }
            Err(e) => {
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn finish_search(&mut self, rows: Vec<RankingEntry>) {
        self.rows = rows;
        self.loading = false;
    }

    pub async fn search(&mut self, client: &LeagueClient) {
        if let Ok(code) = self.begin_search() {
            info!(code, "fetching category ranking");
            let rows = client.fetch_category_ranking(code).await;
            self.finish_search(rows);
        }
    }

    /// Heading and hint for an empty result area
    pub fn empty_state(&self) -> (&'static str, &'static str) {
        if self.searched {
            ("SIN REGISTROS", "No se encontraron resultados para esta categoría.")
        } else {
            ("BUSCAR ATLETAS", "Usa los filtros superiores para encontrar el ranking.")
        }
    }
}
