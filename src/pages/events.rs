// 📅 Events - tournament calendar with search and contact links

use crate::api::LeagueClient;
use crate::entities::Tournament;
use crate::fallback::{self, with_fallback};
use chrono::NaiveDate;
use tracing::info;

/// Calendar date for `YYYY-MM-DD`, ignoring any time part
pub fn local_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub fn whatsapp_url(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}", digits)
}

pub fn web_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventsPage {
    pub tournaments: Vec<Tournament>,
    pub search: String,
    pub loading: bool,
    pub selected: usize,
}

impl EventsPage {
    pub fn new() -> Self {
        EventsPage {
            loading: true,
            ..Default::default()
        }
    }

    pub async fn load(client: &LeagueClient) -> Self {
        let mut page = Self::new();
        page.apply_events(client.fetch_events().await);
        page
    }

    pub fn apply_events(&mut self, events: Vec<Tournament>) {
        if events.is_empty() {
            info!("calendar empty, showing the built-in schedule");
        }
        self.tournaments = with_fallback(events, fallback::upcoming_tournaments);
        self.loading = false;
        self.selected = 0;
    }

    /// Case-insensitive match on name or location
    pub fn filtered(&self) -> Vec<&Tournament> {
        let needle = self.search.to_lowercase();
        self.tournaments
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle) || t.location.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.selected = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    pub fn no_match_message(&self) -> Option<String> {
        if !self.loading && self.filtered().is_empty() {
            Some(format!(
                "No hay coincidencias para \"{}\". Intenta con otro nombre.",
                self.search
            ))
        } else {
            None
        }
    }

    pub fn selected_tournament(&self) -> Option<&Tournament> {
        self.filtered().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TournamentTier;

    #[test]
    fn test_local_date() {
        assert_eq!(local_date("2026-06-27"), NaiveDate::from_ymd_opt(2026, 6, 27));
        assert_eq!(local_date("2026-06-27T10:00:00.000Z"), NaiveDate::from_ymd_opt(2026, 6, 27));
        assert_eq!(local_date("pronto"), None);
    }

    #[test]
    fn test_contact_links() {
        assert_eq!(whatsapp_url("+58 412 1234567"), "https://wa.me/584121234567");
        assert_eq!(web_url("karikan.com"), "https://karikan.com");
        assert_eq!(web_url("http://karikan.com"), "http://karikan.com");
    }

    #[test]
    fn test_empty_calendar_uses_fallback() {
        let mut page = EventsPage::new();
        page.apply_events(Vec::new());
        assert_eq!(page.tournaments.len(), 10);
        assert!(!page.loading);
    }

    #[test]
    fn test_server_events_kept() {
        let mut page = EventsPage::new();
        page.apply_events(vec![Tournament::new(7, "Copa X", "2026-01-01", "Zulia", TournamentTier::FiveA)]);
        assert_eq!(page.tournaments.len(), 1);
    }

    #[test]
    fn test_search_name_and_location() {
        let mut page = EventsPage::new();
        page.apply_events(Vec::new());

        page.set_search("aragua");
        assert_eq!(page.filtered().len(), 2);

        page.set_search("DRAGONES");
        assert_eq!(page.filtered()[0].name, "FURIA DE DRAGONES");

        page.set_search("maracaibo");
        assert!(page.filtered().is_empty());
        assert!(page.no_match_message().unwrap().contains("maracaibo"));

        page.clear_search();
        assert_eq!(page.filtered().len(), 10);
        assert!(page.no_match_message().is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let mut page = EventsPage::new();
        page.apply_events(Vec::new());
        page.select_previous();
        assert_eq!(page.selected, 9);
        page.select_next();
        assert_eq!(page.selected, 0);
        assert_eq!(page.selected_tournament().map(|t| t.id), Some(1));
    }
}
