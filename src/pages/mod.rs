// 🗂️ Pages - View models behind each screen
//
// Pages own their state and call the API client; they never draw. The `ui`
// module renders whatever a page exposes.

pub mod admin;
pub mod banner;
pub mod dashboard;
pub mod events;
pub mod forum;
pub mod landing;
pub mod ranking;

pub use admin::{AdminPanel, AdminTab, EventForm, ResultsForm};
pub use banner::{dismiss_expired, BannerKind, StatusBanner, LONG_BANNER, SHORT_BANNER};
pub use dashboard::{DashboardPage, PerformanceRow};
pub use events::{local_date, web_url, whatsapp_url, EventsPage};
pub use forum::ForumPage;
pub use landing::LandingPage;
pub use ranking::RankingPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Landing,
    Dashboard,
    Events,
    Forum,
    Ranking,
    Admin,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Landing,
        Page::Dashboard,
        Page::Events,
        Page::Forum,
        Page::Ranking,
        Page::Admin,
    ];

    fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }

    /// F1 → Landing ... F6 → Admin
    pub fn from_function_key(n: u8) -> Option<Self> {
        match n {
            1..=6 => Some(Page::ALL[n as usize - 1]),
            _ => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Landing => "Inicio",
            Page::Dashboard => "Mi Perfil",
            Page::Events => "Eventos",
            Page::Forum => "Foro",
            Page::Ranking => "Ranking",
            Page::Admin => "Admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Landing.next(), Page::Dashboard);
        assert_eq!(Page::Admin.next(), Page::Landing);
        assert_eq!(Page::Landing.previous(), Page::Admin);
        for page in Page::ALL {
            assert_eq!(page.next().previous(), page);
        }
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(Page::from_function_key(1), Some(Page::Landing));
        assert_eq!(Page::from_function_key(5), Some(Page::Ranking));
        assert_eq!(Page::from_function_key(6), Some(Page::Admin));
        assert_eq!(Page::from_function_key(7), None);
        assert_eq!(Page::from_function_key(0), None);
    }
}
