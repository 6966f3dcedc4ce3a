// 🔐 Admin Panel - social feed editor, event creation and results upload
//
// The passphrase gate only hides the panel from casual visitors. It is a
// local string compare, not authentication, and it is off when no
// passphrase is configured.

use crate::api::{LeagueClient, MutationResponse, NewEvent};
use crate::entities::{SocialConfig, SocialPost, TournamentTier};
use crate::fallback;
use crate::pages::banner::{dismiss_expired, StatusBanner, LONG_BANNER, SHORT_BANNER};
use crate::validation::{
    digits_only, format_venezuelan_number, validate_new_event, validate_new_post,
    validate_results_input, PHONE_BODY_DIGITS, VENEZUELAN_PREFIXES,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

pub const LOGIN_ERROR: &str = "Contraseña incorrecta";
pub const RESTORED_MESSAGE: &str = "Restaurado a valores por defecto (Sin guardar aún)";
pub const CONFIRM_EMPTY_MESSAGE: &str =
    "¿Deseas guardar una lista vacía? Esto borrará los videos de la Landing. Guarda de nuevo para confirmar.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Social,
    Events,
    Results,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Social, AdminTab::Events, AdminTab::Results];

    pub fn next(&self) -> Self {
        match self {
            AdminTab::Social => AdminTab::Events,
            AdminTab::Events => AdminTab::Results,
            AdminTab::Results => AdminTab::Social,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            AdminTab::Social => AdminTab::Results,
            AdminTab::Events => AdminTab::Social,
            AdminTab::Results => AdminTab::Events,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            AdminTab::Social => "Redes",
            AdminTab::Events => "Eventos",
            AdminTab::Results => "Resultados",
        }
    }
}

fn next_prefix(current: &str) -> &'static str {
    let index = VENEZUELAN_PREFIXES
        .iter()
        .position(|p| *p == current)
        .map(|i| (i + 1) % VENEZUELAN_PREFIXES.len())
        .unwrap_or(0);
    VENEZUELAN_PREFIXES[index]
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// EVENT FORM
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub date: String,
    pub location: String,
    pub tier: TournamentTier,
    pub email: String,
    pub website: String,
    pub whatsapp_prefix: &'static str,
    pub whatsapp_body: String,
    pub phone_prefix: &'static str,
    pub phone_body: String,
    pub flyers: Vec<String>,
}

impl Default for EventForm {
    fn default() -> Self {
        EventForm {
            name: String::new(),
            date: String::new(),
            location: String::new(),
            tier: TournamentTier::default(),
            email: String::new(),
            website: String::new(),
            whatsapp_prefix: VENEZUELAN_PREFIXES[0],
            whatsapp_body: String::new(),
            phone_prefix: VENEZUELAN_PREFIXES[0],
            phone_body: String::new(),
            flyers: Vec::new(),
        }
    }
}

impl EventForm {
    pub fn set_whatsapp_body(&mut self, input: &str) {
        self.whatsapp_body = digits_only(input, PHONE_BODY_DIGITS);
    }

    pub fn set_phone_body(&mut self, input: &str) {
        self.phone_body = digits_only(input, PHONE_BODY_DIGITS);
    }

    pub fn cycle_whatsapp_prefix(&mut self) {
        self.whatsapp_prefix = next_prefix(self.whatsapp_prefix);
    }

    pub fn cycle_phone_prefix(&mut self) {
        self.phone_prefix = next_prefix(self.phone_prefix);
    }

    pub fn cycle_tier(&mut self) {
        self.tier = self.tier.next();
    }

    pub fn whatsapp(&self) -> String {
        format_venezuelan_number(self.whatsapp_prefix, &self.whatsapp_body)
    }

    pub fn phone(&self) -> String {
        format_venezuelan_number(self.phone_prefix, &self.phone_body)
    }

    pub fn to_new_event(&self) -> NewEvent {
        NewEvent {
            name: self.name.trim().to_string(),
            date: self.date.trim().to_string(),
            location: self.location.trim().to_string(),
            tier: self.tier,
            phone: optional(self.phone()),
            email: optional(self.email.clone()),
            whatsapp: optional(self.whatsapp()),
            website: optional(self.website.clone()),
            flyers: self.flyers.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = EventForm::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsForm {
    pub tournament_id: String,
    pub csv_path: String,
}

impl ResultsForm {
    pub fn reset(&mut self) {
        *self = ResultsForm::default();
    }
}

// ============================================================================
// PANEL
// ============================================================================

#[derive(Debug, Clone)]
pub struct AdminPanel {
    passphrase: Option<String>,
    unlocked: bool,
    pub login_error: Option<String>,
    pub tab: AdminTab,
    social: SocialConfig,
    pub new_post_url: String,
    pub event: EventForm,
    pub results: ResultsForm,
    banner: Option<StatusBanner>,
    pub loading: bool,
    confirm_empty_save: bool,
}

impl AdminPanel {
    pub fn new(passphrase: Option<String>) -> Self {
        let passphrase = passphrase.filter(|p| !p.is_empty());
        AdminPanel {
            unlocked: passphrase.is_none(),
            passphrase,
            login_error: None,
            tab: AdminTab::default(),
            social: fallback::default_social_config(),
            new_post_url: String::new(),
            event: EventForm::default(),
            results: ResultsForm::default(),
            banner: None,
            loading: false,
            confirm_empty_save: false,
        }
    }

    pub fn gate_enabled(&self) -> bool {
        self.passphrase.is_some()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn try_unlock(&mut self, input: &str) -> bool {
        match &self.passphrase {
            Some(expected) if expected != input => {
                self.login_error = Some(LOGIN_ERROR.to_string());
                false
            }
            _ => {
                self.unlocked = true;
                self.login_error = None;
                true
            }
        }
    }

    pub fn social(&self) -> &SocialConfig {
        &self.social
    }

    pub fn banner(&self) -> Option<&StatusBanner> {
        self.banner.as_ref()
    }

    pub fn show_banner(&mut self, banner: StatusBanner) {
        self.banner = Some(banner);
    }

    /// Dismiss an expired banner; call on every UI tick
    pub fn tick(&mut self, now: Instant) {
        dismiss_expired(&mut self.banner, now);
    }

    // ------------------------------------------------------------------------
    // Social editor
    // ------------------------------------------------------------------------

    /// Add the URL typed in `new_post_url`. A full feed rejects the post.
    pub fn add_post(&mut self) -> bool {
        if self.new_post_url.trim().is_empty() {
            return false;
        }
        match validate_new_post(&self.new_post_url, self.social.posts.len()) {
            Ok(clean) => {
                self.social.posts.push(SocialPost::new(&clean));
                self.new_post_url.clear();
                self.confirm_empty_save = false;
                true
            }
            Err(e) => {
                self.banner = Some(StatusBanner::from_validation(&e));
                false
            }
        }
    }

    pub fn delete_post(&mut self, id: &str) -> bool {
        let before = self.social.posts.len();
        self.social.posts.retain(|p| p.id != id);
        self.social.posts.len() != before
    }

    pub fn reset_to_defaults(&mut self) {
        self.social = fallback::default_social_config();
        self.banner = Some(StatusBanner::new(RESTORED_MESSAGE, SHORT_BANNER));
    }

    /// Replace the local feed only when the server sent posts
    pub fn apply_server_feed(&mut self, feed: Option<SocialConfig>) -> bool {
        match feed {
            Some(feed) if !feed.posts.is_empty() => {
                self.social = feed;
                true
            }
            _ => {
                warn!("server social feed empty, keeping local posts");
                false
            }
        }
    }

    pub async fn sync_social(&mut self, client: &LeagueClient) -> bool {
        self.loading = true;
        let feed = client.fetch_social_feed().await;
        self.loading = false;
        self.apply_server_feed(feed)
    }

    /// Saving an empty feed needs a second save to confirm
    pub fn ready_to_save_social(&mut self) -> bool {
        if self.social.posts.is_empty() && !self.confirm_empty_save {
            self.confirm_empty_save = true;
            self.banner = Some(StatusBanner::new(CONFIRM_EMPTY_MESSAGE, LONG_BANNER));
            return false;
        }
        self.confirm_empty_save = false;
        true
    }

    /// True only when the server stored the feed; the local editor state is
    /// then reloaded from the server
    pub async fn save_social(&mut self, client: &LeagueClient) -> bool {
        if !self.ready_to_save_social() {
            return false;
        }
        self.loading = true;
        let response = client.update_social_feed(&self.social).await;
        self.loading = false;
        if !self.record_mutation(&response) {
            return false;
        }
        self.sync_social(client).await;
        true
    }

    /// Show the outcome banner; true when the server reported success
    pub fn record_mutation(&mut self, response: &MutationResponse) -> bool {
        info!(success = response.success, message = %response.message, "admin mutation");
        self.banner = Some(StatusBanner::from_mutation(response));
        response.success
    }

    // ------------------------------------------------------------------------
    // Events and results
    // ------------------------------------------------------------------------

    pub fn prepare_event(&mut self) -> Option<NewEvent> {
        let event = self.event.to_new_event();
        match validate_new_event(&event) {
            Ok(()) => Some(event),
            Err(e) => {
                self.banner = Some(StatusBanner::from_validation(&e));
                None
            }
        }
    }

    pub async fn submit_event(&mut self, client: &LeagueClient) {
        let Some(event) = self.prepare_event() else {
            return;
        };
        self.loading = true;
        let response = client.create_event(&event).await;
        self.loading = false;
        if self.record_mutation(&response) {
            self.event.reset();
        }
    }

    pub fn prepare_results(&mut self) -> Option<(u64, PathBuf)> {
        match validate_results_input(&self.results.tournament_id, &self.results.csv_path) {
            Ok(id) => Some((id, PathBuf::from(self.results.csv_path.trim()))),
            Err(e) => {
                self.banner = Some(StatusBanner::from_validation(&e));
                None
            }
        }
    }

    pub async fn submit_results(&mut self, client: &LeagueClient) {
        let Some((tournament_id, path)) = self.prepare_results() else {
            return;
        };
        self.loading = true;
        let response = client.upload_results_csv(tournament_id, &path).await;
        self.loading = false;
        if self.record_mutation(&response) {
            self.results.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MAX_SOCIAL_POSTS;
    use std::time::Duration;

    fn panel() -> AdminPanel {
        AdminPanel::new(Some("LINAMVE2026".to_string()))
    }

    #[test]
    fn test_gate() {
        let mut admin = panel();
        assert!(admin.gate_enabled());
        assert!(!admin.is_unlocked());

        assert!(!admin.try_unlock("linamve"));
        assert_eq!(admin.login_error.as_deref(), Some(LOGIN_ERROR));

        assert!(admin.try_unlock("LINAMVE2026"));
        assert!(admin.is_unlocked());
        assert!(admin.login_error.is_none());
    }

    #[test]
    fn test_gate_disabled_without_passphrase() {
        assert!(AdminPanel::new(None).is_unlocked());
        assert!(AdminPanel::new(Some(String::new())).is_unlocked());
    }

    #[test]
    fn test_fourth_post_rejected_not_truncated() {
        let mut admin = panel();
        assert_eq!(admin.social().posts.len(), MAX_SOCIAL_POSTS);

        admin.new_post_url = "https://www.instagram.com/p/NEW123/".to_string();
        assert!(!admin.add_post());
        assert_eq!(admin.social().posts.len(), MAX_SOCIAL_POSTS);
        assert_eq!(
            admin.banner().map(|b| b.message()),
            Some("Error: Máximo 3 posts permitidos")
        );
        assert_eq!(admin.new_post_url, "https://www.instagram.com/p/NEW123/");
    }

    #[test]
    fn test_add_and_delete_post() {
        let mut admin = panel();
        assert!(admin.delete_post("def2"));
        assert!(!admin.delete_post("def2"));

        admin.new_post_url = "instagram.com/reel/abc/?igsh=9".to_string();
        assert!(admin.add_post());
        assert_eq!(admin.social().posts.len(), 3);
        assert_eq!(admin.social().posts[2].post_url, "instagram.com/reel/abc");
        assert!(admin.new_post_url.is_empty());
    }

    #[test]
    fn test_invalid_url_banner() {
        let mut admin = panel();
        admin.delete_post("def1");
        admin.new_post_url = "https://youtube.com/watch?v=1".to_string();
        assert!(!admin.add_post());
        assert!(admin.banner().unwrap().is_error());

        admin.new_post_url = "   ".to_string();
        assert!(!admin.add_post());
    }

    #[test]
    fn test_reset_and_server_feed() {
        let mut admin = panel();
        admin.delete_post("def1");
        admin.reset_to_defaults();
        assert_eq!(admin.social().posts.len(), 3);
        assert!(!admin.banner().unwrap().is_error());

        assert!(!admin.apply_server_feed(Some(SocialConfig::new("@x", Vec::new()))));
        assert!(!admin.apply_server_feed(None));
        assert_eq!(admin.social().posts[0].id, "def1");

        let feed = SocialConfig::new("@x", vec![SocialPost::new("https://www.instagram.com/p/A")]);
        assert!(admin.apply_server_feed(Some(feed)));
        assert_eq!(admin.social().posts.len(), 1);
    }

    #[test]
    fn test_empty_save_needs_confirmation() {
        let mut admin = panel();
        for id in ["def1", "def2", "def3"] {
            admin.delete_post(id);
        }
        assert!(!admin.ready_to_save_social());
        assert!(admin.ready_to_save_social());
        assert!(!admin.ready_to_save_social());
    }

    #[test]
    fn test_event_form_composes_phones() {
        let mut form = EventForm::default();
        form.set_whatsapp_body("412-555-12345");
        form.cycle_phone_prefix();
        form.set_phone_body("555");
        assert_eq!(form.whatsapp_body, "4125551");
        assert_eq!(form.whatsapp(), "+58 412 4125551");
        assert_eq!(form.phone_prefix, "0414");
        assert_eq!(form.phone(), "");

        let event = form.to_new_event();
        assert_eq!(event.whatsapp.as_deref(), Some("+58 412 4125551"));
        assert_eq!(event.phone, None);
        assert_eq!(event.email, None);
    }

    #[test]
    fn test_prefix_cycle_wraps() {
        let mut form = EventForm::default();
        for _ in 0..VENEZUELAN_PREFIXES.len() {
            form.cycle_whatsapp_prefix();
        }
        assert_eq!(form.whatsapp_prefix, "0412");
    }

    #[test]
    fn test_event_validation_banner() {
        let mut admin = panel();
        admin.event.name = "KARIKAN".to_string();
        assert!(admin.prepare_event().is_none());
        assert_eq!(
            admin.banner().unwrap().message(),
            "Error: Nombre, Fecha y Ubicación son obligatorios"
        );

        admin.event.date = "2026-06-27".to_string();
        admin.event.location = "Dtto Capital".to_string();
        admin.event.cycle_tier();
        let event = admin.prepare_event().unwrap();
        assert_eq!(event.tier, TournamentTier::FourA);
    }

    #[test]
    fn test_results_validation() {
        let mut admin = panel();
        assert!(admin.prepare_results().is_none());
        assert_eq!(
            admin.banner().unwrap().message(),
            "Error: ID de torneo y archivo CSV requeridos"
        );
        admin.results.tournament_id = "4".to_string();
        admin.results.csv_path = " results.csv ".to_string();
        assert_eq!(admin.prepare_results(), Some((4, PathBuf::from("results.csv"))));
    }

    #[test]
    fn test_record_mutation_and_tick() {
        let mut admin = panel();
        assert!(admin.record_mutation(&MutationResponse::ok("Evento creado")));
        assert_eq!(admin.banner().unwrap().message(), "Éxito: Evento creado");

        admin.tick(Instant::now() + Duration::from_secs(5));
        assert!(admin.banner().is_none());
    }

    #[test]
    fn test_tabs_cycle() {
        assert_eq!(AdminTab::Social.next(), AdminTab::Events);
        assert_eq!(AdminTab::Social.previous(), AdminTab::Results);
    }
}
