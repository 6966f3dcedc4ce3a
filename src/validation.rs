// ✅ Validation - Client-side input checks for the admin forms
//
// Every message starts with "Error:" so the status banner renders it as an
// error without a separate flag.

use crate::api::NewEvent;
use crate::entities::MAX_SOCIAL_POSTS;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub const INSTAGRAM_URL_PATTERN: &str = r"^(https?://)?(www\.)?instagram\.com/(p|reel)/[\w-]+/?(\?.*)?$";

/// Mobile operator prefixes offered by the event form
pub const VENEZUELAN_PREFIXES: [&str; 6] = ["0412", "0414", "0424", "0416", "0426", "0422"];

/// Subscriber number length after the prefix
pub const PHONE_BODY_DIGITS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Error: La URL debe ser de Instagram (/p/ o /reel/)")]
    InvalidInstagramUrl,

    #[error("Error: Máximo 3 posts permitidos")]
    TooManyPosts,

    #[error("Error: Nombre, Fecha y Ubicación son obligatorios")]
    MissingEventFields,

    #[error("Error: ID de torneo y archivo CSV requeridos")]
    MissingResultsInput,
}

// ============================================================================
// INSTAGRAM
// ============================================================================

fn instagram_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(INSTAGRAM_URL_PATTERN).ok()).as_ref()
}

/// Drop the query string, trim, and drop one trailing slash
pub fn clean_instagram_url(raw: &str) -> String {
    let without_query = raw.split('?').next().unwrap_or_default().trim();
    without_query
        .strip_suffix('/')
        .unwrap_or(without_query)
        .to_string()
}

pub fn is_valid_instagram_url(url: &str) -> bool {
    instagram_regex().map(|re| re.is_match(url)).unwrap_or(false)
}

/// Check a URL typed into the social editor against a feed that already
/// holds `current_posts` entries. Returns the cleaned URL to store.
pub fn validate_new_post(raw: &str, current_posts: usize) -> Result<String, ValidationError> {
    let clean = clean_instagram_url(raw);
    if !is_valid_instagram_url(&clean) {
        return Err(ValidationError::InvalidInstagramUrl);
    }
    if current_posts >= MAX_SOCIAL_POSTS {
        return Err(ValidationError::TooManyPosts);
    }
    Ok(clean)
}

// ============================================================================
// PHONE NUMBERS
// ============================================================================

/// Keep ASCII digits only, at most `max` of them
pub fn digits_only(input: &str, max: usize) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// `("0412", "1234567")` → `"+58 412 1234567"`; empty until the body is complete
pub fn format_venezuelan_number(prefix: &str, body: &str) -> String {
    if body.len() < PHONE_BODY_DIGITS {
        return String::new();
    }
    let trimmed_prefix = prefix.strip_prefix('0').unwrap_or(prefix);
    format!("+58 {} {}", trimmed_prefix, body)
}

// ============================================================================
// FORMS
// ============================================================================

pub fn validate_new_event(event: &NewEvent) -> Result<(), ValidationError> {
    let blank = |s: &str| s.trim().is_empty();
    if blank(&event.name) || blank(&event.date) || blank(&event.location) {
        return Err(ValidationError::MissingEventFields);
    }
    Ok(())
}

pub fn validate_results_input(tournament_id: &str, csv_path: &str) -> Result<u64, ValidationError> {
    let id = tournament_id
        .trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::MissingResultsInput)?;
    if csv_path.trim().is_empty() {
        return Err(ValidationError::MissingResultsInput);
    }
    Ok(id)
}
