// 🔌 Adapter Layer - Loosely-typed server JSON → typed view models
//
// The backend mixes English and Spanish column names and sends numbers as
// strings half the time. Every read goes through here:
// - several key spellings per attribute, first present one wins
// - numeric-like fields coerced, with a default on parse failure
// - enum-like fields checked against their closed set, default on mismatch
// - category labels backfilled from the official table
//
// A key counts as absent when it is missing, null, "", false or 0, so the
// next spelling gets a chance.

use crate::entities::{
    CategoryRegistry, RankingEntry, SocialConfig, SocialPost, Tournament, TournamentStatus,
    TournamentTier, Trend, DEFAULT_ACCOUNT_NAME, PLACEHOLDER_AVATAR,
};
use serde_json::Value;

// ============================================================================
// FIELD LOOKUP HELPERS
// ============================================================================

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First present value among `keys`
fn lookup<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find(|value| is_present(value))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Text under the first present key, or `default`
fn text(item: &Value, keys: &[&str], default: &str) -> String {
    lookup(item, keys)
        .and_then(as_text)
        .unwrap_or_else(|| default.to_string())
}

/// Text under the first present key; blank strings count as missing
fn optional_text(item: &Value, keys: &[&str]) -> Option<String> {
    lookup(item, keys)
        .and_then(as_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Number under the first present key. A present but unparsable value does
/// not fall through to the next key.
fn number(item: &Value, keys: &[&str]) -> Option<f64> {
    lookup(item, keys).and_then(as_number)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// RANKING
// ============================================================================

/// Adapt one raw ranking row; `index` is its position in the payload
pub fn adapt_ranking_item(item: &Value, index: usize) -> RankingEntry {
    let registry = CategoryRegistry::official();
    let code = text(item, &["categoryCode", "category_code", "codigo_categoria"], "OPEN");
    let official = registry.find_by_code(&code);

    let rank = number(item, &["rank", "posicion"])
        .map(|r| r.trunc())
        .filter(|r| *r >= 1.0 && *r <= u32::MAX as f64)
        .map(|r| r as u32)
        .unwrap_or(index as u32 + 1);

    let trend = lookup(item, &["trend"])
        .and_then(|v| v.as_str())
        .and_then(Trend::parse)
        .unwrap_or_default();

    RankingEntry {
        rank,
        athlete_id: number(item, &["athleteId", "id"])
            .filter(|id| *id > 0.0)
            .map(|id| id as u64),
        athlete_name: text(item, &["athleteName", "nombre"], "Atleta").trim().to_string(),
        academy: text(item, &["academy", "academia"], "Independiente"),
        points: number(item, &["points", "puntaje"]).unwrap_or(0.0),
        trend,
        avatar: text(item, &["avatar", "photo_url"], PLACEHOLDER_AVATAR),
        category_label: match official {
            Some(cat) => cat.modality.to_string(),
            None => text(item, &["modalidad"], "General"),
        },
        age_group: match official {
            Some(cat) => cat.age.to_string(),
            None => text(item, &["edad"], "General"),
        },
        belt: match official {
            Some(cat) => cat.belt.to_string(),
            None => text(item, &["cinta"], "N/A"),
        },
        category_code: code,
    }
}

/// Adapt a ranking payload; anything but an array yields no rows
pub fn adapt_ranking_list(data: &Value) -> Vec<RankingEntry> {
    match data {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| adapt_ranking_item(item, i))
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// TOURNAMENTS
// ============================================================================

/// Flyers arrive either as an array or as a string holding a JSON array
fn flyers(item: &Value) -> Vec<String> {
    match item.get("flyers") {
        Some(Value::String(raw)) if !raw.is_empty() => serde_json::from_str::<Value>(raw)
            .map(|parsed| string_list(&parsed))
            .unwrap_or_default(),
        Some(value) => string_list(value),
        None => Vec::new(),
    }
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

pub fn adapt_tournament_item(item: &Value) -> Tournament {
    let tier = lookup(item, &["type", "categoria_torneo"])
        .and_then(as_text)
        .and_then(|raw| TournamentTier::parse(&raw))
        .unwrap_or_default();

    let status = item
        .get("status")
        .and_then(|v| v.as_str())
        .and_then(TournamentStatus::parse)
        .unwrap_or_default();

    Tournament {
        id: number(item, &["id"])
            .filter(|id| *id > 0.0)
            .map(|id| id as u64)
            .unwrap_or(0),
        name: text(item, &["name", "evento"], "Torneo"),
        date: lookup(item, &["date", "fecha"])
            .and_then(as_text)
            .unwrap_or_else(today),
        location: text(item, &["location", "lugar"], "TBA"),
        status,
        tier,
        flyers: flyers(item),
        phone: optional_text(item, &["telefono", "phone"]),
        email: optional_text(item, &["correo", "email"]),
        whatsapp: optional_text(item, &["whatsapp"]),
        website: optional_text(item, &["pagina_web", "website"]),
    }
}

pub fn adapt_tournament_list(data: &Value) -> Vec<Tournament> {
    match data {
        Value::Array(items) => items.iter().map(adapt_tournament_item).collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// SOCIAL FEED
// ============================================================================

/// Accepts a bare array of URLs or `{accountName?, posts: [...]}`
pub fn adapt_social_feed(data: &Value) -> SocialConfig {
    let urls = match data {
        Value::Array(_) => string_list(data),
        Value::Object(_) => data.get("posts").map(string_list).unwrap_or_default(),
        _ => Vec::new(),
    };

    let account_name = lookup(data, &["accountName"])
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_ACCOUNT_NAME);

    let posts = urls.iter().map(|url| SocialPost::new(url)).collect();
    SocialConfig::new(account_name, posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spanish_ranking_row_matches_english_row() {
        let english = json!({
            "rank": 2, "athleteId": 44, "athleteName": "Daniel Pérez",
            "academy": "Team Elite", "points": 1450, "categoryCode": "C107"
        });
        let spanish = json!({
            "posicion": "2", "id": "44", "nombre": "  Daniel Pérez ",
            "academia": "Team Elite", "puntaje": "1450", "codigo_categoria": "C107"
        });

        let a = adapt_ranking_item(&english, 7);
        let b = adapt_ranking_item(&spanish, 7);
        assert_eq!(a, b);
        assert_eq!(b.rank, 2);
        assert_eq!(b.athlete_id, Some(44));
        assert_eq!(b.athlete_name, "Daniel Pérez");
        assert_eq!(b.points, 1450.0);
        assert_eq!(b.category_label, "Combate");
        assert_eq!(b.age_group, "+18");
        assert_eq!(b.belt, "Marrón-Negro");
    }

    #[test]
    fn test_ranking_defaults_for_empty_row() {
        let entry = adapt_ranking_item(&json!({}), 4);
        assert_eq!(entry.rank, 5);
        assert_eq!(entry.athlete_id, None);
        assert_eq!(entry.athlete_name, "Atleta");
        assert_eq!(entry.academy, "Independiente");
        assert_eq!(entry.points, 0.0);
        assert_eq!(entry.trend, Trend::Stable);
        assert_eq!(entry.avatar, PLACEHOLDER_AVATAR);
        assert_eq!(entry.category_code, "OPEN");
        assert_eq!(entry.category_label, "General");
        assert_eq!(entry.age_group, "General");
        assert_eq!(entry.belt, "N/A");
    }

    #[test]
    fn test_unknown_code_uses_payload_labels() {
        let entry = adapt_ranking_item(
            &json!({"category_code": "X99", "modalidad": "Kobudo", "edad": "+35", "cinta": "Negro"}),
            0,
        );
        assert_eq!(entry.category_code, "X99");
        assert_eq!(entry.category_label, "Kobudo");
        assert_eq!(entry.age_group, "+35");
        assert_eq!(entry.belt, "Negro");
    }

    #[test]
    fn test_numeric_coercion_falls_back() {
        // rank 0 is absent -> posicion; unparsable points -> 0
        let entry = adapt_ranking_item(&json!({"rank": 0, "posicion": 3, "points": "mucho"}), 0);
        assert_eq!(entry.rank, 3);
        assert_eq!(entry.points, 0.0);

        // present but unparsable rank does not fall through
        let entry = adapt_ranking_item(&json!({"rank": "abc", "posicion": 3}), 9);
        assert_eq!(entry.rank, 10);

        let entry = adapt_ranking_item(&json!({"rank": -4}), 1);
        assert_eq!(entry.rank, 2);
    }

    #[test]
    fn test_trend_validated() {
        assert_eq!(adapt_ranking_item(&json!({"trend": "up"}), 0).trend, Trend::Up);
        assert_eq!(adapt_ranking_item(&json!({"trend": "rocket"}), 0).trend, Trend::Stable);
    }

    #[test]
    fn test_ranking_list_requires_array() {
        assert!(adapt_ranking_list(&json!({"rows": []})).is_empty());
        let rows = adapt_ranking_list(&json!([{"nombre": "A"}, {"nombre": "B"}]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].rank, 2);
    }

    #[test]
    fn test_invalid_tier_and_status_use_defaults() {
        let t = adapt_tournament_item(&json!({"id": 3, "type": "6A", "status": "cancelled"}));
        assert_eq!(t.tier, TournamentTier::ThreeA);
        assert_eq!(t.status, TournamentStatus::Open);

        let t = adapt_tournament_item(&json!({"id": 3, "categoria_torneo": "5A", "status": "finished"}));
        assert_eq!(t.tier, TournamentTier::FiveA);
        assert_eq!(t.status, TournamentStatus::Finished);
    }

    #[test]
    fn test_spanish_tournament_row() {
        let t = adapt_tournament_item(&json!({
            "id": "12",
            "evento": "KARIKAN",
            "fecha": "2026-06-27",
            "lugar": "Dtto Capital",
            "categoria_torneo": "4A",
            "telefono": "+58 412 1234567",
            "correo": "info@karikan.com",
            "whatsapp": "",
            "pagina_web": "karikan.com",
            "flyers": "[\"https://img/1.jpg\", 5, \"https://img/2.jpg\"]"
        }));
        assert_eq!(t.id, 12);
        assert_eq!(t.name, "KARIKAN");
        assert_eq!(t.date, "2026-06-27");
        assert_eq!(t.location, "Dtto Capital");
        assert_eq!(t.tier, TournamentTier::FourA);
        assert_eq!(t.phone.as_deref(), Some("+58 412 1234567"));
        assert_eq!(t.email.as_deref(), Some("info@karikan.com"));
        assert_eq!(t.whatsapp, None);
        assert_eq!(t.website.as_deref(), Some("karikan.com"));
        assert_eq!(t.flyers, vec!["https://img/1.jpg", "https://img/2.jpg"]);
    }

    #[test]
    fn test_tournament_defaults() {
        let t = adapt_tournament_item(&json!({"flyers": "not json"}));
        assert_eq!(t.id, 0);
        assert_eq!(t.name, "Torneo");
        assert_eq!(t.location, "TBA");
        assert_eq!(t.date.len(), 10);
        assert!(t.flyers.is_empty());
        assert!(!t.has_contact());
    }

    #[test]
    fn test_social_feed_shapes_are_equivalent() {
        let bare = adapt_social_feed(&json!(["url1", "url2"]));
        let object = adapt_social_feed(&json!({"posts": ["url1", "url2"]}));
        assert_eq!(bare.post_urls(), object.post_urls());
        assert_eq!(bare.account_name, DEFAULT_ACCOUNT_NAME);

        let single = adapt_social_feed(&json!({"posts": ["url1"]}));
        assert_eq!(single.post_urls(), vec!["url1"]);
    }

    #[test]
    fn test_social_feed_account_and_junk() {
        let feed = adapt_social_feed(&json!({"accountName": "@dojo", "posts": ["a", 3, null, "b"]}));
        assert_eq!(feed.account_name, "@dojo");
        assert_eq!(feed.post_urls(), vec!["a", "b"]);

        assert!(adapt_social_feed(&json!("nope")).posts.is_empty());
        assert!(adapt_social_feed(&json!({"posts": "a"})).posts.is_empty());
    }
}
