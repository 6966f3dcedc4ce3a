// Integration tests: LeagueClient and the pages against an in-process backend

use axum::{
    extract::{FromRequest, Multipart, Query, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use linamve::api::{CREATE_EVENT_FAILURE, UPLOAD_FAILURE};
use linamve::entities::{SocialConfig, SocialPost, TournamentStatus, TournamentTier, Trend};
use linamve::pages::{AdminPanel, BannerKind, EventsPage, RankingPage};
use linamve::{LeagueClient, NewEvent};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

type Params = Query<HashMap<String, String>>;

async fn mock_get(Query(params): Params) -> Response {
    if !params.contains_key("t") {
        return (StatusCode::BAD_REQUEST, "missing cache buster").into_response();
    }
    match params.get("action").map(String::as_str) {
        Some("status") => Json(json!({ "success": true })).into_response(),
        Some("get_ranking") => Json(json!([
            {
                "posicion": "1", "id": "7", "nombre": " Ana Rojas ", "academia": "Dojo Sur",
                "puntaje": "980", "codigo_categoria": "C107", "trend": "up"
            },
            { "nombre": "Luis Mora", "puntaje": 500 }
        ]))
        .into_response(),
        Some("get_ranking_by_category") if params.get("code").map(String::as_str) == Some("C107") => {
            Json(json!([{ "nombre": "Ana Rojas", "puntaje": 980, "codigo_categoria": "C107" }]))
                .into_response()
        }
        Some("get_ranking_by_category") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("get_calendar") => Json(json!([{
            "id": 12, "evento": "Copa Lara", "fecha": "2026-04-11", "lugar": "Barquisimeto",
            "categoria_torneo": "9Z", "status": "closed", "correo": "",
            "flyers": "[\"https://img.example/lara.jpg\"]"
        }]))
        .into_response(),
        Some("get_social") => Json(json!([
            "https://www.instagram.com/p/AAA/",
            "https://www.instagram.com/reel/BBB/"
        ]))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn mock_post(Query(params): Params, request: Request) -> Response {
    if params.get("action").map(String::as_str) == Some("update_social") {
        let Ok(Json(body)) = Json::<Value>::from_request(request, &()).await else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        let posts = body["posts"].as_array().map(Vec::len).unwrap_or(0);
        return Json(json!({
            "success": true,
            "message": format!("{}:{}", body["accountName"].as_str().unwrap_or(""), posts)
        }))
        .into_response();
    }

    let Ok(mut multipart) = Multipart::from_request(request, &()).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut fields = HashMap::new();
    let mut csv_lines = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let text = field.text().await.unwrap_or_default();
        if name == "csv_file" {
            csv_lines = text.lines().count();
        }
        fields.insert(name, text);
    }

    let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
    match field("action").as_str() {
        "create_event" => Json(json!({
            "success": true,
            "message": format!(
                "{}|{}|{}|{}|{}",
                field("name"),
                field("type"),
                field("whatsapp"),
                field("flyers"),
                fields.contains_key("correo")
            )
        }))
        .into_response(),
        "upload_results" => Json(json!({
            "success": true,
            "message": format!("torneo {}", field("tournament_id")),
            "processed": csv_lines.saturating_sub(1)
        }))
        .into_response(),
        _ => Json(json!({ "success": false, "message": "Acción desconocida" })).into_response(),
    }
}

async fn spawn_backend() -> LeagueClient {
    let router = Router::new().route("/", get(mock_get).post(mock_post));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    LeagueClient::new(format!("http://{}/", addr), Duration::from_secs(5)).unwrap()
}

/// Client pointed at a port nothing listens on
fn offline_client() -> LeagueClient {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    LeagueClient::new(format!("http://127.0.0.1:{}/", port), Duration::from_secs(2)).unwrap()
}

// ============================================================================
// READS
// ============================================================================

#[tokio::test]
async fn test_status_online_and_offline() {
    assert!(spawn_backend().await.check_status().await);
    assert!(!offline_client().check_status().await);
}

#[tokio::test]
async fn test_fetch_ranking_adapts_spanish_rows() {
    let client = spawn_backend().await;
    let rows = client.fetch_ranking().await;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].athlete_id, Some(7));
    assert_eq!(rows[0].athlete_name, "Ana Rojas");
    assert_eq!(rows[0].points, 980.0);
    assert_eq!(rows[0].trend, Trend::Up);
    assert_eq!(rows[0].belt, "Marrón-Negro");

    // Missing fields fall back to defaults and payload position
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].academy, "Independiente");
    assert_eq!(rows[1].category_code, "OPEN");
}

#[tokio::test]
async fn test_category_ranking_error_status_is_empty() {
    let client = spawn_backend().await;
    assert_eq!(client.fetch_category_ranking("C107").await.len(), 1);
    assert!(client.fetch_category_ranking("K01").await.is_empty());
}

#[tokio::test]
async fn test_fetch_events_normalizes_enums() {
    let client = spawn_backend().await;
    let events = client.fetch_events().await;

    assert_eq!(events.len(), 1);
    let copa = &events[0];
    assert_eq!(copa.id, 12);
    assert_eq!(copa.name, "Copa Lara");
    assert_eq!(copa.tier, TournamentTier::ThreeA);
    assert_eq!(copa.status, TournamentStatus::Closed);
    assert_eq!(copa.flyers, vec!["https://img.example/lara.jpg".to_string()]);
    assert_eq!(copa.email, None);
}

#[tokio::test]
async fn test_social_feed_bare_array() {
    let client = spawn_backend().await;
    let feed = client.fetch_social_feed().await.unwrap();
    assert_eq!(feed.account_name, linamve::entities::DEFAULT_ACCOUNT_NAME);
    assert_eq!(feed.posts.len(), 2);
    assert_eq!(feed.posts[1].post_url, "https://www.instagram.com/reel/BBB/");
}

#[tokio::test]
async fn test_offline_reads_downgrade() {
    let client = offline_client();
    assert!(client.fetch_ranking().await.is_empty());
    assert!(client.fetch_category_ranking("C107").await.is_empty());
    assert!(client.fetch_events().await.is_empty());
    assert!(client.fetch_social_feed().await.is_none());
}

// ============================================================================
// MUTATIONS
// ============================================================================

#[tokio::test]
async fn test_create_event_sends_form_fields() {
    let client = spawn_backend().await;
    let event = NewEvent {
        name: "Copa Zulia".to_string(),
        date: "2026-12-05".to_string(),
        location: "Maracaibo".to_string(),
        tier: TournamentTier::FiveA,
        whatsapp: Some("+58 412 1234567".to_string()),
        email: Some("   ".to_string()),
        flyers: vec!["https://img.example/zulia.jpg".to_string()],
        ..NewEvent::default()
    };

    let response = client.create_event(&event).await;
    assert!(response.success);
    assert_eq!(
        response.message,
        "Copa Zulia|5A|+58 412 1234567|[\"https://img.example/zulia.jpg\"]|false"
    );
}

#[tokio::test]
async fn test_upload_results_reports_processed() {
    let client = spawn_backend().await;
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "nombre,academia,codigo_categoria,puntaje").unwrap();
    writeln!(file, "Ana Rojas,Dojo Sur,C107,300").unwrap();
    writeln!(file, "Luis Mora,Team Elite,C107,150").unwrap();

    let response = client.upload_results_csv(4, file.path()).await;
    assert!(response.success);
    assert_eq!(response.message, "torneo 4");
    assert_eq!(response.processed, Some(2));
}

#[tokio::test]
async fn test_update_social_sends_json() {
    let client = spawn_backend().await;
    let config = SocialConfig::new(
        "@linamve",
        vec![SocialPost::new("https://www.instagram.com/p/AAA/")],
    );
    let response = client.update_social_feed(&config).await;
    assert!(response.success);
    assert_eq!(response.message, "@linamve:1");
}

#[tokio::test]
async fn test_offline_mutations_fail_with_message() {
    let client = offline_client();
    let event = NewEvent {
        name: "X".to_string(),
        date: "2026-01-01".to_string(),
        location: "Y".to_string(),
        ..NewEvent::default()
    };
    let response = client.create_event(&event).await;
    assert!(!response.success);
    assert_eq!(response.message, CREATE_EVENT_FAILURE);

    let response = client.upload_results_bytes(1, "r.csv", b"nombre\n".to_vec()).await;
    assert!(!response.success);
    assert_eq!(response.message, UPLOAD_FAILURE);

    let missing = client
        .upload_results_csv(1, std::path::Path::new("/nonexistent/results.csv"))
        .await;
    assert_eq!(missing.message, UPLOAD_FAILURE);

    let response = client.update_social_feed(&SocialConfig::new("@x", Vec::new())).await;
    assert!(!response.success);
    assert!(!response.message.is_empty());
}

// ============================================================================
// PAGES
// ============================================================================

#[tokio::test]
async fn test_events_page_falls_back_when_offline() {
    let page = EventsPage::load(&offline_client()).await;
    assert!(!page.loading);
    assert_eq!(page.tournaments.len(), 10);
    assert_eq!(page.tournaments[0].name, "COPA COBRA DO");
}

#[tokio::test]
async fn test_ranking_page_search() {
    let client = spawn_backend().await;
    let mut page = RankingPage::default();
    page.filter.select_modality("Combate");
    page.filter.select_age("+18");
    page.filter.select_belt("Marrón-Negro");
    page.filter.select_gender("Masculino");

    page.search(&client).await;
    assert!(page.searched);
    assert!(!page.loading);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].athlete_name, "Ana Rojas");
}

#[tokio::test]
async fn test_admin_save_social_reloads_feed() {
    let client = spawn_backend().await;
    let mut admin = AdminPanel::new(None);
    assert_eq!(admin.social().posts.len(), 3);

    assert!(admin.save_social(&client).await);
    let banner = admin.banner().unwrap();
    assert_eq!(banner.kind(), BannerKind::Success);
    // The server's two posts replace the three local defaults
    assert_eq!(admin.social().posts.len(), 2);
}

#[tokio::test]
async fn test_admin_submit_results_resets_form() {
    let client = spawn_backend().await;
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "nombre,academia,codigo_categoria,puntaje").unwrap();
    writeln!(file, "Ana Rojas,Dojo Sur,C107,300").unwrap();

    let mut admin = AdminPanel::new(None);
    admin.results.tournament_id = "9".to_string();
    admin.results.csv_path = file.path().to_string_lossy().into_owned();
    admin.submit_results(&client).await;

    assert_eq!(admin.banner().unwrap().message(), "Éxito: torneo 9");
    assert!(admin.results.tournament_id.is_empty());
}
