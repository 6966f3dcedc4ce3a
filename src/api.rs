// 🌐 League API Client - `?action=` endpoints of the league backend
//
// Reads never fail from the caller's point of view: transport errors,
// non-2xx answers and undecodable bodies are logged and downgraded to an
// empty result. Mutations report failure through `MutationResponse`.

use crate::adapter::{adapt_ranking_list, adapt_social_feed, adapt_tournament_list};
use crate::config::Config;
use crate::entities::{RankingEntry, SocialConfig, Tournament, TournamentTier};
use crate::error::{LeagueError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

pub const CREATE_EVENT_FAILURE: &str = "Fallo de red al conectar con el servidor";
pub const UPLOAD_FAILURE: &str = "Error al subir archivo CSV";

// ============================================================================
// REQUEST / RESPONSE TYPES
// ============================================================================

/// Outcome of an admin mutation, as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<u32>,
}

impl MutationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        MutationResponse {
            success: true,
            message: message.into(),
            processed: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        MutationResponse {
            success: false,
            message: message.into(),
            processed: None,
        }
    }
}

/// Event draft submitted from the admin panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub location: String,
    pub tier: TournamentTier,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub flyers: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl NewEvent {
    /// Multipart form using the backend's column names for contacts
    fn to_form(&self) -> Result<Form> {
        let mut form = Form::new()
            .text("action", "create_event")
            .text("name", self.name.clone())
            .text("date", self.date.clone())
            .text("location", self.location.clone())
            .text("type", self.tier.as_str());

        let contacts = [
            ("telefono", &self.phone),
            ("correo", &self.email),
            ("whatsapp", &self.whatsapp),
            ("pagina_web", &self.website),
        ];
        for (field, value) in contacts {
            if let Some(v) = non_empty(value) {
                form = form.text(field, v.to_string());
            }
        }

        if !self.flyers.is_empty() {
            form = form.text("flyers", serde_json::to_string(&self.flyers)?);
        }
        Ok(form)
    }
}

/// `t=<unix millis>` keeps intermediaries from serving a stale answer
fn cache_buster() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

fn downgrade<T: Default>(action: &str, result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(action, error = %e, "request failed, using empty result");
            T::default()
        }
    }
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Debug, Clone)]
pub struct LeagueClient {
    client: Client,
    base_url: String,
}

impl LeagueClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, action: &str, extra: &[(&str, &str)]) -> Result<Value> {
        let stamp = cache_buster();
        let mut query: Vec<(&str, &str)> = vec![("action", action)];
        query.extend_from_slice(extra);
        query.push(("t", stamp.as_str()));

        debug!(action, "GET {}", self.base_url);
        let response = self.client.get(&self.base_url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LeagueError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_form(&self, form: Form) -> Result<MutationResponse> {
        let stamp = cache_buster();
        let response = self
            .client
            .post(&self.base_url)
            .query(&[("t", stamp.as_str())])
            .multipart(form)
            .send()
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// True when the backend answers `status` with a 2xx
    pub async fn check_status(&self) -> bool {
        let stamp = cache_buster();
        let query = [("action", "status"), ("t", stamp.as_str())];
        match self.client.get(&self.base_url).query(&query).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "status check failed");
                false
            }
        }
    }

    pub async fn fetch_ranking(&self) -> Vec<RankingEntry> {
        let result = self
            .get_json("get_ranking", &[])
            .await
            .map(|data| adapt_ranking_list(&data));
        downgrade("get_ranking", result)
    }

    pub async fn fetch_category_ranking(&self, code: &str) -> Vec<RankingEntry> {
        let result = self
            .get_json("get_ranking_by_category", &[("code", code)])
            .await
            .map(|data| adapt_ranking_list(&data));
        downgrade("get_ranking_by_category", result)
    }

    pub async fn fetch_events(&self) -> Vec<Tournament> {
        let result = self
            .get_json("get_calendar", &[])
            .await
            .map(|data| adapt_tournament_list(&data));
        downgrade("get_calendar", result)
    }

    /// `None` when the feed could not be fetched at all
    pub async fn fetch_social_feed(&self) -> Option<SocialConfig> {
        let result = self
            .get_json("get_social", &[])
            .await
            .map(|data| Some(adapt_social_feed(&data)));
        downgrade("get_social", result)
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    pub async fn create_event(&self, event: &NewEvent) -> MutationResponse {
        let result = match event.to_form() {
            Ok(form) => self.post_form(form).await,
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            warn!(error = %e, "create_event failed");
            MutationResponse::failure(CREATE_EVENT_FAILURE)
        })
    }

    /// Upload a results CSV read from disk
    pub async fn upload_results_csv(&self, tournament_id: u64, path: &Path) -> MutationResponse {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read results file");
                return MutationResponse::failure(UPLOAD_FAILURE);
            }
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "results.csv".to_string());
        self.upload_results_bytes(tournament_id, &file_name, bytes).await
    }

    pub async fn upload_results_bytes(
        &self,
        tournament_id: u64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> MutationResponse {
        let result: Result<MutationResponse> = async {
            let part = Part::bytes(bytes)
                .file_name(file_name.to_string())
                .mime_str("text/csv")?;
            let form = Form::new()
                .text("action", "upload_results")
                .text("tournament_id", tournament_id.to_string())
                .part("csv_file", part);
            self.post_form(form).await
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!(tournament_id, error = %e, "upload_results failed");
            MutationResponse::failure(UPLOAD_FAILURE)
        })
    }

    pub async fn update_social_feed(&self, config: &SocialConfig) -> MutationResponse {
        let payload = json!({
            "accountName": config.account_name,
            "posts": config.post_urls(),
        });
        let stamp = cache_buster();

        let result: Result<MutationResponse> = async {
            let response = self
                .client
                .post(&self.base_url)
                .query(&[("action", "update_social"), ("t", stamp.as_str())])
                .json(&payload)
                .send()
                .await?;
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, "update_social failed");
            MutationResponse::failure(e.to_string())
        })
    }
}
