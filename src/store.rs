// 🗄️ League Store - JSON-file backing for the local development server
//
// Rows keep the hosted backend's Spanish column names so the client adapter
// reads them exactly as it reads production responses.

use crate::entities::{
    RankingEntry, Tournament, TournamentStatus, TournamentTier, Trend, DEFAULT_ACCOUNT_NAME,
    MAX_SOCIAL_POSTS,
};
use crate::error::{LeagueError, Result};
use crate::fallback;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub id: u64,
    pub evento: String,
    pub fecha: String,
    pub lugar: String,
    pub categoria_torneo: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagina_web: Option<String>,
    #[serde(default)]
    pub flyers: Vec<String>,
}

impl From<&Tournament> for EventRow {
    fn from(t: &Tournament) -> Self {
        EventRow {
            id: t.id,
            evento: t.name.clone(),
            fecha: t.date.clone(),
            lugar: t.location.clone(),
            categoria_torneo: t.tier.as_str().to_string(),
            status: t.status.as_str().to_string(),
            telefono: t.phone.clone(),
            correo: t.email.clone(),
            whatsapp: t.whatsapp.clone(),
            pagina_web: t.website.clone(),
            flyers: t.flyers.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub id: u64,
    pub nombre: String,
    pub academia: String,
    pub codigo_categoria: String,
    pub puntaje: f64,
    pub posicion: u32,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<&RankingEntry> for RankingRow {
    fn from(e: &RankingEntry) -> Self {
        RankingRow {
            id: e.athlete_id.unwrap_or_default(),
            nombre: e.athlete_name.clone(),
            academia: e.academy.clone(),
            codigo_categoria: e.category_code.clone(),
            puntaje: e.points,
            posicion: e.rank,
            trend: e.trend,
            photo_url: Some(e.avatar.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialRow {
    pub account_name: String,
    pub posts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub events: Vec<EventRow>,
    #[serde(default)]
    pub ranking: Vec<RankingRow>,
    pub social: SocialRow,
}

impl StoreData {
    /// Seed content: the built-in calendar, ranking and default posts
    pub fn seeded() -> Self {
        StoreData {
            events: fallback::upcoming_tournaments().iter().map(EventRow::from).collect(),
            ranking: fallback::ranking_rows().iter().map(RankingRow::from).collect(),
            social: SocialRow {
                account_name: DEFAULT_ACCOUNT_NAME.to_string(),
                posts: fallback::DEFAULT_POST_URLS.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

// ============================================================================
// INPUTS
// ============================================================================

/// Fields of a `create_event` submission, as strings off the wire
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventInput {
    pub name: String,
    pub date: String,
    pub location: String,
    pub tier: String,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub whatsapp: Option<String>,
    pub pagina_web: Option<String>,
    pub flyers: Vec<String>,
}

impl EventInput {
    /// Build from multipart text fields; `flyers` holds a JSON array
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let text = |key: &str| fields.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
        let optional = |key: &str| {
            fields
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let flyers = fields
            .get("flyers")
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default();

        EventInput {
            name: text("name"),
            date: text("date"),
            location: text("location"),
            tier: optional("type")
                .or_else(|| optional("categoria_torneo"))
                .unwrap_or_else(|| TournamentTier::default().as_str().to_string()),
            telefono: optional("telefono"),
            correo: optional("correo"),
            whatsapp: optional("whatsapp"),
            pagina_web: optional("pagina_web"),
            flyers,
        }
    }
}

/// One line of a results CSV
#[derive(Debug, Deserialize)]
struct ResultRecord {
    #[serde(alias = "athleteName")]
    nombre: String,
    #[serde(alias = "academy", default)]
    academia: String,
    #[serde(alias = "categoryCode")]
    codigo_categoria: String,
    #[serde(alias = "points")]
    puntaje: f64,
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug)]
pub struct LeagueStore {
    path: Option<PathBuf>,
    data: StoreData,
}

impl LeagueStore {
    /// Load `path`, or start from the seed when the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let data: StoreData = serde_json::from_str(&content)
                .map_err(|e| LeagueError::Store(format!("{}: {}", path.display(), e)))?;
            info!(path = %path.display(), events = data.events.len(), "store loaded");
            data
        } else {
            info!(path = %path.display(), "store file missing, seeding");
            StoreData::seeded()
        };
        Ok(LeagueStore {
            path: Some(path),
            data,
        })
    }

    /// Store that never touches disk
    pub fn in_memory(data: StoreData) -> Self {
        LeagueStore { path: None, data }
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    /// Written to a sibling temp file, then renamed over the store
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        debug!(path = %path.display(), "store saved");
        Ok(())
    }

    /// Run `mutation` and save. When either step fails the in-memory data
    /// is rolled back, so reads never serve a change that was not stored.
    pub fn commit<T>(&mut self, mutation: impl FnOnce(&mut LeagueStore) -> Result<T>) -> Result<T> {
        let snapshot = self.data.clone();
        let result = mutation(&mut *self).and_then(|value| self.save().map(|()| value));
        if let Err(e) = &result {
            warn!(error = %e, "store mutation rolled back");
            self.data = snapshot;
        }
        result
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn events(&self) -> &[EventRow] {
        &self.data.events
    }

    /// Whole ranking, grouped by category and ordered by position
    pub fn ranking(&self) -> Vec<&RankingRow> {
        let mut rows: Vec<&RankingRow> = self.data.ranking.iter().collect();
        rows.sort_by(|a, b| {
            a.codigo_categoria
                .cmp(&b.codigo_categoria)
                .then(a.posicion.cmp(&b.posicion))
        });
        rows
    }

    pub fn ranking_by_category(&self, code: &str) -> Vec<&RankingRow> {
        let mut rows: Vec<&RankingRow> = self
            .data
            .ranking
            .iter()
            .filter(|r| r.codigo_categoria == code)
            .collect();
        rows.sort_by_key(|r| r.posicion);
        rows
    }

    pub fn social(&self) -> &SocialRow {
        &self.data.social
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    pub fn create_event(&mut self, input: EventInput) -> Result<u64> {
        if input.name.is_empty() || input.date.is_empty() || input.location.is_empty() {
            return Err(LeagueError::Store(
                "Nombre, Fecha y Ubicación son obligatorios".to_string(),
            ));
        }
        let tier = TournamentTier::parse(&input.tier).ok_or_else(|| {
            LeagueError::Store(format!("Categoría de torneo inválida: {}", input.tier))
        })?;

        let id = self.data.events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        self.data.events.push(EventRow {
            id,
            evento: input.name,
            fecha: input.date,
            lugar: input.location,
            categoria_torneo: tier.as_str().to_string(),
            status: TournamentStatus::Open.as_str().to_string(),
            telefono: input.telefono,
            correo: input.correo,
            whatsapp: input.whatsapp,
            pagina_web: input.pagina_web,
            flyers: input.flyers,
        });
        info!(id, "event created");
        Ok(id)
    }

    /// Add a tournament's results to the ranking and recompute positions.
    /// Returns the number of rows applied.
    ///
    /// Rows are parsed before anything changes. A file whose data rows are
    /// all unusable is an error and leaves the tournament untouched.
    pub fn ingest_results_csv<R: Read>(&mut self, tournament_id: u64, reader: R) -> Result<u32> {
        if !self.data.events.iter().any(|e| e.id == tournament_id) {
            return Err(LeagueError::Store(format!("El torneo {} no existe", tournament_id)));
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records: Vec<ResultRecord> = Vec::new();
        let mut data_rows = 0usize;
        for (line, record) in csv_reader.deserialize::<ResultRecord>().enumerate() {
            data_rows += 1;
            match record {
                Ok(r) if !r.nombre.is_empty() && !r.codigo_categoria.is_empty() => records.push(r),
                Ok(_) => warn!(line = line + 2, "skipping row without athlete or category"),
                Err(e) => warn!(line = line + 2, error = %e, "skipping unreadable row"),
            }
        }

        if records.is_empty() {
            if data_rows > 0 {
                return Err(LeagueError::Store("El CSV no contiene filas válidas".to_string()));
            }
            info!(tournament_id, "results file has no rows");
            return Ok(0);
        }

        let mut touched: Vec<String> = Vec::new();
        let processed = records.len() as u32;
        for record in records {
            if !touched.contains(&record.codigo_categoria) {
                touched.push(record.codigo_categoria.clone());
            }
            self.apply_result(record);
        }
        for code in &touched {
            self.rerank(code);
        }

        if let Some(event) = self.data.events.iter_mut().find(|e| e.id == tournament_id) {
            event.status = TournamentStatus::Finished.as_str().to_string();
        }

        info!(tournament_id, processed, "results ingested");
        Ok(processed)
    }

    fn apply_result(&mut self, record: ResultRecord) {
        let academy = if record.academia.is_empty() {
            "Independiente".to_string()
        } else {
            record.academia
        };
        let existing = self.data.ranking.iter_mut().find(|r| {
            r.codigo_categoria == record.codigo_categoria
                && r.nombre.eq_ignore_ascii_case(&record.nombre)
        });
        match existing {
            Some(row) => {
                row.puntaje += record.puntaje;
                row.academia = academy;
            }
            None => {
                let id = self
                    .data
                    .ranking
                    .iter()
                    .map(|r| r.id)
                    .max()
                    .unwrap_or(0)
                    + 1;
                self.data.ranking.push(RankingRow {
                    id,
                    nombre: record.nombre,
                    academia: academy,
                    codigo_categoria: record.codigo_categoria,
                    puntaje: record.puntaje,
                    posicion: 0,
                    trend: Trend::Stable,
                    photo_url: None,
                });
            }
        }
    }

    /// Positions by points descending; trend from the previous position
    fn rerank(&mut self, code: &str) {
        let mut rows: Vec<&mut RankingRow> = self
            .data
            .ranking
            .iter_mut()
            .filter(|r| r.codigo_categoria == code)
            .collect();
        rows.sort_by(|a, b| {
            b.puntaje
                .total_cmp(&a.puntaje)
                .then_with(|| a.nombre.cmp(&b.nombre))
        });
        for (i, row) in rows.into_iter().enumerate() {
            let position = i as u32 + 1;
            row.trend = match row.posicion {
                0 => Trend::Stable,
                previous if position < previous => Trend::Up,
                previous if position > previous => Trend::Down,
                _ => Trend::Stable,
            };
            row.posicion = position;
        }
    }

    /// Replace the feed; anything past the third post is dropped
    pub fn update_social(&mut self, account_name: Option<&str>, posts: Vec<String>) -> usize {
        let mut posts: Vec<String> = posts
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if posts.len() > MAX_SOCIAL_POSTS {
            warn!(received = posts.len(), "social feed capped");
            posts.truncate(MAX_SOCIAL_POSTS);
        }
        if let Some(name) = account_name.map(str::trim).filter(|n| !n.is_empty()) {
            self.data.social.account_name = name.to_string();
        }
        self.data.social.posts = posts;
        self.data.social.posts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LeagueStore {
        LeagueStore::in_memory(StoreData::seeded())
    }

    fn input(name: &str, tier: &str) -> EventInput {
        EventInput {
            name: name.to_string(),
            date: "2026-12-12".to_string(),
            location: "Zulia".to_string(),
            tier: tier.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seeded_store() {
        let store = store();
        assert_eq!(store.events().len(), 10);
        assert_eq!(store.ranking().len(), 5);
        assert_eq!(store.social().posts.len(), 3);
        assert_eq!(store.ranking_by_category("C107").len(), 3);
    }

    #[test]
    fn test_create_event_assigns_next_id() {
        let mut store = store();
        assert_eq!(store.create_event(input("Copa Zulia", "5A")).unwrap(), 11);
        assert_eq!(store.create_event(input("Copa Lara", "3A")).unwrap(), 12);
        let last = store.events().last().unwrap();
        assert_eq!(last.status, "open");
        assert_eq!(last.categoria_torneo, "3A");
    }

    #[test]
    fn test_create_event_validation() {
        let mut store = store();
        assert!(store.create_event(input("", "3A")).is_err());
        assert!(matches!(
            store.create_event(input("Copa", "6A")),
            Err(LeagueError::Store(_))
        ));
        assert_eq!(store.events().len(), 10);
    }

    #[test]
    fn test_event_input_from_fields() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), " Copa ".to_string());
        fields.insert("type".to_string(), "4A".to_string());
        fields.insert("correo".to_string(), "".to_string());
        fields.insert("flyers".to_string(), "[\"a.jpg\"]".to_string());
        let parsed = EventInput::from_fields(&fields);
        assert_eq!(parsed.name, "Copa");
        assert_eq!(parsed.tier, "4A");
        assert_eq!(parsed.correo, None);
        assert_eq!(parsed.flyers, vec!["a.jpg"]);

        let parsed = EventInput::from_fields(&HashMap::new());
        assert_eq!(parsed.tier, "3A");
    }

    #[test]
    fn test_ingest_recomputes_ranks() {
        let mut store = store();
        let csv = "nombre,academia,codigo_categoria,puntaje\n\
                   Sofia Mendez,Academia Tigre,C107,400\n\
                   Nuevo Atleta,,C107,50\n\
                   ,Dojo,C107,10\n\
                   Mal Dato,Dojo,C107,muchos\n";
        let processed = store.ingest_results_csv(1, csv.as_bytes()).unwrap();
        assert_eq!(processed, 2);

        let rows = store.ranking_by_category("C107");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].nombre, "Sofia Mendez");
        assert_eq!(rows[0].puntaje, 1650.0);
        assert_eq!(rows[0].trend, Trend::Up);
        assert_eq!(rows[1].nombre, "Alejandro Vargas");
        assert_eq!(rows[1].trend, Trend::Down);
        assert_eq!(rows[3].nombre, "Nuevo Atleta");
        assert_eq!(rows[3].academia, "Independiente");
        assert_eq!(rows[3].trend, Trend::Stable);

        assert_eq!(store.events()[0].status, "finished");
    }

    #[test]
    fn test_ingest_rejects_file_without_valid_rows() {
        let mut store = store();
        let before = store.data().clone();
        let csv = "Nombre,Academia,Codigo_Categoria,Puntaje\n\
                   Ana,Dojo,C107,300\n\
                   Luis,Dojo,C107,200\n";
        let result = store.ingest_results_csv(1, csv.as_bytes());
        assert!(matches!(result, Err(LeagueError::Store(_))));
        assert_eq!(store.data(), &before);
        assert_eq!(store.events()[0].status, "open");
    }

    #[test]
    fn test_ingest_header_only_changes_nothing() {
        let mut store = store();
        let csv = "nombre,academia,codigo_categoria,puntaje\n";
        assert_eq!(store.ingest_results_csv(1, csv.as_bytes()).unwrap(), 0);
        assert_eq!(store.events()[0].status, "open");
    }

    #[test]
    fn test_ingest_english_headers() {
        let mut store = store();
        let csv = "athleteName,academy,categoryCode,points\nJuan Perez,Dojo Cobra Kai,K01,1000\n";
        assert_eq!(store.ingest_results_csv(2, csv.as_bytes()).unwrap(), 1);
        assert_eq!(store.ranking_by_category("K01")[0].nombre, "Juan Perez");
    }

    #[test]
    fn test_ingest_unknown_tournament() {
        let mut store = store();
        let result = store.ingest_results_csv(999, "nombre\n".as_bytes());
        assert!(matches!(result, Err(LeagueError::Store(_))));
    }

    #[test]
    fn test_update_social_caps_posts() {
        let mut store = store();
        let posts = (1..=5).map(|i| format!("https://www.instagram.com/p/{}", i)).collect();
        assert_eq!(store.update_social(Some("@dojo"), posts), 3);
        assert_eq!(store.social().account_name, "@dojo");

        assert_eq!(store.update_social(None, Vec::new()), 0);
        assert_eq!(store.social().account_name, "@dojo");
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = LeagueStore::open(&path).unwrap();
        store.create_event(input("Copa Zulia", "5A")).unwrap();
        store.save().unwrap();

        let reopened = LeagueStore::open(&path).unwrap();
        assert_eq!(reopened.events().len(), 11);
        assert_eq!(reopened.data(), store.data());
    }

    #[test]
    fn test_commit_rolls_back_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        let mut store = LeagueStore::open(&path).unwrap();
        std::fs::remove_dir(dir.path().join("nested")).unwrap();

        let result = store.commit(|s| s.create_event(input("Copa Zulia", "5A")));
        assert!(matches!(result, Err(LeagueError::Io(_))));
        assert_eq!(store.events().len(), 10);
    }

    #[test]
    fn test_commit_rolls_back_failed_mutation() {
        let mut store = store();
        let result = store.commit(|s| {
            s.update_social(None, Vec::new());
            s.ingest_results_csv(999, "nombre\n".as_bytes())
        });
        assert!(result.is_err());
        assert_eq!(store.social().posts.len(), 3);

        let id = store.commit(|s| s.create_event(input("Copa Lara", "4A"))).unwrap();
        assert_eq!(id, 11);
    }

    #[test]
    fn test_corrupt_file_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(LeagueStore::open(&path), Err(LeagueError::Store(_))));
    }
}
