use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use linamve::api::{LeagueClient, NewEvent};
use linamve::config::Config;
use linamve::entities::{
    CategoryRegistry, RankingEntry, SocialConfig, SocialPost, Tournament, TournamentTier,
    DEFAULT_ACCOUNT_NAME,
};
use linamve::fallback;
use linamve::validation::{validate_new_event, validate_new_post, validate_results_input};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "linamve")]
#[command(about = "LINAMVE league terminal client", version)]
struct Args {
    /// TOML config file (defaults to ./linamve.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// League API endpoint
    #[arg(long, env = "LINAMVE_API_BASE")]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log filter, e.g. "debug" or "linamve=trace"
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Check whether the backend answers
    Status,
    /// Print the general ranking, or one category
    Ranking {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Print the event calendar
    Events,
    /// Print the Instagram feed shown on the landing page
    Social,
    /// List the official category table
    Categories,
    /// Create a tournament
    CreateEvent {
        #[arg(long)]
        name: String,
        /// AAAA-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
        /// 3A, 4A or 5A
        #[arg(long, default_value = "3A")]
        tier: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
        #[arg(long)]
        website: Option<String>,
        /// Flyer image URL, repeatable
        #[arg(long = "flyer")]
        flyers: Vec<String>,
    },
    /// Upload a results CSV for a tournament
    UploadResults {
        #[arg(long)]
        tournament_id: String,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Replace the Instagram feed (at most 3 posts)
    UpdateSocial {
        #[arg(long)]
        account: Option<String>,
        posts: Vec<String>,
    },
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(base) = &args.api_base {
        config.api_base = base.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

/// TUI mode logs to a file so the alternate screen stays clean
fn init_tracing(config: &Config, to_file: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("opening log file {}", config.log_file.display()))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let command = args.command.unwrap_or(Command::Tui);

    init_tracing(&config, matches!(command, Command::Tui))?;
    let client = LeagueClient::from_config(&config)?;
    info!(api = %client.base_url(), "linamve {}", linamve::VERSION);

    match command {
        Command::Tui => run_ui_mode(&config, &client).await?,
        Command::Status => run_status(&client).await,
        Command::Ranking { category } => run_ranking(&client, category.as_deref()).await,
        Command::Events => run_events(&client).await,
        Command::Social => run_social(&client).await,
        Command::Categories => run_categories(),
        Command::CreateEvent {
            name,
            date,
            location,
            tier,
            phone,
            email,
            whatsapp,
            website,
            flyers,
        } => {
            let Some(tier) = TournamentTier::parse(&tier) else {
                bail!("Nivel inválido '{}': use 3A, 4A o 5A", tier);
            };
            let event = NewEvent {
                name,
                date,
                location,
                tier,
                phone,
                email,
                whatsapp,
                website,
                flyers,
            };
            run_create_event(&client, event).await?
        }
        Command::UploadResults { tournament_id, csv } => {
            run_upload_results(&client, &tournament_id, csv).await?
        }
        Command::UpdateSocial { account, posts } => {
            run_update_social(&client, account, posts).await?
        }
    }

    Ok(())
}

// ============================================================================
// SUBCOMMANDS
// ============================================================================

async fn run_status(client: &LeagueClient) {
    println!("🌐 {}", client.base_url());
    if client.check_status().await {
        println!("✅ API en línea");
    } else {
        println!("❌ API fuera de línea (se usarán datos de respaldo)");
    }
}

fn print_ranking(rows: &[RankingEntry]) {
    println!("{:<6} {:<28} {:<22} {:>8}  ", "Puesto", "Atleta", "Academia", "Puntos");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for row in rows {
        println!(
            "#{:<5} {:<28} {:<22} {:>8.0}  {}",
            row.rank,
            row.athlete_name,
            row.academy,
            row.points,
            row.trend.arrow()
        );
    }
}

async fn run_ranking(client: &LeagueClient, category: Option<&str>) {
    let registry = CategoryRegistry::official();
    let rows = match category {
        Some(code) => {
            println!("🏆 Ranking {} · {}\n", code, registry.label_for(code));
            client.fetch_category_ranking(code).await
        }
        None => {
            println!("🏆 Ranking general\n");
            client.fetch_ranking().await
        }
    };

    if rows.is_empty() {
        let backup: Vec<RankingEntry> = fallback::ranking_rows()
            .into_iter()
            .filter(|r| category.map_or(true, |code| r.category_code == code))
            .collect();
        if backup.is_empty() {
            println!("SIN REGISTROS: no hay resultados para esta categoría.");
            return;
        }
        println!("⚠️  Sin datos del servidor, mostrando respaldo\n");
        print_ranking(&backup);
    } else {
        print_ranking(&rows);
    }
}

fn print_events(events: &[Tournament]) {
    for t in events {
        println!(
            "{:>3}  {}  {:<28} {:<16} {}  {}",
            t.id,
            t.date,
            t.name,
            t.location,
            t.tier.as_str(),
            t.status.label()
        );
    }
}

async fn run_events(client: &LeagueClient) {
    println!("📅 Calendario\n");
    let events = client.fetch_events().await;
    if events.is_empty() {
        println!("⚠️  Sin datos del servidor, mostrando respaldo\n");
        print_events(&fallback::upcoming_tournaments());
    } else {
        print_events(&events);
    }
}

async fn run_social(client: &LeagueClient) {
    let feed = match client.fetch_social_feed().await {
        Some(feed) if !feed.posts.is_empty() => feed,
        _ => {
            println!("⚠️  Sin datos del servidor, mostrando respaldo");
            fallback::default_social_config()
        }
    };
    println!("📸 {}\n", feed.account_name);
    for (i, post) in feed.posts.iter().enumerate() {
        println!("  {}. {}", i + 1, post.post_url);
    }
}

fn run_categories() {
    let registry = CategoryRegistry::official();
    println!("📋 {} categorías oficiales\n", registry.count());
    for cat in registry.official_table() {
        println!(
            "{:<6} {:<24} {:<16} {:<20} {:<10} {}",
            cat.code,
            cat.modality,
            cat.age,
            cat.belt,
            cat.gender,
            registry.label_for(cat.code)
        );
    }
}

async fn run_create_event(client: &LeagueClient, event: NewEvent) -> Result<()> {
    validate_new_event(&event)?;
    println!("📝 Creando evento {}...", event.name);
    let response = client.create_event(&event).await;
    if !response.success {
        bail!("Error: {}", response.message);
    }
    println!("✅ Éxito: {}", response.message);
    Ok(())
}

async fn run_upload_results(client: &LeagueClient, tournament_id: &str, csv: PathBuf) -> Result<()> {
    let id = validate_results_input(tournament_id, &csv.to_string_lossy())?;
    println!("📤 Subiendo {} al torneo {}...", csv.display(), id);
    let response = client.upload_results_csv(id, &csv).await;
    if !response.success {
        bail!("Error: {}", response.message);
    }
    match response.processed {
        Some(n) => println!("✅ Éxito: {} ({} filas procesadas)", response.message, n),
        None => println!("✅ Éxito: {}", response.message),
    }
    Ok(())
}

async fn run_update_social(
    client: &LeagueClient,
    account: Option<String>,
    posts: Vec<String>,
) -> Result<()> {
    let mut accepted: Vec<SocialPost> = Vec::new();
    for raw in &posts {
        let url = validate_new_post(raw, accepted.len())?;
        accepted.push(SocialPost::new(&url));
    }
    let account = account.unwrap_or_else(|| DEFAULT_ACCOUNT_NAME.to_string());
    let config = SocialConfig::new(&account, accepted);

    println!("💾 Guardando {} posts para {}...", config.posts.len(), config.account_name);
    let response = client.update_social_feed(&config).await;
    if !response.success {
        bail!("Error: {}", response.message);
    }
    println!("✅ Éxito: {}", response.message);
    Ok(())
}

// ============================================================================
// TUI
// ============================================================================

#[cfg(feature = "tui")]
async fn run_ui_mode(config: &Config, client: &LeagueClient) -> Result<()> {
    println!("🥋 Loading LINAMVE...\n");

    let mut app = linamve::ui::App::new(config.admin_passphrase.clone());
    linamve::ui::run_ui(&mut app, client).await?;

    println!("\n✅ UI closed successfully");
    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_ui_mode(_config: &Config, _client: &LeagueClient) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use a subcommand: linamve ranking | events | social");
    std::process::exit(1);
}
