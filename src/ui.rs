use crate::api::LeagueClient;
use crate::category_filter::FilterField;
use crate::entities::{CategoryKind, RankingEntry, TournamentTier, UserRole, MAX_SOCIAL_POSTS};
use crate::pages::{
    web_url, whatsapp_url, AdminPanel, AdminTab, BannerKind, DashboardPage, EventsPage, ForumPage,
    LandingPage, Page, RankingPage,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Text box currently receiving keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    EventsSearch,
    ForumSearch,
    PostUrl,
    Event(EventField),
    Results(ResultsField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Name,
    Date,
    Location,
    Tier,
    Email,
    Website,
    Whatsapp,
    Phone,
}

impl EventField {
    pub const ALL: [EventField; 8] = [
        EventField::Name,
        EventField::Date,
        EventField::Location,
        EventField::Tier,
        EventField::Email,
        EventField::Website,
        EventField::Whatsapp,
        EventField::Phone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventField::Name => "Nombre",
            EventField::Date => "Fecha (AAAA-MM-DD)",
            EventField::Location => "Ubicación",
            EventField::Tier => "Categoría",
            EventField::Email => "Correo",
            EventField::Website => "Página web",
            EventField::Whatsapp => "WhatsApp",
            EventField::Phone => "Teléfono",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsField {
    TournamentId,
    CsvPath,
}

impl ResultsField {
    pub const ALL: [ResultsField; 2] = [ResultsField::TournamentId, ResultsField::CsvPath];

    pub fn label(&self) -> &'static str {
        match self {
            ResultsField::TournamentId => "ID de torneo",
            ResultsField::CsvPath => "Archivo CSV",
        }
    }
}

/// Work a key press asks for that needs the API client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    SearchRanking,
    SyncSocial,
    SaveSocial,
    SubmitEvent,
    SubmitResults,
}

pub struct App {
    pub current_page: Page,
    pub api_online: Option<bool>,
    pub landing: LandingPage,
    pub dashboard: DashboardPage,
    pub events: EventsPage,
    pub forum: ForumPage,
    pub ranking: RankingPage,
    pub admin: AdminPanel,
    pub editing: Option<InputTarget>,
    pub passphrase_input: String,
    pub post_selected: usize,
    pub admin_focus: usize,
}

impl App {
    pub fn new(admin_passphrase: Option<String>) -> Self {
        Self {
            current_page: Page::Landing,
            api_online: None,
            landing: LandingPage::new(),
            dashboard: DashboardPage::default(),
            events: EventsPage::new(),
            forum: ForumPage::default(),
            ranking: RankingPage::default(),
            admin: AdminPanel::new(admin_passphrase),
            editing: None,
            passphrase_input: String::new(),
            post_selected: 0,
            admin_focus: 0,
        }
    }

    /// Initial page loads; the requests are independent of each other
    pub async fn load(&mut self, client: &LeagueClient) {
        let (online, feed, events) = tokio::join!(
            client.check_status(),
            client.fetch_social_feed(),
            client.fetch_events(),
        );
        self.api_online = Some(online);
        self.landing.apply_social_feed(feed);
        self.events.apply_events(events);
        if self.admin.is_unlocked() {
            self.admin.sync_social(client).await;
        }
    }

    pub fn role(&self) -> UserRole {
        if self.admin.is_unlocked() && self.admin.gate_enabled() {
            UserRole::Admin
        } else {
            UserRole::Guest
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.admin.tick(now);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    // ========================================================================
    // KEY HANDLING
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if let Some(target) = self.editing {
            self.handle_editing(target, key);
            return Action::None;
        }
        if self.current_page == Page::Admin && !self.admin.is_unlocked() {
            return self.handle_gate(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
                return Action::None;
            }
            KeyCode::BackTab => {
                self.previous_page();
                return Action::None;
            }
            KeyCode::F(n) => {
                if let Some(page) = Page::from_function_key(n) {
                    self.current_page = page;
                }
                return Action::None;
            }
            _ => {}
        }

        match self.current_page {
            Page::Landing | Page::Dashboard => Action::None,
            Page::Events => self.handle_events_key(key),
            Page::Forum => self.handle_forum_key(key),
            Page::Ranking => self.handle_ranking_key(key),
            Page::Admin => self.handle_admin_key(key),
        }
    }

    fn handle_gate(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => self.current_page = Page::Landing,
            KeyCode::Tab => self.next_page(),
            KeyCode::BackTab => self.previous_page(),
            KeyCode::F(n) => {
                if let Some(page) = Page::from_function_key(n) {
                    self.current_page = page;
                }
            }
            KeyCode::Enter => {
                self.admin.try_unlock(&self.passphrase_input);
                self.passphrase_input.clear();
                if self.admin.is_unlocked() {
                    return Action::SyncSocial;
                }
            }
            KeyCode::Backspace => {
                self.passphrase_input.pop();
            }
            KeyCode::Char(c) => {
                self.passphrase_input.push(c);
                self.admin.login_error = None;
            }
            _ => {}
        }
        Action::None
    }

    fn handle_editing(&mut self, target: InputTarget, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.editing = None,
            KeyCode::Enter => {
                if target == InputTarget::PostUrl {
                    self.admin.add_post();
                }
                self.editing = None;
            }
            KeyCode::Backspace => self.pop_char(target),
            KeyCode::Char(c) => self.push_char(target, c),
            _ => {}
        }
    }

    fn push_char(&mut self, target: InputTarget, c: char) {
        match target {
            InputTarget::EventsSearch => self.events.push_search_char(c),
            InputTarget::ForumSearch => self.forum.search.push(c),
            InputTarget::PostUrl => self.admin.new_post_url.push(c),
            InputTarget::Event(field) => {
                let form = &mut self.admin.event;
                match field {
                    EventField::Name => form.name.push(c),
                    EventField::Date => form.date.push(c),
                    EventField::Location => form.location.push(c),
                    EventField::Email => form.email.push(c),
                    EventField::Website => form.website.push(c),
                    EventField::Whatsapp => {
                        let body = format!("{}{}", form.whatsapp_body, c);
                        form.set_whatsapp_body(&body);
                    }
                    EventField::Phone => {
                        let body = format!("{}{}", form.phone_body, c);
                        form.set_phone_body(&body);
                    }
                    EventField::Tier => {}
                }
            }
            InputTarget::Results(ResultsField::TournamentId) => {
                if c.is_ascii_digit() {
                    self.admin.results.tournament_id.push(c);
                }
            }
            InputTarget::Results(ResultsField::CsvPath) => self.admin.results.csv_path.push(c),
        }
    }

    fn pop_char(&mut self, target: InputTarget) {
        match target {
            InputTarget::EventsSearch => self.events.pop_search_char(),
            InputTarget::ForumSearch => {
                self.forum.search.pop();
            }
            InputTarget::PostUrl => {
                self.admin.new_post_url.pop();
            }
            InputTarget::Event(field) => {
                let form = &mut self.admin.event;
                match field {
                    EventField::Name => form.name.pop(),
                    EventField::Date => form.date.pop(),
                    EventField::Location => form.location.pop(),
                    EventField::Email => form.email.pop(),
                    EventField::Website => form.website.pop(),
                    EventField::Whatsapp => form.whatsapp_body.pop(),
                    EventField::Phone => form.phone_body.pop(),
                    EventField::Tier => None,
                };
            }
            InputTarget::Results(ResultsField::TournamentId) => {
                self.admin.results.tournament_id.pop();
            }
            InputTarget::Results(ResultsField::CsvPath) => {
                self.admin.results.csv_path.pop();
            }
        }
    }

    fn handle_events_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('/') => self.editing = Some(InputTarget::EventsSearch),
            KeyCode::Char('c') => self.events.clear_search(),
            KeyCode::Down | KeyCode::Char('j') => self.events.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.events.select_previous(),
            _ => {}
        }
        Action::None
    }

    fn handle_forum_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('/') => self.editing = Some(InputTarget::ForumSearch),
            KeyCode::Char('c') => self.forum.search.clear(),
            KeyCode::Right | KeyCode::Char('l') => self.forum.cycle_category(true),
            KeyCode::Left | KeyCode::Char('h') => self.forum.cycle_category(false),
            _ => {}
        }
        Action::None
    }

    fn handle_ranking_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.ranking.focus_next_field(),
            KeyCode::Up | KeyCode::Char('k') => self.ranking.focus_previous_field(),
            KeyCode::Right | KeyCode::Char('l') => self.ranking.cycle_active(true),
            KeyCode::Left | KeyCode::Char('h') => self.ranking.cycle_active(false),
            KeyCode::Char('f') => self.ranking.filters_expanded = !self.ranking.filters_expanded,
            KeyCode::Enter => return Action::SearchRanking,
            _ => {}
        }
        Action::None
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char(']') | KeyCode::Right => {
                self.admin.tab = self.admin.tab.next();
                self.admin_focus = 0;
                return Action::None;
            }
            KeyCode::Char('[') | KeyCode::Left => {
                self.admin.tab = self.admin.tab.previous();
                self.admin_focus = 0;
                return Action::None;
            }
            _ => {}
        }

        match self.admin.tab {
            AdminTab::Social => self.handle_social_key(key),
            AdminTab::Events => self.handle_event_form_key(key),
            AdminTab::Results => self.handle_results_form_key(key),
        }
    }

    fn handle_social_key(&mut self, key: KeyEvent) -> Action {
        let count = self.admin.social().posts.len();
        match key.code {
            KeyCode::Char('a') => self.editing = Some(InputTarget::PostUrl),
            KeyCode::Char('d') => {
                if let Some(id) = self.admin.social().posts.get(self.post_selected).map(|p| p.id.clone()) {
                    self.admin.delete_post(&id);
                    let remaining = self.admin.social().posts.len();
                    self.post_selected = self.post_selected.min(remaining.saturating_sub(1));
                }
            }
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                self.post_selected = (self.post_selected + 1) % count;
            }
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                self.post_selected = (self.post_selected + count - 1) % count;
            }
            KeyCode::Char('r') => self.admin.reset_to_defaults(),
            KeyCode::Char('y') => return Action::SyncSocial,
            KeyCode::Char('s') => return Action::SaveSocial,
            _ => {}
        }
        Action::None
    }

    fn handle_event_form_key(&mut self, key: KeyEvent) -> Action {
        let field = EventField::ALL[self.admin_focus.min(EventField::ALL.len() - 1)];
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.admin_focus = (self.admin_focus + 1) % EventField::ALL.len();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.admin_focus = (self.admin_focus + EventField::ALL.len() - 1) % EventField::ALL.len();
            }
            KeyCode::Enter if field == EventField::Tier => self.admin.event.cycle_tier(),
            KeyCode::Enter => self.editing = Some(InputTarget::Event(field)),
            KeyCode::Char('p') if field == EventField::Whatsapp => {
                self.admin.event.cycle_whatsapp_prefix()
            }
            KeyCode::Char('p') if field == EventField::Phone => self.admin.event.cycle_phone_prefix(),
            KeyCode::Char('s') => return Action::SubmitEvent,
            _ => {}
        }
        Action::None
    }

    fn handle_results_form_key(&mut self, key: KeyEvent) -> Action {
        let field = ResultsField::ALL[self.admin_focus.min(ResultsField::ALL.len() - 1)];
        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Up | KeyCode::Char('k') => {
                self.admin_focus = (self.admin_focus + 1) % ResultsField::ALL.len();
            }
            KeyCode::Enter => self.editing = Some(InputTarget::Results(field)),
            KeyCode::Char('s') => return Action::SubmitResults,
            _ => {}
        }
        Action::None
    }

    pub async fn perform(&mut self, action: Action, client: &LeagueClient) {
        match action {
            Action::None | Action::Quit => {}
            Action::SearchRanking => self.ranking.search(client).await,
            Action::SyncSocial => {
                self.admin.sync_social(client).await;
            }
            Action::SaveSocial => {
                if self.admin.save_social(client).await {
                    self.landing.apply_social_feed(Some(self.admin.social().clone()));
                }
            }
            Action::SubmitEvent => {
                self.admin.submit_event(client).await;
                if self.admin.banner().is_some_and(|b| b.kind() == BannerKind::Success) {
                    self.events = EventsPage::load(client).await;
                }
            }
            Action::SubmitResults => self.admin.submit_results(client).await,
        }
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub async fn run_ui(app: &mut App, client: &LeagueClient) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Leave the alternate screen before a panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    terminal.draw(|f| ui(f, app))?;
    app.load(client).await;

    // Run the app
    let res = run_app(&mut terminal, app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &LeagueClient,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key) {
                    Action::Quit => return Ok(()),
                    Action::None => {}
                    action => {
                        terminal.draw(|f| ui(f, app))?;
                        app.perform(action, client).await;
                    }
                }
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Landing => render_landing(f, chunks[1], &app.landing),
        Page::Dashboard => render_dashboard(f, chunks[1], &app.dashboard),
        Page::Events => render_events(f, chunks[1], app),
        Page::Forum => render_forum(f, chunks[1], app),
        Page::Ranking => render_ranking(f, chunks[1], &app.ranking),
        Page::Admin => render_admin(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", title))
}

fn heading_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn key_hint(spans: &mut Vec<Span<'static>>, key: &'static str, what: &'static str) {
    spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(format!(" {} | ", what)));
}

fn tier_color(tier: TournamentTier) -> Color {
    match tier {
        TournamentTier::FiveA => Color::Yellow,
        TournamentTier::FourA => Color::Magenta,
        TournamentTier::ThreeA => Color::Blue,
    }
}

fn rank_color(rank: u32) -> Color {
    match rank {
        1 => Color::Yellow,
        2 => Color::Gray,
        3 => Color::Rgb(205, 127, 50),
        _ => Color::White,
    }
}

/// Ranking rows on the podium are drawn bold
fn entry_rank_style(entry: &RankingEntry) -> Style {
    let style = Style::default().fg(rank_color(entry.rank));
    if entry.is_podium() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Header label for a page tab; the Admin tab shows a lock until a
/// configured passphrase has been entered
fn tab_title(app: &App, page: Page, index: usize) -> String {
    let locked = page == Page::Admin && app.admin.gate_enabled() && !app.role().can_administer();
    if locked {
        format!("F{} {} 🔒", index + 1, page.title())
    } else {
        format!("F{} {}", index + 1, page.title())
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        "LINAMVE  ",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )];
    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(tab_title(app, *page, i), style));
    }

    tab_spans.push(Span::raw("  |  "));
    let (api_label, api_color) = match app.api_online {
        Some(true) => ("API ●", Color::Green),
        Some(false) => ("API ○ respaldo", Color::Red),
        None => ("API …", Color::DarkGray),
    };
    tab_spans.push(Span::styled(api_label, Style::default().fg(api_color)));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        app.role().as_str().to_uppercase(),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_landing(f: &mut Frame, area: Rect, page: &LandingPage) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let mut featured = vec![];
    if let Some(t) = &page.featured {
        let date = page
            .featured_date()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| t.date.clone());
        featured.push(Line::from(Span::styled(t.name.clone(), heading_style())));
        featured.push(Line::from(format!("📅 {}   📍 {}", date, t.location)));
        featured.push(Line::from(Span::styled(
            format!("Nivel {}", t.tier.as_str()),
            Style::default().fg(tier_color(t.tier)),
        )));
        featured.push(Line::from(t.status.label()));
    }
    f.render_widget(
        Paragraph::new(featured).block(panel("Próximo Torneo")),
        chunks[0],
    );

    let podium: Vec<ListItem> = page
        .top_ranking
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{} ", e.rank), entry_rank_style(e)),
                Span::raw(format!("{:<24}", e.athlete_name)),
                Span::styled(format!("{:>6.0} pts ", e.points), Style::default().fg(Color::Green)),
                Span::raw(e.trend.arrow()),
            ]))
        })
        .collect();
    f.render_widget(List::new(podium).block(panel("Top Ranking")), chunks[1]);

    let social: Vec<ListItem> = if page.loading_social {
        vec![ListItem::new("Cargando publicaciones...")]
    } else {
        page.social
            .posts
            .iter()
            .map(|p| ListItem::new(format!("📸 {}", p.post_url)))
            .collect()
    };
    f.render_widget(
        List::new(social).block(panel(&format!("Instagram {}", page.social.account_name))),
        chunks[2],
    );
}

fn render_dashboard(f: &mut Frame, area: Rect, page: &DashboardPage) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let athlete = &page.athlete;
    let mut profile = vec![
        Line::from(Span::styled(athlete.full_name(), heading_style())),
        Line::from(format!("Cinta {} · {} · {}", athlete.belt_rank, athlete.age_label, athlete.academy)),
    ];
    if let Some(team) = &athlete.team {
        profile.push(Line::from(format!("Equipo: {}", team)));
    }
    profile.push(Line::from(format!("Puntos totales: {}", page.total_points())));
    if let Some(best) = page.best() {
        profile.push(Line::from(format!("Mejor resultado: #{} en {}", best.rank, best.label)));
    }
    f.render_widget(Paragraph::new(profile).block(panel("Mi Perfil")), chunks[0]);

    let gauge = Gauge::default()
        .block(panel("Eficiencia"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(page.efficiency_percent().min(100));
    f.render_widget(gauge, chunks[1]);

    let rows = page.rows.iter().map(|r| {
        let kind = match r.kind {
            Some(CategoryKind::Combat) => "🥊 combate",
            Some(CategoryKind::Form) => "🥋 kata",
            Some(CategoryKind::Weapon) => "🗡️ armas",
            None => "-",
        };
        Row::new(vec![
            Cell::from(r.code.clone()),
            Cell::from(r.label.clone()),
            Cell::from(kind),
            Cell::from(r.age_group.clone()),
            Cell::from(format!("#{}", r.rank)).style(Style::default().fg(rank_color(r.rank))),
            Cell::from(r.points.to_string()),
        ])
    });
    let header = Row::new(["Código", "Categoría", "Tipo", "Edad", "Puesto", "Puntos"].map(|h| {
        Cell::from(h).style(heading_style())
    }))
    .style(Style::default().bg(Color::DarkGray));
    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(panel("Rendimiento por categoría"));
    f.render_widget(table, chunks[2]);
}

fn render_events(f: &mut Frame, area: Rect, app: &App) {
    let page = &app.events;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(7)])
        .split(area);

    let editing = app.editing == Some(InputTarget::EventsSearch);
    f.render_widget(
        Paragraph::new(format!("🔍 {}{}", page.search, if editing { "▏" } else { "" }))
            .block(panel("Buscar por nombre o ciudad (/)")),
        chunks[0],
    );

    if page.loading {
        f.render_widget(Paragraph::new("Cargando calendario...").block(panel("Calendario")), chunks[1]);
        return;
    }
    if let Some(message) = page.no_match_message() {
        f.render_widget(
            Paragraph::new(message).wrap(Wrap { trim: true }).block(panel("Calendario")),
            chunks[1],
        );
        return;
    }

    let filtered = page.filtered();
    let rows = filtered.iter().enumerate().map(|(i, t)| {
        let date = crate::pages::local_date(&t.date)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| t.date.clone());
        let style = if i == page.selected {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(date),
            Cell::from(truncate(&t.name, 30)),
            Cell::from(truncate(&t.location, 18)),
            Cell::from(t.tier.as_str()).style(Style::default().fg(tier_color(t.tier))),
            Cell::from(t.status.label()),
        ])
        .style(style)
    });
    let header = Row::new(["Fecha", "Evento", "Lugar", "Nivel", "Estado"].map(|h| {
        Cell::from(h).style(heading_style())
    }))
    .style(Style::default().bg(Color::DarkGray));
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(32),
            Constraint::Length(20),
            Constraint::Length(6),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(panel(&format!("Calendario ({})", filtered.len())));
    f.render_widget(table, chunks[1]);

    let mut detail = vec![];
    if let Some(t) = page.selected_tournament() {
        if let Some(phone) = &t.phone {
            detail.push(Line::from(format!("📞 {}", phone)));
        }
        if let Some(wa) = &t.whatsapp {
            detail.push(Line::from(format!("💬 {}", whatsapp_url(wa))));
        }
        if let Some(email) = &t.email {
            detail.push(Line::from(format!("✉️  {}", email)));
        }
        if let Some(site) = &t.website {
            detail.push(Line::from(format!("🌐 {}", web_url(site))));
        }
        for flyer in &t.flyers {
            detail.push(Line::from(format!("🖼️  {}", flyer)));
        }
        if detail.is_empty() {
            detail.push(Line::from("Sin datos de contacto"));
        }
    }
    f.render_widget(Paragraph::new(detail).block(panel("Contacto")), chunks[2]);
}

fn render_forum(f: &mut Frame, area: Rect, app: &App) {
    let page = &app.forum;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mut pills = vec![];
    for category in page.categories() {
        let style = if *category == page.active_category {
            Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        pills.push(Span::styled(format!(" {} ", category), style));
        pills.push(Span::raw(" "));
    }
    f.render_widget(
        Paragraph::new(Line::from(pills)).block(panel("El Tatami Digital")),
        chunks[0],
    );

    let editing = app.editing == Some(InputTarget::ForumSearch);
    f.render_widget(
        Paragraph::new(format!("🔍 {}{}", page.search, if editing { "▏" } else { "" }))
            .block(panel("Buscar tema (/)")),
        chunks[1],
    );

    let items: Vec<ListItem> = page
        .topics()
        .iter()
        .map(|t| {
            let hot = if t.is_hot { "🔥 " } else { "   " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(hot),
                    Span::styled(t.title, Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(
                    format!(
                        "   {} · {} · {} respuestas · {} vistas · {}",
                        t.category, t.author, t.replies, t.views, t.last_activity
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    f.render_widget(List::new(items).block(panel("Temas")), chunks[2]);
}

fn render_ranking(f: &mut Frame, area: Rect, page: &RankingPage) {
    let filter_height = if page.filters_expanded { 8 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(filter_height), Constraint::Min(0)])
        .split(area);

    let mut lines = vec![];
    if page.filters_expanded {
        for field in FilterField::ALL {
            let marker = if field == page.active_field { "▶ " } else { "  " };
            let value = page.filter.selected(field).unwrap_or("-").to_string();
            let count = page.filter.options(field).len();
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<10}", field.label()), heading_style()),
                Span::raw(format!("◀ {} ▶", value)),
                Span::styled(format!("  ({} opciones)", count), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }
    if let Some(message) = &page.message {
        lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))));
    } else if let Some(label) = &page.search_label {
        lines.push(Line::from(Span::styled(label.clone(), Style::default().fg(Color::Cyan))));
    }
    f.render_widget(Paragraph::new(lines).block(panel("Filtros (f)")), chunks[0]);

    if page.loading {
        f.render_widget(Paragraph::new("CARGANDO...").block(panel("Ranking")), chunks[1]);
        return;
    }
    if page.rows.is_empty() {
        let (title, hint) = page.empty_state();
        let body = vec![
            Line::from(Span::styled(title, heading_style())),
            Line::from(hint),
        ];
        f.render_widget(Paragraph::new(body).block(panel("Ranking")), chunks[1]);
        return;
    }

    let rows = page.rows.iter().map(|e| {
        Row::new(vec![
            Cell::from(format!("#{}", e.rank)).style(entry_rank_style(e)),
            Cell::from(truncate(&e.athlete_name, 26)),
            Cell::from(truncate(&e.academy, 20)),
            Cell::from(e.belt.clone()),
            Cell::from(format!("{:.0}", e.points)).style(Style::default().fg(Color::Green)),
            Cell::from(e.trend.arrow()),
        ])
    });
    let header = Row::new(["Puesto", "Atleta", "Academia", "Cinta", "Puntos", ""].map(|h| {
        Cell::from(h).style(heading_style())
    }))
    .style(Style::default().bg(Color::DarkGray));
    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(28),
            Constraint::Length(22),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(3),
        ],
    )
    .header(header)
    .block(panel("Ranking"));
    f.render_widget(table, chunks[1]);
}

fn render_admin(f: &mut Frame, area: Rect, app: &App) {
    let admin = &app.admin;
    if !admin.is_unlocked() {
        let masked = "•".repeat(app.passphrase_input.chars().count());
        let mut lines = vec![
            Line::from(Span::styled("PANEL DE CONTROL", heading_style())),
            Line::from(""),
            Line::from(format!("Contraseña Maestra: {}▏", masked)),
        ];
        if let Some(err) = &admin.login_error {
            lines.push(Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red))));
        }
        f.render_widget(Paragraph::new(lines).block(panel("🔒 Admin")), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let mut tabs = vec![];
    for tab in AdminTab::ALL {
        let style = if tab == admin.tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tabs.push(Span::styled(format!(" {} ", tab.title()), style));
    }
    f.render_widget(Paragraph::new(Line::from(tabs)).block(panel("Admin ([ ])")), chunks[0]);

    match admin.tab {
        AdminTab::Social => render_social_editor(f, chunks[1], app),
        AdminTab::Events => render_event_form(f, chunks[1], app),
        AdminTab::Results => render_results_form(f, chunks[1], app),
    }

    let banner = match admin.banner() {
        Some(b) => {
            let color = match b.kind() {
                BannerKind::Error => Color::Red,
                BannerKind::Success => Color::Green,
                BannerKind::Info => Color::Cyan,
            };
            Paragraph::new(Line::from(Span::styled(
                b.message().to_string(),
                Style::default().fg(color),
            )))
        }
        None if admin.loading => Paragraph::new("Procesando..."),
        None => Paragraph::new(""),
    };
    f.render_widget(banner.block(panel("Estado")), chunks[2]);
}

fn render_social_editor(f: &mut Frame, area: Rect, app: &App) {
    let social = app.admin.social();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let editing = app.editing == Some(InputTarget::PostUrl);
    f.render_widget(
        Paragraph::new(format!("{}{}", app.admin.new_post_url, if editing { "▏" } else { "" }))
            .block(panel("Nueva URL de Instagram (a)")),
        chunks[0],
    );

    let items: Vec<ListItem> = social
        .posts
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let style = if i == app.post_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}. {}", i + 1, p.post_url)).style(style)
        })
        .collect();
    f.render_widget(
        List::new(items).block(panel(&format!(
            "{} · {}/{} posts{}",
            social.account_name,
            social.posts.len(),
            MAX_SOCIAL_POSTS,
            if social.is_full() { " (lleno)" } else { "" }
        ))),
        chunks[1],
    );
}

fn form_line(label: &str, value: String, focused: bool, editing: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let cursor = if editing { "▏" } else { "" };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<20}", label), heading_style()),
        Span::raw(format!("{}{}", value, cursor)),
    ])
}

fn render_event_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.admin.event;
    let lines: Vec<Line> = EventField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = match field {
                EventField::Name => form.name.clone(),
                EventField::Date => form.date.clone(),
                EventField::Location => form.location.clone(),
                EventField::Tier => format!("◀ {} ▶", form.tier.as_str()),
                EventField::Email => form.email.clone(),
                EventField::Website => form.website.clone(),
                EventField::Whatsapp => format!("[{}] {}  {}", form.whatsapp_prefix, form.whatsapp_body, form.whatsapp()),
                EventField::Phone => format!("[{}] {}  {}", form.phone_prefix, form.phone_body, form.phone()),
            };
            form_line(
                field.label(),
                value,
                i == app.admin_focus,
                app.editing == Some(InputTarget::Event(*field)),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Crear evento (s guardar)")), area);
}

fn render_results_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.admin.results;
    let lines: Vec<Line> = ResultsField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let value = match field {
                ResultsField::TournamentId => form.tournament_id.clone(),
                ResultsField::CsvPath => form.csv_path.clone(),
            };
            form_line(
                field.label(),
                value,
                i == app.admin_focus,
                app.editing == Some(InputTarget::Results(*field)),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(panel("Subir resultados (s enviar)")), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" {} ", app.current_page.title()),
        Style::default().fg(Color::Cyan),
    )];
    status_spans.push(Span::raw(" | "));

    if app.editing.is_some() {
        key_hint(&mut status_spans, "Enter", "Aceptar");
        key_hint(&mut status_spans, "Esc", "Cancelar");
    } else {
        match app.current_page {
            Page::Events | Page::Forum => {
                key_hint(&mut status_spans, "/", "Buscar");
                key_hint(&mut status_spans, "c", "Limpiar");
            }
            Page::Ranking => {
                key_hint(&mut status_spans, "↑/↓", "Filtro");
                key_hint(&mut status_spans, "←/→", "Opción");
                key_hint(&mut status_spans, "Enter", "Buscar");
            }
            Page::Admin if app.admin.tab == AdminTab::Social => {
                if !app.admin.social().is_full() {
                    key_hint(&mut status_spans, "a", "Añadir");
                }
                key_hint(&mut status_spans, "d", "Borrar");
                key_hint(&mut status_spans, "r", "Restaurar");
                key_hint(&mut status_spans, "y", "Sincronizar");
                key_hint(&mut status_spans, "s", "Guardar");
            }
            Page::Admin => {
                key_hint(&mut status_spans, "↑/↓", "Campo");
                key_hint(&mut status_spans, "Enter", "Editar");
                key_hint(&mut status_spans, "s", "Enviar");
            }
            _ => {}
        }
        key_hint(&mut status_spans, "Tab", "Página");
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Salir"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
