use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use footdata_terminal::api::{self, Fixture};
use footdata_terminal::leagues::{self, KNOWN_LEAGUES, league_label};
use footdata_terminal::prefs::FilePrefs;
use footdata_terminal::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};
use footdata_terminal::status::{StatusBucket, bucket_label, classify};
use footdata_terminal::{fake_feed, feed};

struct App {
    state: AppState,
    prefs: FilePrefs,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        let prefs = FilePrefs::open();
        let mut state = AppState::new();
        state.tracked = leagues::TrackedLeagues::load(&prefs);
        Self {
            state,
            prefs,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.league_overlay {
            self.on_overlay_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            _ => match self.state.screen {
                Screen::Fixtures => self.on_fixtures_key(key),
                Screen::Standings { .. } => self.on_standings_key(key),
                Screen::TeamMetrics { .. } => {
                    if matches!(key.code, KeyCode::Char('b') | KeyCode::Esc) {
                        self.state.go_back();
                    }
                }
            },
        }
    }

    fn on_fixtures_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('1') => self.state.set_status_tab(StatusBucket::Live),
            KeyCode::Char('2') => self.state.set_status_tab(StatusBucket::Upcoming),
            KeyCode::Char('3') => self.state.set_status_tab(StatusBucket::Finished),
            KeyCode::Char('u') | KeyCode::Tab => self.state.cycle_status_tab(),
            KeyCode::Char('f') | KeyCode::Char('L') => self.state.toggle_league_overlay(),
            KeyCode::Char('r') => self.request_refresh(),
            KeyCode::Char('s') | KeyCode::Enter => {
                let Some(league_id) = self.state.selected_fixture().map(|f| f.league_id) else {
                    self.state.push_log("[INFO] No fixture selected");
                    return;
                };
                self.request_standings(league_id);
            }
            _ => {}
        }
    }

    fn on_standings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => self.state.go_back(),
            KeyCode::Enter => {
                let Some((team_id, team_name)) = self
                    .state
                    .selected_standing()
                    .map(|row| (row.team_id, row.team_name.clone()))
                else {
                    self.state.push_log("[INFO] No team selected");
                    return;
                };
                self.request_metrics(team_id, &team_name);
            }
            _ => {}
        }
    }

    fn on_overlay_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('L') => {
                self.state.toggle_league_overlay();
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.state.toggle_league_at_cursor(&self.prefs);
            }
            KeyCode::Char('a') => self.state.toggle_all_leagues(&self.prefs),
            _ => {}
        }
    }

    fn request_refresh(&mut self) {
        if self.cmd_tx.send(ProviderCommand::RefreshFixtures).is_err() {
            self.state.push_log("[WARN] Refresh request failed");
        } else {
            self.state.push_log("[INFO] Refresh requested");
        }
    }

    fn request_standings(&mut self, league_id: u32) {
        let season = self.state.standings_season;
        self.state.open_standings(league_id);
        if self
            .cmd_tx
            .send(ProviderCommand::FetchStandings { league_id, season })
            .is_err()
        {
            self.state.standings_loading = false;
            self.state.push_log("[WARN] Standings request failed");
        }
    }

    fn request_metrics(&mut self, team_id: u32, team_name: &str) {
        self.state.open_metrics(team_id, team_name);
        if self
            .cmd_tx
            .send(ProviderCommand::FetchTeamMetrics {
                team_id,
                team_name: team_name.to_string(),
            })
            .is_err()
        {
            self.state.metrics_loading = false;
            self.state.push_log("[WARN] Metrics request failed");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    match api::api_base() {
        Some(base) => feed::spawn_provider(base, tx, cmd_rx),
        None => fake_feed::spawn_fake_provider(tx, cmd_rx),
    }

    let mut app = App::new(cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Fixtures => render_fixtures(frame, chunks[1], &app.state),
        Screen::Standings { league_id } => render_standings(frame, chunks[1], &app.state, league_id),
        Screen::TeamMetrics { .. } => render_metrics(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.league_overlay {
        render_league_overlay(frame, frame.size(), &app.state);
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    format!(
        "FOOTDATA TERMINAL | {} | Tracked leagues: {}/{}",
        state.fixtures_date,
        state.tracked.len(),
        KNOWN_LEAGUES.len()
    )
}

fn footer_text(state: &AppState) -> String {
    if state.league_overlay {
        return "j/k Move | Space Toggle | a All/None | Esc Close | q Quit".to_string();
    }
    match state.screen {
        Screen::Fixtures => {
            "1/2/3 Tab | u Cycle | j/k Move | Enter/s Standings | f Leagues | r Refresh | ? Help | q Quit"
                .to_string()
        }
        Screen::Standings { .. } => {
            "j/k Move | Enter Team metrics | b/Esc Back | q Quit".to_string()
        }
        Screen::TeamMetrics { .. } => "b/Esc Back | q Quit".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state.logs.back().cloned().unwrap_or_default()
}

fn render_fixtures(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    render_tabs(frame, sections[0], state);

    let header = Paragraph::new(format!(
        " {:<8} {:<18} {:<34} {:>7}",
        "TIME", "LEAGUE", "MATCH", "SCORE"
    ))
    .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, sections[1]);

    let list_area = sections[2];

    if let Some(err) = &state.fixtures_error {
        let msg = Paragraph::new(format!("Error loading fixtures: {err}"))
            .style(Style::default().fg(Color::Red));
        frame.render_widget(msg, list_area);
        return;
    }
    if !state.fixtures_loaded {
        let msg =
            Paragraph::new("Loading fixtures...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, list_area);
        return;
    }

    let rows = state.tab_fixtures();
    if rows.is_empty() {
        let msg = Paragraph::new("No fixtures in this bucket")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let fixture = rows[idx];
        let selected = idx == state.selected;
        let style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else if classify(&fixture.status) == StatusBucket::Live {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let row = Paragraph::new(fixture_row_text(fixture)).style(style);
        frame.render_widget(row, row_area);
    }
}

fn fixture_row_text(fixture: &Fixture) -> String {
    let time = match classify(&fixture.status) {
        StatusBucket::Upcoming => format_kickoff(fixture.date_utc.as_deref()),
        _ => fixture.status.clone(),
    };
    let league = league_label(fixture.league_id);
    let matchup = format!("{} - {}", fixture.home_team, fixture.away_team);
    let score = match (fixture.goals_home, fixture.goals_away) {
        (Some(home), Some(away)) => format!("{home}-{away}"),
        _ => "-".to_string(),
    };
    format!(" {time:<8} {league:<18} {matchup:<34} {score:>7}")
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let counts = state.bucket_counts();
    let tabs = [
        (StatusBucket::Live, counts.live),
        (StatusBucket::Upcoming, counts.upcoming),
        (StatusBucket::Finished, counts.finished),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (bucket, count)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        let label = format!("{} ({count})", bucket_label(*bucket));
        let style = if *bucket == state.status_tab {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_standings(frame: &mut Frame, area: Rect, state: &AppState, league_id: u32) {
    let block = Block::default()
        .title(format!(
            "{} {} standings",
            league_label(league_id),
            state.standings_season
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width == 0 {
        return;
    }

    if state.standings_loading && state.standings.is_empty() {
        let msg =
            Paragraph::new("Loading standings...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, inner);
        return;
    }
    if state.standings.is_empty() {
        let msg = Paragraph::new("No standings available")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, inner);
        return;
    }

    let header_area = Rect { height: 1, ..inner };
    let header = Paragraph::new(format!(
        " {:>2} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}",
        "#", "TEAM", "P", "W", "D", "L", "GD", "PTS"
    ))
    .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, header_area);

    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.standings_selected, state.standings.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row = &state.standings[idx];
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let style = if idx == state.standings_selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let text = format!(
            " {:>2} {:<24} {:>3} {:>3} {:>3} {:>3} {:>+4} {:>4}",
            row.rank, row.team_name, row.played, row.win, row.draw, row.loss, row.goals_diff,
            row.points
        );
        frame.render_widget(Paragraph::new(text).style(style), row_area);
    }
}

fn render_metrics(frame: &mut Frame, area: Rect, state: &AppState) {
    let team = state
        .metrics_team_name
        .as_deref()
        .unwrap_or("Team");
    let block = Block::default()
        .title(format!("{team} (last {} matches)", api::metrics_last_n()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let Some(metrics) = &state.metrics else {
        let text = if state.metrics_loading {
            "Loading metrics..."
        } else {
            "No metrics available"
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    let bars = vec![
        Bar::default()
            .label("W".into())
            .value(u64::from(metrics.results.win)),
        Bar::default()
            .label("D".into())
            .value(u64::from(metrics.results.draw)),
        Bar::default()
            .label("L".into())
            .value(u64::from(metrics.results.loss)),
    ];
    let chart = BarChart::default()
        .block(Block::default().title("Results").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(2);
    frame.render_widget(chart, cols[0]);

    let lines = vec![
        format!("Win rate: {:.0}%", metrics.results.win_rate * 100.0),
        String::new(),
        format!("Goals for: {}", metrics.goals.scored),
        format!("Goals against: {}", metrics.goals.conceded),
        format!("Clean sheets: {}", metrics.goals.clean_sheets),
        format!("Failed to score: {}", metrics.goals.failed_to_score),
        String::new(),
        format!("Avg possession: {}", format_avg(metrics.match_stats_avg.possession, "%")),
        format!(
            "Avg shots on goal: {}",
            format_avg(metrics.match_stats_avg.shots_on_goal, "")
        ),
        format!("Avg corners: {}", format_avg(metrics.match_stats_avg.corners, "")),
    ];
    let details = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Averages").borders(Borders::ALL));
    frame.render_widget(details, cols[1]);
}

fn format_avg(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.1}{suffix}"),
        None => "n/a".to_string(),
    }
}

fn render_league_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(44, 60, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title("Filter Leagues")
        .borders(Borders::ALL);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = Vec::new();
    for (i, (id, name)) in KNOWN_LEAGUES.iter().enumerate() {
        let mark = if state.tracked.contains(*id) { "x" } else { " " };
        let text = format!("[{mark}] {name}");
        let style = if i == state.league_cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{} of {} tracked", state.tracked.len(), KNOWN_LEAGUES.len()),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "FootData Terminal - Help",
        "",
        "Fixtures:",
        "  1/2/3        Live / Upcoming / Finished",
        "  u / Tab      Cycle status tab",
        "  j/k or ↑/↓   Move",
        "  Enter / s    Standings for fixture's league",
        "  f            League filter",
        "  r            Refresh fixtures",
        "",
        "Standings:",
        "  Enter        Team metrics",
        "  b / Esc      Back",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn format_kickoff(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "TBD".to_string();
    };
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return "TBD".to_string();
    }
    if let Some(dt) = parse_kickoff(cleaned) {
        return dt.format("%H:%M").to_string();
    }
    if cleaned.len() >= 16 {
        return cleaned[11..16].to_string();
    }
    cleaned.to_string()
}

fn parse_kickoff(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}

fn visible_range(selected: usize, len: usize, visible: usize) -> (usize, usize) {
    if visible == 0 || len == 0 {
        return (0, 0);
    }
    if len <= visible {
        return (0, len);
    }
    let half = visible / 2;
    let start = selected.saturating_sub(half).min(len - visible);
    (start, start + visible)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
