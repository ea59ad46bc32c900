use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use profile_terminal::display::{details_link, subtrack_figure, subtrack_label, track_label};
use profile_terminal::sample_stats::sample_member_stats;
use profile_terminal::state::{AppState, StatsSource};
use profile_terminal::stats_load::load_member_stats;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(source: StatsSource) -> Self {
        let mut state = AppState::new();
        state.source = source;
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.state.toggle_marathon();
                let label = if self.state.show_marathon { "on" } else { "off" };
                self.state.push_log(format!("[INFO] Marathon matches {label}"));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reload(true);
            }
            KeyCode::Enter => self.announce_link(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn announce_link(&mut self) {
        let Some((track, sub)) = self.state.selected_entry() else {
            self.state.push_log("[INFO] No subtrack selected");
            return;
        };
        let link = details_link(&self.state.handle, track.track, &sub.name);
        self.state.push_log(format!("[INFO] Details: {link}"));
    }

    fn load_initial(&mut self) {
        match self.state.source.clone() {
            StatsSource::Sample => {
                self.state.set_stats(sample_member_stats(), None);
                self.state.push_log("[INFO] Showing sample stats");
            }
            StatsSource::File(_) => {
                if !self.reload(false) {
                    self.state.set_stats(sample_member_stats(), None);
                    self.state.push_log("[INFO] Falling back to sample stats");
                }
            }
        }
    }

    fn reload(&mut self, announce: bool) -> bool {
        let StatsSource::File(path) = self.state.source.clone() else {
            if announce {
                self.state.push_log("[INFO] No stats file to reload");
            }
            return false;
        };
        match load_member_stats(&path) {
            Ok((stats, modified)) => {
                self.state.set_stats(stats, modified);
                self.state
                    .push_log(format!("[INFO] Loaded stats from {}", path.display()));
                true
            }
            Err(err) => {
                self.state.push_log(format!("[WARN] Stats load error: {err}"));
                false
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let source = stats_source();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(source);
    app.load_initial();
    let res = run_app(&mut terminal, &mut app);

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

fn stats_source() -> StatsSource {
    let from_args = std::env::args().nth(1);
    let from_env = std::env::var("STATS_FILE")
        .ok()
        .filter(|val| !val.trim().is_empty());
    match from_args.or(from_env) {
        Some(path) => StatsSource::File(PathBuf::from(path)),
        None => StatsSource::Sample,
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
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
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_tracks(frame, chunks[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text()).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let source = match &state.source {
        StatsSource::Sample => "sample".to_string(),
        StatsSource::File(path) => path.display().to_string(),
    };
    let marathon = if state.show_marathon { "on" } else { "off" };
    let line1 = format!(
        "  /\\  MEMBER ACTIVITY | {} | {} | MM: {}",
        state.handle, source, marathon
    );
    let line2 = format!(" /__\\  Updated: {}", format_loaded_at(state.loaded_at));
    format!("{line1}\n{line2}")
}

fn footer_text() -> &'static str {
    "j/k/↑/↓ Move | Enter Link | m Marathon | r Reload | ? Help | q Quit"
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_tracks(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.active_tracks.is_empty() {
        let empty =
            Paragraph::new("No active tracks").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let mut constraints: Vec<Constraint> = state
        .active_tracks
        .iter()
        .map(|track| Constraint::Length(track.sub_tracks.len() as u16 + 2))
        .collect();
    constraints.push(Constraint::Min(0));

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut row_offset = 0usize;
    for (idx, track) in state.active_tracks.iter().enumerate() {
        render_track_section(frame, sections[idx], state, idx, row_offset);
        row_offset += track.sub_tracks.len();
    }
}

fn render_track_section(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    track_idx: usize,
    row_offset: usize,
) {
    let track = &state.active_tracks[track_idx];
    let title = format!("{} ACTIVITY", track_label(track.track));
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    for (sub_idx, sub) in track.sub_tracks.iter().enumerate() {
        if sub_idx as u16 >= inner.height {
            break;
        }
        let row_area = Rect {
            x: inner.x,
            y: inner.y + sub_idx as u16,
            width: inner.width,
            height: 1,
        };

        let selected = row_offset + sub_idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(8),
                Constraint::Length(12),
            ])
            .split(row_area);

        let figure = subtrack_figure(sub, state.show_marathon);
        let mut figure_style = Style::default().fg(figure.color());
        if selected {
            figure_style = figure_style.bg(Color::DarkGray);
        }

        let name = Paragraph::new(subtrack_label(&sub.name)).style(row_style);
        frame.render_widget(name, cols[0]);
        let value = Paragraph::new(figure.value_text())
            .style(figure_style.add_modifier(Modifier::BOLD));
        frame.render_widget(value, cols[1]);
        let tag = Paragraph::new(figure.tag()).style(row_style);
        frame.render_widget(tag, cols[2]);
    }
}

fn format_loaded_at(loaded_at: Option<SystemTime>) -> String {
    match loaded_at {
        Some(time) => {
            let local: DateTime<Local> = time.into();
            local.format("%Y-%m-%d %H:%M").to_string()
        }
        None => "-".to_string(),
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Member Activity - Help",
        "",
        "  j/k or ↑/↓   Move between subtracks",
        "  Enter        Print details link",
        "  m            Toggle marathon matches",
        "  r            Reload stats file",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Env: MEMBER_HANDLE, STATS_FILE, SHOW_MARATHON",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
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
