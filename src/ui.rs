// 🖥️ Terminal UI - one tab per dashboard page
//
// Keys: Tab/Shift-Tab pages, j/k or arrows move, Enter detail, `/` search,
// `c` cycle category, `x` clear filters, `q` quit.

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
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;

use crate::filter::ALL;
use crate::logo::{LogoCandidateList, LogoPolicy, LogoView, ResolvedLogo};
use crate::page::{Dashboard, Listing, LoadState, PageKind};
use crate::render::{CardContext, CardProps};

const PAGE_JUMP: usize = 20;

/// Resolved logos keyed by the candidate list they were resolved from.
pub type LogoCache = HashMap<LogoCandidateList, ResolvedLogo>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    pub dashboard: Dashboard,
    pub policy: LogoPolicy,
    pub logos: LogoCache,
    pub current_page: PageKind,
    pub state: TableState,
    pub show_detail: bool,
    pub input_mode: InputMode,
    pub search_input: String,
}

impl App {
    pub fn new(dashboard: Dashboard, policy: LogoPolicy) -> Self {
        let mut app = Self {
            dashboard,
            policy,
            logos: HashMap::new(),
            current_page: PageKind::AiCompanies,
            state: TableState::default(),
            show_detail: false,
            input_mode: InputMode::Normal,
            search_input: String::new(),
        };
        app.reset_selection();
        app
    }

    pub fn with_logos(mut self, logos: LogoCache) -> Self {
        self.logos = logos;
        self
    }

    pub fn listing(&self) -> &dyn Listing {
        self.dashboard.listing(self.current_page)
    }

    fn listing_mut(&mut self) -> &mut dyn Listing {
        self.dashboard.listing_mut(self.current_page)
    }

    pub fn cards(&self) -> Vec<CardProps> {
        let ctx = CardContext::new(&self.policy, &self.dashboard.firms);
        self.listing().cards(&ctx)
    }

    pub fn selected_card(&self) -> Option<CardProps> {
        let ctx = CardContext::new(&self.policy, &self.dashboard.firms);
        self.state
            .selected()
            .and_then(|i| self.listing().card_at(i, &ctx))
    }

    /// Glyph slots never resolve.
    pub fn resolved_logo(&self, logo: &LogoView) -> Option<&ResolvedLogo> {
        match logo {
            LogoView::Image(candidates) => self.logos.get(candidates),
            LogoView::Glyph(_) => None,
        }
    }

    /// Feed one key press; returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.input_mode {
            InputMode::Search => {
                match key.code {
                    KeyCode::Enter => self.input_mode = InputMode::Normal,
                    KeyCode::Esc => {
                        self.search_input.clear();
                        self.apply_search();
                        self.input_mode = InputMode::Normal;
                    }
                    KeyCode::Backspace => {
                        self.search_input.pop();
                        self.apply_search();
                    }
                    KeyCode::Char(c) => {
                        self.search_input.push(c);
                        self.apply_search();
                    }
                    _ => {}
                }
                false
            }
            InputMode::Normal => {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return true,
                    KeyCode::Enter => self.toggle_detail(),
                    KeyCode::Tab => self.next_page(),
                    KeyCode::BackTab => self.previous_page(),
                    KeyCode::Char('/') => self.input_mode = InputMode::Search,
                    KeyCode::Char('c') => self.cycle_category(),
                    KeyCode::Char('x') => self.clear_filters(),
                    KeyCode::Down | KeyCode::Char('j') => self.next(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous(),
                    KeyCode::PageDown => self.page_down(),
                    KeyCode::PageUp => self.page_up(),
                    KeyCode::Home => self.state.select(Some(0)),
                    KeyCode::End => {
                        let len = self.listing().visible_len();
                        if len > 0 {
                            self.state.select(Some(len - 1));
                        }
                    }
                    _ => {}
                }
                false
            }
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.enter_page();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.enter_page();
    }

    fn enter_page(&mut self) {
        self.search_input = self.listing().criteria().search.clone();
        self.reset_selection();
    }

    /// All → first option → ... → last option → All.
    pub fn cycle_category(&mut self) {
        let options = self.listing().category_options();
        if options.is_empty() {
            return;
        }

        let mut criteria = self.listing().criteria().clone();
        let next = match options.iter().position(|o| *o == criteria.category) {
            Some(i) if i + 1 < options.len() => options[i + 1].clone(),
            Some(_) => ALL.to_string(),
            None => options[0].clone(),
        };
        criteria.category = next;

        self.listing_mut().set_criteria(criteria);
        self.reset_selection();
    }

    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.listing_mut().clear_filters();
        self.reset_selection();
    }

    fn apply_search(&mut self) {
        let mut criteria = self.listing().criteria().clone();
        criteria.search = self.search_input.clone();
        self.listing_mut().set_criteria(criteria);
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        if self.listing().visible_len() > 0 {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn next(&mut self) {
        let len = self.listing().visible_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.listing().visible_len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.listing().visible_len();
        if len == 0 {
            return;
        }
        let i = self
            .state
            .selected()
            .map_or(0, |i| (i + PAGE_JUMP).min(len - 1));
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = self
            .state
            .selected()
            .map_or(0, |i| i.saturating_sub(PAGE_JUMP));
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Page tabs
            Constraint::Length(3), // Filters / search
            Constraint::Min(0),    // Listing
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_filters(f, chunks[1], app);

    match app.listing().state().clone() {
        LoadState::Loading => render_message(f, chunks[2], app, "Loading...", Color::DarkGray),
        LoadState::Failed(message) => render_message(
            f,
            chunks[2],
            app,
            &format!("Could not load {}: {}", app.listing().title(), message),
            Color::Red,
        ),
        LoadState::Ready if app.show_detail => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[2]);

            render_table(f, content_chunks[0], app);
            render_detail_panel(f, content_chunks[1], app);
        }
        LoadState::Ready => render_table(f, chunks[2], app),
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, kind) in PageKind::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *kind == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(kind.title(), style));
    }

    let header = Paragraph::new(Line::from(tab_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Nordic Dashboard "),
    );

    f.render_widget(header, area);
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let criteria = app.listing().criteria();
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if app.input_mode == InputMode::Search { "▏" } else { "" };

    let spans = vec![
        Span::styled(" Search: ", label),
        Span::styled(format!("{}{}", app.search_input, cursor), search_style),
        Span::raw("  |  "),
        Span::styled("Category: ", label),
        Span::raw(criteria.category.clone()),
        Span::raw("  |  "),
        Span::styled("Stage: ", label),
        Span::raw(criteria.stage.clone()),
        Span::raw("  |  "),
        Span::styled("Region: ", label),
        Span::raw(criteria.region.clone()),
    ];

    let filters = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)));

    f.render_widget(filters, area);
}

fn render_message(f: &mut Frame, area: Rect, app: &App, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", app.listing().title())),
        );
    f.render_widget(paragraph, area);
}

fn logo_cell(app: &App, card: &CardProps) -> String {
    match (&card.logo, app.resolved_logo(&card.logo)) {
        (LogoView::Glyph(glyph), _) => glyph.to_string(),
        (LogoView::Image(_), Some(ResolvedLogo::Image(r))) if !r.exhausted => "▣".to_string(),
        (LogoView::Image(_), _) => card.flag.unwrap_or("·").to_string(),
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["", "Name", "Details", "Tags"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let cards = app.cards();
    let rows: Vec<Row> = cards
        .iter()
        .map(|card| {
            Row::new(vec![
                Cell::from(logo_cell(app, card)),
                Cell::from(truncate(&card.title, 32)),
                Cell::from(truncate(&card.subtitle, 48)).style(Style::default().fg(Color::Gray)),
                Cell::from(truncate(&card.badges.join(", "), 40))
                    .style(Style::default().fg(Color::Green)),
            ])
            .height(1)
        })
        .collect();

    let title = format!(
        " {} ({}/{}) ",
        app.listing().title(),
        app.listing().visible_len(),
        app.listing().total()
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(34),
            Constraint::Min(20),
            Constraint::Length(42),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Details ");

    let Some(card) = app.selected_card() else {
        f.render_widget(Paragraph::new("Nothing selected").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut content = vec![
        Line::from(Span::styled(
            format!("  {} {}", card.flag.unwrap_or(""), card.title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {}", card.subtitle),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for (name, value) in &card.details {
        content.push(Line::from(vec![
            Span::styled(format!("  {}: ", name), label),
            Span::raw(value.clone()),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled("  LOGO", section)));
    match &card.logo {
        LogoView::Glyph(glyph) => content.push(Line::from(format!("  {} (no image)", glyph))),
        LogoView::Image(candidates) => {
            let resolved = app.resolved_logo(&card.logo);
            for (i, url) in candidates.urls().iter().enumerate() {
                let chosen = matches!(resolved, Some(ResolvedLogo::Image(r)) if r.index == i);
                let style = if chosen {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let marker = if chosen { "✓" } else { " " };
                content.push(Line::from(Span::styled(
                    format!("  {} {}. {}", marker, i + 1, url),
                    style,
                )));
            }
        }
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let detail_panel = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(block);

    f.render_widget(detail_panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.listing().visible_len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if app.input_mode == InputMode::Search {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("SEARCH", Style::default().fg(Color::Green)));
        status_spans.push(Span::raw(" type to filter, "));
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" keep, "));
        status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" cancel"));
    } else {
        if !app.listing().criteria().is_neutral() {
            status_spans.push(Span::raw(" | "));
            status_spans.push(Span::styled("Filtered", Style::default().fg(Color::Green)));
            status_spans.push(Span::raw(" ("));
            status_spans.push(Span::styled("x", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" clear)"));
        }

        for (key, text) in [
            ("Enter", " Details"),
            ("Tab", " Page"),
            ("/", " Search"),
            ("c", " Category"),
            ("↑/↓", " Nav"),
        ] {
            status_spans.push(Span::raw(" | "));
            status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(text));
        }
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

/// Cut to `max_len` characters, ending in "..." when shortened.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
