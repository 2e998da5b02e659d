use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use unicode_width::UnicodeWidthStr;

use crate::bookmarks::BookmarkStore;
use crate::layout::{self, Orientation, RenderBlock, BLOCK_SIZE};
use crate::models::Article;

// Terminal rows given to one rendered block.
const BLOCK_ROWS: u16 = 12;

/// Runs the TUI news browser over an already-fetched article list.
pub fn run_viewer(articles: Vec<Article>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let store = BookmarkStore::new().context("Failed to open bookmark store")?;
    // Bookmarks load once at startup; saves write through to both the store
    // and this in-memory list.
    let saved = store.load()?;

    let mut app = App {
        articles,
        search_term: String::new(),
        mode: Mode::Browsing,
        show_saved: false,
        saved,
        store,
        selected: 0,
        first_block: 0,
        status: None,
    };

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

#[derive(PartialEq)]
enum Mode {
    Browsing,
    Searching,
}

struct App {
    articles: Vec<Article>,
    search_term: String,
    mode: Mode,
    show_saved: bool,
    saved: Vec<Article>,
    store: BookmarkStore,
    selected: usize,
    first_block: usize,
    status: Option<String>,
}

impl App {
    fn filtered(&self) -> Vec<Article> {
        layout::filter_articles(&self.articles, &self.search_term)
    }

    fn bookmark_selected(&mut self) -> Result<()> {
        let filtered = self.filtered();
        let Some(article) = filtered.get(self.selected) else {
            return Ok(());
        };

        if self.store.save(article)? {
            self.saved.push(article.clone());
            self.status = Some(format!("Saved: {}", article.title));
        } else {
            self.status = Some(format!("Already saved: {}", article.title));
        }
        Ok(())
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Read events (blocking)
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if app.mode == Mode::Searching {
                match key.code {
                    KeyCode::Enter | KeyCode::Esc => {
                        app.mode = Mode::Browsing;
                    }
                    KeyCode::Backspace => {
                        app.search_term.pop();
                        app.selected = 0;
                        app.first_block = 0;
                    }
                    KeyCode::Char(c) => {
                        app.search_term.push(c);
                        app.selected = 0;
                        app.first_block = 0;
                    }
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    return Ok(());
                }
                KeyCode::Char('/') => {
                    app.mode = Mode::Searching;
                    app.status = None;
                }
                KeyCode::Char('s') => {
                    app.show_saved = !app.show_saved;
                    app.status = None;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    let count = app.filtered().len();
                    if count > 0 && app.selected + 1 < count {
                        app.selected += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    app.selected = app.selected.saturating_sub(1);
                }
                KeyCode::Enter | KeyCode::Char('b') => {
                    app.bookmark_selected()?;
                }
                KeyCode::Char('o') => {
                    let filtered = app.filtered();
                    if let Some(article) = filtered.get(app.selected) {
                        open_in_browser(&article.url);
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    render_search_bar(f, chunks[0], app);
    if app.show_saved {
        render_saved(f, chunks[1], app);
    } else {
        render_blocks(f, chunks[1], app);
    }
    render_footer(f, chunks[2], app);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if app.mode == Mode::Searching {
        (
            format!("{}█", app.search_term),
            Style::default().fg(Color::Yellow),
        )
    } else if app.search_term.is_empty() {
        (
            "Press / to search news...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.search_term.clone(), Style::default())
    };

    let bar = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Search ")
            .title_alignment(Alignment::Left),
    );

    f.render_widget(bar, area);
}

fn render_blocks(f: &mut Frame, area: Rect, app: &mut App) {
    let filtered = app.filtered();

    if filtered.is_empty() {
        let placeholder = Paragraph::new("No articles found.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Articles "));
        f.render_widget(placeholder, area);
        return;
    }

    let blocks = layout::segment(&filtered);

    // Keep the block holding the selection on screen.
    let blocks_fit = ((area.height / BLOCK_ROWS) as usize).max(1);
    let selected_block = app.selected / BLOCK_SIZE;
    if selected_block < app.first_block {
        app.first_block = selected_block;
    } else if selected_block >= app.first_block + blocks_fit {
        app.first_block = selected_block + 1 - blocks_fit;
    }

    let visible = blocks
        .iter()
        .skip(app.first_block)
        .take(blocks_fit)
        .collect::<Vec<_>>();

    let constraints: Vec<Constraint> = visible
        .iter()
        .map(|_| Constraint::Length(BLOCK_ROWS))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (block, row) in visible.iter().zip(rows.iter()) {
        render_block(f, *row, block, app.selected);
    }
}

/// Renders one zigzag block: the featured panel on the block's orientation
/// side, the secondary 2x2 grid on the other.
fn render_block(f: &mut Frame, area: Rect, block: &RenderBlock<'_>, selected: usize) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (featured_area, grid_area) = match block.orientation() {
        Orientation::Left => (halves[0], halves[1]),
        Orientation::Right => (halves[1], halves[0]),
    };

    render_featured(f, featured_area, block.featured, block.start_index == selected);

    let grid_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(grid_area);

    for (i, article) in block.secondary.iter().enumerate() {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(grid_rows[i / 2]);

        let cell = row[i % 2];
        let index = block.start_index + 1 + i;
        render_cell(f, cell, article, block.cell_swapped(i), index == selected);
    }
}

fn render_featured(f: &mut Frame, area: Rect, article: &Article, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let width = area.width.saturating_sub(2).max(10) as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            truncate(&article.title, width),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} | {}", article.source_name, article.published_display()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for wrapped in textwrap::wrap(&article.description, width).into_iter().take(5) {
        lines.push(Line::from(wrapped.into_owned()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        truncate(article.image_url_or_placeholder(), width),
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Featured "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(panel, area);
}

fn render_cell(f: &mut Frame, area: Rect, article: &Article, swapped: bool, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let width = area.width.saturating_sub(2).max(10) as usize;
    let title = Line::from(Span::styled(
        truncate(&article.title, width),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let meta = Line::from(Span::styled(
        truncate(&article.published_display(), width),
        Style::default().fg(Color::DarkGray),
    ));

    // Zigzag: odd cells stack their lines in the opposite order.
    let lines = if swapped {
        vec![meta, title]
    } else {
        vec![title, meta]
    };

    let cell = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));

    f.render_widget(cell, area);
}

fn render_saved(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.saved.is_empty() {
        vec![Line::from("No saved articles.")]
    } else {
        let width = area.width.saturating_sub(2).max(10) as usize;
        app.saved
            .iter()
            .flat_map(|article| {
                vec![
                    Line::from(Span::styled(
                        truncate(&article.title, width),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        truncate(&article.url, width),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(""),
                ]
            })
            .collect()
    };

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Saved Articles ")
            .title_alignment(Alignment::Center),
    );

    f.render_widget(list, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = if let Some(ref status) = app.status {
        Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(vec![
            Span::styled(" q ", Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::raw(" Quit  "),
            Span::styled(" / ", Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::raw(" Search  "),
            Span::styled(" j/k ", Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::raw(" Select  "),
            Span::styled(" Enter ", Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::raw(" Save  "),
            Span::styled(" s ", Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::raw(" Saved View  "),
            Span::styled(" o ", Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::raw(" Open  "),
        ])
    };

    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn open_in_browser(url: &str) {
    let open_cmd = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "linux") {
        "xdg-open"
    } else {
        return;
    };

    let _ = std::process::Command::new(open_cmd).arg(url).spawn();
}
