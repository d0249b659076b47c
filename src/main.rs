mod app;
mod catalog;
mod config;
mod engine;
mod event;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen};
use config::Config;
use engine::Direction;
use event::{AppEvent, EventHandler};
use ui::components::card_grid::{CardGrid, CardList};
use ui::components::detail_view::DetailView;
use ui::components::pager::PagerDots;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "cardwalk", version, about = "Terminal catalog browser with paged card navigation")]
struct Cli {
    #[arg(short, long, help = "Catalog JSON file (defaults to the bundled catalog)")]
    catalog: Option<PathBuf>,

    #[arg(short, long, help = "Open this catalog entry directly (deep link)")]
    open: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme_name) = cli.theme {
        config.theme = theme_name;
    }

    let (width, _) = crossterm::terminal::size().unwrap_or((100, 30));
    let mut app = App::new(config, width, cli.open);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    catalog::loader::spawn_load(cli.catalog, events.sender());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(w, _) => app.set_viewport(w),
            AppEvent::CatalogLoaded(result) => app.on_catalog_loaded(result),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Loading => handle_loading_key(app, key),
        AppScreen::Browse => handle_browse_key(app, key),
        AppScreen::Detail => handle_detail_key(app, key),
    }
}

fn handle_loading_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Enter => {
            // Surfaces the not-loaded notice
            app.activate();
        }
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_focus(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_focus(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => app.move_focus(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_focus(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),
        KeyCode::PageDown | KeyCode::Char('n') => app.page_scroll(true),
        KeyCode::PageUp | KeyCode::Char('p') => app.page_scroll(false),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_focus(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_focus(Direction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Loading => render_loading(frame, app),
        AppScreen::Browse => render_browse(frame, app),
        AppScreen::Detail => render_detail(frame, app),
    }
}

fn render_loading(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(50, 30, area);
    let lines = match &app.load_error {
        Some(message) => vec![
            Line::from(Span::styled(
                "Catalog failed to load",
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[q] Quit",
                Style::default().fg(colors.dim()),
            )),
        ],
        None => vec![
            Line::from(Span::styled(
                "Loading catalog…",
                Style::default().fg(colors.fg()),
            )),
        ],
    };

    let block = Block::bordered().border_style(Style::default().fg(colors.border()));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, centered);
}

fn render_browse(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let layout = AppLayout::new(area);

    let Some(engine) = app.engine.as_mut() else {
        return;
    };

    render_header(frame, &engine.breadcrumb(), app.theme, layout.header);

    if engine.mode().is_paged() {
        let visual = app.pager.visual();
        let slots = engine.page_slots(visual.page_id);
        let model = engine.page_model();
        let focus = engine.focus_index();
        let focus_row = if visual.offset == 0.0
            && model.content_range(visual.page_id).contains(&focus)
        {
            Some(focus % model.per_page)
        } else {
            None
        };
        let grid = CardGrid::new(&slots, focus_row, app.theme)
            .slide(visual.offset, visual.forward);
        frame.render_widget(grid, layout.main);
        frame.render_widget(PagerDots::new(&app.pager, app.theme), layout.pager);
    } else {
        let slots = engine.current_slots();
        let list = CardList::new(&slots, engine.focus_index(), app.theme);
        frame.render_widget(list, layout.main);
    }

    let hints = " [↑↓←→] Move  [Enter] Open  [Esc] Back  [PgUp/PgDn] Flip page  [q] Quit ";
    render_footer(frame, app, hints, layout.footer);
}

fn render_detail(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let layout = AppLayout::new(area);

    let title = app
        .engine
        .as_mut()
        .map(|e| e.breadcrumb())
        .unwrap_or_default();
    render_header(frame, &title, app.theme, layout.header);

    if let Some(seq) = app.detail.as_ref() {
        let leaf_title = app
            .engine
            .as_ref()
            .and_then(|e| e.tree().find_by_id(seq.leaf_id()))
            .map(|node| node.title().to_string())
            .unwrap_or_else(|| seq.leaf_id().to_string());
        let view = DetailView::new(&leaf_title, seq, app.theme);
        frame.render_widget(view, layout.main);
    }

    let hints = " [↑↓] Move  [Enter] Read on / open link  [Esc] Back  [q] Quit ";
    render_footer(frame, app, hints, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, breadcrumb: &str, theme: &ui::theme::Theme, area: ratatui::layout::Rect) {
    let colors = &theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " cardwalk ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {breadcrumb}"),
            Style::default().fg(colors.dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &str, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {} ", notice.text),
            Style::default().fg(if notice.is_error {
                colors.error()
            } else {
                colors.warning()
            }),
        )),
        None => Line::from(Span::styled(hints.to_string(), Style::default().fg(colors.dim()))),
    };
    Paragraph::new(line).render(area, frame.buffer_mut());
}
