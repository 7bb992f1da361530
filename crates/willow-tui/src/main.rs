use ratatui::{backend::CrosstermBackend, Terminal};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;

use willow_config::clear_account_data;
use willow_core::{FileKv, KvStore, MemoryKv};

mod app;
mod ui;

use app::{App, InputMode};

/// Willow: an offline chat-assistant demo with canned replies
#[derive(Parser, Debug)]
#[command(name = "willow", version)]
struct Args {
    /// Data directory for persisted state (default: ~/.willow)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Milliseconds between streamed tokens
    #[arg(long, default_value_t = 30)]
    interval_ms: u64,

    /// Keep everything in memory: seed data only, nothing written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Wipe stored account data (profile, settings, subscription) on start
    #[arg(long)]
    reset_account: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let kv: Arc<dyn KvStore> = if args.ephemeral {
        Arc::new(MemoryKv::new())
    } else {
        let dir = args
            .data_dir
            .clone()
            .or_else(willow_config::willow_dir)
            .unwrap_or_else(|| PathBuf::from("./willow-data"));
        info!("persisting state under {dir:?}");
        Arc::new(FileKv::open(dir)?)
    };

    if args.reset_account {
        clear_account_data(&*kv);
    }

    let mut app = App::new(kv, Duration::from_millis(args.interval_ms.max(1)));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut last_tick = tokio::time::Instant::now();
    let tick_rate = tokio::time::Duration::from_millis(50);

    loop {
        // Draw UI
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| tokio::time::Duration::from_secs(0));

        // Handle events
        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if handle_key_event(app, key) {
                    return Ok(());
                }
            }
        }

        // Drain the typewriter stream into the transient reply
        app.process_stream();

        // Update on tick
        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = tokio::time::Instant::now();
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key);
            false
        }
        InputMode::Rename => {
            handle_rename_key(app, key);
            false
        }
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            return true; // Quit
        }
        KeyCode::Char('n') if ctrl => app.new_chat(),
        KeyCode::Char('s') if ctrl => app.stop_generation(),
        KeyCode::Char('r') if ctrl => app.regenerate(),
        KeyCode::Char('e') if ctrl => app.edit_last_user_message(),
        KeyCode::Char('f') if ctrl => app.toggle_favorite_active(),
        KeyCode::Char('x') if ctrl => app.delete_active_conversation(),
        KeyCode::Char('l') if ctrl => app.clear_all(),
        KeyCode::Char('t') if ctrl => app.toggle_theme(),
        KeyCode::F(2) => app.enter_rename_mode(),
        KeyCode::Char('/') if app.input.is_empty() => {
            app.mode = InputMode::Search;
        }
        KeyCode::Tab if app.show_suggestions() => app.cycle_suggestion(),
        KeyCode::Enter => app.send_message(),
        KeyCode::Esc => {
            app.input.clear();
            app.editing_message = None;
        }
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Up => app.select_sibling(-1),
        KeyCode::Down => app.select_sibling(1),
        KeyCode::PageUp => app.scroll_up(5),
        KeyCode::PageDown => app.scroll_down(5),
        _ => {}
    }
    false
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.store.set_search_query("");
            app.mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            let mut query = app.store.search_query().to_string();
            query.pop();
            app.store.set_search_query(query);
        }
        KeyCode::Char(c) => {
            let mut query = app.store.search_query().to_string();
            query.push(c);
            app.store.set_search_query(query);
        }
        _ => {}
    }
}

fn handle_rename_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.rename_buffer.clear();
            app.mode = InputMode::Normal;
        }
        KeyCode::Enter => app.commit_rename(),
        KeyCode::Backspace => {
            app.rename_buffer.pop();
        }
        KeyCode::Char(c) => app.rename_buffer.push(c),
        _ => {}
    }
}
