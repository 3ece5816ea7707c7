//! reposcout — project search and analysis TUI.
//!
//! Entry point for the `reposcout` binary. Wires together the terminal
//! lifecycle (`tui`), unified event bus (`event`), fetch layer (`fetch`),
//! rendering (`ui`), theme system (`theme`), and the wire types and
//! race-guarded detail machine from `reposcout-core`.
//!
//! # Startup sequence (order matters)
//!
//! 1. Load config from XDG config — read-only, safe before terminal init.
//! 2. Initialise tracing to a log file. The TUI owns the terminal, so logs
//!    never go to stdout/stderr while it runs.
//! 3. `install_panic_hook()` — installed first so it is the innermost hook.
//!    Restores the terminal before the panic message prints.
//! 4. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the event loop.
//! 5. `init_tui()` — enters alternate screen and enables raw mode.
//! 6. Create the event channel, spawn the background event task, and build
//!    the `FetchHandle` so keybindings can dispatch requests.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (normal quit, 'q'
//! key, SIGTERM, or channel close). Inside the loop, errors propagate out via
//! `break` so `restore_tui()` is always reached. The panic hook covers
//! unexpected panics.

mod app;
mod event;
mod fetch;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use anyhow::Context;
use serde::Deserialize;
use url::Url;

/// User configuration loaded from `~/.config/reposcout/config.toml`.
///
/// Every field is optional; missing ones fall back to defaults so a partial
/// (or absent) config file never prevents startup.
#[derive(Debug, Default, Deserialize)]
struct Config {
    theme: Option<String>,
    server_url: Option<String>,
}

/// Returns the path to the reposcout config file.
///
/// Prefers `$XDG_CONFIG_HOME/reposcout/config.toml`; falls back to
/// `~/.config/reposcout/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("reposcout").join("config.toml")
}

/// Loads the config file, degrading to defaults on any failure.
///
/// Never panics — a missing file is the common case and a malformed one is a
/// soft failure printed to stderr before the terminal is taken over.
fn load_config() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("reposcout: config parse error in {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Initialises tracing to `.reposcout/log`, filtered by `RUST_LOG`.
///
/// File-based because the TUI owns the terminal. Defaults to `info` for this
/// crate and `warn` elsewhere when `RUST_LOG` is unset.
fn init_tracing() -> anyhow::Result<()> {
    std::fs::create_dir_all(".reposcout")?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(".reposcout/log")?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,reposcout=info,reposcout_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Step 0: load config and resolve the theme — read-only, safe before
    // terminal init.
    let config = load_config();
    let theme = theme::Theme::from_name(config.theme.as_deref().unwrap_or("catppuccin-mocha"));
    let server_url = config
        .server_url
        .as_deref()
        .unwrap_or("http://127.0.0.1:5000")
        .to_owned();
    let base = Url::parse(&server_url)
        .with_context(|| format!("invalid server_url in config: {}", server_url))?;

    init_tracing()?;
    tracing::info!(server = %base, "starting reposcout");

    // Step 1: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: event channel, background event task, and fetch handle.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let client = reposcout_core::ApiClient::new(base);
    let mut state = app::AppState::default();
    state.fetch = Some(fetch::FetchHandle::new(client, handler.tx.clone()));

    // Event loop — exits only via `break`, never via `?`.
    // This guarantees `restore_tui()` is always reached after the loop.
    let mut loop_result: anyhow::Result<()> = Ok(());
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive. Without this
            // arm, a quiescent terminal blocks forever in rx.recv() and the
            // SIGTERM flag is never polled.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        // Exactly one draw() call per Render event.
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            loop_result = Err(e.into());
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if ui::keybindings::handle_key(key, &mut state)
                            == ui::keybindings::KeyAction::Quit
                        {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        if ui::keybindings::handle_mouse(mouse, &mut state)
                            == ui::keybindings::KeyAction::Quit
                        {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Tick) => {
                        state.on_tick();
                    }
                    Some(event::AppEvent::SearchDone(payload)) => {
                        state.apply_search_payload(*payload);
                    }
                    Some(event::AppEvent::DetailDone(payload)) => {
                        state.apply_detail_payload(*payload, &theme);
                    }
                    Some(event::AppEvent::ProcessDone(payload)) => {
                        state.apply_process_payload(*payload);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // Handled automatically on the next Render:
                        // frame.area() returns the new terminal size.
                    }
                    Some(event::AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, not just on the
                // heartbeat, so quit latency is at most one event cycle.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop. Covers
    // normal quit, 'q' key, SIGTERM, and channel close. The panic hook
    // handles the panic path separately.
    tui::restore_tui()?;
    loop_result
}
