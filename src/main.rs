use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::fs::OpenOptions;
use std::path::Path;
use std::{io, time::Duration};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod constants;
mod error;
mod gateway;
mod transactions;
mod ui;
mod utils;
mod wallet;

use app::{App, InputMode};
use config::{Cli, TipJarConfig};
use constants::UI_POLL_INTERVAL_MILLIS;
use gateway::{GasConfig, SponsoredExecutor};
use wallet::Wallet;

// The terminal owns stdout, so logs go to a file
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Refuse to start against placeholder ids
    let config = match TipJarConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    init_tracing(&cli.log_file)?;
    info!(network = config.network.name(), package = %config.package_id, tip_jar = %config.tip_jar_id, "starting tip jar client");

    let (sui_client, active_address) = utils::setup_for_read(&config.rpc_url, &config.client_config_path)
        .await
        .context("failed to connect to the Sui network")?;
    let sui_client = Arc::new(sui_client);

    let ledger = Arc::new(Wallet::new(Arc::clone(&sui_client)));
    let executor = SponsoredExecutor::new(
        Arc::clone(&sui_client),
        &config.keystore_path,
        config.sponsor.unwrap_or(active_address),
        GasConfig { budget: config.gas_budget, ..GasConfig::default() },
    )?;

    let app = Arc::new(Mutex::new(App::new(
        config,
        ledger,
        Arc::new(executor),
        Some(active_address),
    )));

    // Initial read on mount
    tokio::spawn(App::request_refresh(Arc::clone(&app)));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, Arc::clone(&app)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "terminal loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
) -> Result<()> {
    loop {
        {
            let app_guard = app.lock().await;
            terminal.draw(|f| ui::draw(f, &app_guard))?;
        }

        if !crossterm_event::poll(Duration::from_millis(UI_POLL_INTERVAL_MILLIS))? {
            continue;
        }
        let Event::Key(key) = crossterm_event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let mut app_guard = app.lock().await;
        let mode = app_guard.input_mode;

        if app_guard.is_editing() {
            match key.code {
                KeyCode::Esc => app_guard.stop_editing(),
                KeyCode::Backspace => app_guard.pop_input_char(),
                KeyCode::Char(c) => app_guard.push_input_char(c),
                // claim `loading` now so a buffered second Enter is refused
                KeyCode::Enter => match mode {
                    InputMode::EditingTip if app_guard.can_send_tip() && app_guard.try_begin_action() => {
                        tokio::spawn(App::send_tip(Arc::clone(&app)));
                    }
                    InputMode::EditingOwner if app_guard.can_change_owner() && app_guard.try_begin_action() => {
                        tokio::spawn(App::change_owner(Arc::clone(&app)));
                    }
                    _ => {}
                },
                _ => {}
            }
            continue;
        }

        if app_guard.is_confirming_reset {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app_guard.cancel_reset_confirm();
                    if app_guard.try_begin_action() {
                        tokio::spawn(App::reset_stats(Arc::clone(&app)));
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app_guard.cancel_reset_confirm(),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            // action keys are ignored while a transaction is in flight
            _ if app_guard.loading => {}
            KeyCode::Char('t') => app_guard.start_editing_tip(),
            KeyCode::Char('o') => app_guard.start_editing_owner(),
            KeyCode::Char('x') => app_guard.start_reset_confirm(),
            KeyCode::Char('r') => {
                app_guard.clear_error();
                tokio::spawn(App::request_refresh(Arc::clone(&app)));
            }
            _ => app_guard.clear_error(),
        }
    }
}
