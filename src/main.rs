//! STACKFALL - a falling-block puzzle game for the terminal

mod collision;
mod controller;
mod game;
mod grid;
mod input;
mod line_clear;
mod piece;
mod randomizer;
mod score;
mod settings;
mod tetromino;
mod timer;
mod ui;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::Game;
use input::{KeyAction, KeyBindings};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the stackfall temp directory, creating it if needed
fn stackfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("stackfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Setup tracing to a log file; the terminal is busy drawing the game
    let log_dir = stackfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stackfall=debug".parse().expect("static directive")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "STACKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    match &result {
        Ok(game) => {
            println!("\nThanks for playing STACKFALL!");
            println!("Final Score: {}", game.score.points);
            println!(
                "Level: {} | Lines: {} | Pieces: {}",
                game.score.level, game.score.lines, game.score.pieces
            );
        }
        Err(e) => {
            tracing::error!("session aborted: {}", e);
        }
    }

    result.map(|_| ())
}

/// Drive the session until the player quits; returns the last game played
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Game> {
    let bindings = KeyBindings::from_settings(settings);
    let config = settings.game_config();
    let mut game = Game::new(&config, Instant::now());

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game.view(), settings))?;

        // Wait for input no longer than the next frame or gravity tick
        let timeout = game
            .time_until_tick(Instant::now())
            .map_or(FRAME_DURATION, |until_tick| until_tick.min(FRAME_DURATION));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match bindings.map(key) {
                    Some(KeyAction::Quit) => return Ok(game),
                    Some(KeyAction::Restart) if game.is_over() => {
                        tracing::info!("restarting after game over");
                        game = Game::new(&config, Instant::now());
                    }
                    Some(KeyAction::Game(command)) => {
                        game.handle_input(command, Instant::now())
                            .map_err(io::Error::other)?;
                    }
                    // Unbound keys and restart mid-game do nothing
                    _ => {}
                }
            }
        }

        game.update(Instant::now()).map_err(io::Error::other)?;
    }
}
