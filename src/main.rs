//! Terminal Meow Letters runner (default binary).
//!
//! A line-oriented driver: each line on stdin is one command, and the board is
//! reprinted after every command. Wall time between commands drives the
//! countdown. Pass `new` to ignore the saved session.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use meow_letters::config::Config;
use meow_letters::session::{advance, resume_or_start};
use meow_letters::core::GameState;
use meow_letters::store::{HighscoreLedger, SettingsStore, SnapshotStore};
use meow_letters::types::{GameAction, SessionEvent};
use meow_letters::view::GameView;

const HELP: &str = "\
commands:
  x y       select the letter in column x, row y
  r         resolve the current chain now
  n         start a new game
  name NAME set the name used for highscores
  scores    show the highscore table
  q         save and quit";

struct Stores {
    snapshots: SnapshotStore,
    settings: SettingsStore,
    config: Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    let fresh = std::env::args().skip(1).any(|arg| arg == "new");
    info!(data_dir = %config.data_dir.display(), seed = config.game.seed, "starting");

    let stores = Stores {
        snapshots: SnapshotStore::new(config.snapshot_path()),
        settings: SettingsStore::new(config.settings_path()),
        config,
    };

    let mut game = GameState::new(stores.config.game).context("invalid game configuration")?;
    if resume_or_start(&mut game, &stores.snapshots, fresh)? {
        info!(score = game.score(), level = game.level(), "resumed saved session");
    }
    run(&mut game, &stores)
}

fn run(game: &mut GameState, stores: &Stores) -> Result<()> {
    let view = GameView::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{HELP}\n");
    print_game(&view, game, &mut stdout)?;

    let mut last_input = Instant::now();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let elapsed = last_input.elapsed();
        last_input = Instant::now();

        let mut events = advance(game, elapsed)?;
        let command = line.trim();

        match command {
            "" => {}
            "q" | "quit" | "exit" => break,
            "h" | "help" => println!("{HELP}"),
            "scores" => print_highscores(&view, stores)?,
            _ if command.starts_with("name ") => {
                let username = command["name ".len()..].trim();
                stores
                    .settings
                    .save_username(username)
                    .context("failed to save username")?;
                println!("Playing as {username}.");
            }
            _ => match GameAction::from_str(command) {
                Some(action) => {
                    if let Err(e) = game.apply_action(action) {
                        println!("{e}");
                    }
                    events.extend(game.take_last_event());
                }
                None => println!("Unknown command: {command} (try 'help')"),
            },
        }

        for event in events {
            println!("{}", view.render_event(event));
            if event == SessionEvent::GameOver {
                record_game_over(&view, game, stores)?;
            }
        }
        print_game(&view, game, &mut stdout)?;
    }

    if !game.game_over() {
        stores
            .snapshots
            .save(&game.snapshot())
            .context("failed to save session")?;
    }
    Ok(())
}

fn record_game_over(view: &GameView, game: &GameState, stores: &Stores) -> Result<()> {
    let username = stores.settings.username().unwrap_or_else(|e| {
        warn!(error = %e, "could not read settings");
        meow_letters::store::DEFAULT_USERNAME.to_string()
    });

    let mut ledger = HighscoreLedger::open(stores.config.ledger_path())
        .context("failed to open highscore ledger")?;
    if ledger.qualifies(game.score())? {
        println!("New highscore for {username}: {}!", game.score());
    }
    ledger
        .insert(&username, game.score())
        .context("failed to record highscore")?;
    stores
        .snapshots
        .clear()
        .context("failed to clear saved session")?;

    println!("{}", view.render_highscores(&ledger.top_ten()?));
    Ok(())
}

fn print_highscores(view: &GameView, stores: &Stores) -> Result<()> {
    let ledger = HighscoreLedger::open(stores.config.ledger_path())
        .context("failed to open highscore ledger")?;
    println!("{}", view.render_highscores(&ledger.top_ten()?));
    Ok(())
}

fn print_game(view: &GameView, game: &GameState, out: &mut impl Write) -> Result<()> {
    write!(out, "{}", view.render_board(game))?;
    writeln!(out, "{}", view.render_status(game))?;
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}
