//! Session plumbing shared by drivers: picking up a saved game and running
//! the countdown over wall-clock time.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::core::GameState;
use crate::store::SnapshotStore;
use crate::types::{SessionEvent, TICK_MS};

/// Resume the saved session unless `fresh`, otherwise start a new game
///
/// A resumed session is cleared from the store right away; the driver saves
/// it again on a clean exit. Returns true when a saved session was resumed.
pub fn resume_or_start(
    game: &mut GameState,
    snapshots: &SnapshotStore,
    fresh: bool,
) -> Result<bool> {
    if !fresh {
        match snapshots.restore() {
            Ok(Some(snapshot)) => match game.resume(&snapshot) {
                Ok(()) => {
                    if let Err(e) = snapshots.clear() {
                        warn!(error = %e, "could not clear saved session");
                    }
                    return Ok(true);
                }
                Err(e) => warn!(error = %e, "saved session does not fit this board"),
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not read saved session"),
        }
    }
    game.start().context("failed to start a new game")?;
    Ok(false)
}

/// Run the countdown over `elapsed` in [`TICK_MS`] steps, collecting the
/// event of every cycle the countdown forces.
pub fn advance(game: &mut GameState, elapsed: Duration) -> Result<Vec<SessionEvent>> {
    let mut left = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
    let mut events = Vec::new();

    while left > 0 && game.timer().is_running() && !game.game_over() {
        let step = left.min(TICK_MS);
        left -= step;
        if game.tick(step)? {
            events.extend(game.take_last_event());
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, SessionSnapshot, Toggle};
    use crate::types::{Symbol, ROUND_MS};

    fn snapshot(letters: &str, timer: f64) -> SessionSnapshot {
        let mut grid = vec![vec![None; 5]; 5];
        for (i, c) in letters.chars().enumerate() {
            grid[i / 5][i % 5] = Symbol::from_char(c);
        }
        SessionSnapshot {
            level: 1,
            score: 0,
            timer,
            grid,
        }
    }

    fn store() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("state.json"));
        (dir, store)
    }

    #[test]
    fn test_resume_clears_saved_session() {
        let (_dir, store) = store();
        store.save(&snapshot("DEFQ", 6.0)).unwrap();

        let mut game = GameState::new(GameConfig::default()).unwrap();
        assert!(resume_or_start(&mut game, &store, false).unwrap());
        assert_eq!(game.board().token_count(), 4);
        assert!(store.is_empty());
    }

    #[test]
    fn test_fresh_ignores_saved_session() {
        let (_dir, store) = store();
        store.save(&snapshot("DEFQ", 6.0)).unwrap();

        let mut game = GameState::new(GameConfig::default()).unwrap();
        assert!(!resume_or_start(&mut game, &store, true).unwrap());
        assert!(game.started());
        assert!(!store.is_empty());
    }

    #[test]
    fn test_unfit_session_starts_new_game() {
        let (_dir, store) = store();
        let mut small = snapshot("", 6.0);
        small.grid = vec![vec![None; 3]; 3];
        store.save(&small).unwrap();

        let mut game = GameState::new(GameConfig::default()).unwrap();
        assert!(!resume_or_start(&mut game, &store, false).unwrap());
        assert!(game.started());
    }

    #[test]
    fn test_advance_forces_cycle_after_penalty_empties_timer() {
        let (_dir, store) = store();
        store.save(&snapshot("ACQ", 0.5)).unwrap();
        let mut game = GameState::new(GameConfig::default()).unwrap();
        resume_or_start(&mut game, &store, false).unwrap();

        game.select(0, 0).unwrap();
        assert_eq!(game.select(1, 0).unwrap(), Toggle::Broken);
        assert_eq!(game.timer().remaining_ms(), 0);

        let events = advance(&mut game, Duration::from_millis(100)).unwrap();
        assert_eq!(events, vec![SessionEvent::TimerExpired]);
        assert_eq!(game.timer().remaining_ms(), ROUND_MS);
    }

    #[test]
    fn test_advance_over_several_rounds() {
        let mut game = GameState::new(GameConfig::default()).unwrap();
        game.start().unwrap();

        let elapsed = Duration::from_millis(u64::from(ROUND_MS) * 2 + 50);
        let events = advance(&mut game, elapsed).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| *e == SessionEvent::TimerExpired));
        assert_eq!(game.timer().remaining_ms(), ROUND_MS - 50);
    }
}
