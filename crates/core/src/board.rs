//! Board module - manages the letter grid
//!
//! The board is an N x N grid where each cell is empty or holds one [`Token`].
//! Cells are stored in a flat vector, row-major (`y * size + x`), with
//! coordinates `(x, y)` where `x` runs left to right and `y` top to bottom.
//!
//! Besides placement, the board owns the replenishment rules that keep the
//! game solvable: after every cycle at least one run of the current
//! replenishment length is reachable with tokens already on the board.

use tracing::{debug, warn};

use crate::alphabet::{adjacent_run, any_adjacent, next_run, random_symbol, Run};
use crate::chain::Chain;
use crate::error::{CoreError, Result};
use crate::rng::SimpleRng;
use crate::token::{BySymbol, Token, TokenId};
use crate::types::{Symbol, ALPHABET_LEN, MAX_GRID_SIZE, MIN_GRID_SIZE, MIN_RUN_LEN, MIN_SETUP_TOKENS};

/// Result of toggling a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The cell was empty; nothing changed.
    Empty,
    /// The token was appended and the chain is still a run.
    Selected,
    /// The token was already chained; it and `removed - 1` later links were
    /// rolled back.
    Deselected { removed: usize },
    /// The token broke the run and the whole chain was dropped.
    Broken,
}

/// Outcome of [`Board::cycle_end`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleOutcome {
    /// Number of cells cleared from the board.
    pub cleared: usize,
    /// Symbols handed to placement during replenishment.
    pub added: Vec<Symbol>,
}

/// Number of tokens added per cycle at `level`: `(level + 1) / 2 + 1`.
pub fn replenish_quantity(level: u32) -> usize {
    let qty = (u64::from(level) + 1) / 2 + 1;
    (qty.min(ALPHABET_LEN as u64) as usize).max(MIN_RUN_LEN)
}

#[derive(Debug, Clone)]
pub struct Board {
    size: u8,
    /// Flat array of cells, row-major order (y * size + x)
    cells: Vec<Option<Token>>,
    chain: Chain,
    /// Set once a placement found no free cell.
    end: bool,
    rng: SimpleRng,
    next_id: u32,
}

impl Board {
    /// Create an empty `size` x `size` board drawing randomness from `seed`.
    pub fn new(size: u8, seed: u32) -> Result<Self> {
        Self::with_rng(size, SimpleRng::new(seed))
    }

    pub fn with_rng(size: u8, rng: SimpleRng) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(CoreError::InvalidGridSize(size as usize));
        }
        let cell_count = size as usize * size as usize;
        Ok(Self {
            size,
            cells: vec![None; cell_count],
            chain: Chain::new(),
            end: false,
            rng,
            next_id: 0,
        })
    }

    /// Rebuild a board from a row-major symbol grid (`grid[y][x]`).
    pub fn from_symbol_grid(grid: &[Vec<Option<Symbol>>], rng: SimpleRng) -> Result<Self> {
        let size = grid.len();
        if size > MAX_GRID_SIZE as usize {
            return Err(CoreError::InvalidGridSize(size));
        }
        let mut board = Self::with_rng(size as u8, rng)?;
        if grid.iter().any(|row| row.len() != size) {
            return Err(CoreError::GridMismatch { expected: size });
        }
        for (y, row) in grid.iter().enumerate() {
            for (x, symbol) in row.iter().enumerate() {
                board.set(x as u8, y as u8, *symbol);
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: u8, y: u8) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y as usize * self.size as usize + x as usize)
    }

    fn coords(&self, index: usize) -> (u8, u8) {
        let size = self.size as usize;
        ((index % size) as u8, (index / size) as u8)
    }

    fn new_token(&mut self, symbol: Symbol) -> Token {
        let id = TokenId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Token::new(id, symbol)
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: u8, y: u8) -> Option<Option<&Token>> {
        self.index(x, y).map(|idx| self.cells[idx].as_ref())
    }

    /// Put a fresh token with `symbol` (or nothing) at (x, y)
    /// Returns false if out of bounds
    ///
    /// A token replaced while chained stays in the chain until the next
    /// clear; callers place into free cells.
    pub fn set(&mut self, x: u8, y: u8, symbol: Option<Symbol>) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        let token = symbol.map(|s| self.new_token(s));
        self.cells[idx] = token;
        true
    }

    pub fn is_occupied(&self, x: u8, y: u8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a forced placement ran out of free cells.
    pub fn is_end(&self) -> bool {
        self.end
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Iterate over occupied cells as `(x, y, token)`.
    pub fn tokens(&self) -> impl Iterator<Item = (u8, u8, &Token)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|t| {
                let (x, y) = self.coords(i);
                (x, y, t)
            })
        })
    }

    pub fn token_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn free_count(&self) -> usize {
        self.cells.len() - self.token_count()
    }

    pub fn has_symbol(&self, symbol: Symbol) -> bool {
        self.cells.iter().flatten().any(|t| t.symbol() == symbol)
    }

    /// Presence table indexed by alphabet position.
    fn present_symbols(&self) -> [bool; ALPHABET_LEN] {
        let mut present = [false; ALPHABET_LEN];
        for token in self.cells.iter().flatten() {
            present[token.symbol().index()] = true;
        }
        present
    }

    /// Row-major symbol grid (`grid[y][x]`) for snapshots and rendering.
    pub fn symbol_grid(&self) -> Vec<Vec<Option<Symbol>>> {
        self.cells
            .chunks(self.size as usize)
            .map(|row| row.iter().map(|c| c.as_ref().map(|t| t.symbol())).collect())
            .collect()
    }

    /// Current RNG state, for reseeding a restored board.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Empty every cell, drop the chain and clear the end flag.
    pub fn clear(&mut self) {
        self.chain.clear(&mut self.cells);
        for cell in &mut self.cells {
            *cell = None;
        }
        self.end = false;
    }

    /// Fill a fresh board with `n` random tokens, at least two of which are
    /// adjacent in the alphabet.
    pub fn setup(&mut self, n: usize) -> Result<()> {
        if n < MIN_SETUP_TOKENS {
            return Err(CoreError::TooFewTokens {
                min: MIN_SETUP_TOKENS,
                got: n,
            });
        }
        self.clear();

        let mut symbols: Vec<Symbol> = (0..n - 1).map(|_| random_symbol(&mut self.rng)).collect();
        let anchor = self.rng.choose(&symbols).copied().unwrap_or_else(Symbol::first);
        symbols.push(any_adjacent(anchor, &mut self.rng)?);

        debug!(tokens = n, anchor = %anchor, "board setup");
        self.place_randomly(&symbols);
        Ok(())
    }

    /// Place each symbol in a uniformly random free cell
    ///
    /// Returns the number of tokens placed. If the grid fills up first the end
    /// flag is raised and the remaining symbols are dropped.
    pub fn place_randomly(&mut self, symbols: &[Symbol]) -> usize {
        let mut free: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect();

        for (placed, &symbol) in symbols.iter().enumerate() {
            if free.is_empty() {
                self.end = true;
                warn!(
                    discarded = symbols.len() - placed,
                    "no free cell left, board is full"
                );
                return placed;
            }
            let pick = self.rng.next_range(free.len());
            let idx = free.swap_remove(pick);
            let token = self.new_token(symbol);
            self.cells[idx] = Some(token);
        }
        symbols.len()
    }

    /// Every run of `n` symbols whose members are all on the board
    ///
    /// Runs are matched by symbol, not by token, and listed by starting
    /// symbol.
    pub fn find_runs(&self, n: usize) -> Result<Vec<Run>> {
        if n < MIN_RUN_LEN {
            return Err(CoreError::RunTooShort {
                min: MIN_RUN_LEN,
                got: n,
            });
        }

        let present = self.present_symbols();
        let mut runs = Vec::new();
        for start in Symbol::all().filter(|s| present[s.index()]) {
            let Some(successors) = next_run(start, n - 1)? else {
                continue;
            };
            if successors.iter().all(|s| present[s.index()]) {
                let mut run = Run::new();
                run.push(start);
                run.extend(successors);
                runs.push(run);
            }
        }
        Ok(runs)
    }

    /// Replenish the board for `level`, keeping a run reachable
    ///
    /// If a run of the replenishment length is already on the board the new
    /// symbols are independent draws. Otherwise a run is grown around a random
    /// token on the board and its missing members are added, plus one random
    /// symbol.
    pub fn add_random_tokens(&mut self, level: u32) -> Result<Vec<Symbol>> {
        let qty = replenish_quantity(level);
        let mut symbols = Vec::with_capacity(qty + 1);

        if !self.find_runs(qty)?.is_empty() {
            symbols.extend((0..qty).map(|_| random_symbol(&mut self.rng)));
        } else {
            let occupied: Vec<Symbol> = self.cells.iter().flatten().map(|t| t.symbol()).collect();
            match self.rng.choose(&occupied).copied() {
                Some(origin) => {
                    let run = adjacent_run(origin, qty, &mut self.rng)?;
                    symbols.extend(run.into_iter().filter(|&s| s != origin));
                }
                None => {
                    let origin = random_symbol(&mut self.rng);
                    symbols.extend(adjacent_run(origin, qty, &mut self.rng)?);
                }
            }
            symbols.push(random_symbol(&mut self.rng));
        }

        debug!(level, qty, added = symbols.len(), "replenishing board");
        self.place_randomly(&symbols);
        Ok(symbols)
    }

    /// Finish a cycle: clear a multi-token chain from the board, reset all
    /// selections and replenish for `level`
    ///
    /// A singleton chain is dropped without clearing its cell.
    pub fn cycle_end(&mut self, level: u32) -> Result<CycleOutcome> {
        let mut cleared = 0;
        if self.chain.len() > 1 {
            for cell in &mut self.cells {
                if cell.as_ref().is_some_and(|t| self.chain.contains(t.id())) {
                    *cell = None;
                    cleared += 1;
                }
            }
        }
        self.chain.clear(&mut self.cells);
        for token in self.cells.iter_mut().flatten() {
            token.unselect();
        }

        let added = self.add_random_tokens(level)?;
        debug!(cleared, level, "cycle end");
        Ok(CycleOutcome { cleared, added })
    }

    /// Whether the chain can no longer be extended
    ///
    /// True once the chain holds at least two tokens and the successor of its
    /// last symbol is past the alphabet or absent from the board.
    pub fn is_chain_complete(&self) -> bool {
        if self.chain.len() < MIN_RUN_LEN {
            return false;
        }
        match self.chain.last().and_then(|l| l.symbol.next()) {
            Some(next) => !self.has_symbol(next),
            None => true,
        }
    }

    /// Toggle the token at (x, y) in or out of the chain.
    pub fn toggle(&mut self, x: u8, y: u8) -> Result<Toggle> {
        let idx = self.index(x, y).ok_or(CoreError::OutOfBounds { x, y })?;
        let Some(token) = self.cells[idx].as_mut() else {
            return Ok(Toggle::Empty);
        };

        if token.is_selected() {
            let id = token.id();
            let removed = self.chain.remove(id, &mut self.cells)?;
            return Ok(Toggle::Deselected { removed });
        }

        self.chain.add(token);
        if self.chain.is_valid() {
            Ok(Toggle::Selected)
        } else {
            debug!(x, y, "selection broke the run");
            self.chain.clear(&mut self.cells);
            Ok(Toggle::Broken)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c).unwrap()
    }

    /// Board with `letters` placed left to right, top to bottom.
    fn board_with(letters: &str) -> Board {
        let mut board = Board::new(5, 1).unwrap();
        for (i, c) in letters.chars().enumerate() {
            board.set((i % 5) as u8, (i / 5) as u8, Some(sym(c)));
        }
        board
    }

    fn run_str(run: &Run) -> String {
        run.iter().map(|s| s.as_char()).collect()
    }

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert_eq!(Board::new(2, 1).unwrap_err(), CoreError::InvalidGridSize(2));
        assert!(Board::new(MAX_GRID_SIZE + 1, 1).is_err());
        assert_eq!(Board::new(5, 1).unwrap().free_count(), 25);
    }

    #[test]
    fn test_index_and_coords() {
        let board = Board::new(5, 1).unwrap();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(4, 0), Some(4));
        assert_eq!(board.index(0, 1), Some(5));
        assert_eq!(board.index(5, 0), None);
        assert_eq!(board.coords(7), (2, 1));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(5, 1).unwrap();
        assert!(board.set(2, 3, Some(sym('K'))));
        assert_eq!(board.get(2, 3).flatten().map(|t| t.symbol()), Some(sym('K')));
        assert!(board.set(2, 3, None));
        assert_eq!(board.get(2, 3), Some(None));
        assert!(!board.set(5, 0, Some(sym('K'))));
        assert_eq!(board.get(0, 5), None);
    }

    #[test]
    fn test_duplicate_symbols_are_distinct_tokens() {
        let board = board_with("AA");
        let ids: Vec<TokenId> = board.tokens().map(|(_, _, t)| t.id()).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_setup_rejects_too_few() {
        let mut board = Board::new(5, 1).unwrap();
        assert_eq!(
            board.setup(2),
            Err(CoreError::TooFewTokens { min: 3, got: 2 })
        );
    }

    #[test]
    fn test_setup_places_a_playable_pair() {
        for seed in 1..50 {
            let mut board = Board::new(5, seed).unwrap();
            board.setup(5).unwrap();
            assert_eq!(board.token_count(), 5);
            assert!(!board.is_end());
            assert!(!board.find_runs(2).unwrap().is_empty(), "seed {seed}");
        }
    }

    #[test]
    fn test_place_randomly_sets_end_when_full() {
        let mut board = Board::new(3, 9).unwrap();
        let symbols = vec![sym('A'); 11];
        assert_eq!(board.place_randomly(&symbols), 9);
        assert!(board.is_end());
        assert_eq!(board.free_count(), 0);
    }

    #[test]
    fn test_find_runs() {
        let board = board_with("AABC");
        let runs: Vec<String> = board.find_runs(2).unwrap().iter().map(run_str).collect();
        assert_eq!(runs, vec!["AB", "BC"]);
        let runs: Vec<String> = board.find_runs(3).unwrap().iter().map(run_str).collect();
        assert_eq!(runs, vec!["ABC"]);
        assert!(board.find_runs(4).unwrap().is_empty());
    }

    #[test]
    fn test_find_runs_edge_cases() {
        let board = Board::new(5, 1).unwrap();
        assert!(board.find_runs(2).unwrap().is_empty());
        assert!(matches!(board.find_runs(1), Err(CoreError::RunTooShort { .. })));

        let board = board_with("YZ");
        let runs: Vec<String> = board.find_runs(2).unwrap().iter().map(run_str).collect();
        assert_eq!(runs, vec!["YZ"]);
    }

    #[test]
    fn test_replenish_quantity() {
        assert_eq!(replenish_quantity(0), 2);
        assert_eq!(replenish_quantity(1), 2);
        assert_eq!(replenish_quantity(2), 2);
        assert_eq!(replenish_quantity(3), 3);
        assert_eq!(replenish_quantity(5), 4);
        assert_eq!(replenish_quantity(u32::MAX), ALPHABET_LEN);
    }

    #[test]
    fn test_add_random_tokens_with_existing_run() {
        let mut board = board_with("DEF");
        let added = board.add_random_tokens(3).unwrap();
        assert_eq!(added.len(), 3);
        assert_eq!(board.token_count(), 6);
    }

    #[test]
    fn test_add_random_tokens_builds_run_around_board_token() {
        let mut board = board_with("M");
        let added = board.add_random_tokens(3).unwrap();
        // Two run members around M plus one free draw.
        assert_eq!(added.len(), 3);
        assert_eq!(board.token_count(), 4);
        assert!(!board.find_runs(3).unwrap().is_empty());
    }

    #[test]
    fn test_add_random_tokens_on_empty_board() {
        let mut board = Board::new(5, 4).unwrap();
        let added = board.add_random_tokens(1).unwrap();
        assert_eq!(added.len(), 3);
        assert!(!board.find_runs(2).unwrap().is_empty());
    }

    #[test]
    fn test_add_random_tokens_keeps_board_solvable() {
        for seed in 1..200 {
            for level in 0..12 {
                let mut board = Board::new(MAX_GRID_SIZE, seed).unwrap();
                let mut rng = SimpleRng::new(seed.wrapping_mul(31).wrapping_add(level));
                let scattered: Vec<Symbol> = (0..6)
                    .map(|_| {
                        // Even positions only: no two scattered symbols are adjacent.
                        Symbol::from_index(rng.next_range(ALPHABET_LEN / 2) * 2).unwrap()
                    })
                    .collect();
                board.place_randomly(&scattered);
                board.add_random_tokens(level).unwrap();
                assert!(!board.is_end());
                assert!(
                    !board.find_runs(2).unwrap().is_empty(),
                    "seed {seed} level {level}"
                );
            }
        }
    }

    #[test]
    fn test_toggle_empty_cell_is_noop() {
        let mut board = board_with("A");
        assert_eq!(board.toggle(3, 3), Ok(Toggle::Empty));
        assert!(board.chain().is_empty());
        assert_eq!(board.toggle(9, 0), Err(CoreError::OutOfBounds { x: 9, y: 0 }));
    }

    #[test]
    fn test_toggle_builds_and_rolls_back_chain() {
        let mut board = board_with("DEF");
        assert_eq!(board.toggle(0, 0), Ok(Toggle::Selected));
        assert_eq!(board.toggle(1, 0), Ok(Toggle::Selected));
        assert_eq!(board.toggle(2, 0), Ok(Toggle::Selected));
        assert_eq!(board.chain().len(), 3);

        assert_eq!(board.toggle(1, 0), Ok(Toggle::Deselected { removed: 2 }));
        assert_eq!(board.chain().len(), 1);
        assert!(board.get(0, 0).flatten().unwrap().is_selected());
        assert!(!board.get(2, 0).flatten().unwrap().is_selected());
    }

    #[test]
    fn test_toggle_broken_run_clears_chain() {
        let mut board = board_with("DEH");
        board.toggle(0, 0).unwrap();
        board.toggle(1, 0).unwrap();
        assert_eq!(board.toggle(2, 0), Ok(Toggle::Broken));
        assert!(board.chain().is_empty());
        assert!(board.tokens().all(|(_, _, t)| !t.is_selected()));
    }

    #[test]
    fn test_is_chain_complete() {
        let mut board = board_with("DEFG");
        board.toggle(0, 0).unwrap();
        assert!(!board.is_chain_complete());
        board.toggle(1, 0).unwrap();
        board.toggle(2, 0).unwrap();
        // G is still on the board.
        assert!(!board.is_chain_complete());
        board.toggle(3, 0).unwrap();
        assert!(board.is_chain_complete());
    }

    #[test]
    fn test_is_chain_complete_at_alphabet_end() {
        let mut board = board_with("YZ");
        board.toggle(0, 0).unwrap();
        board.toggle(1, 0).unwrap();
        assert!(board.is_chain_complete());
    }

    #[test]
    fn test_cycle_end_clears_chain_cells() {
        let mut board = board_with("DEFX");
        board.toggle(0, 0).unwrap();
        board.toggle(1, 0).unwrap();
        board.toggle(2, 0).unwrap();

        let outcome = board.cycle_end(1).unwrap();
        assert_eq!(outcome.cleared, 3);
        assert_eq!(outcome.added.len(), 2);
        assert!(board.chain().is_empty());
        assert_eq!(board.token_count(), 1 + outcome.added.len());
        assert!(board.tokens().all(|(_, _, t)| !t.is_selected()));
    }

    #[test]
    fn test_cycle_end_keeps_singleton() {
        let mut board = board_with("DX");
        board.toggle(0, 0).unwrap();
        let outcome = board.cycle_end(1).unwrap();
        assert_eq!(outcome.cleared, 0);
        assert!(board.is_occupied(0, 0));
        assert!(!board.get(0, 0).flatten().unwrap().is_selected());
    }

    #[test]
    fn test_cycle_end_clears_only_chained_duplicates() {
        let mut board = board_with("DEE");
        board.toggle(0, 0).unwrap();
        board.toggle(2, 0).unwrap();
        let survivor = board.get(1, 0).flatten().unwrap().id();

        let outcome = board.cycle_end(1).unwrap();
        assert_eq!(outcome.cleared, 2);
        // The unchained E keeps its cell and identity.
        assert_eq!(board.get(1, 0).flatten().map(|t| t.id()), Some(survivor));
    }

    #[test]
    fn test_symbol_grid_round_trip() {
        let board = board_with("ABCDEFG");
        let grid = board.symbol_grid();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[1][0], Some(sym('F')));
        let restored = Board::from_symbol_grid(&grid, SimpleRng::new(1)).unwrap();
        assert_eq!(restored.symbol_grid(), grid);
    }

    #[test]
    fn test_from_symbol_grid_rejects_ragged() {
        let grid = vec![vec![None; 3], vec![None; 3], vec![None; 2]];
        assert_eq!(
            Board::from_symbol_grid(&grid, SimpleRng::new(1)).unwrap_err(),
            CoreError::GridMismatch { expected: 3 }
        );
    }
}
