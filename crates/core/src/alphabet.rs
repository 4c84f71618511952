//! Alphabet module - adjacency and run arithmetic over [`Symbol`]s
//!
//! A *run* is a duplicate-free, contiguous, ascending sequence of symbols
//! ("D", "E", "F"). Runs never exceed the alphabet, so they are stored inline
//! in an [`ArrayVec`] sized to the alphabet and never allocate.

use arrayvec::ArrayVec;

use crate::error::{CoreError, Result};
use crate::rng::SimpleRng;
use crate::types::{Symbol, ALPHABET_LEN};

/// An ascending, contiguous sequence of symbols.
pub type Run = ArrayVec<Symbol, ALPHABET_LEN>;

/// Draw a uniformly random symbol.
pub fn random_symbol(rng: &mut SimpleRng) -> Symbol {
    Symbol::from_index(rng.next_range(ALPHABET_LEN)).unwrap_or_else(Symbol::first)
}

/// The `k` symbols immediately following `symbol`
///
/// Returns `Ok(None)` when the alphabet runs out before `k` successors.
///
/// ```
/// use meow_letters_core::alphabet::next_run;
/// use meow_letters_core::types::Symbol;
///
/// let y = Symbol::from_char('Y').unwrap();
/// let run = next_run(y, 1).unwrap().unwrap();
/// assert_eq!(run.as_slice(), &[Symbol::from_char('Z').unwrap()]);
/// assert!(next_run(y, 2).unwrap().is_none());
/// assert!(next_run(y, 0).is_err());
/// ```
pub fn next_run(symbol: Symbol, k: usize) -> Result<Option<Run>> {
    if k < 1 {
        return Err(CoreError::RunTooShort { min: 1, got: k });
    }
    if symbol.index() + k >= ALPHABET_LEN {
        return Ok(None);
    }
    Ok(Some(
        (symbol.index() + 1..=symbol.index() + k)
            .filter_map(Symbol::from_index)
            .collect(),
    ))
}

/// One of the defined neighbours of `symbol`, chosen uniformly.
pub fn any_adjacent(symbol: Symbol, rng: &mut SimpleRng) -> Result<Symbol> {
    let neighbours: ArrayVec<Symbol, 2> = [symbol.previous(), symbol.next()]
        .into_iter()
        .flatten()
        .collect();
    rng.choose(&neighbours)
        .copied()
        .ok_or(CoreError::NoNeighbour(symbol))
}

/// Build a random run of length `k` that contains `symbol`
///
/// The run grows one symbol at a time from whichever end can still grow; when
/// both can, a coin flip picks the side.
pub fn adjacent_run(symbol: Symbol, k: usize, rng: &mut SimpleRng) -> Result<Run> {
    if k < 1 {
        return Err(CoreError::RunTooShort { min: 1, got: k });
    }
    if k > ALPHABET_LEN {
        return Err(CoreError::RunTooLong {
            max: ALPHABET_LEN,
            got: k,
        });
    }

    let mut run = Run::new();
    run.push(symbol);

    while run.len() < k {
        let first = run[0];
        let last = run[run.len() - 1];

        let grow_left = if first.is_first() {
            false
        } else if last.is_last() {
            true
        } else {
            rng.next_bool()
        };

        let extended = if grow_left {
            first.previous().map(|s| run.insert(0, s))
        } else {
            last.next().map(|s| run.push(s))
        };
        // Both ends blocked only once the run spans the whole alphabet.
        if extended.is_none() {
            return Err(CoreError::RunTooLong {
                max: run.len(),
                got: k,
            });
        }
    }

    Ok(run)
}

/// Whether `symbols` form a run: ascending, contiguous and duplicate-free.
pub fn is_run(symbols: &[Symbol]) -> bool {
    symbols.windows(2).all(|w| w[0].next() == Some(w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c).unwrap()
    }

    fn run_of(s: &str) -> Vec<Symbol> {
        s.chars().map(sym).collect()
    }

    #[test]
    fn test_next_run() {
        let a = sym('A');
        assert_eq!(next_run(a, 1).unwrap().unwrap().as_slice(), run_of("B"));
        assert_eq!(next_run(a, 2).unwrap().unwrap().as_slice(), run_of("BC"));
        assert_eq!(next_run(sym('Y'), 1).unwrap().unwrap().as_slice(), run_of("Z"));
        assert!(next_run(sym('Y'), 2).unwrap().is_none());
        assert!(next_run(sym('Z'), 1).unwrap().is_none());
        assert_eq!(
            next_run(sym('Y'), 0),
            Err(CoreError::RunTooShort { min: 1, got: 0 })
        );
    }

    #[test]
    fn test_any_adjacent() {
        let mut rng = SimpleRng::new(1);
        for _ in 0..20 {
            assert_eq!(any_adjacent(sym('A'), &mut rng).unwrap(), sym('B'));
            assert_eq!(any_adjacent(sym('Z'), &mut rng).unwrap(), sym('Y'));
            let t = any_adjacent(sym('T'), &mut rng).unwrap();
            assert!(t == sym('S') || t == sym('U'));
        }
    }

    #[test]
    fn test_any_adjacent_hits_both_sides() {
        let mut rng = SimpleRng::new(2024);
        let picks: Vec<Symbol> = (0..64)
            .map(|_| any_adjacent(sym('M'), &mut rng).unwrap())
            .collect();
        assert!(picks.contains(&sym('L')));
        assert!(picks.contains(&sym('N')));
    }

    #[test]
    fn test_adjacent_run_rejects_bad_lengths() {
        let mut rng = SimpleRng::new(1);
        assert!(matches!(
            adjacent_run(sym('A'), 0, &mut rng),
            Err(CoreError::RunTooShort { .. })
        ));
        assert!(matches!(
            adjacent_run(sym('A'), ALPHABET_LEN + 1, &mut rng),
            Err(CoreError::RunTooLong { .. })
        ));
    }

    #[test]
    fn test_adjacent_run_at_boundaries() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(adjacent_run(sym('A'), 3, &mut rng).unwrap().as_slice(), run_of("ABC"));
        assert_eq!(adjacent_run(sym('Z'), 3, &mut rng).unwrap().as_slice(), run_of("XYZ"));
        assert_eq!(adjacent_run(sym('Q'), 1, &mut rng).unwrap().as_slice(), run_of("Q"));
    }

    #[test]
    fn test_adjacent_run_properties_for_every_start_and_length() {
        let mut rng = SimpleRng::new(424242);
        for start in Symbol::all() {
            for k in 1..=ALPHABET_LEN {
                let run = adjacent_run(start, k, &mut rng).unwrap();
                assert_eq!(run.len(), k, "start {start} k {k}");
                assert!(run.contains(&start), "start {start} k {k}");
                assert!(is_run(&run), "start {start} k {k}: {run:?}");
            }
        }
    }

    #[test]
    fn test_adjacent_run_full_alphabet() {
        let mut rng = SimpleRng::new(8);
        let run = adjacent_run(sym('K'), ALPHABET_LEN, &mut rng).unwrap();
        assert_eq!(run.as_slice(), Symbol::all().collect::<Vec<_>>());
    }

    #[test]
    fn test_adjacent_run_stays_near_origin() {
        let mut rng = SimpleRng::new(11);
        for _ in 0..20 {
            let run = adjacent_run(sym('H'), 3, &mut rng).unwrap();
            for s in &run {
                assert!(run_of("FGHIJ").contains(s));
            }
        }
    }

    #[test]
    fn test_is_run() {
        assert!(is_run(&[]));
        assert!(is_run(&run_of("D")));
        assert!(is_run(&run_of("DEF")));
        assert!(!is_run(&run_of("DEH")));
        assert!(!is_run(&run_of("FED")));
        assert!(!is_run(&run_of("DD")));
    }
}
