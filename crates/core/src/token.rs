//! Token module - a letter placed on the board
//!
//! Two kinds of comparison apply to tokens and they are kept apart:
//!
//! - **Identity**: `==` on [`Token`] compares [`TokenId`]s. A board may hold
//!   several `E` tokens and each one is selected, chained and cleared on its
//!   own.
//! - **Value**: [`BySymbol`] compares by alphabet position and is what run
//!   detection, sorting and de-duplication use.

use std::cmp::Ordering;

use crate::error::{CoreError, Result};
use crate::types::Symbol;

/// Identity of a token, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);

impl TokenId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Value ordering by alphabet position, independent of identity.
pub trait BySymbol {
    fn symbol(&self) -> Symbol;

    fn cmp_symbol<T: BySymbol + ?Sized>(&self, other: &T) -> Ordering {
        self.symbol().cmp(&other.symbol())
    }

    fn same_symbol<T: BySymbol + ?Sized>(&self, other: &T) -> bool {
        self.symbol() == other.symbol()
    }
}

impl BySymbol for Symbol {
    fn symbol(&self) -> Symbol {
        *self
    }
}

/// A letter on the board with its selection flag
#[derive(Debug, Clone)]
pub struct Token {
    id: TokenId,
    symbol: Symbol,
    selected: bool,
}

impl Token {
    pub fn new(id: TokenId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            selected: false,
        }
    }

    /// Build a token from a one-character string, rejecting anything outside
    /// the alphabet.
    pub fn parse(id: TokenId, s: &str) -> Result<Self> {
        Symbol::from_str(s)
            .map(|symbol| Self::new(id, symbol))
            .ok_or_else(|| CoreError::UnknownSymbol(s.to_string()))
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn unselect(&mut self) {
        self.selected = false;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

impl BySymbol for Token {
    fn symbol(&self) -> Symbol {
        self.symbol
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: u32, c: char) -> Token {
        Token::new(TokenId::new(id), Symbol::from_char(c).unwrap())
    }

    #[test]
    fn test_new_token_is_unselected() {
        let t = token(1, 'A');
        assert!(!t.is_selected());
        assert_eq!(t.symbol().as_char(), 'A');
    }

    #[test]
    fn test_selection() {
        let mut t = token(1, 'A');
        t.select();
        assert!(t.is_selected());
        t.unselect();
        assert!(!t.is_selected());
    }

    #[test]
    fn test_parse() {
        let t = Token::parse(TokenId::new(3), "q").unwrap();
        assert_eq!(t.symbol().as_char(), 'Q');
        assert_eq!(
            Token::parse(TokenId::new(3), "1"),
            Err(CoreError::UnknownSymbol("1".to_string()))
        );
        assert!(Token::parse(TokenId::new(3), "AB").is_err());
    }

    #[test]
    fn test_identity_vs_value_equality() {
        let e1 = token(1, 'E');
        let e2 = token(2, 'E');
        let f = token(3, 'F');

        assert_ne!(e1, e2);
        assert!(e1.same_symbol(&e2));
        assert_eq!(e1.cmp_symbol(&e2), Ordering::Equal);
        assert_eq!(e1.cmp_symbol(&f), Ordering::Less);
        assert_eq!(e1, e1.clone());
    }

    #[test]
    fn test_sort_by_symbol_keeps_duplicates() {
        let mut tokens = vec![token(1, 'C'), token(2, 'A'), token(3, 'C'), token(4, 'B')];
        tokens.sort_by(|a, b| a.cmp_symbol(b));
        let letters: String = tokens.iter().map(|t| t.symbol().as_char()).collect();
        assert_eq!(letters, "ABCC");
    }
}
