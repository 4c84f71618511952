//! Chain module - the player's in-progress selection
//!
//! A chain is an ordered list of token identities in selection order. It is
//! only ever valid while the selection reads as a run in that order: `D, E, F`
//! is valid, `D, F`, `F, E` and `E, E` are not.
//!
//! The chain does not own the tokens it references. Operations that change
//! selection flags take a [`TokenLookup`] so the board's cells can be updated
//! in place.

use crate::alphabet::next_run;
use crate::error::{CoreError, Result};
use crate::token::{BySymbol, Token, TokenId};
use crate::types::Symbol;

/// Mutable access to tokens by identity.
pub trait TokenLookup {
    fn token_mut(&mut self, id: TokenId) -> Option<&mut Token>;
}

impl TokenLookup for Vec<Token> {
    fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.iter_mut().find(|t| t.id() == id)
    }
}

impl TokenLookup for Vec<Option<Token>> {
    fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.iter_mut().flatten().find(|t| t.id() == id)
    }
}

/// One chained token: its identity plus the symbol it had when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub id: TokenId,
    pub symbol: Symbol,
}

impl BySymbol for Link {
    fn symbol(&self) -> Symbol {
        self.symbol
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chain {
    links: Vec<Link>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `token` and append it.
    pub fn add(&mut self, token: &mut Token) {
        token.select();
        self.links.push(Link {
            id: token.id(),
            symbol: token.symbol(),
        });
    }

    /// Remove `id` and every link selected after it
    ///
    /// Returns the number of links rolled back. Each rolled-back token is
    /// unselected.
    pub fn remove<L: TokenLookup>(&mut self, id: TokenId, tokens: &mut L) -> Result<usize> {
        if self.links.is_empty() {
            return Err(CoreError::EmptyChain);
        }
        let pos = self
            .links
            .iter()
            .position(|l| l.id == id)
            .ok_or(CoreError::NotInChain(id))?;

        let removed = self.links.len() - pos;
        for link in self.links.drain(pos..) {
            if let Some(token) = tokens.token_mut(link.id) {
                token.unselect();
            }
        }
        Ok(removed)
    }

    /// Whether the selection, in order, is a run.
    pub fn is_valid(&self) -> bool {
        if self.links.len() <= 1 {
            return true;
        }

        let mut sorted: Vec<Symbol> = self.links.iter().map(|l| l.symbol).collect();
        sorted.sort();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return false;
        }

        let Ok(Some(successors)) = next_run(sorted[0], sorted.len() - 1) else {
            return false;
        };
        let expected = std::iter::once(sorted[0]).chain(successors);
        self.links.iter().map(|l| l.symbol).eq(expected)
    }

    /// Unselect every chained token and empty the chain.
    pub fn clear<L: TokenLookup>(&mut self, tokens: &mut L) {
        for link in self.links.drain(..) {
            if let Some(token) = tokens.token_mut(link.id) {
                token.unselect();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn last(&self) -> Option<&Link> {
        self.links.last()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.links.iter().any(|l| l.id == id)
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.links.iter().map(|l| l.symbol)
    }
}
