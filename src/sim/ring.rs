//! The ring: circular ordered collection of board pieces
//!
//! Insert positions are 1-based (insert before the piece at `position`,
//! `len + 1` appends). Lookups by index are 0-based and wrap around.
//! Removal is by identity, since equal atoms routinely coexist.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId};
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ring {
    pieces: Vec<Piece>,
}

impl Ring {
    pub fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    pub fn from_pieces(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.pieces.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(index)
    }

    /// Insert before the piece at 1-based `position`
    pub fn insert_at(&mut self, position: usize, piece: Piece) -> GameResult<()> {
        let max = self.pieces.len() + 1;
        if position == 0 || position > max {
            return Err(GameError::OutOfRange { position, max });
        }
        self.pieces.insert(position - 1, piece);
        Ok(())
    }

    /// Remove every listed piece by identity.
    ///
    /// All ids are checked before anything is removed, so a failed call
    /// leaves the ring untouched.
    pub fn remove_all(&mut self, ids: &[PieceId]) -> GameResult<Vec<Piece>> {
        if let Some(&missing) = ids.iter().find(|id| self.index_of(**id).is_none()) {
            return Err(GameError::NotFound(missing));
        }
        let mut removed = Vec::with_capacity(ids.len());
        let mut kept = Vec::with_capacity(self.pieces.len());
        for piece in self.pieces.drain(..) {
            if ids.contains(&piece.id) {
                removed.push(piece);
            } else {
                kept.push(piece);
            }
        }
        self.pieces = kept;
        Ok(removed)
    }

    /// Remove a single piece by identity
    pub fn remove(&mut self, id: PieceId) -> GameResult<Piece> {
        let index = self.index_of(id).ok_or(GameError::NotFound(id))?;
        Ok(self.pieces.remove(index))
    }

    /// 0-based position of a piece by identity
    pub fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    /// Wrap any signed offset onto a valid index
    pub fn wrap(&self, index: isize) -> GameResult<usize> {
        if self.pieces.is_empty() {
            return Err(GameError::EmptyRing);
        }
        Ok(index.rem_euclid(self.pieces.len() as isize) as usize)
    }

    pub fn neighbor_left(&self, index: usize) -> GameResult<&Piece> {
        let i = self.wrap(index as isize - 1)?;
        Ok(&self.pieces[i])
    }

    pub fn neighbor_right(&self, index: usize) -> GameResult<&Piece> {
        let i = self.wrap(index as isize + 1)?;
        Ok(&self.pieces[i])
    }
}
