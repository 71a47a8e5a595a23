//! Pieces: atoms and the special tokens that act on the ring

use serde::{Deserialize, Serialize};

use crate::elements::ElementTable;
use crate::error::GameResult;

/// Stable identity of a piece, unique within a session
pub type PieceId = u32;

/// Piece variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// An element; rank indexes the element table (1-based)
    Atom { rank: u32 },
    /// Fuses symmetric atom pairs around itself
    Proton,
    /// Pulls a ring piece into the center
    Electron,
    /// Copies a ring atom into the center
    Neutrino,
    /// Turns a ring atom into a Proton (Geneva)
    Luxon,
}

impl PieceKind {
    /// Validated atom kind
    pub fn atom(rank: u32, table: &ElementTable) -> GameResult<Self> {
        table.validate(rank).map(|rank| PieceKind::Atom { rank })
    }

    pub fn rank(&self) -> Option<u32> {
        match self {
            PieceKind::Atom { rank } => Some(*rank),
            _ => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, PieceKind::Atom { .. })
    }

    /// Center pieces of these kinds act on a ring piece instead of a gap
    pub fn targets_ring(&self) -> bool {
        matches!(
            self,
            PieceKind::Electron | PieceKind::Neutrino | PieceKind::Luxon
        )
    }

    /// Display label
    pub fn label<'a>(&self, table: &'a ElementTable) -> &'a str {
        match self {
            PieceKind::Atom { rank } => table.label(*rank).unwrap_or("?"),
            PieceKind::Proton => "+",
            PieceKind::Electron => "-",
            PieceKind::Neutrino => "",
            PieceKind::Luxon => "*",
        }
    }

    /// Display color
    pub fn color<'a>(&self, table: &'a ElementTable) -> &'a str {
        match self {
            PieceKind::Atom { rank } => table.color(*rank).unwrap_or("#888"),
            PieceKind::Proton => "#a00",
            PieceKind::Electron => "#00a",
            PieceKind::Neutrino => "#fff",
            PieceKind::Luxon => "green",
        }
    }
}

/// A piece on the board or in the center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    /// Set on an atom an Electron pulled into the center
    #[serde(default)]
    pub was_electron_moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind) -> Self {
        Self {
            id,
            kind,
            was_electron_moved: false,
        }
    }

    /// Fusion equality: only atoms of the same rank match. Two Protons never do.
    pub fn matches(&self, other: &Piece) -> bool {
        match (self.kind, other.kind) {
            (PieceKind::Atom { rank: a }, PieceKind::Atom { rank: b }) => a == b,
            _ => false,
        }
    }

    pub fn rank(&self) -> Option<u32> {
        self.kind.rank()
    }

    /// Flag this piece as pulled by an Electron. Only atoms carry the flag.
    pub fn mark_electron_moved(&mut self) {
        self.was_electron_moved = self.kind.is_atom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_only_equal_atoms() {
        let a = Piece::new(1, PieceKind::Atom { rank: 2 });
        let b = Piece::new(2, PieceKind::Atom { rank: 2 });
        let c = Piece::new(3, PieceKind::Atom { rank: 3 });
        let p = Piece::new(4, PieceKind::Proton);
        let q = Piece::new(5, PieceKind::Proton);
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert!(!p.matches(&q));
        assert!(!p.matches(&p));
        assert!(!a.matches(&p));
    }

    #[test]
    fn test_atom_rank_validation() {
        let table = ElementTable::builtin();
        assert_eq!(PieceKind::atom(3, &table), Ok(PieceKind::Atom { rank: 3 }));
        assert!(PieceKind::atom(0, &table).is_err());
        assert!(PieceKind::atom(500, &table).is_err());
    }

    #[test]
    fn test_labels() {
        let table = ElementTable::builtin();
        assert_eq!(PieceKind::Atom { rank: 2 }.label(&table), "He");
        assert_eq!(PieceKind::Proton.label(&table), "+");
        assert_eq!(PieceKind::Luxon.color(&table), "green");
    }

    #[test]
    fn test_electron_flag_only_on_atoms() {
        let mut atom = Piece::new(1, PieceKind::Atom { rank: 1 });
        atom.mark_electron_moved();
        assert!(atom.was_electron_moved);

        let mut proton = Piece::new(2, PieceKind::Proton);
        proton.mark_electron_moved();
        assert!(!proton.was_electron_moved);
    }
}
