//! Fusion engine
//!
//! A Proton fuses the atoms mirrored around it: walk outward one pair at a
//! time while the two pieces match, then replace the whole span (Proton plus
//! `k` pairs) with a single higher-rank atom.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId, PieceKind};
use super::ring::Ring;
use crate::elements::ElementTable;
use crate::error::{GameError, GameResult};

/// Which Proton fuses when several have a matching span.
/// Only one fusion is applied per tick under every policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FusionPolicy {
    /// The last Proton in ring order decides, even if its span is empty
    LastScanned,
    /// The last Proton in ring order with a non-empty span
    #[default]
    LastMatching,
    /// The Proton with the widest span (later one wins ties)
    Widest,
}

/// A Proton and the half-width of its matching span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FusionCandidate {
    pub proton_index: usize,
    pub half_width: usize,
}

/// Result of an applied fusion
#[derive(Debug, Clone)]
pub struct Fusion {
    pub half_width: usize,
    pub fused: Piece,
    pub removed: Vec<Piece>,
}

/// Number of matching pairs around the piece at `index`.
///
/// The walk stops before a pair would reuse a slot, which covers both
/// `left == right` and wrapping back onto the Proton.
pub fn span_half_width(ring: &Ring, index: usize) -> usize {
    let len = ring.len();
    let pieces = ring.pieces();
    let mut k = 0;
    while 2 * (k + 1) < len {
        let left = (index + len - (k + 1) % len) % len;
        let right = (index + k + 1) % len;
        if !pieces[left].matches(&pieces[right]) {
            break;
        }
        k += 1;
    }
    k
}

/// Scan every Proton and pick the one to fuse under `policy`
pub fn scan(ring: &Ring, policy: FusionPolicy) -> Option<FusionCandidate> {
    let candidates = ring
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == PieceKind::Proton)
        .map(|(i, _)| FusionCandidate {
            proton_index: i,
            half_width: span_half_width(ring, i),
        });

    let chosen = match policy {
        FusionPolicy::LastScanned => candidates.last(),
        FusionPolicy::LastMatching => candidates.filter(|c| c.half_width > 0).last(),
        FusionPolicy::Widest => candidates
            .filter(|c| c.half_width > 0)
            .fold(None, |best: Option<FusionCandidate>, c| match best {
                Some(b) if b.half_width > c.half_width => Some(b),
                _ => Some(c),
            }),
    };
    chosen.filter(|c| c.half_width > 0)
}

/// 0-based indices covered by a candidate's span, left to right
fn span_indices(len: usize, candidate: FusionCandidate) -> impl Iterator<Item = usize> {
    let k = candidate.half_width;
    let start = candidate.proton_index + len - k;
    (0..=2 * k).map(move |offset| (start + offset) % len)
}

/// Rank of the atom produced by fusing `candidate`
pub fn fused_rank(ring: &Ring, candidate: FusionCandidate) -> GameResult<u32> {
    let k = candidate.half_width as u32;
    if k == 1 {
        let left = ring.neighbor_left(candidate.proton_index)?;
        let rank = left
            .rank()
            .ok_or(GameError::NotFound(left.id))?;
        return Ok(rank + 1);
    }
    let max = span_indices(ring.len(), candidate)
        .filter_map(|i| ring.get(i).and_then(Piece::rank))
        .max()
        .ok_or(GameError::EmptyRing)?;
    Ok(max + k)
}

/// Fuse `candidate` in place, inserting the new atom where the Proton was
pub fn apply(
    ring: &mut Ring,
    candidate: FusionCandidate,
    fused_id: PieceId,
    table: &ElementTable,
) -> GameResult<Fusion> {
    let mut rank = fused_rank(ring, candidate)?;
    if rank > table.max_rank() {
        log::warn!(
            "Fused rank {} past end of element table, clamping to {}",
            rank,
            table.max_rank()
        );
        rank = table.max_rank();
    }
    let kind = PieceKind::atom(rank, table)?;

    let span: Vec<usize> = span_indices(ring.len(), candidate).collect();
    let ids: Vec<PieceId> = span
        .iter()
        .filter_map(|&i| ring.get(i).map(|p| p.id))
        .collect();
    // Survivors ahead of the Proton decide where the fused atom lands
    let insert_index = (0..candidate.proton_index)
        .filter(|i| !span.contains(i))
        .count();

    let removed = ring.remove_all(&ids)?;
    let fused = Piece::new(fused_id, kind);
    ring.insert_at(insert_index + 1, fused.clone())?;

    log::debug!(
        "Fused {} pieces around index {} into rank {}",
        removed.len(),
        candidate.proton_index,
        rank
    );

    Ok(Fusion {
        half_width: candidate.half_width,
        fused,
        removed,
    })
}
