//! Read-only render view of a session
//!
//! Built from `&Session` only, so a renderer can never mutate game state.

use serde::Serialize;

use crate::sim::{GamePhase, Mode, Piece, PieceKind, Session};
use crate::slot_angle;

/// One drawable piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceView {
    pub id: u32,
    pub kind: PieceKind,
    pub label: String,
    pub color: String,
    /// Radians counter-clockwise from +x; `None` for the center piece
    pub angle: Option<f32>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub ring: Vec<PieceView>,
    pub center: PieceView,
    pub score: u64,
    pub mode: Mode,
    pub phase: GamePhase,
    pub terminal: bool,
    /// TimeAttack only
    pub seconds_remaining: Option<u32>,
}

fn view(session: &Session, piece: &Piece, angle: Option<f32>) -> PieceView {
    let table = session.table();
    PieceView {
        id: piece.id,
        kind: piece.kind,
        label: piece.kind.label(table).to_string(),
        color: piece.kind.color(table).to_string(),
        angle,
    }
}

impl RenderSnapshot {
    pub fn capture(session: &Session) -> Self {
        let len = session.ring.len();
        Self {
            ring: session
                .ring
                .iter()
                .enumerate()
                .map(|(i, p)| view(session, p, Some(slot_angle(i, len))))
                .collect(),
            center: view(session, &session.center, None),
            score: session.score,
            mode: session.mode,
            phase: session.phase,
            terminal: session.is_terminal(),
            seconds_remaining: session.seconds_remaining(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Session {
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}
