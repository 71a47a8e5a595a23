//! Click translation for a presentation layer
//!
//! Screen coordinates come in with y pointing down; the board uses y up,
//! angles counter-clockwise from +x.

use glam::Vec2;

use crate::settings::BoardGeometry;
use crate::sim::{Action, Session};
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian, slot_angle};

/// Raw input from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click { x: f32, y: f32 },
    Key(char),
}

/// Board placement on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Board {
    /// Board center in screen coordinates
    pub center: Vec2,
    pub geometry: BoardGeometry,
}

impl Board {
    pub fn new(center: Vec2, geometry: BoardGeometry) -> Self {
        Self { center, geometry }
    }

    /// Screen point -> board-space vector (y up)
    pub fn to_board(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x - self.center.x, self.center.y - y)
    }

    /// Board-space position of ring slot `index`
    pub fn slot_position(&self, index: usize, len: usize) -> Vec2 {
        polar_to_cartesian(self.geometry.ring_radius(), slot_angle(index, len))
    }

    /// True if the point is on the hub or off the board
    pub fn is_outside_play_area(&self, point: Vec2) -> bool {
        let r = point.length();
        r <= self.geometry.piece_radius || r >= self.geometry.outer_radius
    }

    /// 1-based insert position for a board-space point in a ring of `len`
    pub fn gap_at(&self, point: Vec2, len: usize) -> usize {
        if len == 0 {
            return 1;
        }
        let (_, theta) = cartesian_to_polar(point);
        let gap_width = std::f32::consts::TAU / len as f32;
        let gap = (normalize_angle(theta) / gap_width).floor() as usize;
        gap.min(len - 1) + 1
    }
}

/// Turn a click into an action for the session, if it means anything
pub fn translate_click(session: &Session, board: &Board, x: f32, y: f32) -> Option<Action> {
    let point = board.to_board(x, y);
    let len = session.ring.len();

    if session.center.kind.targets_ring() {
        return session
            .ring
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                point.distance(board.slot_position(*i, len)) <= board.geometry.piece_radius
            })
            .map(|(_, piece)| Action::SelectRingPiece { id: piece.id })
            .last();
    }

    if board.is_outside_play_area(point) {
        return Some(Action::HubClick);
    }
    Some(Action::PlaceInGap {
        position: board.gap_at(point, len),
    })
}
