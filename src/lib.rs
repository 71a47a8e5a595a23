//! Atom Ring - a circular atom-fusion puzzle game core
//!
//! Core modules:
//! - `sim`: Deterministic game core (pieces, ring, fusion, spawning, sessions)
//! - `elements`: Element table (rank -> label/color)
//! - `input`: Click/key translation for a presentation layer
//! - `snapshot`: Read-only render view of a session
//! - `screens`: Mode select / playing / game over flow
//! - `settings`: Data-driven configuration

pub mod elements;
pub mod error;
pub mod input;
pub mod screens;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use elements::ElementTable;
pub use error::{GameError, GameResult};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference tick cadence (milliseconds)
    pub const TICK_MS: u64 = 100;

    /// Ring starts with this many atoms
    pub const INITIAL_RING_LEN: usize = 6;
    /// A ring longer than this ends the game
    pub const MAX_RING_LEN: usize = 18;

    /// Spawn die: 1..=SPAWN_DIE_SIDES
    pub const SPAWN_DIE_SIDES: u32 = 60;
    /// Draws in this range yield a Proton (Luxon in Geneva)
    pub const PROTON_DRAWS: std::ops::RangeInclusive<u32> = 1..=12;
    /// Draws in this range yield an Electron
    pub const ELECTRON_DRAWS: std::ops::RangeInclusive<u32> = 13..=17;
    /// Zen mercy range when the ring is one move from the limit
    pub const ZEN_MERCY_DRAWS: std::ops::RangeInclusive<u32> = 18..=35;
    /// Score needed before Neutrinos can appear
    pub const NEUTRINO_MIN_SCORE: u64 = 750;

    /// Default spawn rank bounds
    pub const DEFAULT_RANK_MIN: u32 = 1;
    pub const DEFAULT_RANK_MAX: u32 = 3;

    /// Points per fused pair
    pub const SCORE_PER_PAIR: u64 = 10;

    /// TimeAttack tick budget (15 seconds at the reference cadence)
    pub const TIME_ATTACK_START_TICKS: u32 = 150;
    pub const TIME_ATTACK_BONUS_DOUBLE: u32 = 20;
    pub const TIME_ATTACK_BONUS_LARGE: u32 = 30;

    /// Board geometry (reference 400px wide canvas)
    pub const BOARD_OUTER_RADIUS: f32 = 200.0;
    /// Piece radius; also the hub exclusion radius
    pub const PIECE_RADIUS: f32 = 30.0;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Angle of the 0-based ring slot `index` in a ring of `len` pieces.
///
/// Slot 0 sits one gap counter-clockwise of +x; the last slot sits on +x.
#[inline]
pub fn slot_angle(index: usize, len: usize) -> f32 {
    if len == 0 {
        return 0.0;
    }
    normalize_angle((index + 1) as f32 * std::f32::consts::TAU / len as f32)
}
