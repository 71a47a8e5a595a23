//! Game settings
//!
//! Every field has a default, so a partial JSON document is enough.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::elements::ElementTable;
use crate::error::{GameError, GameResult};
use crate::sim::FusionPolicy;

/// Board geometry used to interpret clicks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGeometry {
    /// Clicks at or beyond this distance from the center are off the board
    pub outer_radius: f32,
    /// Piece radius; clicks inside it around the hub hit the center piece
    pub piece_radius: f32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            outer_radius: BOARD_OUTER_RADIUS,
            piece_radius: PIECE_RADIUS,
        }
    }
}

impl BoardGeometry {
    /// Radius of the circle ring pieces sit on
    pub fn ring_radius(&self) -> f32 {
        self.outer_radius - self.piece_radius
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Driver tick interval (ms). The core itself is cadence-agnostic.
    pub tick_ms: u64,
    /// Lowest rank of a freshly spawned atom
    pub rank_min: u32,
    /// Highest rank of a freshly spawned atom
    pub rank_max: u32,
    /// Starting TimeAttack budget in ticks
    pub time_attack_ticks: u32,
    /// Reserved difficulty flag; spawning is not implemented for it
    pub difficult: bool,
    /// Which Proton fuses when several match
    pub fusion_policy: FusionPolicy,
    pub board: BoardGeometry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            rank_min: DEFAULT_RANK_MIN,
            rank_max: DEFAULT_RANK_MAX,
            time_attack_ticks: TIME_ATTACK_START_TICKS,
            difficult: false,
            fusion_policy: FusionPolicy::default(),
            board: BoardGeometry::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        log::info!("Loaded settings ({:?} fusion)", settings.fusion_policy);
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::Config(e.to_string()))
    }

    /// Check spawn bounds against the element table and board geometry
    pub fn validate(&self, table: &ElementTable) -> GameResult<()> {
        if self.rank_min == 0 || self.rank_min > self.rank_max {
            return Err(GameError::Config(format!(
                "spawn ranks {}..={} are empty or start at 0",
                self.rank_min, self.rank_max
            )));
        }
        if self.tick_ms == 0 || self.tick_ms > 1000 {
            return Err(GameError::Config(format!(
                "tick_ms {} must be within 1..=1000",
                self.tick_ms
            )));
        }
        if self.rank_max > table.max_rank() {
            return Err(GameError::Config(format!(
                "rank_max {} exceeds table size {}",
                self.rank_max,
                table.len()
            )));
        }
        if self.board.piece_radius <= 0.0 || self.board.outer_radius <= self.board.piece_radius {
            return Err(GameError::Config("board radii are inconsistent".to_string()));
        }
        Ok(())
    }
}
