//! Session state
//!
//! One `Session` owns everything a running game needs: the ring, the center
//! piece, score, mode rules and the seeded spawner. Nothing is shared.

use std::sync::Arc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fusion::FusionPolicy;
use super::piece::{Piece, PieceId, PieceKind};
use super::ring::Ring;
use super::spawn::{Mode, SpawnContext, Spawner};
use crate::consts::*;
use crate::elements::ElementTable;
use crate::error::GameResult;
use crate::settings::Settings;

/// Session lifecycle; anything but `Playing` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Ring overflowed or the TimeAttack clock ran out
    GameOver,
    /// Player quit mid-game
    Quit,
}

/// Final result handed to the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    pub mode: Mode,
    pub difficult: bool,
}

/// A running game
#[derive(Debug, Clone)]
pub struct Session {
    pub seed: u64,
    pub mode: Mode,
    pub difficult: bool,
    pub phase: GamePhase,
    pub ring: Ring,
    pub center: Piece,
    pub score: u64,
    /// TimeAttack budget; `None` in other modes
    pub ticks_remaining: Option<u32>,
    /// Ticks processed so far
    pub time_ticks: u64,
    /// Tick length in milliseconds, for clock display
    pub tick_ms: u64,
    pub fusion_policy: FusionPolicy,
    pub(crate) table: Arc<ElementTable>,
    pub(crate) spawner: Spawner,
    next_id: PieceId,
}

impl Session {
    /// Start a game: spawn the center piece, then six ring atoms
    pub fn new(mode: Mode, settings: &Settings, seed: u64) -> GameResult<Self> {
        Self::with_table(mode, settings, seed, ElementTable::builtin())
    }

    pub fn with_table(
        mode: Mode,
        settings: &Settings,
        seed: u64,
        table: Arc<ElementTable>,
    ) -> GameResult<Self> {
        let mut session = Self::empty(mode, settings, seed, table)?;
        let center = session.spawn_center()?;
        session.center = center;
        for position in 1..=INITIAL_RING_LEN {
            let kind = session.spawner.atom();
            let piece = session.new_piece(kind);
            session.ring.insert_at(position, piece)?;
        }
        log::info!(
            "Started {} session (seed {}, ring {})",
            mode.as_str(),
            seed,
            session.ring.len()
        );
        Ok(session)
    }

    /// Session with a fixed ring and center, for tools and tests.
    /// Atom ranks are validated against the table.
    pub fn with_ring(
        mode: Mode,
        settings: &Settings,
        seed: u64,
        ring: &[PieceKind],
        center: PieceKind,
    ) -> GameResult<Self> {
        let mut session = Self::empty(mode, settings, seed, ElementTable::builtin())?;
        for (i, kind) in ring.iter().enumerate() {
            session.check_kind(*kind)?;
            let piece = session.new_piece(*kind);
            session.ring.insert_at(i + 1, piece)?;
        }
        session.check_kind(center)?;
        session.center = session.new_piece(center);
        Ok(session)
    }

    fn empty(
        mode: Mode,
        settings: &Settings,
        seed: u64,
        table: Arc<ElementTable>,
    ) -> GameResult<Self> {
        settings.validate(&table)?;
        Ok(Self {
            seed,
            mode,
            difficult: settings.difficult,
            phase: GamePhase::Playing,
            ring: Ring::new(),
            center: Piece::new(0, PieceKind::Proton),
            score: 0,
            ticks_remaining: (mode == Mode::TimeAttack).then_some(settings.time_attack_ticks),
            time_ticks: 0,
            tick_ms: settings.tick_ms,
            fusion_policy: settings.fusion_policy,
            table,
            spawner: Spawner::new(
                Pcg32::seed_from_u64(seed),
                settings.rank_min,
                settings.rank_max,
            ),
            next_id: 1,
        })
    }

    fn check_kind(&self, kind: PieceKind) -> GameResult<()> {
        if let Some(rank) = kind.rank() {
            self.table.validate(rank)?;
        }
        Ok(())
    }

    /// Allocate a new piece ID
    pub fn next_entity_id(&mut self) -> PieceId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn new_piece(&mut self, kind: PieceKind) -> Piece {
        let id = self.next_entity_id();
        Piece::new(id, kind)
    }

    pub fn spawn_context(&self) -> SpawnContext {
        SpawnContext {
            mode: self.mode,
            difficult: self.difficult,
            score: self.score,
            ring_len: self.ring.len(),
        }
    }

    /// Draw the next center piece
    pub(crate) fn spawn_center(&mut self) -> GameResult<Piece> {
        let ctx = self.spawn_context();
        let kind = self.spawner.next_piece(&ctx)?;
        Ok(self.new_piece(kind))
    }

    pub fn table(&self) -> &ElementTable {
        &self.table
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Whole seconds left on the TimeAttack clock
    pub fn seconds_remaining(&self) -> Option<u32> {
        let ticks_per_second = (1000 / self.tick_ms.max(1)).max(1);
        self.ticks_remaining
            .map(|t| (u64::from(t) / ticks_per_second) as u32)
    }

    /// Final result, once the session has ended
    pub fn summary(&self) -> Option<GameSummary> {
        self.is_terminal().then_some(GameSummary {
            score: self.score,
            mode: self.mode,
            difficult: self.difficult,
        })
    }

    /// Autoplay helper: random index below `upper_exclusive` from the session RNG
    pub fn random_index(&mut self, upper_exclusive: usize) -> usize {
        self.spawner.pick(upper_exclusive)
    }
}
