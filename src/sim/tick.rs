//! Player actions and the per-tick fusion cycle
//!
//! Invalid actions are no-ops reported as [`ActionOutcome::Ignored`]; only
//! invariant violations and the difficult-mode stub come back as errors.

use super::fusion;
use super::piece::{PieceId, PieceKind};
use super::spawn::Mode;
use super::state::{GamePhase, GameSummary, Session};
use crate::consts::*;
use crate::error::GameResult;

/// Discrete player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Put the center piece into the gap before 1-based ring `position`
    PlaceInGap { position: usize },
    /// Apply an Electron/Neutrino/Luxon center to a ring piece
    SelectRingPiece { id: PieceId },
    /// Click on the hub or off the board
    HubClick,
}

/// What an action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Placed { position: usize },
    /// Electron pulled a ring piece into the center
    Absorbed { id: PieceId },
    /// Neutrino copied a ring atom
    Copied { rank: u32 },
    /// Luxon turned a ring atom into a Proton
    Converted { id: PieceId },
    /// Electron-pulled atom turned back into a Proton
    RevertedToProton,
    Ignored,
}

/// A fusion applied during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FusionReport {
    pub half_width: usize,
    pub rank: u32,
}

/// What a tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub fusion: Option<FusionReport>,
    pub score_delta: u64,
    /// Ticks added to the TimeAttack clock
    pub time_bonus: u32,
    /// The session became terminal on this tick
    pub game_over: bool,
}

/// Apply a player action
pub fn apply_action(session: &mut Session, action: Action) -> GameResult<ActionOutcome> {
    if session.is_terminal() {
        return Ok(ActionOutcome::Ignored);
    }
    let outcome = match action {
        Action::PlaceInGap { position } => place_center(session, position)?,
        Action::SelectRingPiece { id } => select_ring_piece(session, id)?,
        Action::HubClick => hub_click(session),
    };
    if outcome != ActionOutcome::Ignored {
        log::debug!("{:?} -> {:?}", action, outcome);
    }
    Ok(outcome)
}

fn place_center(session: &mut Session, position: usize) -> GameResult<ActionOutcome> {
    if session.center.kind.targets_ring() {
        return Ok(ActionOutcome::Ignored);
    }
    if position == 0 || position > session.ring.len() + 1 {
        return Ok(ActionOutcome::Ignored);
    }
    let next = session.spawn_center_after_insert()?;
    let mut placed = std::mem::replace(&mut session.center, next);
    placed.was_electron_moved = false;
    session.ring.insert_at(position, placed)?;
    Ok(ActionOutcome::Placed { position })
}

fn select_ring_piece(session: &mut Session, id: PieceId) -> GameResult<ActionOutcome> {
    let Some(index) = session.ring.index_of(id) else {
        return Ok(ActionOutcome::Ignored);
    };
    let target_kind = session.ring.pieces()[index].kind;

    match session.center.kind {
        PieceKind::Electron => {
            let mut piece = session.ring.remove(id)?;
            piece.mark_electron_moved();
            session.center = piece;
            Ok(ActionOutcome::Absorbed { id })
        }
        PieceKind::Neutrino => match target_kind {
            PieceKind::Atom { rank } => {
                session.center = session.new_piece(target_kind);
                Ok(ActionOutcome::Copied { rank })
            }
            _ => Ok(ActionOutcome::Ignored),
        },
        PieceKind::Luxon => {
            if !target_kind.is_atom() {
                return Ok(ActionOutcome::Ignored);
            }
            if let Some(piece) = session.ring.get_mut(index) {
                piece.kind = PieceKind::Proton;
            }
            session.center = session.new_piece(PieceKind::Proton);
            Ok(ActionOutcome::Converted { id })
        }
        _ => Ok(ActionOutcome::Ignored),
    }
}

fn hub_click(session: &mut Session) -> ActionOutcome {
    if !session.center.was_electron_moved {
        return ActionOutcome::Ignored;
    }
    session.center = session.new_piece(PieceKind::Proton);
    ActionOutcome::RevertedToProton
}

/// Advance one tick: clock, one fusion pass, end-of-game checks
pub fn tick(session: &mut Session) -> GameResult<TickReport> {
    let mut report = TickReport::default();
    if session.is_terminal() {
        return Ok(report);
    }
    session.time_ticks += 1;
    if let Some(t) = session.ticks_remaining.as_mut() {
        *t = t.saturating_sub(1);
    }

    if let Some(candidate) = fusion::scan(&session.ring, session.fusion_policy) {
        let fused_id = session.next_entity_id();
        let fusion = fusion::apply(&mut session.ring, candidate, fused_id, &session.table)?;
        let k = fusion.half_width;
        report.score_delta = SCORE_PER_PAIR * k as u64;
        session.score += report.score_delta;
        report.fusion = Some(FusionReport {
            half_width: k,
            rank: fusion.fused.rank().unwrap_or_default(),
        });

        if session.mode == Mode::TimeAttack {
            report.time_bonus = match k {
                2 => TIME_ATTACK_BONUS_DOUBLE,
                k if k > 2 => TIME_ATTACK_BONUS_LARGE,
                _ => 0,
            };
            if let Some(t) = session.ticks_remaining.as_mut() {
                *t += report.time_bonus;
            }
        }
    }

    let overflowed = session.ring.len() > MAX_RING_LEN;
    let out_of_time = session.ticks_remaining == Some(0);
    if overflowed || out_of_time {
        session.phase = GamePhase::GameOver;
        report.game_over = true;
        log::info!(
            "Game over ({}): score {}, ring {}{}",
            session.mode.as_str(),
            session.score,
            session.ring.len(),
            if out_of_time { ", out of time" } else { "" }
        );
    }
    Ok(report)
}

impl Session {
    /// Spawn using the ring length the board will have after an insertion
    fn spawn_center_after_insert(&mut self) -> GameResult<super::piece::Piece> {
        let mut ctx = self.spawn_context();
        ctx.ring_len += 1;
        let kind = self.spawner.next_piece(&ctx)?;
        Ok(self.new_piece(kind))
    }

    pub fn place_center_in_gap(&mut self, position: usize) -> GameResult<ActionOutcome> {
        apply_action(self, Action::PlaceInGap { position })
    }

    pub fn select_ring_atom(&mut self, id: PieceId) -> GameResult<ActionOutcome> {
        apply_action(self, Action::SelectRingPiece { id })
    }

    pub fn tick(&mut self) -> GameResult<TickReport> {
        tick(self)
    }

    /// Abandon the game without touching the score
    pub fn quit(&mut self) -> GameSummary {
        if !self.is_terminal() {
            self.phase = GamePhase::Quit;
            log::info!("Quit {} session at score {}", self.mode.as_str(), self.score);
        }
        GameSummary {
            score: self.score,
            mode: self.mode,
            difficult: self.difficult,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::FusionPolicy;
    use proptest::prelude::*;

    fn a(rank: u32) -> PieceKind {
        PieceKind::Atom { rank }
    }

    const P: PieceKind = PieceKind::Proton;

    fn session(mode: Mode, ring: &[PieceKind], center: PieceKind) -> Session {
        Session::with_ring(mode, &Settings::default(), 12345, ring, center).unwrap()
    }

    fn kinds(s: &Session) -> Vec<PieceKind> {
        s.ring.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn test_single_pair_scenario() {
        let mut s = session(Mode::Classic, &[a(2), P, a(2)], a(1));
        let report = s.tick().unwrap();
        assert_eq!(kinds(&s), vec![a(3)]);
        assert_eq!(s.score, 10);
        assert_eq!(report.fusion, Some(FusionReport { half_width: 1, rank: 3 }));
        assert!(!report.game_over);
    }

    #[test]
    fn test_double_pair_scenario() {
        let mut s = session(Mode::Classic, &[a(5), a(3), P, a(3), a(5)], a(1));
        s.tick().unwrap();
        assert_eq!(kinds(&s), vec![a(7)]);
        assert_eq!(s.score, 20);
    }

    #[test]
    fn test_tick_without_fusion_is_idempotent() {
        let mut s = session(Mode::Classic, &[a(1), P, a(2), a(3)], a(4));
        let center = s.center.id;
        let before = kinds(&s);
        for _ in 0..5 {
            let report = s.tick().unwrap();
            assert_eq!(report, TickReport::default());
        }
        assert_eq!(kinds(&s), before);
        assert_eq!(s.score, 0);
        assert_eq!(s.center.id, center);
        assert_eq!(s.time_ticks, 5);
    }

    #[test]
    fn test_one_fusion_per_tick() {
        // Both Protons see a two-pair span; only the later one fuses
        let mut s = session(Mode::Classic, &[a(3), a(2), P, a(2), a(3), P], a(1));
        s.fusion_policy = FusionPolicy::LastMatching;
        s.tick().unwrap();
        assert_eq!(s.score, 20);
        assert_eq!(kinds(&s), vec![P, a(5)]);
        assert_eq!(s.tick().unwrap().fusion, None);
    }

    #[test]
    fn test_place_center_spawns_new_center() {
        let mut s = session(Mode::Classic, &[a(1), a(2), a(3)], a(9));
        let old_center = s.center.id;
        let outcome = s.place_center_in_gap(2).unwrap();
        assert_eq!(outcome, ActionOutcome::Placed { position: 2 });
        assert_eq!(kinds(&s), vec![a(1), a(9), a(2), a(3)]);
        assert_eq!(s.ring.index_of(old_center), Some(1));
        assert_ne!(s.center.id, old_center);
    }

    #[test]
    fn test_place_invalid_position_is_noop() {
        let mut s = session(Mode::Classic, &[a(1), a(2)], a(9));
        assert_eq!(s.place_center_in_gap(0).unwrap(), ActionOutcome::Ignored);
        assert_eq!(s.place_center_in_gap(4).unwrap(), ActionOutcome::Ignored);
        assert_eq!(s.ring.len(), 2);
        assert_eq!(s.place_center_in_gap(3).unwrap(), ActionOutcome::Placed { position: 3 });
    }

    #[test]
    fn test_ring_targeting_center_cannot_be_placed() {
        let mut s = session(Mode::Classic, &[a(1), a(2)], PieceKind::Electron);
        assert_eq!(s.place_center_in_gap(1).unwrap(), ActionOutcome::Ignored);
        assert_eq!(s.ring.len(), 2);
    }

    #[test]
    fn test_electron_absorbs_then_reverts() {
        let mut s = session(Mode::Classic, &[a(1), a(2), a(3)], PieceKind::Electron);
        let target = s.ring.pieces()[1].id;
        assert_eq!(s.select_ring_atom(target).unwrap(), ActionOutcome::Absorbed { id: target });
        assert_eq!(s.ring.len(), 2);
        assert_eq!(s.center.id, target);
        assert!(s.center.was_electron_moved);

        assert_eq!(apply_action(&mut s, Action::HubClick).unwrap(), ActionOutcome::RevertedToProton);
        assert_eq!(s.center.kind, P);
        assert!(!s.center.was_electron_moved);
        // A second hub click does nothing
        assert_eq!(apply_action(&mut s, Action::HubClick).unwrap(), ActionOutcome::Ignored);
    }

    #[test]
    fn test_electron_moved_atom_can_be_placed() {
        let mut s = session(Mode::Classic, &[a(1), a(2), a(3)], PieceKind::Electron);
        let target = s.ring.pieces()[0].id;
        s.select_ring_atom(target).unwrap();
        s.place_center_in_gap(3).unwrap();
        assert_eq!(kinds(&s), vec![a(2), a(3), a(1)]);
        assert!(s.ring.iter().all(|p| !p.was_electron_moved));
    }

    #[test]
    fn test_neutrino_copies_atom() {
        let mut s = session(Mode::Classic, &[a(4), P, a(2)], PieceKind::Neutrino);
        let target = s.ring.pieces()[0].id;
        assert_eq!(s.select_ring_atom(target).unwrap(), ActionOutcome::Copied { rank: 4 });
        assert_eq!(s.center.kind, a(4));
        assert_ne!(s.center.id, target);
        assert_eq!(s.ring.len(), 3);

        let mut s = session(Mode::Classic, &[a(4), P, a(2)], PieceKind::Neutrino);
        let proton = s.ring.pieces()[1].id;
        assert_eq!(s.select_ring_atom(proton).unwrap(), ActionOutcome::Ignored);
    }

    #[test]
    fn test_luxon_converts_atom() {
        let mut s = session(Mode::Geneva, &[a(2), a(5), a(2)], PieceKind::Luxon);
        let target = s.ring.pieces()[1].id;
        assert_eq!(s.select_ring_atom(target).unwrap(), ActionOutcome::Converted { id: target });
        assert_eq!(kinds(&s), vec![a(2), P, a(2)]);
        assert_eq!(s.center.kind, P);
        s.tick().unwrap();
        assert_eq!(kinds(&s), vec![a(3)]);
    }

    #[test]
    fn test_select_unknown_piece_is_noop() {
        let mut s = session(Mode::Classic, &[a(1)], PieceKind::Electron);
        assert_eq!(s.select_ring_atom(999).unwrap(), ActionOutcome::Ignored);
        let mut s = session(Mode::Classic, &[a(1)], a(2));
        let id = s.ring.pieces()[0].id;
        assert_eq!(s.select_ring_atom(id).unwrap(), ActionOutcome::Ignored);
    }

    #[test]
    fn test_overflow_ends_game_on_next_tick() {
        let ring: Vec<PieceKind> = (1..=19).map(a).collect();
        let mut s = session(Mode::Classic, &ring, a(1));
        let report = s.tick().unwrap();
        assert!(report.game_over);
        assert_eq!(s.phase, GamePhase::GameOver);

        let ring: Vec<PieceKind> = (1..=18).map(a).collect();
        let mut s = session(Mode::Classic, &ring, a(1));
        assert!(!s.tick().unwrap().game_over);
    }

    #[test]
    fn test_terminal_session_ignores_input() {
        let ring: Vec<PieceKind> = (1..=19).map(a).collect();
        let mut s = session(Mode::Classic, &ring, a(1));
        s.tick().unwrap();
        assert_eq!(s.place_center_in_gap(1).unwrap(), ActionOutcome::Ignored);
        assert_eq!(s.tick().unwrap(), TickReport::default());
        assert_eq!(s.ring.len(), 19);
    }

    #[test]
    fn test_time_attack_bonuses() {
        let mut s = session(Mode::TimeAttack, &[a(5), a(3), P, a(3), a(5)], a(1));
        s.tick().unwrap();
        // 150 - 1 + 20
        assert_eq!(s.ticks_remaining, Some(169));

        let mut s = session(Mode::TimeAttack, &[a(1), a(5), a(3), P, a(3), a(5), a(1)], a(1));
        let report = s.tick().unwrap();
        assert_eq!(report.time_bonus, 30);
        assert_eq!(s.ticks_remaining, Some(179));

        let mut s = session(Mode::TimeAttack, &[a(2), P, a(2)], a(1));
        assert_eq!(s.tick().unwrap().time_bonus, 0);
        assert_eq!(s.ticks_remaining, Some(149));
    }

    #[test]
    fn test_time_attack_runs_out() {
        let settings = Settings {
            time_attack_ticks: 3,
            ..Default::default()
        };
        let mut s =
            Session::with_ring(Mode::TimeAttack, &settings, 1, &[a(1), a(2)], a(3)).unwrap();
        assert!(!s.tick().unwrap().game_over);
        assert!(!s.tick().unwrap().game_over);
        assert!(s.tick().unwrap().game_over);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.ring.len(), 2);
    }

    #[test]
    fn test_other_modes_get_no_time_bonus() {
        let mut s = session(Mode::Classic, &[a(5), a(3), P, a(3), a(5)], a(1));
        assert_eq!(s.tick().unwrap().time_bonus, 0);
        assert_eq!(s.ticks_remaining, None);
    }

    #[test]
    fn test_quit_keeps_score() {
        let mut s = session(Mode::Zen, &[a(2), P, a(2)], a(1));
        s.tick().unwrap();
        let summary = s.quit();
        assert_eq!(summary.score, 10);
        assert_eq!(summary.mode, Mode::Zen);
        assert_eq!(s.phase, GamePhase::Quit);
        assert!(s.is_terminal());
    }

    fn center_after_placement(mode: Mode, ring_len: u32, seed: u64) -> PieceKind {
        let ring: Vec<PieceKind> = (1..=ring_len).map(a).collect();
        let mut s = Session::with_ring(mode, &Settings::default(), seed, &ring, a(1)).unwrap();
        s.place_center_in_gap(1).unwrap();
        s.center.kind
    }

    #[test]
    fn test_zen_mercy_on_full_ring() {
        let (mut zen_protons, mut classic_protons, mut mercy_only) = (0, 0, 0);
        for seed in 0..200 {
            let zen = center_after_placement(Mode::Zen, 17, seed);
            let classic = center_after_placement(Mode::Classic, 17, seed);
            if classic == P {
                assert_eq!(zen, P, "seed {seed}");
                classic_protons += 1;
            }
            if zen == P {
                zen_protons += 1;
                if classic != P {
                    mercy_only += 1;
                }
            }
        }
        assert!(zen_protons > classic_protons);
        assert!(mercy_only > 0);
    }

    #[test]
    fn test_zen_no_mercy_below_full_ring() {
        for seed in 0..200 {
            assert_eq!(
                center_after_placement(Mode::Zen, 16, seed),
                center_after_placement(Mode::Classic, 16, seed),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_determinism() {
        let mut s1 = Session::new(Mode::Classic, &Settings::default(), 99999).unwrap();
        let mut s2 = Session::new(Mode::Classic, &Settings::default(), 99999).unwrap();
        for i in 0..30 {
            let pos = 1 + i % 3;
            let o1 = s1.place_center_in_gap(pos).unwrap();
            let o2 = s2.place_center_in_gap(pos).unwrap();
            assert_eq!(o1, o2);
            assert_eq!(s1.tick().unwrap(), s2.tick().unwrap());
        }
        assert_eq!(kinds(&s1), kinds(&s2));
        assert_eq!(s1.score, s2.score);
        assert_eq!(s1.center.kind, s2.center.kind);
    }

    proptest! {
        #[test]
        fn prop_tick_scores_ten_per_pair(
            pairs in prop::collection::vec(1u32..=10, 1..=7),
        ) {
            let k = pairs.len();
            let mut ring = vec![P];
            ring.extend(pairs.iter().map(|&r| a(r)));
            ring.push(a(60));
            ring.push(a(61));
            ring.extend(pairs.iter().rev().map(|&r| a(r)));
            let mut s = session(Mode::Classic, &ring, a(1));
            let len = s.ring.len();
            let report = s.tick().unwrap();
            prop_assert_eq!(s.score, 10 * k as u64);
            prop_assert_eq!(report.score_delta, 10 * k as u64);
            prop_assert_eq!(s.ring.len(), len - 2 * k);
        }
    }
}
