//! Headless rink with a toy delivery and collision model
//!
//! Loads and shots complete after a simulated delay measured in `update`
//! ticks, so the engine sees the same suspend/resume pattern a real
//! physics scene would produce.

use crate::collab::{completion, Completer, Pending, RinkCollaborator};
use crate::core::kinematics::resting_point;
use crate::core::rink::{LOAD_POSITION_X, LOAD_POSITION_Z, PIECE_RADIUS};
use crate::core::{Piece, PieceId, RinkState, ShotParameters, ShotResult, Side};
use crate::{CurlingError, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Seconds between a load request and the piece being handed over
pub const DEFAULT_LOAD_DELAY: f64 = 0.5;
/// Seconds between a release and every piece coming to rest
pub const DEFAULT_SHOT_DELAY: f64 = 3.0;

#[derive(Debug)]
enum Operation {
    Load {
        side: Side,
        completer: Completer<Piece>,
    },
    Shot {
        params: ShotParameters,
        completer: Completer<ShotResult>,
    },
}

#[derive(Debug)]
struct Scheduled {
    remaining: f64,
    operation: Operation,
}

#[derive(Debug)]
struct Sheet {
    resting: Vec<Piece>,
    /// Placed at the hack, waiting to be delivered
    delivering: Option<Piece>,
    queue: Vec<Scheduled>,
    next_id: u32,
    load_delay: f64,
    shot_delay: f64,
    fail_next_load: Option<String>,
    fail_next_shot: Option<String>,
    loads_requested: usize,
    shots_run: usize,
    stale_completions: usize,
}

/// Shared handle to a simulated sheet
///
/// Clones observe the same sheet, so a test can keep one handle while the
/// engine owns another.
#[derive(Debug, Clone)]
pub struct SimulatedRink {
    sheet: Rc<RefCell<Sheet>>,
}

impl SimulatedRink {
    pub fn new() -> Self {
        Self::with_delays(DEFAULT_LOAD_DELAY, DEFAULT_SHOT_DELAY)
    }

    /// Every operation completes on the next tick
    pub fn instant() -> Self {
        Self::with_delays(0.0, 0.0)
    }

    pub fn with_delays(load_delay: f64, shot_delay: f64) -> Self {
        SimulatedRink {
            sheet: Rc::new(RefCell::new(Sheet {
                resting: Vec::new(),
                delivering: None,
                queue: Vec::new(),
                next_id: 1,
                load_delay,
                shot_delay,
                fail_next_load: None,
                fail_next_shot: None,
                loads_requested: 0,
                shots_run: 0,
                stale_completions: 0,
            })),
        }
    }

    /// Reject the next piece request with a collaborator error
    pub fn fail_next_load(&self, reason: impl Into<String>) {
        self.sheet.borrow_mut().fail_next_load = Some(reason.into());
    }

    /// Reject the next physics shot with a collaborator error
    pub fn fail_next_shot(&self, reason: impl Into<String>) {
        self.sheet.borrow_mut().fail_next_shot = Some(reason.into());
    }

    pub fn resting_pieces(&self) -> Vec<Piece> {
        self.sheet.borrow().resting.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.sheet.borrow().queue.len()
    }

    pub fn loads_requested(&self) -> usize {
        self.sheet.borrow().loads_requested
    }

    pub fn shots_run(&self) -> usize {
        self.sheet.borrow().shots_run
    }

    /// Completions that found nobody listening
    pub fn stale_completions(&self) -> usize {
        self.sheet.borrow().stale_completions
    }

    fn finish(&self, operation: Operation) {
        let mut sheet = self.sheet.borrow_mut();
        let delivered = match operation {
            Operation::Load { side, completer } => {
                let result = match sheet.fail_next_load.take() {
                    Some(reason) => Err(CurlingError::Collaborator(reason)),
                    None => {
                        let id = PieceId::new(sheet.next_id);
                        sheet.next_id += 1;
                        Ok(Piece::new(id, side))
                    }
                };
                completer.complete(result)
            }
            Operation::Shot { params, completer } => {
                if completer.is_stale() {
                    false
                } else if let Some(reason) = sheet.fail_next_shot.take() {
                    completer.complete(Err(CurlingError::Collaborator(reason)))
                } else {
                    let result = sheet.deliver(&params);
                    completer.complete(result)
                }
            }
        };
        if !delivered {
            sheet.stale_completions += 1;
        }
    }
}

impl Default for SimulatedRink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sheet {
    fn schedule(&mut self, delay: f64, operation: Operation) {
        self.queue.push(Scheduled {
            remaining: delay,
            operation,
        });
    }

    /// Slide the placed piece to rest, knocking at most one piece along
    fn deliver(&mut self, params: &ShotParameters) -> Result<ShotResult> {
        let mut piece = self
            .delivering
            .take()
            .ok_or_else(|| CurlingError::Collaborator("no piece placed for delivery".into()))?;

        let (rest_x, rest_z) = resting_point(params);
        let (dx, dz) = (rest_x - LOAD_POSITION_X, rest_z - LOAD_POSITION_Z);
        let length = (dx * dx + dz * dz).sqrt();
        let contact = 2.0 * PIECE_RADIUS;

        let hit = if length > f64::EPSILON {
            let (ux, uz) = (dx / length, dz / length);
            self.resting
                .iter()
                .enumerate()
                .filter_map(|(index, other)| {
                    let (ox, oz) = (other.x - LOAD_POSITION_X, other.z - LOAD_POSITION_Z);
                    let along = ox * ux + oz * uz;
                    let across = (ox * uz - oz * ux).abs();
                    (across < contact && along >= 0.0 && along <= length + contact)
                        .then_some((index, along))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, along)| (index, along, ux, uz))
        } else {
            None
        };

        match hit {
            Some((index, along, ux, uz)) => {
                // The delivery stops at contact and hands its remaining travel on
                let stop = (along - contact).max(0.0);
                piece.x = LOAD_POSITION_X + ux * stop;
                piece.z = LOAD_POSITION_Z + uz * stop;
                let carry = length - stop;
                let struck = &mut self.resting[index];
                struck.x += ux * carry;
                struck.z += uz * carry;
            }
            None => {
                piece.x = rest_x;
                piece.z = rest_z;
            }
        }

        let mut removed = Vec::new();
        self.resting.retain(|p| {
            let keep = p.is_in_play();
            if !keep {
                removed.push(p.id);
            }
            keep
        });

        let resting = if piece.is_in_play() {
            self.resting.push(piece);
            Some((piece.x, piece.z))
        } else {
            None
        };

        Ok(ShotResult {
            piece: piece.id,
            resting,
            removed,
        })
    }
}

impl RinkCollaborator for SimulatedRink {
    fn acquire_new_piece(&mut self, side: Side) -> Pending<Piece> {
        let (completer, pending) = completion();
        let mut sheet = self.sheet.borrow_mut();
        sheet.loads_requested += 1;
        let delay = sheet.load_delay;
        sheet.schedule(delay, Operation::Load { side, completer });
        pending
    }

    fn place_piece(&mut self, piece: Piece) {
        self.sheet.borrow_mut().delivering = Some(piece);
    }

    fn current_snapshot(&self) -> RinkState {
        RinkState::with_pieces(self.sheet.borrow().resting.iter().copied())
    }

    fn run_physics_shot(&mut self, params: ShotParameters) -> Pending<ShotResult> {
        let (completer, pending) = completion();
        let mut sheet = self.sheet.borrow_mut();
        sheet.shots_run += 1;
        let delay = sheet.shot_delay;
        sheet.schedule(delay, Operation::Shot { params, completer });
        pending
    }

    fn clear_pieces(&mut self) {
        let mut sheet = self.sheet.borrow_mut();
        sheet.resting.clear();
        sheet.delivering = None;
    }

    fn update(&mut self, dt: f64) {
        let due: Vec<Scheduled> = {
            let mut sheet = self.sheet.borrow_mut();
            for scheduled in sheet.queue.iter_mut() {
                scheduled.remaining -= dt;
            }
            let (due, waiting): (Vec<_>, Vec<_>) = sheet
                .queue
                .drain(..)
                .partition(|scheduled| scheduled.remaining <= 0.0);
            sheet.queue = waiting;
            due
        };
        for scheduled in due {
            self.finish(scheduled.operation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::PendingPoll;
    use crate::core::kinematics::aim_at;
    use crate::core::rink::TEE_Z;
    use crate::core::Spin;

    fn load(rink: &mut SimulatedRink, side: Side) -> Piece {
        let mut pending = rink.acquire_new_piece(side);
        rink.update(DEFAULT_LOAD_DELAY);
        match pending.poll() {
            PendingPoll::Ready(Ok(piece)) => piece,
            other => panic!("load did not complete: {other:?}"),
        }
    }

    fn shoot(rink: &mut SimulatedRink, params: ShotParameters) -> ShotResult {
        let mut pending = rink.run_physics_shot(params);
        rink.update(DEFAULT_SHOT_DELAY);
        match pending.poll() {
            PendingPoll::Ready(Ok(result)) => result,
            other => panic!("shot did not complete: {other:?}"),
        }
    }

    #[test]
    fn test_load_waits_for_delay() {
        let mut rink = SimulatedRink::new();
        let mut pending = rink.acquire_new_piece(Side::B);
        rink.update(0.1);
        assert!(matches!(pending.poll(), PendingPoll::Waiting));
        rink.update(0.5);
        match pending.poll() {
            PendingPoll::Ready(Ok(piece)) => {
                assert_eq!(piece.side, Side::B);
                assert_eq!(piece.z, LOAD_POSITION_Z);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_draw_to_the_tee_rests_in_house() {
        let mut rink = SimulatedRink::new();
        let piece = load(&mut rink, Side::A);
        rink.place_piece(piece);
        let result = shoot(&mut rink, aim_at(0.0, TEE_Z, Spin::Clockwise));
        assert_eq!(result.piece, piece.id);
        assert!(result.removed.is_empty());
        let snapshot = rink.current_snapshot();
        assert_eq!(snapshot.shot_piece().map(|p| p.id), Some(piece.id));
    }

    #[test]
    fn test_takeout_removes_struck_piece() {
        let mut rink = SimulatedRink::new();
        let guard = load(&mut rink, Side::B);
        rink.place_piece(guard);
        shoot(&mut rink, aim_at(0.0, TEE_Z, Spin::Clockwise));

        let shooter = load(&mut rink, Side::A);
        rink.place_piece(shooter);
        // Aim off by the curl so the straight path runs through the tee
        let params = ShotParameters::new(-(0.02f64).asin(), 3.0, Spin::Clockwise);
        let result = shoot(&mut rink, params);
        assert_eq!(result.removed, vec![guard.id]);
        assert!(result.resting.is_some());
        assert_eq!(rink.resting_pieces().len(), 1);
    }

    #[test]
    fn test_shot_without_placed_piece_fails() {
        let mut rink = SimulatedRink::instant();
        let mut pending = rink.run_physics_shot(aim_at(0.0, TEE_Z, Spin::Clockwise));
        rink.update(0.0);
        assert!(matches!(
            pending.poll(),
            PendingPoll::Ready(Err(CurlingError::Collaborator(_)))
        ));
    }

    #[test]
    fn test_injected_load_failure() {
        let mut rink = SimulatedRink::instant();
        rink.fail_next_load("scene not ready");
        let mut pending = rink.acquire_new_piece(Side::A);
        rink.update(0.0);
        assert!(matches!(
            pending.poll(),
            PendingPoll::Ready(Err(CurlingError::Collaborator(_)))
        ));
    }

    #[test]
    fn test_dropped_request_counts_as_stale() {
        let mut rink = SimulatedRink::instant();
        drop(rink.acquire_new_piece(Side::A));
        rink.update(0.0);
        assert_eq!(rink.stale_completions(), 1);
        assert_eq!(rink.in_flight(), 0);
    }
}
