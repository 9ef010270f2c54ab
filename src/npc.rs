//! NPC movement policies. None of them search for paths: wanderers pick a
//! random direction, pursuers close one axis at a time and can stall on a
//! wall.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::dialogue::Conversation;
use crate::grid::{Dir, Grid, Pos};
use crate::query::{is_wall, line_of_sight};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    Stationary,
    Wander { home: Pos, range: i32 },
    Aggressive { sight: i32 },
}

impl Behavior {
    pub fn label(&self) -> &'static str {
        match self {
            Behavior::Stationary => "static",
            Behavior::Wander { .. } => "wanderer",
            Behavior::Aggressive { .. } => "aggressive",
        }
    }
}

/// Minimum spacing between move attempts. The gate resets whenever it
/// opens, whether or not the move that follows succeeds.
#[derive(Clone, Copy, Debug)]
pub struct MoveTimer {
    interval: Duration,
    last: Duration,
}

impl MoveTimer {
    pub fn new(interval: Duration) -> Self {
        MoveTimer {
            interval,
            last: Duration::ZERO,
        }
    }

    pub fn ready(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Debug)]
pub struct Npc {
    pub pos: Pos,
    pub behavior: Behavior,
    pub conversation: Conversation,
    timer: MoveTimer,
    pursuing: bool,
}

impl Npc {
    pub fn new(pos: Pos, behavior: Behavior, interval: Duration) -> Self {
        Npc {
            pos,
            behavior,
            conversation: Conversation::default(),
            timer: MoveTimer::new(interval),
            pursuing: false,
        }
    }

    pub fn stationary(pos: Pos, interval: Duration) -> Self {
        Npc::new(pos, Behavior::Stationary, interval)
    }

    /// Wanders within `range` cells (Chebyshev) of where it spawned.
    pub fn wanderer(pos: Pos, range: i32, interval: Duration) -> Self {
        Npc::new(pos, Behavior::Wander { home: pos, range }, interval)
    }

    pub fn aggressive(pos: Pos, sight: i32, interval: Duration) -> Self {
        Npc::new(pos, Behavior::Aggressive { sight }, interval)
    }

    pub fn is_pursuing(&self) -> bool {
        self.pursuing
    }

    /// Advances the NPC by at most one cell if its move timer has elapsed.
    /// Returns whether it moved.
    pub fn update(&mut self, grid: &Grid, player: Pos, now: Duration, rng: &mut impl Rng) -> bool {
        if self.behavior == Behavior::Stationary || !self.timer.ready(now) {
            return false;
        }
        let before = self.pos;
        match self.behavior {
            Behavior::Stationary => {}
            Behavior::Wander { home, range } => {
                let Some(&dir) = Dir::ALL.choose(rng) else {
                    return false;
                };
                let next = self.pos.step(dir);
                if next.chebyshev(home) <= range && !is_wall(grid, next) {
                    self.pos = next;
                }
            }
            Behavior::Aggressive { sight } => {
                let sees = line_of_sight(grid, self.pos, player, sight);
                if sees != self.pursuing {
                    debug!(x = self.pos.x, y = self.pos.y, pursuing = sees, "aggression changed");
                    self.pursuing = sees;
                }
                if sees {
                    if let Some(next) = close_in(grid, self.pos, player) {
                        self.pos = next;
                    }
                } else if let Some(dir) = Dir::ALL.choose(rng) {
                    let next = self.pos.step(*dir);
                    if !is_wall(grid, next) {
                        self.pos = next;
                    }
                }
            }
        }
        self.pos != before
    }
}

/// Greedy step toward `target`: horizontal first, then vertical, taking
/// the first open one.
fn close_in(grid: &Grid, from: Pos, target: Pos) -> Option<Pos> {
    let options = [
        (target.x > from.x, Dir::Right),
        (target.x < from.x, Dir::Left),
        (target.y > from.y, Dir::Down),
        (target.y < from.y, Dir::Up),
    ];
    options
        .into_iter()
        .filter(|(wanted, _)| *wanted)
        .map(|(_, dir)| from.step(dir))
        .find(|next| !is_wall(grid, *next))
}
