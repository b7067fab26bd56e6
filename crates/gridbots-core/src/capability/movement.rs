//! Movement behaviours.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::event::BattleEvent;
use crate::grid::{Direction, Position};
use crate::resolver::{CombatResolver, TurnContext};

use super::{Capability, TurnAction};

/// How a robot relocates during the move phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Movement {
    /// Step by the requested offset if the destination is free.
    #[default]
    Normal,
    /// Teleport to a random free cell while jump charges last.
    Jump,
    /// Charge along a random cardinal line, damaging everything on it.
    Charge,
}

impl Capability for Movement {
    const SPECIALISATIONS: &'static [Self] = &[Self::Jump, Self::Charge];

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Jump => "Jump",
            Self::Charge => "Juggernaut",
        }
    }
}

impl TurnAction for Movement {
    fn perform(self, ctx: &mut TurnContext<'_>, offset: Position) {
        match self {
            Self::Normal => step(ctx, offset),
            Self::Jump => jump(ctx, offset),
            Self::Charge => charge(ctx),
        }
    }
}

/// Moves by `offset` if the destination is inside and free.
fn step(ctx: &mut TurnContext<'_>, offset: Position) {
    if offset == Position::ZERO {
        tracing::trace!(actor = %ctx.actor, "staying put");
        return;
    }
    let Some((name, from)) = ctx.snapshot() else {
        return;
    };
    let to = from + offset;
    ctx.record(BattleEvent::MoveRequested {
        name: name.clone(),
        to,
    });

    if ctx.arena.is_inside(to) && !ctx.arena.is_occupied(to) {
        relocate(ctx, to);
        ctx.record(BattleEvent::Moved { name, to });
    } else {
        ctx.record(BattleEvent::MoveRejected { name, to });
    }
}

fn jump(ctx: &mut TurnContext<'_>, offset: Position) {
    let Some(robot) = ctx.actor() else {
        return;
    };
    let name = robot.name().to_owned();
    let from = robot.position();

    if robot.state().charges.jumps == 0 {
        ctx.record(BattleEvent::JumpsExhausted { name });
        step(ctx, offset);
        return;
    }

    let grid = *ctx.arena.grid();
    let to = grid.random_cell(&mut *ctx.rng);
    if ctx.arena.is_occupied(to) {
        ctx.record(BattleEvent::JumpRejected { name, to });
        return;
    }

    let mut remaining = 0;
    if let Some(state) = ctx.actor_state_mut() {
        state.charges.jumps -= 1;
        state.position = to;
        remaining = state.charges.jumps;
    }
    ctx.record(BattleEvent::Jumped {
        name,
        from,
        to,
        remaining,
    });
}

/// Picks a direction and a run length, passes through every cell on the way
/// and lands on the farthest of them not held by an alive robot.
fn charge(ctx: &mut TurnContext<'_>) {
    let Some((name, from)) = ctx.snapshot() else {
        return;
    };
    let grid = *ctx.arena.grid();
    let direction = Direction::ALL[ctx.rng.gen_range(0..Direction::ALL.len())];
    let reach = grid.distance_to_edge(from, direction);
    if reach == 0 {
        ctx.record(BattleEvent::ChargeBlocked { name, direction });
        return;
    }

    let run = ctx.rng.gen_range(0..=reach);
    let swept = grid.sweep(from, direction, run);
    let victims: Vec<_> = ctx
        .arena
        .alive()
        .filter(|robot| robot.id() != ctx.actor && swept.contains(&robot.position()))
        .map(|robot| (robot.id(), robot.name().to_owned(), robot.is_hidden()))
        .collect();
    let to = swept
        .iter()
        .rev()
        .copied()
        .find(|cell| !ctx.arena.is_occupied(*cell))
        .unwrap_or(from);

    relocate(ctx, to);
    ctx.record(BattleEvent::Charging {
        name: name.clone(),
        from,
        to,
    });

    for (id, target, hidden) in victims {
        if hidden {
            ctx.record(BattleEvent::ChargeEvaded {
                name: name.clone(),
                target,
            });
        } else {
            CombatResolver::land_hit(ctx, id);
        }
    }
}

fn relocate(ctx: &mut TurnContext<'_>, to: Position) {
    if let Some(state) = ctx.actor_state_mut() {
        state.position = to;
    }
}
