//! Vision behaviours.

use serde::{Deserialize, Serialize};

use crate::event::BattleEvent;
use crate::grid::Position;
use crate::resolver::{Sighting, TurnContext, VisionResolver};

use super::{Capability, TurnAction};

/// How a robot looks during the look phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Vision {
    /// Report every robot in the 3×3 block around the looked-at cell.
    #[default]
    Normal,
    /// Scan the whole battlefield while scans last.
    Scout,
    /// Look normally, tagging newly seen robots with tracker markers.
    Tracker,
}

impl Capability for Vision {
    const SPECIALISATIONS: &'static [Self] = &[Self::Scout, Self::Tracker];

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Scout => "Scout",
            Self::Tracker => "Tracker",
        }
    }
}

impl TurnAction for Vision {
    fn perform(self, ctx: &mut TurnContext<'_>, offset: Position) {
        match self {
            Self::Normal => look_around(ctx, offset, |_, _| {}),
            Self::Scout => scout(ctx, offset),
            Self::Tracker => track(ctx, offset),
        }
    }
}

/// Looks at `offset` from the actor and reports the neighbourhood.
///
/// `on_spotted` runs right after each sighting is logged.
fn look_around(
    ctx: &mut TurnContext<'_>,
    offset: Position,
    mut on_spotted: impl FnMut(&mut TurnContext<'_>, &Sighting),
) {
    let Some((name, from)) = ctx.snapshot() else {
        return;
    };
    let at = from + offset;
    if !ctx.arena.is_inside(at) {
        ctx.record(BattleEvent::LookOutOfBounds { name, at });
        return;
    }

    ctx.record(BattleEvent::Looking {
        name: name.clone(),
        at,
    });
    for sighting in VisionResolver::around(ctx, at) {
        spotted(ctx, &name, &sighting);
        on_spotted(ctx, &sighting);
    }
}

fn spotted(ctx: &mut TurnContext<'_>, name: &str, sighting: &Sighting) {
    ctx.record(BattleEvent::Spotted {
        name: name.to_owned(),
        target: sighting.name.clone(),
        at: sighting.position,
    });
}

fn scout(ctx: &mut TurnContext<'_>, offset: Position) {
    let Some((name, _)) = ctx.snapshot() else {
        return;
    };
    let scans = ctx.actor().map_or(0, |robot| robot.state().charges.scans);
    if scans == 0 {
        ctx.record(BattleEvent::ScansExhausted { name });
        look_around(ctx, offset, |_, _| {});
        return;
    }

    ctx.record(BattleEvent::ScanningAll { name: name.clone() });
    for sighting in VisionResolver::everywhere(ctx) {
        spotted(ctx, &name, &sighting);
    }
    if let Some(state) = ctx.actor_state_mut() {
        state.charges.scans -= 1;
    }
}

/// Looks normally, then reports every tracked robot still alive.
///
/// Tracked sightings are reported even when the look itself went off the
/// grid.
fn track(ctx: &mut TurnContext<'_>, offset: Position) {
    let Some((name, _)) = ctx.snapshot() else {
        return;
    };

    look_around(ctx, offset, |ctx, sighting| {
        let Some(state) = ctx.actor_state_mut() else {
            return;
        };
        if state.charges.trackers == 0 || state.tracked.contains(&sighting.name) {
            return;
        }
        state.charges.trackers -= 1;
        state.tracked.push(sighting.name.clone());
        let remaining = state.charges.trackers;
        ctx.record(BattleEvent::TrackerPlaced {
            name: name.clone(),
            target: sighting.name.clone(),
            remaining,
        });
    });

    let tracked = ctx
        .actor()
        .map(|robot| robot.state().tracked.clone())
        .unwrap_or_default();
    if tracked.is_empty() {
        return;
    }
    for sighting in VisionResolver::named(ctx, &tracked) {
        ctx.record(BattleEvent::TrackedSighting {
            name: name.clone(),
            target: sighting.name,
            at: sighting.position,
        });
    }
}
