//! Firing behaviours.
//!
//! Every variant shares the same preamble, checked in this order:
//!
//! 1. No shells left: the robot self-destructs.
//! 2. Zero offset: nothing happens and no shell is spent.
//! 3. Target off the grid: logged, no shell is spent.
//!
//! Only then does the variant's own shot logic run.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RobotDefaults;
use crate::event::BattleEvent;
use crate::grid::Position;
use crate::resolver::{CombatResolver, TurnContext};

use super::{Capability, TurnAction};

/// How a robot fires during the fire phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Firing {
    /// One shell, one shot at the requested cell.
    #[default]
    Normal,
    /// A hit may also strip one of the target's revivals.
    TrueDamage,
    /// A hit may also grant the target one revival.
    Lifesteal,
    /// Ignores the requested offset and picks a random one within range.
    Longshot,
    /// Fires a multi-shot burst while ammunition allows.
    Semiauto,
    /// Normal fire from an extended magazine.
    Thirtyshot,
}

impl Capability for Firing {
    const SPECIALISATIONS: &'static [Self] = &[
        Self::Longshot,
        Self::Semiauto,
        Self::Thirtyshot,
        Self::TrueDamage,
        Self::Lifesteal,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::TrueDamage => "TrueDamage",
            Self::Lifesteal => "Lifesteal",
            Self::Longshot => "Longshot",
            Self::Semiauto => "Semiauto",
            Self::Thirtyshot => "Thirtyshot",
        }
    }
}

impl Firing {
    /// Shells a freshly built robot with this variant starts with.
    #[must_use]
    pub const fn starting_shells(self, defaults: &RobotDefaults) -> u32 {
        match self {
            Self::Thirtyshot => defaults.extended_shells,
            _ => defaults.shells,
        }
    }
}

impl TurnAction for Firing {
    fn perform(self, ctx: &mut TurnContext<'_>, offset: Position) {
        let Some((name, from)) = ctx.snapshot() else {
            return;
        };
        let shells = ctx
            .actor()
            .map_or(0, |robot| robot.state().arsenal.shells);
        if shells == 0 {
            CombatResolver::self_destruct(ctx);
            return;
        }

        let offset = if self == Self::Longshot {
            longshot_offset(ctx)
        } else {
            offset
        };
        if offset == Position::ZERO {
            tracing::trace!(actor = %ctx.actor, "holding fire");
            return;
        }

        let at = from + offset;
        if !ctx.arena.is_inside(at) {
            ctx.record(BattleEvent::FireOutOfBounds { name, at });
            return;
        }

        let burst = ctx.config.odds.burst_shots;
        match self {
            Self::Semiauto if burst > 0 && shells >= burst => fire_burst(ctx, name, at, burst),
            Self::Semiauto => {
                ctx.record(BattleEvent::LowAmmo { name: name.clone() });
                fire_single(ctx, name, at, self);
            }
            _ => fire_single(ctx, name, at, self),
        }
    }
}

/// Draws a nonzero offset within the configured Manhattan range.
fn longshot_offset(ctx: &mut TurnContext<'_>) -> Position {
    let range = ctx.config.odds.longshot_range;
    if range <= 0 {
        return Position::ZERO;
    }
    loop {
        let dx = ctx.rng.gen_range(-range..=range);
        let dy = ctx.rng.gen_range(-range..=range);
        let manhattan = dx.abs() + dy.abs();
        if manhattan != 0 && manhattan <= range {
            return IVec2::new(dx, dy);
        }
    }
}

fn spend_shells(ctx: &mut TurnContext<'_>, count: u32) {
    if let Some(state) = ctx.actor_state_mut() {
        state.arsenal.shells = state.arsenal.shells.saturating_sub(count);
    }
}

fn fire_single(ctx: &mut TurnContext<'_>, name: String, at: Position, firing: Firing) {
    spend_shells(ctx, 1);
    ctx.record(BattleEvent::Fired {
        name: name.clone(),
        at,
    });

    let Some((target, target_name)) = CombatResolver::target_at(ctx, at) else {
        return;
    };
    ctx.record(BattleEvent::Hit {
        name,
        target: target_name.clone(),
    });
    CombatResolver::land_hit(ctx, target);

    let odds = ctx.config.odds;
    match firing {
        Firing::TrueDamage => {
            if ctx.roll(odds.true_damage) {
                CombatResolver::shift_revivals(ctx, target, false);
                ctx.record(BattleEvent::TrueDamage {
                    target: target_name,
                });
            }
        }
        Firing::Lifesteal => {
            if ctx.roll(odds.lifesteal) {
                CombatResolver::shift_revivals(ctx, target, true);
                ctx.record(BattleEvent::Lifesteal {
                    target: target_name,
                });
            }
        }
        _ => {}
    }
}

fn fire_burst(ctx: &mut TurnContext<'_>, name: String, at: Position, shots: u32) {
    spend_shells(ctx, shots);
    ctx.record(BattleEvent::BurstFired {
        name: name.clone(),
        at,
    });

    let chance = ctx.config.odds.burst_hit;
    for shot in 1..=shots {
        let connected = ctx.roll(chance);
        match CombatResolver::target_at(ctx, at).filter(|_| connected) {
            Some((target, target_name)) => {
                ctx.record(BattleEvent::BurstShotHit {
                    name: name.clone(),
                    shot,
                    target: target_name,
                });
                CombatResolver::land_hit(ctx, target);
            }
            None => ctx.record(BattleEvent::BurstShotMissed {
                name: name.clone(),
                shot,
            }),
        }
    }
}
