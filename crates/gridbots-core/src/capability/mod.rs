//! Capability behaviours and their composition.
//!
//! A robot carries exactly one behaviour per axis:
//!
//! - [`Movement`]: normal, jump or charge
//! - [`Firing`]: normal, true damage, lifesteal, longshot, semi-auto or the
//!   extended magazine
//! - [`Vision`]: normal, scout or tracker
//!
//! plus an optional [`Defense`] modifier that intercepts incoming damage.
//! The axes are independent: any combination is a valid [`Loadout`], and a
//! new variant on one axis never touches the others.
//!
//! # Turn Sequence
//!
//! [`take_turn`] runs one robot's turn: think, look, fire, move. Each action
//! phase draws its own offset from the 3×3 block around zero immediately
//! before it runs. A robot that dies mid-turn (self-destruct) skips the
//! remaining phases.
//!
//! # Example
//!
//! ```
//! use gridbots_core::capability::{Defense, Firing, Loadout, Movement, Vision};
//!
//! let loadout = Loadout {
//!     movement: Movement::Normal,
//!     firing: Firing::Longshot,
//!     vision: Vision::Scout,
//!     defense: Some(Defense::Hide),
//! };
//! assert_eq!(loadout.kind_label(), "HideLongshotScoutBot");
//! assert_eq!(Loadout::default().kind_label(), "GenericRobot");
//! ```

mod defense;
mod firing;
mod movement;
mod vision;

pub use defense::Defense;
pub use firing::Firing;
pub use movement::Movement;
pub use vision::Vision;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::BattleEvent;
use crate::grid::Position;
use crate::resolver::TurnContext;

// =============================================================================
// Traits
// =============================================================================

/// One axis of a robot's loadout.
pub trait Capability: Copy + Eq + fmt::Debug + 'static {
    /// The non-baseline variants, in the order used for random selection.
    const SPECIALISATIONS: &'static [Self];

    /// Fragment this variant contributes to the kind label.
    ///
    /// Baseline variants contribute an empty string.
    fn label(self) -> &'static str;
}

/// A capability that acts during the robot's turn.
pub trait TurnAction: Capability {
    /// Performs the action for `ctx.actor`, given the requested offset.
    ///
    /// Invalid targets and exhausted resources are handled here and logged;
    /// nothing is ever returned to the caller.
    fn perform(self, ctx: &mut TurnContext<'_>, offset: Position);
}

// =============================================================================
// Loadout
// =============================================================================

/// The full capability set attached to one robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Loadout {
    /// How the robot moves.
    pub movement: Movement,
    /// How the robot fires.
    pub firing: Firing,
    /// How the robot looks.
    pub vision: Vision,
    /// Optional damage interception.
    pub defense: Option<Defense>,
}

impl Loadout {
    /// Display name of the kind this loadout describes.
    ///
    /// Axis labels are joined as defense/movement, firing, vision, then
    /// `Bot`. A loadout with no specialisation is a `GenericRobot`.
    #[must_use]
    pub fn kind_label(&self) -> String {
        let mut label = String::new();
        if let Some(defense) = self.defense {
            label.push_str(defense.label());
        }
        label.push_str(self.movement.label());
        label.push_str(self.firing.label());
        label.push_str(self.vision.label());

        if label.is_empty() {
            return "GenericRobot".to_owned();
        }
        label.push_str("Bot");
        label
    }

    /// Returns `true` if no axis is specialised.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Loadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind_label())
    }
}

// =============================================================================
// Turn
// =============================================================================

/// Runs one full turn for `ctx.actor`.
pub fn take_turn(ctx: &mut TurnContext<'_>) {
    let Some(loadout) = ctx.actor().map(|robot| robot.state().loadout) else {
        return;
    };

    think(ctx);

    let offset = ctx.random_offset();
    loadout.vision.perform(ctx, offset);

    let offset = ctx.random_offset();
    loadout.firing.perform(ctx, offset);
    if !ctx.actor_alive() {
        return;
    }

    let offset = ctx.random_offset();
    loadout.movement.perform(ctx, offset);
}

fn think(ctx: &mut TurnContext<'_>) {
    if let Some((name, _)) = ctx.snapshot() {
        ctx.record(BattleEvent::Thinking { name });
    }
}
