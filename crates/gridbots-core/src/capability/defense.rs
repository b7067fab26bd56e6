//! Damage-interception modifiers.

use serde::{Deserialize, Serialize};

use crate::entity::RobotState;
use crate::event::BattleEvent;

use super::Capability;

/// Optional modifier consulted whenever the robot takes damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defense {
    /// Each hide charge fully absorbs one damage call.
    Hide,
}

impl Capability for Defense {
    const SPECIALISATIONS: &'static [Self] = &[Self::Hide];

    fn label(self) -> &'static str {
        match self {
            Self::Hide => "Hide",
        }
    }
}

impl Defense {
    /// Handles one incoming damage call against `state`.
    ///
    /// While hide charges remain, one is spent and the robot loses nothing.
    /// Afterwards every call costs a life.
    pub fn intercept(self, state: &mut RobotState) -> BattleEvent {
        match self {
            Self::Hide => {
                let name = state.name.clone();
                if state.charges.hides > 0 {
                    state.charges.hides -= 1;
                    BattleEvent::HideAbsorbed {
                        name,
                        remaining: state.charges.hides,
                    }
                } else {
                    state.vitals.lives = state.vitals.lives.saturating_sub(1);
                    BattleEvent::HideExhausted { name }
                }
            }
        }
    }
}
