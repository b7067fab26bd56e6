//! Vision rules: which robots an observer can see.
//!
//! Every query skips the observer itself and dead robots, and returns
//! sightings in master-list order.

use serde::{Deserialize, Serialize};

use crate::entity::{Robot, RobotId};
use crate::grid::Position;

use super::TurnContext;

/// One robot seen by the actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
    /// Id of the robot seen.
    pub id: RobotId,
    /// Its name.
    pub name: String,
    /// Where it stands.
    pub position: Position,
}

impl Sighting {
    fn of(robot: &Robot) -> Self {
        Self {
            id: robot.id(),
            name: robot.name().to_owned(),
            position: robot.position(),
        }
    }
}

/// Namespace for visibility queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionResolver;

impl VisionResolver {
    /// Alive robots in the 3×3 neighbourhood of `center`.
    #[must_use]
    pub fn around(ctx: &TurnContext<'_>, center: Position) -> Vec<Sighting> {
        let cells = ctx.arena.grid().neighborhood(center);
        Self::visible(ctx, |robot| cells.contains(&robot.position()))
    }

    /// Every alive robot on the battlefield.
    #[must_use]
    pub fn everywhere(ctx: &TurnContext<'_>) -> Vec<Sighting> {
        Self::visible(ctx, |_| true)
    }

    /// Alive robots whose name appears in `names`.
    #[must_use]
    pub fn named(ctx: &TurnContext<'_>, names: &[String]) -> Vec<Sighting> {
        Self::visible(ctx, |robot| names.iter().any(|name| name == robot.name()))
    }

    fn visible(ctx: &TurnContext<'_>, filter: impl Fn(&Robot) -> bool) -> Vec<Sighting> {
        ctx.arena
            .alive()
            .filter(|robot| robot.id() != ctx.actor && filter(robot))
            .map(Sighting::of)
            .collect()
    }
}
