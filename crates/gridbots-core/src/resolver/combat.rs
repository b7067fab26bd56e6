//! Combat rules shared by every firing and movement behaviour.
//!
//! # Damage Handling
//!
//! A damage call on a robot with a [`Defense`](crate::capability::Defense)
//! is routed through that modifier first. Without one, damage always costs
//! exactly one life. Lives saturate at zero; a dead robot stays in the arena
//! until triage.

use crate::entity::{Robot, RobotId};
use crate::event::BattleEvent;
use crate::grid::Position;

use super::TurnContext;

/// Namespace for damage and targeting rules.
///
/// # Example
///
/// ```
/// use gridbots_core::resolver::CombatResolver;
///
/// let _resolver = CombatResolver::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates a combat resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The alive robot other than the actor standing on `cell`.
    #[must_use]
    pub fn target_at(ctx: &TurnContext<'_>, cell: Position) -> Option<(RobotId, String)> {
        ctx.arena
            .alive()
            .find(|robot| robot.id() != ctx.actor && robot.position() == cell)
            .map(|robot| (robot.id(), robot.name().to_owned()))
    }

    /// Applies one damage call to `target`.
    pub fn take_damage(ctx: &mut TurnContext<'_>, target: RobotId) {
        let Some(robot) = ctx.arena.get_mut(target) else {
            return;
        };
        let state = robot.state_mut();
        let event = match state.loadout.defense {
            Some(defense) => defense.intercept(state),
            None => {
                state.vitals.lives = state.vitals.lives.saturating_sub(1);
                BattleEvent::Damaged {
                    name: state.name.clone(),
                }
            }
        };
        tracing::debug!(
            target_name = %state.name,
            lives = state.vitals.lives,
            "damage applied"
        );
        ctx.record(event);
    }

    /// Damages `target` and credits the actor with an upgrade point.
    ///
    /// The point is awarded whenever the shot connects, even if the target's
    /// defense absorbs it.
    pub fn land_hit(ctx: &mut TurnContext<'_>, target: RobotId) {
        Self::take_damage(ctx, target);
        ctx.award_point();
    }

    /// Kills the actor outright.
    pub fn self_destruct(ctx: &mut TurnContext<'_>) {
        let Some(state) = ctx.actor_state_mut() else {
            return;
        };
        state.vitals.lives = 0;
        let name = state.name.clone();
        ctx.record(BattleEvent::SelfDestructed { name });
    }

    /// Adjusts `target`'s revival budget by one in either direction.
    pub fn shift_revivals(ctx: &mut TurnContext<'_>, target: RobotId, gain: bool) {
        if let Some(state) = ctx.arena.get_mut(target).map(Robot::state_mut) {
            state.vitals.revivals = if gain {
                state.vitals.revivals + 1
            } else {
                state.vitals.revivals.saturating_sub(1)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Defense, Loadout};
    use crate::tests::Scene;
    use glam::IVec2;

    fn hider() -> Loadout {
        Loadout {
            defense: Some(Defense::Hide),
            ..Loadout::default()
        }
    }

    mod targeting_tests {
        use super::*;

        #[test]
        fn finds_alive_occupant() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn("Bob", 1, 1);
            let ctx = scene.ctx(ace);
            assert_eq!(
                CombatResolver::target_at(&ctx, IVec2::new(1, 1)),
                Some((bob, "Bob".to_owned()))
            );
            assert_eq!(CombatResolver::target_at(&ctx, IVec2::new(2, 2)), None);
        }

        #[test]
        fn ignores_dead_robots_and_actor() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn("Bob", 1, 1);
            scene.state_mut(bob).vitals.lives = 0;
            let ctx = scene.ctx(ace);
            assert_eq!(CombatResolver::target_at(&ctx, IVec2::new(1, 1)), None);
            assert_eq!(CombatResolver::target_at(&ctx, IVec2::new(0, 0)), None);
        }
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn plain_robot_loses_one_life() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn("Bob", 1, 1);
            CombatResolver::take_damage(&mut scene.ctx(ace), bob);

            assert_eq!(scene.state(bob).vitals.lives, 0);
            assert_eq!(scene.take_lines(), vec!["Bob is taking damage!"]);
        }

        #[test]
        fn lives_never_underflow() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn("Bob", 1, 1);
            for _ in 0..3 {
                CombatResolver::take_damage(&mut scene.ctx(ace), bob);
            }
            assert_eq!(scene.state(bob).vitals.lives, 0);
        }

        #[test]
        fn three_hides_absorb_three_hits_then_fourth_damages() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn_with("Bob", 1, 1, hider());

            for expected in [2, 1, 0] {
                CombatResolver::take_damage(&mut scene.ctx(ace), bob);
                assert_eq!(scene.state(bob).vitals.lives, 1);
                assert_eq!(scene.state(bob).charges.hides, expected);
            }

            CombatResolver::take_damage(&mut scene.ctx(ace), bob);
            assert_eq!(scene.state(bob).vitals.lives, 0);
            assert_eq!(scene.state(bob).charges.hides, 0);

            let lines = scene.take_lines();
            assert_eq!(lines[0], "Bob is hiding and avoids the hit. Hides left: 2");
            assert_eq!(
                lines[3],
                "Bob tried to hide but has no hides left! Taking damage!"
            );
        }

        #[test]
        fn land_hit_awards_point_even_when_absorbed() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn_with("Bob", 1, 1, hider());
            CombatResolver::land_hit(&mut scene.ctx(ace), bob);

            assert_eq!(scene.state(ace).progress.points, 1);
            assert_eq!(scene.state(bob).vitals.lives, 1);
        }

        #[test]
        fn damage_to_missing_robot_is_ignored() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn("Bob", 1, 1);
            scene.arena.despawn(bob);
            CombatResolver::take_damage(&mut scene.ctx(ace), bob);
            assert!(scene.take_lines().is_empty());
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn self_destruct_kills_actor() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            CombatResolver::self_destruct(&mut scene.ctx(ace));
            assert_eq!(scene.state(ace).vitals.lives, 0);
            assert_eq!(
                scene.take_lines(),
                vec!["Ace is out of shells and self-destructs!"]
            );
        }

        #[test]
        fn revivals_shift_without_underflow() {
            let mut scene = Scene::new(5, 5);
            let ace = scene.spawn("Ace", 0, 0);
            let bob = scene.spawn("Bob", 1, 1);
            scene.state_mut(bob).vitals.revivals = 0;

            CombatResolver::shift_revivals(&mut scene.ctx(ace), bob, false);
            assert_eq!(scene.state(bob).vitals.revivals, 0);

            CombatResolver::shift_revivals(&mut scene.ctx(ace), bob, true);
            assert_eq!(scene.state(bob).vitals.revivals, 1);
        }
    }
}
