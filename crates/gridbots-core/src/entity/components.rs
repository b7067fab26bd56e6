//! State components for robots.
//!
//! A robot's mutable state is split into small plain structs so behaviours
//! can borrow exactly the counters they touch. [`RobotState`] bundles them
//! together with the robot's [`Loadout`].

use serde::{Deserialize, Serialize};

use crate::capability::Loadout;
use crate::config::RobotDefaults;
use crate::grid::Position;

// =============================================================================
// Tier Flags
// =============================================================================

bitflags::bitflags! {
    /// Upgrade tiers a robot has attained.
    ///
    /// Flags only ever accumulate over one robot's lifetime.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TierFlags: u8 {
        /// A movement specialisation (hide, jump or charge) was chosen.
        const FIRST = 0b001;
        /// A firing specialisation was added.
        const SECOND = 0b010;
        /// A vision specialisation was added.
        const THIRD = 0b100;
    }
}

// =============================================================================
// Components
// =============================================================================

/// Health and revival budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// Health counter; the robot is dead at zero.
    pub lives: u32,
    /// Revivals left once the robot dies.
    pub revivals: u32,
}

/// Ammunition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arsenal {
    /// Shells left; firing with none self-destructs.
    pub shells: u32,
}

/// Remaining uses of the special abilities.
///
/// Every robot carries every counter; only the ones its loadout uses are
/// ever consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charges {
    /// Damage calls a hiding robot can still absorb.
    pub hides: u32,
    /// Random jumps left.
    pub jumps: u32,
    /// Full-board scans left.
    pub scans: u32,
    /// Tracker markers left to attach.
    pub trackers: u32,
}

/// Upgrade currency and attained tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Unspent upgrade points; one is earned per landed hit.
    pub points: u32,
    /// Tiers attained so far.
    pub tiers: TierFlags,
}

// =============================================================================
// Robot State
// =============================================================================

/// Complete mutable state of one robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    /// Unique name within the battle.
    pub name: String,
    /// Current cell.
    pub position: Position,
    /// Health and revivals.
    pub vitals: Vitals,
    /// Ammunition.
    pub arsenal: Arsenal,
    /// Special-ability counters.
    pub charges: Charges,
    /// Upgrade points and tiers.
    pub progress: Progress,
    /// One behaviour per capability axis.
    pub loadout: Loadout,
    /// Names of robots carrying this robot's tracker markers.
    pub tracked: Vec<String>,
}

impl RobotState {
    /// Builds an unspecialised robot with the default counters.
    #[must_use]
    pub fn generic(name: impl Into<String>, position: Position, defaults: &RobotDefaults) -> Self {
        Self::build(name.into(), position, Loadout::default(), defaults, defaults.revivals)
    }

    /// Builds the next-tier replacement for this robot.
    ///
    /// Counters start fresh for the new loadout. Name, position, revivals and
    /// earlier tiers carry over, and one upgrade point is spent.
    #[must_use]
    pub fn promoted(&self, loadout: Loadout, tiers: TierFlags, defaults: &RobotDefaults) -> Self {
        let mut next = Self::build(
            self.name.clone(),
            self.position,
            loadout,
            defaults,
            self.vitals.revivals,
        );
        next.progress = Progress {
            points: self.progress.points.saturating_sub(1),
            tiers: self.progress.tiers | tiers,
        };
        next
    }

    /// Builds the fresh tier-0 robot that replaces this one on revival.
    ///
    /// Only the name and the remaining revival budget survive; the caller has
    /// already spent the revival being used.
    #[must_use]
    pub fn revived(&self, position: Position, defaults: &RobotDefaults) -> Self {
        Self::build(
            self.name.clone(),
            position,
            Loadout::default(),
            defaults,
            self.vitals.revivals,
        )
    }

    fn build(
        name: String,
        position: Position,
        loadout: Loadout,
        defaults: &RobotDefaults,
        revivals: u32,
    ) -> Self {
        Self {
            name,
            position,
            vitals: Vitals {
                lives: defaults.lives,
                revivals,
            },
            arsenal: Arsenal {
                shells: loadout.firing.starting_shells(defaults),
            },
            charges: Charges {
                hides: defaults.hides,
                jumps: defaults.jumps,
                scans: defaults.scans,
                trackers: defaults.trackers,
            },
            progress: Progress::default(),
            loadout,
            tracked: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Defense, Firing, Movement, Vision};
    use glam::IVec2;

    fn veteran() -> RobotState {
        let defaults = RobotDefaults::default();
        let mut state = RobotState::generic("Vex", IVec2::new(2, 3), &defaults);
        state.vitals.revivals = 2;
        state.arsenal.shells = 1;
        state.charges.jumps = 0;
        state.progress = Progress {
            points: 3,
            tiers: TierFlags::FIRST,
        };
        state.loadout.movement = Movement::Jump;
        state.tracked.push("Zed".into());
        state
    }

    #[test]
    fn generic_robot_uses_defaults() {
        let state = RobotState::generic("Ann", IVec2::ZERO, &RobotDefaults::default());
        assert_eq!(state.vitals.lives, 1);
        assert_eq!(state.vitals.revivals, 3);
        assert_eq!(state.arsenal.shells, 10);
        assert_eq!(state.charges.hides, 3);
        assert_eq!(state.progress.points, 0);
        assert!(state.progress.tiers.is_empty());
        assert_eq!(state.loadout, Loadout::default());
    }

    #[test]
    fn promotion_spends_one_point_and_keeps_earlier_tiers() {
        let old = veteran();
        let loadout = Loadout {
            firing: Firing::Longshot,
            ..old.loadout
        };
        let next = old.promoted(loadout, TierFlags::SECOND, &RobotDefaults::default());

        assert_eq!(next.name, "Vex");
        assert_eq!(next.position, IVec2::new(2, 3));
        assert_eq!(next.vitals.revivals, 2);
        assert_eq!(next.progress.points, 2);
        assert_eq!(next.progress.tiers, TierFlags::FIRST | TierFlags::SECOND);
        assert_eq!(next.loadout.movement, Movement::Jump);
        assert_eq!(next.loadout.firing, Firing::Longshot);
    }

    #[test]
    fn promotion_refreshes_counters() {
        let old = veteran();
        let next = old.promoted(old.loadout, TierFlags::SECOND, &RobotDefaults::default());
        assert_eq!(next.arsenal.shells, 10);
        assert_eq!(next.charges.jumps, 3);
        assert!(next.tracked.is_empty());
    }

    #[test]
    fn extended_magazine_starts_with_thirty_shells() {
        let old = veteran();
        let loadout = Loadout {
            firing: Firing::Thirtyshot,
            ..old.loadout
        };
        let next = old.promoted(loadout, TierFlags::SECOND, &RobotDefaults::default());
        assert_eq!(next.arsenal.shells, 30);
    }

    #[test]
    fn revival_resets_everything_but_name_and_budget() {
        let mut old = veteran();
        old.loadout = Loadout {
            movement: Movement::Normal,
            firing: Firing::Semiauto,
            vision: Vision::Tracker,
            defense: Some(Defense::Hide),
        };
        old.vitals.lives = 0;

        let revived = old.revived(IVec2::new(0, 4), &RobotDefaults::default());
        assert_eq!(revived.name, "Vex");
        assert_eq!(revived.position, IVec2::new(0, 4));
        assert_eq!(revived.vitals.lives, 1);
        assert_eq!(revived.vitals.revivals, 2);
        assert_eq!(revived.progress, Progress::default());
        assert_eq!(revived.loadout, Loadout::default());
        assert!(revived.tracked.is_empty());
    }

    #[test]
    fn tier_flags_accumulate() {
        let mut tiers = TierFlags::empty();
        tiers |= TierFlags::FIRST;
        tiers |= TierFlags::SECOND;
        assert!(tiers.contains(TierFlags::FIRST));
        assert!(!tiers.contains(TierFlags::THIRD));
        assert_eq!(tiers.bits(), 0b011);
    }
}
