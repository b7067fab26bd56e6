//! Battle configuration.
//!
//! Every field has a default matching the classic rules, so an empty JSON
//! object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Starting counters for a freshly built robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotDefaults {
    /// Health counter.
    pub lives: u32,
    /// Ammunition for every firing variant except the extended magazine.
    pub shells: u32,
    /// Ammunition for the extended-magazine firing variant.
    pub extended_shells: u32,
    /// Damage calls a hiding robot can absorb.
    pub hides: u32,
    /// Random jumps available to a jumping robot.
    pub jumps: u32,
    /// Full-board scans available to a scout.
    pub scans: u32,
    /// Tracker markers a tracker can attach.
    pub trackers: u32,
    /// Revival budget for robots loaded from the roster.
    pub revivals: u32,
}

impl Default for RobotDefaults {
    fn default() -> Self {
        Self {
            lives: 1,
            shells: 10,
            extended_shells: 30,
            hides: 3,
            jumps: 3,
            scans: 3,
            trackers: 3,
            revivals: 3,
        }
    }
}

/// Probabilities and ranges used by the firing variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatOdds {
    /// Chance that a true-damage hit also removes one revival.
    pub true_damage: f64,
    /// Chance that a lifesteal hit also grants the target one revival.
    pub lifesteal: f64,
    /// Per-shot hit chance of a semi-auto burst.
    pub burst_hit: f64,
    /// Maximum Manhattan distance of a longshot.
    pub longshot_range: i32,
    /// Shots (and shells) per semi-auto burst.
    pub burst_shots: u32,
}

impl Default for CombatOdds {
    fn default() -> Self {
        Self {
            true_damage: 0.5,
            lifesteal: 0.5,
            burst_hit: 0.7,
            longshot_range: 3,
            burst_shots: 3,
        }
    }
}

/// Complete configuration for one battle.
///
/// # Example
///
/// ```
/// use gridbots_core::config::BattleConfig;
///
/// let config = BattleConfig::default().with_max_rounds(50);
/// assert_eq!(config.max_rounds, 50);
/// assert_eq!(config.robot.shells, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Step budget: the battle stops after this many rounds.
    pub max_rounds: u32,
    /// Starting counters for robots.
    pub robot: RobotDefaults,
    /// Firing probabilities and ranges.
    pub odds: CombatOdds,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            robot: RobotDefaults::default(),
            odds: CombatOdds::default(),
        }
    }
}

impl BattleConfig {
    /// Returns a copy with a different step budget.
    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}
