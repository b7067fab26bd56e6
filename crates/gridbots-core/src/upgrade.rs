//! The upgrade tree.
//!
//! Tiers are taken strictly in order. Each promotion locks in one more axis:
//!
//! | Tier | Axis | Options |
//! |------|------|---------|
//! | 1 | movement or defense | Hide, Jump, Charge |
//! | 2 | firing | every [`Firing`] specialisation |
//! | 3 | vision | every [`Vision`] specialisation |
//!
//! A robot holding all three tiers is never promoted again.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::capability::{Capability, Defense, Firing, Loadout, Movement, Vision};
use crate::entity::TierFlags;

/// One specialisation chosen during a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    /// Tier 1 defense pick.
    Defense(Defense),
    /// Tier 1 movement pick.
    Movement(Movement),
    /// Tier 2 pick.
    Firing(Firing),
    /// Tier 3 pick.
    Vision(Vision),
}

impl Upgrade {
    /// Every option available when attaining `tier`.
    ///
    /// `tier` must be a single flag; anything else has no options.
    #[must_use]
    pub fn options(tier: TierFlags) -> Vec<Self> {
        if tier == TierFlags::FIRST {
            Defense::SPECIALISATIONS
                .iter()
                .copied()
                .map(Self::Defense)
                .chain(Movement::SPECIALISATIONS.iter().copied().map(Self::Movement))
                .collect()
        } else if tier == TierFlags::SECOND {
            Firing::SPECIALISATIONS.iter().copied().map(Self::Firing).collect()
        } else if tier == TierFlags::THIRD {
            Vision::SPECIALISATIONS.iter().copied().map(Self::Vision).collect()
        } else {
            Vec::new()
        }
    }

    /// Picks one option for `tier` uniformly at random.
    pub fn choose<R: Rng>(tier: TierFlags, rng: &mut R) -> Option<Self> {
        let options = Self::options(tier);
        if options.is_empty() {
            return None;
        }
        Some(options[rng.gen_range(0..options.len())])
    }

    /// Returns `loadout` with this pick locked in.
    #[must_use]
    pub fn apply(self, loadout: Loadout) -> Loadout {
        match self {
            Self::Defense(defense) => Loadout {
                defense: Some(defense),
                ..loadout
            },
            Self::Movement(movement) => Loadout { movement, ..loadout },
            Self::Firing(firing) => Loadout { firing, ..loadout },
            Self::Vision(vision) => Loadout { vision, ..loadout },
        }
    }
}

/// The next tier a robot holding `tiers` would attain.
#[must_use]
pub fn next_tier(tiers: TierFlags) -> Option<TierFlags> {
    [TierFlags::FIRST, TierFlags::SECOND, TierFlags::THIRD]
        .into_iter()
        .find(|tier| !tiers.contains(*tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    mod tier_tests {
        use super::*;

        #[test]
        fn tiers_are_taken_in_order() {
            assert_eq!(next_tier(TierFlags::empty()), Some(TierFlags::FIRST));
            assert_eq!(next_tier(TierFlags::FIRST), Some(TierFlags::SECOND));
            assert_eq!(
                next_tier(TierFlags::FIRST | TierFlags::SECOND),
                Some(TierFlags::THIRD)
            );
            assert_eq!(next_tier(TierFlags::all()), None);
        }

        #[test]
        fn option_counts_per_tier() {
            assert_eq!(Upgrade::options(TierFlags::FIRST).len(), 3);
            assert_eq!(Upgrade::options(TierFlags::SECOND).len(), 5);
            assert_eq!(Upgrade::options(TierFlags::THIRD).len(), 2);
            assert!(Upgrade::options(TierFlags::all()).is_empty());
        }

        #[test]
        fn tier_one_offers_hide_jump_and_charge() {
            let options = Upgrade::options(TierFlags::FIRST);
            assert!(options.contains(&Upgrade::Defense(Defense::Hide)));
            assert!(options.contains(&Upgrade::Movement(Movement::Jump)));
            assert!(options.contains(&Upgrade::Movement(Movement::Charge)));
        }
    }

    mod choice_tests {
        use super::*;

        #[test]
        fn every_option_is_reachable() {
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            let seen: HashSet<_> = (0..500)
                .filter_map(|_| Upgrade::choose(TierFlags::SECOND, &mut rng))
                .collect();
            assert_eq!(seen.len(), 5);
        }

        #[test]
        fn combined_flags_have_no_choice() {
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            assert_eq!(Upgrade::choose(TierFlags::empty(), &mut rng), None);
            assert_eq!(Upgrade::choose(TierFlags::all(), &mut rng), None);
        }
    }

    mod apply_tests {
        use super::*;

        #[test]
        fn apply_touches_only_its_axis() {
            let base = Loadout {
                movement: Movement::Jump,
                ..Loadout::default()
            };
            let next = Upgrade::Firing(Firing::Semiauto).apply(base);
            assert_eq!(next.movement, Movement::Jump);
            assert_eq!(next.firing, Firing::Semiauto);
            assert_eq!(next.vision, Vision::Normal);
            assert_eq!(next.defense, None);
        }

        #[test]
        fn hide_keeps_normal_movement() {
            let next = Upgrade::Defense(Defense::Hide).apply(Loadout::default());
            assert_eq!(next.kind_label(), "HideBot");
            assert_eq!(next.movement, Movement::Normal);
        }
    }
}
