use crate::constants::{
    COMMON_ITEM_PERCENT, FLAT_REWARD_PERCENT, LEGENDARY_ITEM_PERCENT, LOSE_COIN_PERCENT,
    PERCENT_BOUND, RARE_ITEM_PERCENT,
};
use crate::pools::ItemPool;
use crate::rng::Lcg;
use crate::types::{CoinFlipOutcome, ItemType, PolicyKind, RewardTier};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TieredOdds {
    pub lose_coin_percent: u32,
    pub rare_percent: u32,
    pub legendary_percent: u32,
    pub common_percent: u32,
}

impl Default for TieredOdds {
    fn default() -> Self {
        Self {
            lose_coin_percent: LOSE_COIN_PERCENT,
            rare_percent: RARE_ITEM_PERCENT,
            legendary_percent: LEGENDARY_ITEM_PERCENT,
            common_percent: COMMON_ITEM_PERCENT,
        }
    }
}

/// Coin loss first, then rare, legendary and common checks in that order.
///
/// Each check rolls a fresh value, so the legendary check only runs after the
/// rare roll has failed and the common check only after both have failed.
#[derive(Clone, Debug)]
pub struct TieredRewardPolicy {
    pub common: ItemPool,
    pub rare: ItemPool,
    pub legendary: ItemPool,
    pub odds: TieredOdds,
}

impl Default for TieredRewardPolicy {
    fn default() -> Self {
        Self {
            common: ItemPool::default_common(),
            rare: ItemPool::default_rare(),
            legendary: ItemPool::default_legendary(),
            odds: TieredOdds::default(),
        }
    }
}

impl TieredRewardPolicy {
    fn resolve(&self, rng: &mut Lcg) -> CoinFlipOutcome {
        if roll_below(rng, self.odds.lose_coin_percent) {
            return CoinFlipOutcome::CoinLost;
        }

        if roll_below(rng, self.odds.rare_percent) {
            grant(rng, RewardTier::Rare, &self.rare)
        } else if roll_below(rng, self.odds.legendary_percent) {
            grant(rng, RewardTier::Legendary, &self.legendary)
        } else if roll_below(rng, self.odds.common_percent) {
            grant(rng, RewardTier::Common, &self.common)
        } else {
            CoinFlipOutcome::NoReward
        }
    }
}

/// Single pool, single check, coin is never lost.
#[derive(Clone, Debug)]
pub struct FlatRewardPolicy {
    pub pool: ItemPool,
    pub reward_percent: u32,
}

impl Default for FlatRewardPolicy {
    fn default() -> Self {
        Self {
            pool: ItemPool::default_common(),
            reward_percent: FLAT_REWARD_PERCENT,
        }
    }
}

impl FlatRewardPolicy {
    fn resolve(&self, rng: &mut Lcg) -> CoinFlipOutcome {
        if roll_below(rng, self.reward_percent) {
            grant(rng, RewardTier::Common, &self.pool)
        } else {
            CoinFlipOutcome::NoReward
        }
    }
}

#[derive(Clone, Debug)]
pub enum RewardPolicy {
    Tiered(TieredRewardPolicy),
    Flat(FlatRewardPolicy),
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self::Tiered(TieredRewardPolicy::default())
    }
}

impl RewardPolicy {
    pub fn default_for(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Tiered => Self::Tiered(TieredRewardPolicy::default()),
            PolicyKind::Flat => Self::Flat(FlatRewardPolicy::default()),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Tiered(_) => PolicyKind::Tiered,
            Self::Flat(_) => PolicyKind::Flat,
        }
    }

    pub fn resolve(&self, rng: &mut Lcg) -> CoinFlipOutcome {
        match self {
            Self::Tiered(policy) => policy.resolve(rng),
            Self::Flat(policy) => policy.resolve(rng),
        }
    }
}

pub(crate) fn pick_item(rng: &mut Lcg, pool: &ItemPool) -> ItemType {
    pool.get(rng.pick_index(pool.len()))
}

fn roll_below(rng: &mut Lcg, percent: u32) -> bool {
    rng.next_bounded(PERCENT_BOUND) < percent
}

fn grant(rng: &mut Lcg, tier: RewardTier, pool: &ItemPool) -> CoinFlipOutcome {
    CoinFlipOutcome::ItemGranted {
        tier,
        item: pick_item(rng, pool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(percent: u32) -> TieredOdds {
        TieredOdds {
            lose_coin_percent: percent,
            rare_percent: percent,
            legendary_percent: percent,
            common_percent: percent,
        }
    }

    #[test]
    fn certain_coin_loss_takes_one_draw() {
        let policy = TieredRewardPolicy {
            odds: always(100),
            ..TieredRewardPolicy::default()
        };
        let mut rng = Lcg::new(7);
        assert_eq!(policy.resolve(&mut rng), CoinFlipOutcome::CoinLost);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn all_checks_failing_takes_four_draws() {
        let policy = TieredRewardPolicy {
            odds: always(0),
            ..TieredRewardPolicy::default()
        };
        let mut rng = Lcg::new(7);
        assert_eq!(policy.resolve(&mut rng), CoinFlipOutcome::NoReward);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn legendary_check_runs_only_after_rare_check_fails() {
        let policy = TieredRewardPolicy {
            odds: TieredOdds {
                lose_coin_percent: 0,
                rare_percent: 0,
                legendary_percent: 100,
                common_percent: 100,
            },
            ..TieredRewardPolicy::default()
        };
        let mut rng = Lcg::new(99);
        assert_eq!(
            policy.resolve(&mut rng),
            CoinFlipOutcome::ItemGranted {
                tier: RewardTier::Legendary,
                item: ItemType::MicroHid,
            }
        );
        // coin, rare, legendary checks plus the item pick
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn common_grant_comes_from_common_pool() {
        let policy = TieredRewardPolicy {
            odds: TieredOdds {
                lose_coin_percent: 0,
                rare_percent: 0,
                legendary_percent: 0,
                common_percent: 100,
            },
            ..TieredRewardPolicy::default()
        };
        let mut rng = Lcg::new(3);
        for _ in 0..50 {
            match policy.resolve(&mut rng) {
                CoinFlipOutcome::ItemGranted {
                    tier: RewardTier::Common,
                    item,
                } => assert!(policy.common.contains(item)),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        assert_eq!(rng.draws(), 50 * 5);
    }

    #[test]
    fn flat_policy_never_loses_the_coin() {
        let policy = RewardPolicy::default_for(PolicyKind::Flat);
        let mut rng = Lcg::new(1_234);
        for _ in 0..10_000 {
            assert_ne!(policy.resolve(&mut rng), CoinFlipOutcome::CoinLost);
        }
    }

    #[test]
    fn flat_policy_draws_once_or_twice() {
        let policy = FlatRewardPolicy {
            pool: ItemPool::new(vec![ItemType::Radio, ItemType::Medkit]).unwrap(),
            reward_percent: 0,
        };
        let mut rng = Lcg::new(5);
        assert_eq!(policy.resolve(&mut rng), CoinFlipOutcome::NoReward);
        assert_eq!(rng.draws(), 1);

        let policy = FlatRewardPolicy {
            reward_percent: 100,
            ..policy
        };
        assert!(matches!(
            policy.resolve(&mut rng),
            CoinFlipOutcome::ItemGranted {
                tier: RewardTier::Common,
                ..
            }
        ));
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn tiered_rates_match_conditional_order() {
        let policy = TieredRewardPolicy::default();
        let mut rng = Lcg::new(2_024);
        let samples = 200_000;
        let mut lost = 0;
        let mut rare = 0;
        let mut legendary = 0;
        let mut common = 0;
        for _ in 0..samples {
            match policy.resolve(&mut rng) {
                CoinFlipOutcome::CoinLost => lost += 1,
                CoinFlipOutcome::ItemGranted { tier, .. } => match tier {
                    RewardTier::Rare => rare += 1,
                    RewardTier::Legendary => legendary += 1,
                    RewardTier::Common => common += 1,
                },
                CoinFlipOutcome::NoReward => {}
            }
        }
        let ratio = |count: i32| f64::from(count) / f64::from(samples);
        assert!((ratio(lost) - 0.10).abs() < 0.01, "lost ratio {}", ratio(lost));
        // 0.90 * 0.05
        assert!((ratio(rare) - 0.045).abs() < 0.005, "rare ratio {}", ratio(rare));
        // 0.90 * 0.95 * 0.01; successive LCG draws are correlated and land near 1.04%
        assert!(
            (ratio(legendary) - 0.00855).abs() < 0.0025,
            "legendary ratio {}",
            ratio(legendary)
        );
        // 0.90 * 0.95 * 0.99 * 0.25
        assert!(
            (ratio(common) - 0.2116).abs() < 0.005,
            "common ratio {}",
            ratio(common)
        );
    }

    #[test]
    fn tiered_branches_follow_raw_draw_order() {
        let policy = TieredRewardPolicy::default();
        let mut rng = Lcg::new(77);
        let mut raw = Lcg::new(77);
        let mut legendary_seen = 0;
        for _ in 0..20_000 {
            let expected = if raw.next_bounded(100) < 10 {
                CoinFlipOutcome::CoinLost
            } else if raw.next_bounded(100) < 5 {
                let item = policy.rare.get(raw.pick_index(policy.rare.len()));
                CoinFlipOutcome::ItemGranted {
                    tier: RewardTier::Rare,
                    item,
                }
            } else if raw.next_bounded(100) < 1 {
                legendary_seen += 1;
                let item = policy.legendary.get(raw.pick_index(policy.legendary.len()));
                CoinFlipOutcome::ItemGranted {
                    tier: RewardTier::Legendary,
                    item,
                }
            } else if raw.next_bounded(100) < 25 {
                let item = policy.common.get(raw.pick_index(policy.common.len()));
                CoinFlipOutcome::ItemGranted {
                    tier: RewardTier::Common,
                    item,
                }
            } else {
                CoinFlipOutcome::NoReward
            };
            assert_eq!(policy.resolve(&mut rng), expected);
            assert_eq!(rng.state(), raw.state());
        }
        assert!(legendary_seen > 0);
    }
}
