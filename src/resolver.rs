use crate::policy::{pick_item, RewardPolicy};
use crate::pools::ItemPool;
use crate::rng::Lcg;
use crate::types::{CoinFlipOutcome, ItemType};

/// Owns the generator and the active policy. Every coin flip advances the
/// same generator, so outcomes are reproducible as one sequence per resolver.
#[derive(Clone, Debug)]
pub struct RewardResolver {
    rng: Lcg,
    policy: RewardPolicy,
}

impl RewardResolver {
    pub fn new(seed: u32, policy: RewardPolicy) -> Self {
        Self {
            rng: Lcg::new(seed),
            policy,
        }
    }

    pub fn from_clock(policy: RewardPolicy) -> Self {
        Self {
            rng: Lcg::from_clock(),
            policy,
        }
    }

    pub fn next_random(&mut self, bound: u32) -> u32 {
        self.rng.next_bounded(bound)
    }

    pub fn pick_item(&mut self, pool: &ItemPool) -> ItemType {
        pick_item(&mut self.rng, pool)
    }

    pub fn resolve_coin_flip(&mut self) -> CoinFlipOutcome {
        self.policy.resolve(&mut self.rng)
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn draws(&self) -> u64 {
        self.rng.draws()
    }

    /// Resolves `events` flips on a fresh resolver seeded with `seed`.
    pub fn replay(seed: u32, policy: RewardPolicy, events: usize) -> (Self, Vec<CoinFlipOutcome>) {
        let mut resolver = Self::new(seed, policy);
        let outcomes = (0..events).map(|_| resolver.resolve_coin_flip()).collect();
        (resolver, outcomes)
    }
}
