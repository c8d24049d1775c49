use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    COMMON_ITEM_PERCENT, FLAT_REWARD_PERCENT, LEGENDARY_ITEM_PERCENT, LOSE_COIN_PERCENT,
    PERCENT_BOUND, RARE_ITEM_PERCENT,
};
use crate::error::ConfigError;
use crate::policy::{FlatRewardPolicy, RewardPolicy, TieredOdds, TieredRewardPolicy};
use crate::pools::ItemPool;
use crate::types::{ItemType, PolicyKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OddsConfig {
    pub lose_coin_percent: u32,
    pub rare_percent: u32,
    pub legendary_percent: u32,
    pub common_percent: u32,
    pub flat_reward_percent: u32,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            lose_coin_percent: LOSE_COIN_PERCENT,
            rare_percent: RARE_ITEM_PERCENT,
            legendary_percent: LEGENDARY_ITEM_PERCENT,
            common_percent: COMMON_ITEM_PERCENT,
            flat_reward_percent: FLAT_REWARD_PERCENT,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolsConfig {
    pub common: Option<Vec<ItemType>>,
    pub rare: Option<Vec<ItemType>>,
    pub legendary: Option<Vec<ItemType>>,
    pub flat: Option<Vec<ItemType>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    pub policy: PolicyKind,
    pub seed: Option<u32>,
    pub odds: OddsConfig,
    pub pools: PoolsConfig,
}

impl PluginConfig {
    pub fn build_policy(&self) -> Result<RewardPolicy, ConfigError> {
        let odds = &self.odds;
        match self.policy {
            PolicyKind::Tiered => Ok(RewardPolicy::Tiered(TieredRewardPolicy {
                common: build_pool("common", &self.pools.common, ItemPool::default_common)?,
                rare: build_pool("rare", &self.pools.rare, ItemPool::default_rare)?,
                legendary: build_pool(
                    "legendary",
                    &self.pools.legendary,
                    ItemPool::default_legendary,
                )?,
                odds: TieredOdds {
                    lose_coin_percent: check_percent("loseCoinPercent", odds.lose_coin_percent)?,
                    rare_percent: check_percent("rarePercent", odds.rare_percent)?,
                    legendary_percent: check_percent("legendaryPercent", odds.legendary_percent)?,
                    common_percent: check_percent("commonPercent", odds.common_percent)?,
                },
            })),
            PolicyKind::Flat => Ok(RewardPolicy::Flat(FlatRewardPolicy {
                pool: build_pool("flat", &self.pools.flat, ItemPool::default_common)?,
                reward_percent: check_percent("flatRewardPercent", odds.flat_reward_percent)?,
            })),
        }
    }
}

pub fn load_config(path: &Path) -> Result<PluginConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build_pool(
    name: &'static str,
    items: &Option<Vec<ItemType>>,
    fallback: fn() -> ItemPool,
) -> Result<ItemPool, ConfigError> {
    match items {
        None => Ok(fallback()),
        Some(items) => ItemPool::new(items.clone()).ok_or(ConfigError::EmptyPool { pool: name }),
    }
}

fn check_percent(field: &'static str, value: u32) -> Result<u32, ConfigError> {
    if value > PERCENT_BOUND {
        return Err(ConfigError::InvalidPercent { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn empty_document_uses_defaults() {
        let config: PluginConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PluginConfig::default());
        match config.build_policy().unwrap() {
            RewardPolicy::Tiered(policy) => {
                assert_eq!(policy.odds, TieredOdds::default());
                assert_eq!(policy.rare, ItemPool::default_rare());
            }
            RewardPolicy::Flat(_) => panic!("default policy should be tiered"),
        }
    }

    #[test]
    fn flat_policy_with_custom_pool() {
        let config: PluginConfig = serde_json::from_str(
            r#"{
                "policy": "flat",
                "seed": 77,
                "odds": { "flatRewardPercent": 40 },
                "pools": { "flat": ["Medkit", "GunCOM18"] }
            }"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(77));
        match config.build_policy().unwrap() {
            RewardPolicy::Flat(policy) => {
                assert_eq!(policy.reward_percent, 40);
                assert_eq!(policy.pool.items(), &[ItemType::Medkit, ItemType::GunCom18]);
            }
            RewardPolicy::Tiered(_) => panic!("expected flat policy"),
        }
    }

    #[test]
    fn empty_pool_override_is_rejected() {
        let config: PluginConfig =
            serde_json::from_str(r#"{ "pools": { "legendary": [] } }"#).unwrap();
        let error = config.build_policy().unwrap_err();
        assert!(matches!(error, ConfigError::EmptyPool { pool: "legendary" }));
        assert_eq!(error.to_string(), "legendary pool must contain at least one item");
    }

    #[test]
    fn percent_above_bound_is_rejected() {
        let config: PluginConfig =
            serde_json::from_str(r#"{ "odds": { "rarePercent": 101 } }"#).unwrap();
        assert!(matches!(
            config.build_policy(),
            Err(ConfigError::InvalidPercent {
                field: "rarePercent",
                value: 101
            })
        ));
    }

    #[test]
    fn unknown_item_name_fails_to_parse() {
        let result = serde_json::from_str::<PluginConfig>(r#"{ "pools": { "rare": ["Scp500"] } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let target = std::env::temp_dir().join(format!("coin-flip-missing-{now}.json"));
        assert!(matches!(
            load_config(&target),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn load_config_reads_json_file() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let target = std::env::temp_dir().join(format!("coin-flip-config-{now}.json"));
        fs::write(&target, r#"{ "policy": "flat" }"#).unwrap();
        let config = load_config(&target).unwrap();
        let _ = fs::remove_file(&target);
        assert_eq!(config.policy, PolicyKind::Flat);
    }
}
