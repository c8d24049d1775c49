use std::fmt;

use serde::{Deserialize, Serialize};

/// Item tokens understood by the host server. Names match the host's own
/// identifiers so they can be logged and configured verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Coin,
    #[serde(rename = "GunCOM18")]
    GunCom18,
    Medkit,
    ArmorHeavy,
    ArmorLight,
    Radio,
    KeycardO5,
    KeycardJanitor,
    KeycardScientist,
    KeycardResearchCoordinator,
    KeycardZoneManager,
    KeycardGuard,
    #[serde(rename = "KeycardMTFPrivate")]
    KeycardMtfPrivate,
    KeycardContainmentEngineer,
    #[serde(rename = "KeycardMTFOperative")]
    KeycardMtfOperative,
    #[serde(rename = "KeycardMTFCaptain")]
    KeycardMtfCaptain,
    KeycardFacilityManager,
    KeycardChaosInsurgency,
    #[serde(rename = "GrenadeHE")]
    GrenadeHe,
    GrenadeFlash,
    GunCom45,
    ParticleDisruptor,
    Jailbird,
    #[serde(rename = "MicroHID")]
    MicroHid,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coin => "Coin",
            Self::GunCom18 => "GunCOM18",
            Self::Medkit => "Medkit",
            Self::ArmorHeavy => "ArmorHeavy",
            Self::ArmorLight => "ArmorLight",
            Self::Radio => "Radio",
            Self::KeycardO5 => "KeycardO5",
            Self::KeycardJanitor => "KeycardJanitor",
            Self::KeycardScientist => "KeycardScientist",
            Self::KeycardResearchCoordinator => "KeycardResearchCoordinator",
            Self::KeycardZoneManager => "KeycardZoneManager",
            Self::KeycardGuard => "KeycardGuard",
            Self::KeycardMtfPrivate => "KeycardMTFPrivate",
            Self::KeycardContainmentEngineer => "KeycardContainmentEngineer",
            Self::KeycardMtfOperative => "KeycardMTFOperative",
            Self::KeycardMtfCaptain => "KeycardMTFCaptain",
            Self::KeycardFacilityManager => "KeycardFacilityManager",
            Self::KeycardChaosInsurgency => "KeycardChaosInsurgency",
            Self::GrenadeHe => "GrenadeHE",
            Self::GrenadeFlash => "GrenadeFlash",
            Self::GunCom45 => "GunCom45",
            Self::ParticleDisruptor => "ParticleDisruptor",
            Self::Jailbird => "Jailbird",
            Self::MicroHid => "MicroHID",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardTier {
    Common,
    Rare,
    Legendary,
}

impl RewardTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Legendary => "legendary",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoinFlipOutcome {
    CoinLost,
    NoReward,
    ItemGranted { tier: RewardTier, item: ItemType },
}

impl CoinFlipOutcome {
    pub fn key(&self) -> &'static str {
        match self {
            Self::CoinLost => "coin_lost",
            Self::NoReward => "no_reward",
            Self::ItemGranted { tier, .. } => match tier {
                RewardTier::Common => "common_item",
                RewardTier::Rare => "rare_item",
                RewardTier::Legendary => "legendary_item",
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Tiered,
    Flat,
}

impl PolicyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tiered" => Some(Self::Tiered),
            "flat" => Some(Self::Flat),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServerEventType {
    PlayerCoinFlip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPriority {
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}
