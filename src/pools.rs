use crate::types::ItemType;

/// Ordered, non-empty list of items a single reward tier can grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemPool {
    items: Vec<ItemType>,
}

impl ItemPool {
    /// Returns `None` for an empty list; every pool in use has at least one item.
    pub fn new(items: Vec<ItemType>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[ItemType] {
        &self.items
    }

    pub fn contains(&self, item: ItemType) -> bool {
        self.items.contains(&item)
    }

    pub(crate) fn get(&self, index: usize) -> ItemType {
        self.items[index]
    }

    pub fn default_common() -> Self {
        Self {
            items: vec![
                ItemType::Coin,
                ItemType::GunCom18,
                ItemType::Medkit,
                ItemType::ArmorHeavy,
                ItemType::ArmorLight,
                ItemType::Radio,
                ItemType::KeycardO5,
                ItemType::KeycardJanitor,
                ItemType::KeycardScientist,
                ItemType::KeycardResearchCoordinator,
                ItemType::KeycardZoneManager,
                ItemType::KeycardGuard,
                ItemType::KeycardMtfPrivate,
                ItemType::KeycardContainmentEngineer,
                ItemType::KeycardMtfOperative,
                ItemType::KeycardMtfCaptain,
                ItemType::KeycardFacilityManager,
                ItemType::KeycardChaosInsurgency,
                ItemType::GrenadeHe,
                ItemType::GrenadeFlash,
            ],
        }
    }

    pub fn default_rare() -> Self {
        Self {
            items: vec![
                ItemType::GunCom45,
                ItemType::ParticleDisruptor,
                ItemType::Jailbird,
            ],
        }
    }

    pub fn default_legendary() -> Self {
        Self {
            items: vec![ItemType::MicroHid],
        }
    }
}
