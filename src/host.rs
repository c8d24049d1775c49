use std::collections::HashMap;

use crate::types::{ItemType, ServerEventType};

/// Host-side player handle passed to coin flip handlers.
pub trait Player {
    fn user_id(&self) -> &str;
    fn nickname(&self) -> &str;
    fn current_item(&self) -> Option<ItemType>;
    fn add_item(&mut self, item: ItemType);
    fn remove_item(&mut self, item: ItemType);
}

pub trait LogSink {
    fn info(&self, message: &str);
}

pub type CoinFlipCallback = Box<dyn FnMut(&mut dyn Player)>;

pub trait EventBus {
    fn subscribe(&mut self, event: ServerEventType, handler: CoinFlipCallback);
}

/// In-process bus that runs handlers one at a time in subscription order.
#[derive(Default)]
pub struct LocalEventBus {
    handlers: HashMap<ServerEventType, Vec<CoinFlipCallback>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler_count(&self, event: ServerEventType) -> usize {
        self.handlers.get(&event).map_or(0, Vec::len)
    }

    pub fn dispatch_coin_flip(&mut self, player: &mut dyn Player) -> usize {
        let Some(handlers) = self.handlers.get_mut(&ServerEventType::PlayerCoinFlip) else {
            return 0;
        };
        for handler in handlers.iter_mut() {
            handler(player);
        }
        handlers.len()
    }
}

impl EventBus for LocalEventBus {
    fn subscribe(&mut self, event: ServerEventType, handler: CoinFlipCallback) {
        self.handlers.entry(event).or_default().push(handler);
    }
}

/// Minimal player used by the simulator and tests: an id, a name and an
/// inventory whose first slot is the held item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimPlayer {
    pub id: String,
    pub name: String,
    pub inventory: Vec<ItemType>,
    pub added: Vec<ItemType>,
    pub removed: Vec<ItemType>,
}

impl SimPlayer {
    pub fn holding_coin(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            inventory: vec![ItemType::Coin],
            ..Self::default()
        }
    }

    /// Drops everything gathered by earlier flips and puts a single coin back
    /// in hand.
    pub fn reset_hand(&mut self) {
        self.inventory.clear();
        self.inventory.push(ItemType::Coin);
        self.added.clear();
        self.removed.clear();
    }
}

impl Player for SimPlayer {
    fn user_id(&self) -> &str {
        &self.id
    }

    fn nickname(&self) -> &str {
        &self.name
    }

    fn current_item(&self) -> Option<ItemType> {
        self.inventory.first().copied()
    }

    fn add_item(&mut self, item: ItemType) {
        self.inventory.push(item);
        self.added.push(item);
    }

    fn remove_item(&mut self, item: ItemType) {
        if let Some(index) = self.inventory.iter().position(|held| *held == item) {
            self.inventory.remove(index);
            self.removed.push(item);
        }
    }
}
