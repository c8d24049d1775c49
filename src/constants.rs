pub const LCG_MULTIPLIER: u32 = 1_664_525;
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Every probability check rolls against this bound.
pub const PERCENT_BOUND: u32 = 100;

pub const LOSE_COIN_PERCENT: u32 = 10;
pub const RARE_ITEM_PERCENT: u32 = 5;
pub const LEGENDARY_ITEM_PERCENT: u32 = 1;
pub const COMMON_ITEM_PERCENT: u32 = 25;
pub const FLAT_REWARD_PERCENT: u32 = 25;

pub const PLUGIN_NAME: &str = "CoinFlipLogger";
pub const PLUGIN_VERSION: &str = "1.1.0";
pub const PLUGIN_DESCRIPTION: &str = "Logs when a player flips a coin and occasionally rewards them with items, with some risk of losing the coin.";
pub const PLUGIN_AUTHOR: &str = "CoinFlipLogger contributors";
