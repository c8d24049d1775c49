use crate::config::PluginConfig;
use crate::constants::{PLUGIN_AUTHOR, PLUGIN_DESCRIPTION, PLUGIN_NAME, PLUGIN_VERSION};
use crate::error::ConfigError;
use crate::host::{EventBus, LogSink, Player};
use crate::resolver::RewardResolver;
use crate::types::{CoinFlipOutcome, LoadPriority, RewardTier, ServerEventType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub priority: LoadPriority,
}

/// Applies resolved outcomes to the flipping player and writes the log lines.
pub struct CoinFlipHandler<L: LogSink> {
    resolver: RewardResolver,
    log: L,
}

impl<L: LogSink> CoinFlipHandler<L> {
    pub fn new(resolver: RewardResolver, log: L) -> Self {
        Self { resolver, log }
    }

    pub fn resolver(&self) -> &RewardResolver {
        &self.resolver
    }

    pub fn on_coin_flip(&mut self, player: &mut dyn Player) -> CoinFlipOutcome {
        let who = format!("{} ({})", player.nickname(), player.user_id());
        self.log.info(&format!("{who} flipped a coin."));

        let outcome = self.resolver.resolve_coin_flip();
        match outcome {
            CoinFlipOutcome::CoinLost => {
                if let Some(held) = player.current_item() {
                    player.remove_item(held);
                }
                self.log.info(&format!("{who} lost the coin."));
            }
            CoinFlipOutcome::NoReward => {}
            CoinFlipOutcome::ItemGranted { tier, item } => {
                player.add_item(item);
                let line = match tier {
                    RewardTier::Common => format!("{who} received a {item}."),
                    RewardTier::Rare => format!("{who} received a rare item: {item}."),
                    RewardTier::Legendary => format!("{who} received a legendary item: {item}."),
                };
                self.log.info(&line);
            }
        }
        outcome
    }
}

pub struct CoinFlipPlugin;

impl CoinFlipPlugin {
    pub const INFO: PluginInfo = PluginInfo {
        name: PLUGIN_NAME,
        version: PLUGIN_VERSION,
        description: PLUGIN_DESCRIPTION,
        author: PLUGIN_AUTHOR,
        priority: LoadPriority::High,
    };

    /// Builds the resolver from `config` and subscribes it to coin flips.
    /// Without a configured seed the generator is seeded from the clock.
    pub fn enable<L>(
        config: &PluginConfig,
        bus: &mut dyn EventBus,
        log: L,
    ) -> Result<(), ConfigError>
    where
        L: LogSink + Clone + 'static,
    {
        Self::enable_with_observer(config, bus, log, |_, _| {})
    }

    /// Same as [`CoinFlipPlugin::enable`], and `observer` sees every outcome
    /// together with the resolver state right after it was resolved.
    pub fn enable_with_observer<L, F>(
        config: &PluginConfig,
        bus: &mut dyn EventBus,
        log: L,
        mut observer: F,
    ) -> Result<(), ConfigError>
    where
        L: LogSink + Clone + 'static,
        F: FnMut(CoinFlipOutcome, &RewardResolver) + 'static,
    {
        let policy = config.build_policy()?;
        let resolver = match config.seed {
            Some(seed) => RewardResolver::new(seed, policy),
            None => RewardResolver::from_clock(policy),
        };

        let mut handler = CoinFlipHandler::new(resolver, log.clone());
        bus.subscribe(
            ServerEventType::PlayerCoinFlip,
            Box::new(move |player: &mut dyn Player| {
                let outcome = handler.on_coin_flip(player);
                observer(outcome, handler.resolver());
            }),
        );
        Self::announce(&log);
        Ok(())
    }

    pub fn announce(log: &impl LogSink) {
        log.info(&format!("{} plugin has been enabled.", Self::INFO.name));
    }
}
