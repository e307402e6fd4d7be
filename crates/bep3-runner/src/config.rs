//! # Runner Configuration
//!
//! Wallets, asset table, and timing parameters for a local run. Defaults
//! match the public testnet deputy deployment; environment variables
//! override the timing knobs so a local run does not sit through the
//! full relay window.

use bep3_core::{AssetInfo, AssetRegistry, SwapConfig};
use std::time::Duration;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A BIP39 mnemonic that never appears in Debug output or logs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Wrap a mnemonic phrase.
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    /// Borrow the phrase for key derivation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Mnemonic(***)")
    }
}

/// Complete runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Home chain RPC endpoint.
    pub home_endpoint: String,
    /// Foreign chain RPC endpoint.
    pub foreign_endpoint: String,
    /// Signing wallet on the home chain, bech32.
    pub home_wallet: String,
    /// Signing wallet on the foreign chain, bech32.
    pub foreign_wallet: String,
    /// Home-chain signing mnemonic.
    pub home_mnemonic: Mnemonic,
    /// Foreign-chain signing mnemonic.
    pub foreign_mnemonic: Mnemonic,
    /// Orchestrator timing parameters.
    pub swap: SwapConfig,
    /// How often the simulated deputy scans for new escrows.
    pub deputy_relay_interval: Duration,
    /// Per-asset amount for the deputy loader, in the foreign chain's unit.
    pub deputy_load_amount: u64,
    /// Configured swap assets.
    pub assets: AssetRegistry,
}

impl RunnerConfig {
    /// Validate the configuration before any chain interaction.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - Either mnemonic is not a 24-word phrase
    /// - The asset table is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, mnemonic) in [
            ("home", &self.home_mnemonic),
            ("foreign", &self.foreign_mnemonic),
        ] {
            if mnemonic.as_str().split_whitespace().count() != 24 {
                return Err(ConfigError::InvalidMnemonic(name));
            }
        }
        if self.assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// A signing mnemonic is not a 24-word phrase.
    InvalidMnemonic(&'static str),
    /// The asset table is empty.
    NoAssets,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidMnemonic(side) => {
                write!(f, "{side} mnemonic is not a 24-word phrase")
            }
            ConfigError::NoAssets => write!(f, "no swap assets configured"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            home_endpoint: "http://localhost:1317".to_string(),
            foreign_endpoint: "http://localhost:8080".to_string(),
            home_wallet: "kava1c0ju5vnwgpgxnrktfnkccuth9xqc68dcdpzpas".to_string(),
            foreign_wallet: "bnb10rr5f8m73rxgnz9afvnfn7fn9pwhfskem5kn0x".to_string(),
            home_mnemonic: Mnemonic::new(
                "arrive guide way exit polar print kitchen hair series custom siege afraid \
                 shrug crew fashion mind script divorce pattern trust project regular robust safe",
            ),
            foreign_mnemonic: Mnemonic::new(
                "village fiscal december liquid better drink disorder unusual tent ivory cage \
                 diesel bike slab tilt spray wife neck oak science beef upper chapter blade",
            ),
            swap: SwapConfig::default(),
            deputy_relay_interval: Duration::from_secs(5),
            deputy_load_amount: 100_000,
            assets: default_assets(),
        }
    }
}

/// The deputy's public asset table: denominations, hot wallets, and unit
/// scaling for each supported asset pair.
pub fn default_assets() -> AssetRegistry {
    let mut registry = AssetRegistry::new();
    registry.insert(
        "bnb",
        AssetInfo {
            origin_denom: "BNB".to_string(),
            dest_denom: "bnb".to_string(),
            origin_deputy_address: "bnb1zfa5vmsme2v3ttvqecfleeh2xtz5zghh49hfqe".to_string(),
            dest_deputy_address: "kava1agcvt07tcw0tglu0hmwdecsnuxp2yd45f3avgm".to_string(),
            conversion_factor: 100_000_000,
        },
    );
    registry.insert(
        "btcb",
        AssetInfo {
            origin_denom: "BTCB-1DE".to_string(),
            dest_denom: "btcb".to_string(),
            origin_deputy_address: "bnb1z8ryd66lhc4d9c0mmxx9zyyq4t3cqht9mt0qz3".to_string(),
            dest_deputy_address: "kava1kla4wl0ccv7u85cemvs3y987hqk0afcv7vue84".to_string(),
            conversion_factor: 100_000_000,
        },
    );
    registry.insert(
        "xrpb",
        AssetInfo {
            origin_denom: "XRP-BF2".to_string(),
            dest_denom: "xrpb".to_string(),
            origin_deputy_address: "bnb1ryrenacljwghhc5zlnxs3pd86amta3jcaagyt0".to_string(),
            dest_deputy_address: "kava14q5sawxdxtpap5x5sgzj7v4sp3ucncjlpuk3hs".to_string(),
            conversion_factor: 100_000_000,
        },
    );
    registry.insert(
        "busd",
        AssetInfo {
            origin_denom: "BUSD-BD1".to_string(),
            dest_denom: "busd".to_string(),
            origin_deputy_address: "bnb1j20j0e62n2l9sefxnu596a6jyn5x29lk2syd5j".to_string(),
            dest_deputy_address: "kava1j9je7f6s0v6k7dmgv6u5k5ru202f5ffsc7af04".to_string(),
            conversion_factor: 100_000_000,
        },
    );
    registry
}

/// Build the config from defaults plus environment overrides.
pub fn load_config() -> RunnerConfig {
    let mut config = RunnerConfig::default();

    if let Ok(url) = std::env::var("BEP3_HOME_ENDPOINT") {
        config.home_endpoint = url;
    }
    if let Ok(url) = std::env::var("BEP3_FOREIGN_ENDPOINT") {
        config.foreign_endpoint = url;
    }
    if let Ok(phrase) = std::env::var("BEP3_HOME_MNEMONIC") {
        config.home_mnemonic = Mnemonic::new(phrase);
    }
    if let Ok(phrase) = std::env::var("BEP3_FOREIGN_MNEMONIC") {
        config.foreign_mnemonic = Mnemonic::new(phrase);
    }
    if let Ok(secs) = env_u64("BEP3_RELAY_WAIT_SECS") {
        config.swap.relay_wait = Duration::from_secs(secs);
    }
    if let Ok(secs) = env_u64("BEP3_CONFIRM_TIMEOUT_SECS") {
        config.swap.confirm_timeout = Duration::from_secs(secs);
    }
    if let Ok(secs) = env_u64("BEP3_RELAY_INTERVAL_SECS") {
        config.deputy_relay_interval = Duration::from_secs(secs);
    }
    if let Ok(amount) = env_u64("BEP3_DEPUTY_LOAD_AMOUNT") {
        config.deputy_load_amount = amount;
    }

    config
}

fn env_u64(name: &str) -> Result<u64, ()> {
    std::env::var(name)
        .map_err(|_| ())
        .and_then(|v| v.parse().map_err(|_| ()))
}
