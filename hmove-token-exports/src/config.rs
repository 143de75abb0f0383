// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This file defines the configuration structures of a token

use crate::error::TokenError;
use hmove_models::config::build_hmove_settings;
use hmove_models::{Address, Amount};
use serde::Deserialize;

/// Number of fractional digits of every token amount
pub const TOKEN_DECIMALS: u8 = hmove_models::constants::AMOUNT_DECIMALS;

/// Token configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// display name
    pub name: String,
    /// ticker
    pub symbol: String,
    /// name of the signing domain
    pub eip712_name: String,
    /// chain identifier of the environment
    pub chain_id: u64,
    /// address of the token itself
    pub contract_address: Address,
    /// supply minted to the deployer
    pub initial_supply: Amount,
}

impl TokenConfig {
    /// HyperMove profile: one billion tokens minted to the deployer
    pub fn hyper_move(chain_id: u64, contract_address: Address) -> Self {
        TokenConfig {
            name: "HyperMove".to_string(),
            symbol: "HMove".to_string(),
            eip712_name: "HMove".to_string(),
            chain_id,
            contract_address,
            initial_supply: Amount::from_raw(
                1_000_000_000 * hmove_models::constants::AMOUNT_DECIMAL_FACTOR,
            ),
        }
    }

    /// HyperBurn profile: nothing minted at deployment
    pub fn hyper_burn(chain_id: u64, contract_address: Address) -> Self {
        TokenConfig {
            name: "HyperBurn".to_string(),
            symbol: "HBurn".to_string(),
            eip712_name: "HyperBurn".to_string(),
            chain_id,
            contract_address,
            initial_supply: Amount::zero(),
        }
    }

    /// Load a token configuration from the layered settings.
    /// Settings are read under the `token` key.
    pub fn load(app_name: &str, env_prefix: &str) -> Result<Self, TokenError> {
        let settings: TokenFileSettings = build_hmove_settings(app_name, env_prefix)?;
        TokenConfig::try_from(settings.token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenFileSettings {
    token: TokenSettings,
}

/// Token settings as they appear in configuration files
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    /// display name
    pub name: String,
    /// ticker
    pub symbol: String,
    /// name of the signing domain, the display name when absent
    pub eip712_name: Option<String>,
    /// chain identifier of the environment
    pub chain_id: u64,
    /// address of the token itself
    pub contract_address: Address,
    /// supply minted to the deployer, zero when absent
    pub initial_supply: Option<Amount>,
}

impl TryFrom<TokenSettings> for TokenConfig {
    type Error = TokenError;

    fn try_from(settings: TokenSettings) -> Result<Self, Self::Error> {
        if settings.name.is_empty() {
            return Err(TokenError::ConfigError("empty token name".to_string()));
        }
        if settings.symbol.is_empty() {
            return Err(TokenError::ConfigError("empty token symbol".to_string()));
        }
        if settings.contract_address.is_zero() {
            return Err(TokenError::ConfigError("contract address cannot be zero".to_string()));
        }
        Ok(TokenConfig {
            eip712_name: settings
                .eip712_name
                .unwrap_or_else(|| settings.name.clone()),
            name: settings.name,
            symbol: settings.symbol,
            chain_id: settings.chain_id,
            contract_address: settings.contract_address,
            initial_supply: settings.initial_supply.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmove_models::config::{CONFIG_OVERRIDE_PATH_ENV, CONFIG_PATH_ENV};
    use serial_test::serial;
    use std::str::FromStr;

    #[test]
    fn test_profiles() {
        let contract = Address::from_bytes(&[9; 20]);
        let hmove = TokenConfig::hyper_move(1, contract);
        assert_eq!(hmove.symbol, "HMove");
        assert_eq!(hmove.eip712_name, "HMove");
        assert_eq!(
            hmove.initial_supply,
            Amount::from_str("1000000000").unwrap()
        );
        let hburn = TokenConfig::hyper_burn(1, contract);
        assert_eq!(hburn.name, "HyperBurn");
        assert!(hburn.initial_supply.is_zero());
    }

    #[test]
    fn test_settings_conversion() {
        let settings: TokenSettings = serde_json::from_str(
            r#"{
                "name": "HyperMove",
                "symbol": "HMove",
                "chain_id": 31337,
                "contract_address": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
                "initial_supply": "1000000000"
            }"#,
        )
        .unwrap();
        let config = TokenConfig::try_from(settings).unwrap();
        assert_eq!(config.eip712_name, "HyperMove");
        assert_eq!(config.chain_id, 31337);
        assert_eq!(
            config.initial_supply,
            Amount::from_str("1000000000").unwrap()
        );
    }

    #[test]
    fn test_settings_rejects_zero_contract() {
        let settings: TokenSettings = serde_json::from_str(
            r#"{
                "name": "HyperMove",
                "symbol": "HMove",
                "chain_id": 1,
                "contract_address": "0x0000000000000000000000000000000000000000"
            }"#,
        )
        .unwrap();
        assert!(matches!(
            TokenConfig::try_from(settings),
            Err(TokenError::ConfigError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_load_from_layers() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("config.toml");
        std::fs::write(
            &base,
            "[token]\nname = \"HyperBurn\"\nsymbol = \"HBurn\"\nchain_id = 1\n\
             contract_address = \"0x5fbdb2315678afecb367f032d93f642f64180aa3\"\n",
        )
        .unwrap();
        std::env::set_var(CONFIG_PATH_ENV, &base);
        std::env::set_var(CONFIG_OVERRIDE_PATH_ENV, dir.path().join("none.toml"));
        std::env::set_var("HMOVE_LOAD_TEST__TOKEN__CHAIN_ID", "56");

        let config = TokenConfig::load("hmove-load-test", "HMOVE_LOAD_TEST").unwrap();
        assert_eq!(config.name, "HyperBurn");
        assert_eq!(config.eip712_name, "HyperBurn");
        assert_eq!(config.chain_id, 56);
        assert!(config.initial_supply.is_zero());

        std::env::remove_var("HMOVE_LOAD_TEST__TOKEN__CHAIN_ID");
        std::env::remove_var(CONFIG_OVERRIDE_PATH_ENV);
        std::env::remove_var(CONFIG_PATH_ENV);
    }
}
