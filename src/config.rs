use {
    crate::{
        chain::AcrossChain,
        error::{Error, Result},
    },
    alloy_chains::NamedChain,
    alloy_primitives::{Address, U256, utils::parse_ether},
    alloy_signer_local::PrivateKeySigner,
    std::{env, str::FromStr},
};

/// 0.0002 ETH in wei
pub const DEFAULT_BRIDGE_AMOUNT: U256 = U256::from_limbs([200_000_000_000_000, 0, 0, 0]);
/// 0.01 ETH in wei, a gas margin on top of the bridged amount
pub const DEFAULT_MIN_BALANCE: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Everything the bridge flow needs, resolved once at startup and passed
/// down explicitly
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    pub signer: PrivateKeySigner,
    pub origin: NamedChain,
    pub destination: NamedChain,
    pub input_symbol: String,
    pub output_symbol: String,
    /// Amount to bridge, in wei of the origin chain's native unit
    pub amount: U256,
    /// Minimum origin balance required before attempting a bridge, in wei
    pub min_balance: U256,
    api_key: String,
}

impl BridgeConfig {
    /// Resolves the configuration from the process environment.
    ///
    /// `EVM_SECRET_KEY` and `ALCHEMY_API_KEY` are required. The balance
    /// threshold and bridged amount can be overridden with
    /// `MIN_BALANCE_ETH` and `BRIDGE_AMOUNT_ETH`, both in display units.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret_key = get("EVM_SECRET_KEY").ok_or(Error::MissingCredential("EVM_SECRET_KEY"))?;
        let signer = PrivateKeySigner::from_str(&secret_key)
            .map_err(|e| Error::InvalidConfig(format!("invalid private key: {e}")))?;
        let api_key = get("ALCHEMY_API_KEY").ok_or(Error::MissingCredential("ALCHEMY_API_KEY"))?;

        let min_balance = match get("MIN_BALANCE_ETH") {
            Some(v) => parse_display_amount("MIN_BALANCE_ETH", &v)?,
            None => DEFAULT_MIN_BALANCE,
        };
        let amount = match get("BRIDGE_AMOUNT_ETH") {
            Some(v) => parse_display_amount("BRIDGE_AMOUNT_ETH", &v)?,
            None => DEFAULT_BRIDGE_AMOUNT,
        };

        Ok(Self {
            signer,
            origin: NamedChain::Sepolia,
            destination: NamedChain::BaseSepolia,
            input_symbol: "ETH".to_string(),
            output_symbol: "WETH".to_string(),
            amount,
            min_balance,
            api_key,
        })
    }

    /// The address funds are sent from and delivered to
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Assembles the RPC URL for a chain from the provider path and the
    /// project credential. Reachability is not checked here; a bad URL
    /// surfaces on first use.
    pub fn rpc_url(&self, chain: NamedChain) -> Result<reqwest::Url> {
        let subdomain = chain.rpc_subdomain()?;
        format!("https://{subdomain}.g.alchemy.com/v2/{}", self.api_key)
            .parse()
            .map_err(|e| Error::InvalidConfig(format!("invalid RPC URL: {e}")))
    }
}

fn parse_display_amount(key: &str, value: &str) -> Result<U256> {
    parse_ether(value).map_err(|e| Error::InvalidConfig(format!("bad {key} value {value}: {e}")))
}

#[cfg(test)]
mod tests {
    use {super::*, alloy_primitives::utils::parse_ether, std::collections::HashMap};

    // anvil's first well-known dev key
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn from_vars(pairs: &[(&str, &str)]) -> Result<BridgeConfig> {
        let map = vars(pairs);
        BridgeConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_missing_secret_key_is_fatal() {
        let result = from_vars(&[("ALCHEMY_API_KEY", "abc")]);
        assert!(matches!(
            result.unwrap_err(),
            Error::MissingCredential("EVM_SECRET_KEY")
        ));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let result = from_vars(&[("EVM_SECRET_KEY", TEST_KEY)]);
        assert!(matches!(
            result.unwrap_err(),
            Error::MissingCredential("ALCHEMY_API_KEY")
        ));
    }

    #[test]
    fn test_defaults() {
        let config = from_vars(&[("EVM_SECRET_KEY", TEST_KEY), ("ALCHEMY_API_KEY", "abc")])
            .expect("config should resolve");
        assert_eq!(config.origin, NamedChain::Sepolia);
        assert_eq!(config.destination, NamedChain::BaseSepolia);
        assert_eq!(config.input_symbol, "ETH");
        assert_eq!(config.output_symbol, "WETH");
        assert_eq!(config.amount, parse_ether("0.0002").unwrap());
        assert_eq!(config.min_balance, parse_ether("0.01").unwrap());
    }

    #[test]
    fn test_threshold_override() {
        let config = from_vars(&[
            ("EVM_SECRET_KEY", TEST_KEY),
            ("ALCHEMY_API_KEY", "abc"),
            ("MIN_BALANCE_ETH", "0.5"),
        ])
        .expect("config should resolve");
        assert_eq!(config.min_balance, parse_ether("0.5").unwrap());
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let result = from_vars(&[
            ("EVM_SECRET_KEY", TEST_KEY),
            ("ALCHEMY_API_KEY", "abc"),
            ("MIN_BALANCE_ETH", "lots"),
        ]);
        assert!(matches!(result.unwrap_err(), Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rpc_url_assembly() {
        let config = from_vars(&[("EVM_SECRET_KEY", TEST_KEY), ("ALCHEMY_API_KEY", "proj123")])
            .expect("config should resolve");
        let url = config.rpc_url(NamedChain::Sepolia).unwrap();
        assert_eq!(
            url.as_str(),
            "https://eth-sepolia.g.alchemy.com/v2/proj123"
        );
    }

    #[test]
    fn test_rpc_url_unsupported_chain() {
        let config = from_vars(&[("EVM_SECRET_KEY", TEST_KEY), ("ALCHEMY_API_KEY", "abc")])
            .expect("config should resolve");
        assert!(config.rpc_url(NamedChain::Fantom).is_err());
    }
}
