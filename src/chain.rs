use {
    crate::error::{Error, Result},
    alloy_chains::NamedChain,
    alloy_primitives::{Address, address},
};

/// Across V3 SpokePool deployments
///
/// See <https://docs.across.to/reference/contract-addresses>
pub const ETHEREUM_SPOKE_POOL: Address = address!("0x5c7BCd6E7De5423a257D81B442095A1a6ced35C5");
pub const OPTIMISM_SPOKE_POOL: Address = address!("0x6f26Bf09B1C792e3228e5467807a900A503c0281");
pub const ARBITRUM_SPOKE_POOL: Address = address!("0xe35e9842fceaCA96570B734083f4a58e8F7C5f2A");
pub const BASE_SPOKE_POOL: Address = address!("0x09aea4b2242abC8bb4BB78D537A67a245A7bEC64");
pub const POLYGON_SPOKE_POOL: Address = address!("0x9295ee1d8C5b022Be115A2AD3c30C72E34e7F096");
pub const SEPOLIA_SPOKE_POOL: Address = address!("0x5ef6C01E11889d86803e0B23e3cB3F9E9d97B662");
pub const BASE_SEPOLIA_SPOKE_POOL: Address =
    address!("0x82B564983aE7274c86695917BBf8C99ECb6F0F8F");
pub const ARBITRUM_SEPOLIA_SPOKE_POOL: Address =
    address!("0x7E63A5f1a8F0B4d0934B2f2327DAED3F6bb2ee75");
pub const OPTIMISM_SEPOLIA_SPOKE_POOL: Address =
    address!("0x4e8E101924eDE233C13e2D8622DC8aED2872d505");

/// Trait for chains reachable through the Across bridge
pub trait AcrossChain {
    /// The address of the Across `SpokePool` contract on the chain, the
    /// entry point for deposits and fills
    fn spoke_pool_address(&self) -> Result<Address>;

    /// The Alchemy host prefix used to assemble the chain's RPC URL
    fn rpc_subdomain(&self) -> Result<&'static str>;

    /// Check if the chain is supported for Across bridging
    fn is_supported(&self) -> bool;

    /// Testnets are served by the sandbox API host
    fn sandbox(&self) -> bool;
}

impl AcrossChain for NamedChain {
    fn spoke_pool_address(&self) -> Result<Address> {
        use NamedChain::*;

        let address = match self {
            Mainnet => ETHEREUM_SPOKE_POOL,
            Optimism => OPTIMISM_SPOKE_POOL,
            Arbitrum => ARBITRUM_SPOKE_POOL,
            Base => BASE_SPOKE_POOL,
            Polygon => POLYGON_SPOKE_POOL,
            // Testnets
            Sepolia => SEPOLIA_SPOKE_POOL,
            BaseSepolia => BASE_SEPOLIA_SPOKE_POOL,
            ArbitrumSepolia => ARBITRUM_SEPOLIA_SPOKE_POOL,
            OptimismSepolia => OPTIMISM_SEPOLIA_SPOKE_POOL,
            _ => {
                return Err(Error::ChainNotSupported {
                    chain: self.to_string(),
                });
            }
        };
        Ok(address)
    }

    fn rpc_subdomain(&self) -> Result<&'static str> {
        use NamedChain::*;

        let subdomain = match self {
            Mainnet => "eth-mainnet",
            Optimism => "opt-mainnet",
            Arbitrum => "arb-mainnet",
            Base => "base-mainnet",
            Polygon => "polygon-mainnet",
            // Testnets
            Sepolia => "eth-sepolia",
            BaseSepolia => "base-sepolia",
            ArbitrumSepolia => "arb-sepolia",
            OptimismSepolia => "opt-sepolia",
            _ => {
                return Err(Error::ChainNotSupported {
                    chain: self.to_string(),
                });
            }
        };
        Ok(subdomain)
    }

    fn is_supported(&self) -> bool {
        use NamedChain::*;

        matches!(
            self,
            Mainnet
                | Optimism
                | Arbitrum
                | Base
                | Polygon
                | Sepolia
                | BaseSepolia
                | ArbitrumSepolia
                | OptimismSepolia
        )
    }

    fn sandbox(&self) -> bool {
        self.is_testnet()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(NamedChain::Mainnet, true)]
    #[case(NamedChain::Optimism, true)]
    #[case(NamedChain::Arbitrum, true)]
    #[case(NamedChain::Base, true)]
    #[case(NamedChain::Polygon, true)]
    #[case(NamedChain::Sepolia, true)]
    #[case(NamedChain::BaseSepolia, true)]
    #[case(NamedChain::ArbitrumSepolia, true)]
    #[case(NamedChain::OptimismSepolia, true)]
    #[case(NamedChain::BinanceSmartChain, false)]
    #[case(NamedChain::Fantom, false)]
    fn test_is_supported(#[case] chain: NamedChain, #[case] expected: bool) {
        assert_eq!(chain.is_supported(), expected);
    }

    #[rstest]
    #[case(NamedChain::Mainnet, ETHEREUM_SPOKE_POOL)]
    #[case(NamedChain::Optimism, OPTIMISM_SPOKE_POOL)]
    #[case(NamedChain::Arbitrum, ARBITRUM_SPOKE_POOL)]
    #[case(NamedChain::Base, BASE_SPOKE_POOL)]
    #[case(NamedChain::Polygon, POLYGON_SPOKE_POOL)]
    #[case(NamedChain::Sepolia, SEPOLIA_SPOKE_POOL)]
    #[case(NamedChain::BaseSepolia, BASE_SEPOLIA_SPOKE_POOL)]
    #[case(NamedChain::ArbitrumSepolia, ARBITRUM_SEPOLIA_SPOKE_POOL)]
    #[case(NamedChain::OptimismSepolia, OPTIMISM_SEPOLIA_SPOKE_POOL)]
    fn test_spoke_pool_address_supported_chains(
        #[case] chain: NamedChain,
        #[case] expected: Address,
    ) {
        assert_eq!(chain.spoke_pool_address().unwrap(), expected);
    }

    #[rstest]
    #[case(NamedChain::Sepolia, "eth-sepolia")]
    #[case(NamedChain::BaseSepolia, "base-sepolia")]
    #[case(NamedChain::Mainnet, "eth-mainnet")]
    #[case(NamedChain::Base, "base-mainnet")]
    fn test_rpc_subdomain(#[case] chain: NamedChain, #[case] expected: &str) {
        assert_eq!(chain.rpc_subdomain().unwrap(), expected);
    }

    #[test]
    fn test_spoke_pool_unsupported_chain() {
        let result = NamedChain::BinanceSmartChain.spoke_pool_address();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Error::ChainNotSupported { .. }
        ));
    }

    #[rstest]
    #[case(NamedChain::Sepolia, true)]
    #[case(NamedChain::BaseSepolia, true)]
    #[case(NamedChain::Mainnet, false)]
    #[case(NamedChain::Base, false)]
    fn test_sandbox(#[case] chain: NamedChain, #[case] expected: bool) {
        assert_eq!(chain.sandbox(), expected);
    }
}
