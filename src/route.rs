use {
    crate::{
        api::{ChainInfo, TokenInfo},
        error::{Error, Result},
    },
    std::fmt::{Display, Formatter},
};

/// A fully resolved transfer route: both chain ids plus the token entries
/// matched from the service's supported-asset list
#[derive(Debug, Clone)]
pub struct Route {
    pub origin_chain_id: u64,
    pub destination_chain_id: u64,
    pub input_token: TokenInfo,
    pub output_token: TokenInfo,
}

impl Route {
    /// Native-asset input needs no ERC-20 approval; the deposit carries
    /// msg.value instead
    pub fn is_native_input(&self) -> bool {
        self.input_token.symbol.eq_ignore_ascii_case("ETH")
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}) -> {}({})",
            self.input_token.symbol,
            self.origin_chain_id,
            self.output_token.symbol,
            self.destination_chain_id
        )
    }
}

/// Locates both chain entries and their token entries in the supported
/// list. Every miss is an explicit error; nothing downstream ever sees a
/// half-resolved route.
pub fn resolve_route(
    chains: &[ChainInfo],
    origin_chain_id: u64,
    destination_chain_id: u64,
    input_symbol: &str,
    output_symbol: &str,
) -> Result<Route> {
    let origin = find_chain(chains, origin_chain_id)?;
    let destination = find_chain(chains, destination_chain_id)?;

    let input_token = find_token(&origin.input_tokens, input_symbol, origin_chain_id)?;
    let output_token = find_token(
        &destination.output_tokens,
        output_symbol,
        destination_chain_id,
    )?;

    Ok(Route {
        origin_chain_id,
        destination_chain_id,
        input_token: input_token.clone(),
        output_token: output_token.clone(),
    })
}

fn find_chain(chains: &[ChainInfo], chain_id: u64) -> Result<&ChainInfo> {
    chains
        .iter()
        .find(|c| c.chain_id == chain_id)
        .ok_or(Error::ChainNotFound { chain_id })
}

fn find_token<'a>(tokens: &'a [TokenInfo], symbol: &str, chain_id: u64) -> Result<&'a TokenInfo> {
    tokens
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| Error::TokenNotFound {
            symbol: symbol.to_string(),
            chain_id,
        })
}
