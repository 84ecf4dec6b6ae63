use {
    crate::{error::Result, route::Route},
    alloy_primitives::{Address, TxHash, U256},
    reqwest::Client,
    serde::{Deserialize, Deserializer, de},
    tracing::debug,
};

/// Across API environment URLs
///
/// See <https://docs.across.to/reference/api-reference>
pub const ACROSS_API: &str = "https://app.across.to/api";
pub const ACROSS_API_TESTNET: &str = "https://testnet.across.to/api";

/// A token listed by the bridging service on a specific chain
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// One entry of the supported-chains list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: String,
    #[serde(default)]
    pub input_tokens: Vec<TokenInfo>,
    #[serde(default)]
    pub output_tokens: Vec<TokenInfo>,
}

/// One fee component of a quote, in wei of the input token
#[derive(Debug, Clone, Deserialize)]
pub struct FeeComponent {
    #[serde(deserialize_with = "u256_dec")]
    pub total: U256,
    pub pct: String,
}

/// Response of the suggested-fees (quote) endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFeesResponse {
    pub total_relay_fee: FeeComponent,
    pub relayer_capital_fee: FeeComponent,
    pub relayer_gas_fee: FeeComponent,
    pub lp_fee: FeeComponent,
    #[serde(deserialize_with = "u32_lenient")]
    pub timestamp: u32,
    pub is_amount_too_low: bool,
    pub spoke_pool_address: Address,
    pub exclusive_relayer: Address,
    #[serde(deserialize_with = "u32_lenient")]
    pub exclusivity_deadline: u32,
    #[serde(deserialize_with = "u32_lenient")]
    pub fill_deadline: u32,
    #[serde(default)]
    pub estimated_fill_time_sec: Option<u64>,
}

/// Settlement state of a deposit on the destination chain. Statuses this
/// client does not recognize keep the service's raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillStatus {
    Pending,
    Filled,
    Expired,
    Unknown(String),
}

impl<'de> Deserialize<'de> for FillStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "pending" => Self::Pending,
            "filled" => Self::Filled,
            "expired" => Self::Expired,
            _ => Self::Unknown(raw),
        })
    }
}

/// Response of the deposit-status endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositStatusResponse {
    pub status: FillStatus,
    #[serde(default)]
    pub fill_tx: Option<TxHash>,
    #[serde(default)]
    pub fill_timestamp: Option<u64>,
    #[serde(default)]
    pub action_success: Option<bool>,
}

/// The operations the bridge flow needs from the Across service.
///
/// Tests substitute deterministic fakes for the HTTP implementation.
#[allow(async_fn_in_trait)]
pub trait AcrossClient {
    async fn supported_chains(&self) -> Result<Vec<ChainInfo>>;

    async fn suggested_fees(&self, route: &Route, amount: U256) -> Result<SuggestedFeesResponse>;

    async fn deposit_status(
        &self,
        origin_chain_id: u64,
        deposit_id: u32,
    ) -> Result<DepositStatusResponse>;
}

/// HTTP client for the Across API
#[derive(Clone, Debug)]
pub struct AcrossApi {
    client: Client,
    base_url: String,
}

impl AcrossApi {
    pub fn new(sandbox: bool) -> Self {
        let base = if sandbox { ACROSS_API_TESTNET } else { ACROSS_API };
        Self::with_base_url(base)
    }

    /// Point the client at a different host, e.g. a local mock server
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        debug!("GET {url}");
        let response = self.client.get(&url).query(query).send().await?;
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl AcrossClient for AcrossApi {
    async fn supported_chains(&self) -> Result<Vec<ChainInfo>> {
        self.get_json("chains", &[]).await
    }

    async fn suggested_fees(&self, route: &Route, amount: U256) -> Result<SuggestedFeesResponse> {
        let query = [
            ("inputToken", route.input_token.address.to_string()),
            ("outputToken", route.output_token.address.to_string()),
            ("originChainId", route.origin_chain_id.to_string()),
            ("destinationChainId", route.destination_chain_id.to_string()),
            ("amount", amount.to_string()),
        ];
        self.get_json("suggested-fees", &query).await
    }

    async fn deposit_status(
        &self,
        origin_chain_id: u64,
        deposit_id: u32,
    ) -> Result<DepositStatusResponse> {
        let query = [
            ("originChainId", origin_chain_id.to_string()),
            ("depositId", deposit_id.to_string()),
        ];
        self.get_json("deposit/status", &query).await
    }
}

/// The API encodes wei amounts as decimal strings
fn u256_dec<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<U256, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(U256::from(n)),
        Raw::Str(s) => U256::from_str_radix(&s, 10).map_err(de::Error::custom),
    }
}

/// Timestamps and deadlines arrive as either numbers or strings
fn u32_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Str(String),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(de::Error::custom),
    }
}
