use {
    crate::{
        api::{AcrossClient, FillStatus},
        config::BridgeConfig,
        error::{Error, Result},
        progress::{
            ApprovalReceipt, DepositReceipt, FillReceipt, PhaseOutcome, ProgressEvent,
        },
        quote::Quote,
        route::resolve_route,
        spoke_pool::DepositSubmitter,
    },
    alloy_chains::{Chain, NamedChain},
    alloy_network::Ethereum,
    alloy_primitives::{Address, TxHash, U256, utils::format_ether},
    alloy_provider::Provider,
    std::{
        fmt::{Debug, Display},
        time::{Duration, SystemTime, UNIX_EPOCH},
    },
    tokio::time::sleep,
    tracing::{Level, debug, info, instrument, trace},
};

/// Bounds for the destination-fill polling loop
pub const FILL_POLL_ATTEMPTS: u32 = 30;
pub const FILL_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Read access to an account's native balance on one chain.
///
/// Blanket-implemented for every alloy provider; tests substitute a fake.
#[allow(async_fn_in_trait)]
pub trait NativeBalance {
    async fn native_balance(&self, address: Address) -> Result<U256>;
}

impl<P: Provider<Ethereum>> NativeBalance for P {
    async fn native_balance(&self, address: Address) -> Result<U256> {
        Ok(self.get_balance(address).await?)
    }
}

pub(crate) fn chain_id(chain: NamedChain) -> u64 {
    Chain::from(chain).id()
}

/// Fails when `balance` is strictly below `minimum`
pub fn ensure_min_balance(balance: U256, minimum: U256) -> Result<()> {
    if balance < minimum {
        return Err(Error::InsufficientFunds { balance, minimum });
    }
    Ok(())
}

/// Queries the account's native balance on the origin chain and checks it
/// against the configured minimum. A transient RPC failure here is fatal
/// for the run; there is no retry.
pub async fn precheck<B: NativeBalance>(reader: &B, config: &BridgeConfig) -> Result<U256> {
    let balance = reader.native_balance(config.address()).await?;
    info!(
        "balance on {}: {} ETH",
        config.origin,
        format_ether(balance)
    );
    ensure_min_balance(balance, config.min_balance)?;
    Ok(balance)
}

/// Fetches the supported-asset list, resolves the configured route and
/// requests a quote for the configured amount. Each call is a fresh round
/// trip; nothing is cached.
pub async fn fetch_quote<C: AcrossClient>(api: &C, config: &BridgeConfig) -> Result<Quote> {
    let chains = api.supported_chains().await?;
    let route = resolve_route(
        &chains,
        chain_id(config.origin),
        chain_id(config.destination),
        &config.input_symbol,
        &config.output_symbol,
    )?;
    debug!("resolved route {route}");

    let fees = api.suggested_fees(&route, config.amount).await?;
    let quote = Quote::from_suggested_fees(route, config.amount, fees)?;
    info!("quote: {quote}");
    Ok(quote)
}

/// The precheck-then-quote front half of the pipeline. The quote request
/// is only issued once the balance guard has passed.
pub async fn precheck_and_quote<B: NativeBalance, C: AcrossClient>(
    reader: &B,
    api: &C,
    config: &BridgeConfig,
) -> Result<Quote> {
    precheck(reader, config).await?;
    fetch_quote(api, config).await
}

/// Terminal success payload of one bridge run
#[derive(Clone, Debug)]
pub struct BridgeReceipt {
    pub approval: Option<TxHash>,
    pub deposit: DepositReceipt,
    pub fill: FillReceipt,
}

impl Display for BridgeReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Approval: {:?}, Deposit: {} (id {}), Fill: {} at {}",
            self.approval,
            self.deposit.tx_hash,
            self.deposit.deposit_id,
            self.fill.tx_hash,
            self.fill.timestamp
        )
    }
}

/// One-shot Across bridge: wallet-side chain access on the origin chain
/// plus a handle to the Across service
#[derive(Clone)]
pub struct AcrossBridge<P, C> {
    provider: P,
    api: C,
    config: BridgeConfig,
}

impl<P, C> Debug for AcrossBridge<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Across[{}->{}]", self.config.origin, self.config.destination)
    }
}

impl<P, C> AcrossBridge<P, C>
where
    P: NativeBalance + DepositSubmitter,
    C: AcrossClient,
{
    pub fn new(provider: P, api: C, config: BridgeConfig) -> Self {
        Self {
            provider,
            api,
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The whole single-run flow: balance precheck, quote, execution.
    /// Exactly one bridge attempt; nothing is retried.
    pub async fn run<F: FnMut(&ProgressEvent)>(&self, observer: &mut F) -> Result<BridgeReceipt> {
        let quote = precheck_and_quote(&self.provider, &self.api, &self.config).await?;
        self.execute(quote, observer).await
    }

    /// Submits the quote's deposit for execution, emitting a progress
    /// notification to `observer` as each phase completes or fails. The
    /// quote is consumed; re-executing requires a fresh one.
    #[instrument(skip(self, quote, observer), level = Level::INFO)]
    pub async fn execute<F: FnMut(&ProgressEvent)>(
        &self,
        quote: Quote,
        observer: &mut F,
    ) -> Result<BridgeReceipt> {
        // Native-asset input needs no allowance; the phase is skipped
        let approval = if quote.route.is_native_input() {
            None
        } else {
            self.approve(&quote, observer).await?
        };

        let deposit = self.deposit(&quote, observer).await?;
        if let Some(estimate) = quote.estimated_fill_time {
            debug!("service estimated {}s to fill", estimate.as_secs());
        }
        let fill = wait_for_fill(
            &self.api,
            quote.route.origin_chain_id,
            deposit.deposit_id,
            None,
            None,
            observer,
        )
        .await?;

        Ok(BridgeReceipt {
            approval,
            deposit,
            fill,
        })
    }

    async fn approve<F: FnMut(&ProgressEvent)>(
        &self,
        quote: &Quote,
        observer: &mut F,
    ) -> Result<Option<TxHash>> {
        let token = quote.route.input_token.address;
        let spender = quote.deposit.spoke_pool;

        let current = self.provider.allowance(token, spender).await?;
        if current >= quote.input_amount {
            debug!("existing allowance {current} covers the deposit");
            return Ok(None);
        }

        info!(
            "approving {} {} for the spoke pool",
            format_ether(quote.input_amount),
            quote.route.input_token.symbol
        );
        match self
            .provider
            .approve(token, spender, quote.input_amount)
            .await
        {
            Ok(tx_hash) => {
                observer(&ProgressEvent::Approve(PhaseOutcome::Succeeded(
                    ApprovalReceipt { tx_hash },
                )));
                Ok(Some(tx_hash))
            }
            Err(e) => {
                let reason = e.to_string();
                observer(&ProgressEvent::Approve(PhaseOutcome::Failed {
                    reason: reason.clone(),
                }));
                Err(Error::PhaseFailed {
                    phase: "approve",
                    reason,
                })
            }
        }
    }

    async fn deposit<F: FnMut(&ProgressEvent)>(
        &self,
        quote: &Quote,
        observer: &mut F,
    ) -> Result<DepositReceipt> {
        let value = if quote.route.is_native_input() {
            quote.input_amount
        } else {
            U256::ZERO
        };

        info!(
            "depositing {} {} on {}",
            format_ether(quote.input_amount),
            quote.route.input_token.symbol,
            self.config.origin
        );
        match self.provider.submit_deposit(quote, value).await {
            Ok(receipt) => {
                observer(&ProgressEvent::Deposit(PhaseOutcome::Succeeded(
                    receipt.clone(),
                )));
                Ok(receipt)
            }
            Err(e) => {
                let reason = e.to_string();
                observer(&ProgressEvent::Deposit(PhaseOutcome::Failed {
                    reason: reason.clone(),
                }));
                Err(Error::PhaseFailed {
                    phase: "deposit",
                    reason,
                })
            }
        }
    }
}

/// Polls the deposit-status endpoint until the destination fill lands, the
/// deposit expires, or the attempt budget runs out.
///
/// `max_attempts` defaults to [`FILL_POLL_ATTEMPTS`] and `poll_interval`
/// to [`FILL_POLL_INTERVAL`].
#[instrument(skip(api, observer), level = Level::INFO)]
pub async fn wait_for_fill<C: AcrossClient, F: FnMut(&ProgressEvent)>(
    api: &C,
    origin_chain_id: u64,
    deposit_id: u32,
    max_attempts: Option<u32>,
    poll_interval: Option<Duration>,
    observer: &mut F,
) -> Result<FillReceipt> {
    let max_attempts = max_attempts.unwrap_or(FILL_POLL_ATTEMPTS);
    let poll_interval = poll_interval.unwrap_or(FILL_POLL_INTERVAL);

    info!(deposit_id, "polling for destination fill ...");

    for attempt in 1..=max_attempts {
        trace!(attempt, max_attempts, "checking deposit status");
        let status = api.deposit_status(origin_chain_id, deposit_id).await?;

        match status.status {
            FillStatus::Filled => {
                return match status.fill_tx {
                    Some(tx_hash) => {
                        let receipt = FillReceipt {
                            tx_hash,
                            timestamp: status.fill_timestamp.unwrap_or_else(unix_now),
                            action_success: status.action_success.unwrap_or(true),
                        };
                        observer(&ProgressEvent::Fill(PhaseOutcome::Succeeded(
                            receipt.clone(),
                        )));
                        Ok(receipt)
                    }
                    None => {
                        let reason = "fill reported without a transaction hash".to_string();
                        observer(&ProgressEvent::Fill(PhaseOutcome::Failed {
                            reason: reason.clone(),
                        }));
                        Err(Error::PhaseFailed {
                            phase: "fill",
                            reason,
                        })
                    }
                };
            }
            FillStatus::Expired => {
                let reason = "deposit expired before any relayer filled it".to_string();
                observer(&ProgressEvent::Fill(PhaseOutcome::Failed {
                    reason: reason.clone(),
                }));
                return Err(Error::PhaseFailed {
                    phase: "fill",
                    reason,
                });
            }
            FillStatus::Pending => {
                debug!(attempt, "fill pending, waiting before retrying");
                sleep(poll_interval).await;
            }
            FillStatus::Unknown(raw) => {
                // Forward compatibility: report the raw status, keep polling
                observer(&ProgressEvent::Other { phase: raw });
                sleep(poll_interval).await;
            }
        }
    }

    Err(Error::FillTimeout)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use {super::*, alloy_primitives::utils::parse_ether, rstest::rstest};

    #[rstest]
    #[case("0.005", "0.01", false)]
    #[case("0.0099999", "0.01", false)]
    #[case("0.01", "0.01", true)]
    #[case("1.0", "0.01", true)]
    #[case("0", "0.01", false)]
    fn test_ensure_min_balance(#[case] balance: &str, #[case] minimum: &str, #[case] ok: bool) {
        let balance = parse_ether(balance).unwrap();
        let minimum = parse_ether(minimum).unwrap();
        let result = ensure_min_balance(balance, minimum);
        assert_eq!(result.is_ok(), ok);
        if !ok {
            assert!(matches!(
                result.unwrap_err(),
                Error::InsufficientFunds { .. }
            ));
        }
    }

    #[rstest]
    #[case(NamedChain::Sepolia, 11155111)]
    #[case(NamedChain::BaseSepolia, 84532)]
    #[case(NamedChain::Mainnet, 1)]
    fn test_chain_id(#[case] chain: NamedChain, #[case] expected: u64) {
        assert_eq!(chain_id(chain), expected);
    }
}
