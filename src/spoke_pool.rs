use {
    V3SpokePool::V3SpokePoolInstance,
    crate::{
        error::{Error, Result},
        progress::DepositReceipt,
        quote::Quote,
    },
    alloy_network::Ethereum,
    alloy_primitives::{Address, Bytes, TxHash, U256},
    alloy_provider::{Provider, WalletProvider},
    alloy_rpc_types::TransactionRequest,
    alloy_sol_types::{SolEvent, sol},
    std::time::Duration,
};

/// Confirmation requirements for origin-chain transactions
pub const DEPOSIT_CONFIRMATIONS: u64 = 1;
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);

/// Origin-chain transaction submission for the bridge flow.
///
/// Blanket-implemented for any alloy wallet provider; tests substitute a
/// fake, the same seam [`NativeBalance`](crate::NativeBalance) provides
/// for balance reads.
#[allow(async_fn_in_trait)]
pub trait DepositSubmitter {
    /// The ERC-20 allowance the signer currently grants `spender`
    async fn allowance(&self, token: Address, spender: Address) -> Result<U256>;

    /// Approves `spender` for `amount` and waits for confirmation
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash>;

    /// Submits the quote's `depositV3` transaction with `value` attached
    /// as msg.value, waits for confirmation and recovers the deposit id
    /// the spoke pool assigned
    async fn submit_deposit(&self, quote: &Quote, value: U256) -> Result<DepositReceipt>;
}

impl<P: Provider<Ethereum> + WalletProvider> DepositSubmitter for P {
    async fn allowance(&self, token: Address, spender: Address) -> Result<U256> {
        let owner = self.default_signer_address();
        let erc20 = ERC20::new(token, self);
        Ok(erc20.allowance(owner, spender).call().await?)
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        let erc20 = ERC20::new(token, self);
        Ok(erc20
            .approve(spender, amount)
            .send()
            .await?
            .with_required_confirmations(DEPOSIT_CONFIRMATIONS)
            .with_timeout(Some(CONFIRMATION_TIMEOUT))
            .watch()
            .await?)
    }

    async fn submit_deposit(&self, quote: &Quote, value: U256) -> Result<DepositReceipt> {
        let depositor = self.default_signer_address();
        let spoke_pool = SpokePoolContract::new(quote.deposit.spoke_pool, self);
        let tx = spoke_pool.deposit_v3_transaction(depositor, depositor, quote, value);
        let tx_hash = self
            .send_transaction(tx)
            .await?
            .with_required_confirmations(DEPOSIT_CONFIRMATIONS)
            .with_timeout(Some(CONFIRMATION_TIMEOUT))
            .watch()
            .await?;
        let deposit_id = deposit_id_from_receipt(self, tx_hash).await?;
        Ok(DepositReceipt {
            tx_hash,
            deposit_id,
        })
    }
}

/// Recovers the deposit id assigned by the spoke pool from the
/// `V3FundsDeposited` log of the deposit transaction
async fn deposit_id_from_receipt<P: Provider<Ethereum>>(
    provider: &P,
    tx_hash: TxHash,
) -> Result<u32> {
    let receipt = provider
        .get_transaction_receipt(tx_hash)
        .await?
        .ok_or(Error::ReceiptNotFound(tx_hash))?;

    let deposited_topic = V3SpokePool::V3FundsDeposited::SIGNATURE_HASH;
    let log = receipt
        .inner
        .logs()
        .iter()
        .find(|log| {
            log.topics()
                .first()
                .is_some_and(|topic| *topic == deposited_topic)
        })
        .ok_or(Error::DepositEventMissing(tx_hash))?;

    let decoded = V3SpokePool::V3FundsDeposited::decode_log(&log.inner)?;
    Ok(decoded.data.depositId)
}

/// The Across V3 SpokePool contract, the on-chain entry point for
/// deposits on the origin chain
pub struct SpokePoolContract<P: Provider<Ethereum>> {
    pub instance: V3SpokePoolInstance<P>,
}

impl<P: Provider<Ethereum>> SpokePoolContract<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            instance: V3SpokePoolInstance::new(address, provider),
        }
    }

    /// Create the transaction request for the `depositV3` function.
    ///
    /// `value` is attached as msg.value and must equal the input amount
    /// for native-asset deposits, zero otherwise.
    pub fn deposit_v3_transaction(
        &self,
        depositor: Address,
        recipient: Address,
        quote: &Quote,
        value: U256,
    ) -> TransactionRequest {
        self.instance
            .depositV3(
                depositor,
                recipient,
                quote.route.input_token.address,
                quote.route.output_token.address,
                quote.input_amount,
                quote.output_amount,
                U256::from(quote.route.destination_chain_id),
                quote.deposit.exclusive_relayer,
                quote.deposit.quote_timestamp,
                quote.deposit.fill_deadline,
                quote.deposit.exclusivity_deadline,
                Bytes::new(),
            )
            .value(value)
            .into_transaction_request()
    }
}

sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract V3SpokePool {
        event V3FundsDeposited(
            address inputToken,
            address outputToken,
            uint256 inputAmount,
            uint256 outputAmount,
            uint256 indexed destinationChainId,
            uint32 indexed depositId,
            uint32 quoteTimestamp,
            uint32 fillDeadline,
            uint32 exclusivityDeadline,
            address indexed depositor,
            address recipient,
            address exclusiveRelayer,
            bytes message
        );

        function depositV3(
            address depositor,
            address recipient,
            address inputToken,
            address outputToken,
            uint256 inputAmount,
            uint256 outputAmount,
            uint256 destinationChainId,
            address exclusiveRelayer,
            uint32 quoteTimestamp,
            uint32 fillDeadline,
            uint32 exclusivityDeadline,
            bytes calldata message
        ) external payable;
    }
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract ERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
    }
);
