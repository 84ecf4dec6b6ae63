use {
    crate::{
        api::SuggestedFeesResponse,
        error::{Error, Result},
        route::Route,
    },
    alloy_primitives::{Address, U256, utils::format_ether},
    std::{
        fmt::{Display, Formatter},
        time::Duration,
    },
};

/// Fee components of a quote, each in wei of the input token
#[derive(Debug, Clone)]
pub struct FeeBreakdown {
    pub total_relay_fee: U256,
    pub lp_fee: U256,
    pub relayer_gas_fee: U256,
    pub relayer_capital_fee: U256,
}

/// Everything the deposit transaction needs from the quote, verbatim
#[derive(Debug, Clone)]
pub struct DepositParams {
    pub spoke_pool: Address,
    pub quote_timestamp: u32,
    pub fill_deadline: u32,
    pub exclusive_relayer: Address,
    pub exclusivity_deadline: u32,
}

/// A priced transfer proposal. Built once per run and moved into exactly
/// one execution attempt; the fee snapshot is only valid for the deposit
/// parameters it came with.
#[derive(Debug, Clone)]
pub struct Quote {
    pub route: Route,
    pub input_amount: U256,
    pub output_amount: U256,
    pub fees: FeeBreakdown,
    pub deposit: DepositParams,
    pub estimated_fill_time: Option<Duration>,
}

impl Quote {
    pub fn from_suggested_fees(
        route: Route,
        input_amount: U256,
        fees: SuggestedFeesResponse,
    ) -> Result<Self> {
        if fees.is_amount_too_low {
            return Err(Error::AmountTooLow(input_amount));
        }
        let output_amount = input_amount
            .checked_sub(fees.total_relay_fee.total)
            .ok_or(Error::AmountTooLow(input_amount))?;

        Ok(Self {
            route,
            input_amount,
            output_amount,
            fees: FeeBreakdown {
                total_relay_fee: fees.total_relay_fee.total,
                lp_fee: fees.lp_fee.total,
                relayer_gas_fee: fees.relayer_gas_fee.total,
                relayer_capital_fee: fees.relayer_capital_fee.total,
            },
            deposit: DepositParams {
                spoke_pool: fees.spoke_pool_address,
                quote_timestamp: fees.timestamp,
                fill_deadline: fees.fill_deadline,
                exclusive_relayer: fees.exclusive_relayer,
                exclusivity_deadline: fees.exclusivity_deadline,
            },
            estimated_fill_time: fees.estimated_fill_time_sec.map(Duration::from_secs),
        })
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: send {} receive {} (fee {})",
            self.route,
            format_ether(self.input_amount),
            format_ether(self.output_amount),
            format_ether(self.fees.total_relay_fee),
        )?;
        match self.estimated_fill_time {
            Some(t) => write!(f, " estimated fill time {}s", t.as_secs()),
            None => write!(f, " estimated fill time unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::api::{FeeComponent, TokenInfo},
        alloy_primitives::address,
    };

    fn route() -> Route {
        Route {
            origin_chain_id: 11155111,
            destination_chain_id: 84532,
            input_token: TokenInfo {
                address: address!("0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            output_token: TokenInfo {
                address: address!("0x4200000000000000000000000000000000000006"),
                symbol: "WETH".to_string(),
                decimals: 18,
            },
        }
    }

    fn fee(total: u64) -> FeeComponent {
        FeeComponent {
            total: U256::from(total),
            pct: "0".to_string(),
        }
    }

    fn response(total_relay_fee: u64, too_low: bool) -> SuggestedFeesResponse {
        SuggestedFeesResponse {
            total_relay_fee: fee(total_relay_fee),
            relayer_capital_fee: fee(1),
            relayer_gas_fee: fee(2),
            lp_fee: fee(3),
            timestamp: 1_718_900_000,
            is_amount_too_low: too_low,
            spoke_pool_address: address!("0x5ef6C01E11889d86803e0B23e3cB3F9E9d97B662"),
            exclusive_relayer: Address::ZERO,
            exclusivity_deadline: 0,
            fill_deadline: 1_718_910_800,
            estimated_fill_time_sec: Some(6),
        }
    }

    #[test]
    fn test_output_is_fee_adjusted() {
        let amount = U256::from(200_000_000_000_000u64);
        let quote = Quote::from_suggested_fees(route(), amount, response(21_000_000_000, false))
            .expect("quote should build");
        assert_eq!(
            quote.output_amount,
            amount - U256::from(21_000_000_000u64)
        );
        assert!(quote.output_amount < quote.input_amount);
        assert_eq!(quote.estimated_fill_time, Some(Duration::from_secs(6)));
    }

    #[test]
    fn test_amount_too_low_flag_rejected() {
        let result =
            Quote::from_suggested_fees(route(), U256::from(100), response(21_000_000_000, true));
        assert!(matches!(result.unwrap_err(), Error::AmountTooLow(_)));
    }

    #[test]
    fn test_fee_exceeding_amount_rejected() {
        let result =
            Quote::from_suggested_fees(route(), U256::from(100), response(21_000_000_000, false));
        assert!(matches!(result.unwrap_err(), Error::AmountTooLow(_)));
    }

    #[test]
    fn test_summary_reports_unknown_fill_time() {
        let mut response = response(21_000_000_000, false);
        response.estimated_fill_time_sec = None;
        let quote =
            Quote::from_suggested_fees(route(), U256::from(200_000_000_000_000u64), response)
                .expect("quote should build");
        assert!(quote.to_string().contains("estimated fill time unknown"));
    }
}
