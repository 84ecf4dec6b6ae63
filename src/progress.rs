use {
    alloy_primitives::TxHash,
    tracing::{info, warn},
};

/// Outcome of one execution phase. The payload type parameter only exists
/// on the success arm, so a failed phase can never carry phase data.
#[derive(Debug, Clone)]
pub enum PhaseOutcome<T> {
    Succeeded(T),
    Failed { reason: String },
}

impl<T> PhaseOutcome<T> {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

#[derive(Debug, Clone)]
pub struct ApprovalReceipt {
    pub tx_hash: TxHash,
}

#[derive(Debug, Clone)]
pub struct DepositReceipt {
    pub tx_hash: TxHash,
    pub deposit_id: u32,
}

#[derive(Debug, Clone)]
pub struct FillReceipt {
    pub tx_hash: TxHash,
    /// Unix timestamp of the observed fill
    pub timestamp: u64,
    /// Whether an attached cross-chain action also succeeded; true for
    /// plain transfers
    pub action_success: bool,
}

/// A notification emitted as bridge execution moves through its phases.
/// Events arrive in phase order; a phase the route does not need (approve
/// for native input) emits nothing.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Approve(PhaseOutcome<ApprovalReceipt>),
    Deposit(PhaseOutcome<DepositReceipt>),
    Fill(PhaseOutcome<FillReceipt>),
    /// A phase this client does not know about yet
    Other { phase: String },
}

impl ProgressEvent {
    pub fn phase_name(&self) -> &str {
        match self {
            Self::Approve(_) => "approve",
            Self::Deposit(_) => "deposit",
            Self::Fill(_) => "fill",
            Self::Other { phase } => phase,
        }
    }
}

/// Default observer: one log line per notification
pub fn log_progress(event: &ProgressEvent) {
    match event {
        ProgressEvent::Approve(PhaseOutcome::Succeeded(receipt)) => {
            info!("approval granted: {}", receipt.tx_hash);
        }
        ProgressEvent::Deposit(PhaseOutcome::Succeeded(receipt)) => {
            info!(
                "deposit {} confirmed on origin chain: {}",
                receipt.deposit_id, receipt.tx_hash
            );
        }
        ProgressEvent::Fill(PhaseOutcome::Succeeded(receipt)) => {
            info!(
                "filled on destination chain at {}: {} (action success: {})",
                receipt.timestamp, receipt.tx_hash, receipt.action_success
            );
        }
        ProgressEvent::Approve(PhaseOutcome::Failed { reason })
        | ProgressEvent::Deposit(PhaseOutcome::Failed { reason })
        | ProgressEvent::Fill(PhaseOutcome::Failed { reason }) => {
            warn!("{} phase failed: {reason}", event.phase_name());
        }
        ProgressEvent::Other { phase } => {
            info!("progress update for phase {phase}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        let event = ProgressEvent::Approve(PhaseOutcome::Succeeded(ApprovalReceipt {
            tx_hash: TxHash::ZERO,
        }));
        assert_eq!(event.phase_name(), "approve");

        let event = ProgressEvent::Fill(PhaseOutcome::Failed {
            reason: "expired".to_string(),
        });
        assert_eq!(event.phase_name(), "fill");

        let event = ProgressEvent::Other {
            phase: "settle".to_string(),
        };
        assert_eq!(event.phase_name(), "settle");
    }

    #[test]
    fn test_failed_outcome_has_no_payload() {
        let outcome: PhaseOutcome<DepositReceipt> = PhaseOutcome::Failed {
            reason: "reverted".to_string(),
        };
        assert!(!outcome.succeeded());
        // the success payload is unreachable for a failed phase
        match outcome {
            PhaseOutcome::Succeeded(_) => panic!("failed phase must not carry a receipt"),
            PhaseOutcome::Failed { reason } => assert_eq!(reason, "reverted"),
        }
    }

    #[test]
    fn test_log_progress_handles_every_variant() {
        log_progress(&ProgressEvent::Deposit(PhaseOutcome::Succeeded(
            DepositReceipt {
                tx_hash: TxHash::ZERO,
                deposit_id: 7,
            },
        )));
        log_progress(&ProgressEvent::Fill(PhaseOutcome::Failed {
            reason: "expired".to_string(),
        }));
        log_progress(&ProgressEvent::Other {
            phase: "settle".to_string(),
        });
    }
}
