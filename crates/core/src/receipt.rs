//! Factory receipts and creation-event scanning.

use alloy_primitives::{Address, B256};
use serde::Serialize;

use crate::constants::DEPLOY_APM_EVENT;
use crate::error::CoreError;
use crate::resolve::ensure_resolved;

/// An event log entry decoded from a transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReceiptEvent {
    /// `DeployAPM(bytes32 indexed node, address apm)` from the factory.
    DeployApm { node: B256, apm: Address },
    /// Any other log; only its first topic is kept.
    Unrecognized { topic0: Option<B256> },
}

/// The parts of a mined transaction the deployer cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub events: Vec<ReceiptEvent>,
}

impl TxReceipt {
    pub fn new(tx_hash: B256, events: Vec<ReceiptEvent>) -> Self {
        Self { tx_hash, events }
    }

    /// Address of the registry announced by the first `DeployAPM` event.
    ///
    /// Fails with [`CoreError::CreationEventMissing`] when the receipt has
    /// no such event, and with [`CoreError::Unresolved`] when the event
    /// carries the zero address.
    pub fn deployed_apm(&self) -> Result<Address, CoreError> {
        let apm = self
            .events
            .iter()
            .find_map(|event| match event {
                ReceiptEvent::DeployApm { apm, .. } => Some(*apm),
                ReceiptEvent::Unrecognized { .. } => None,
            })
            .ok_or(CoreError::CreationEventMissing {
                event: DEPLOY_APM_EVENT,
                tx_hash: self.tx_hash,
            })?;

        ensure_resolved(apm, "deployed APM registry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn tx() -> B256 {
        B256::repeat_byte(0xaa)
    }

    #[test]
    fn finds_apm_among_other_events() {
        let apm = Address::repeat_byte(0xab);
        let receipt = TxReceipt::new(
            tx(),
            vec![
                ReceiptEvent::Unrecognized {
                    topic0: Some(B256::repeat_byte(1)),
                },
                ReceiptEvent::DeployApm {
                    node: B256::repeat_byte(2),
                    apm,
                },
            ],
        );

        assert_eq!(receipt.deployed_apm().unwrap(), apm);
    }

    #[test]
    fn first_deploy_event_wins() {
        let first = Address::repeat_byte(0x01);
        let receipt = TxReceipt::new(
            tx(),
            vec![
                ReceiptEvent::DeployApm {
                    node: B256::ZERO,
                    apm: first,
                },
                ReceiptEvent::DeployApm {
                    node: B256::ZERO,
                    apm: Address::repeat_byte(0x02),
                },
            ],
        );

        assert_eq!(receipt.deployed_apm().unwrap(), first);
    }

    #[test]
    fn missing_event_is_an_error() {
        let receipt = TxReceipt::new(tx(), vec![ReceiptEvent::Unrecognized { topic0: None }]);

        assert_matches!(
            receipt.deployed_apm(),
            Err(CoreError::CreationEventMissing { event: "DeployAPM", tx_hash }) if tx_hash == tx()
        );
    }

    #[test]
    fn zero_address_in_event_is_unresolved() {
        let receipt = TxReceipt::new(
            tx(),
            vec![ReceiptEvent::DeployApm {
                node: B256::ZERO,
                apm: Address::ZERO,
            }],
        );

        assert_matches!(receipt.deployed_apm(), Err(CoreError::Unresolved { .. }));
    }
}
