//! Decoding of raw receipt logs into [`ReceiptEvent`]s.

use alloy::primitives::Log;
use alloy::sol_types::SolEvent;
use openapm_core::receipt::ReceiptEvent;

use crate::bindings::APMRegistryFactory::DeployAPM;

/// Decode every log of a receipt.
///
/// Logs whose first topic is the `DeployAPM` signature but whose payload
/// does not decode are kept as [`ReceiptEvent::Unrecognized`].
pub fn decode_receipt_events<'a, I>(logs: I) -> Vec<ReceiptEvent>
where
    I: IntoIterator<Item = &'a Log>,
{
    logs.into_iter().map(decode_log).collect()
}

fn decode_log(log: &Log) -> ReceiptEvent {
    let topic0 = log.data.topics().first().copied();

    if topic0 == Some(DeployAPM::SIGNATURE_HASH) {
        match DeployAPM::decode_log_data(&log.data) {
            Ok(event) => {
                return ReceiptEvent::DeployApm {
                    node: event.node,
                    apm: event.apm,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, address = %log.address, "Undecodable DeployAPM log");
            }
        }
    }

    ReceiptEvent::Unrecognized { topic0 }
}
