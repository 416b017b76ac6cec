//! Address resolution checks.

use alloy_primitives::Address;

use crate::error::CoreError;

/// Reject the zero address returned by a lookup.
///
/// `what` names the looked-up contract in the resulting error.
pub fn ensure_resolved(address: Address, what: &'static str) -> Result<Address, CoreError> {
    if address.is_zero() {
        return Err(CoreError::Unresolved { what });
    }
    Ok(address)
}
