//! ENS name hashing.
//!
//! The naming system keys domains by their EIP-137 namehash, while the
//! registrar and factory take the bare label as a raw keccak-256 digest.
//! Both are needed for one deployment: the parent domain goes through
//! [`namehash`], the label through [`labelhash`].

use alloy_primitives::{keccak256, B256};

use crate::error::CoreError;

/// Normalise a domain name before hashing.
///
/// Only ASCII case folding and a single trailing root dot are handled;
/// the names this tool deals with are plain ASCII.
fn normalize(name: &str) -> String {
    let name = name.strip_suffix('.').unwrap_or(name);
    name.to_ascii_lowercase()
}

/// Accept a label only if it is a single, non-empty name component.
pub fn check_label(label: &str) -> Result<&str, CoreError> {
    if label.is_empty() {
        return Err(CoreError::InvalidName("empty label".to_string()));
    }
    if label.contains('.') {
        return Err(CoreError::InvalidName(format!(
            "label '{label}' must not contain '.'"
        )));
    }
    Ok(label)
}

/// Raw keccak-256 of a single label, without normalisation.
pub fn labelhash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Node of `label_hash` directly under `parent`.
pub fn subnode(parent: B256, label_hash: B256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(parent.as_slice());
    buf[32..].copy_from_slice(label_hash.as_slice());
    keccak256(buf)
}

/// EIP-137 namehash of a dotted domain name.
///
/// The empty name is the root node (all zeros). A name containing an
/// empty label (`"a..eth"`) is rejected.
pub fn namehash(name: &str) -> Result<B256, CoreError> {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return Ok(B256::ZERO);
    }

    let mut node = B256::ZERO;
    for label in normalized.rsplit('.') {
        if label.is_empty() {
            return Err(CoreError::InvalidName(format!("empty label in '{name}'")));
        }
        node = subnode(node, labelhash(label));
    }
    Ok(node)
}
