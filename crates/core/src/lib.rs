//! Domain logic for deploying an open APM registry.
//!
//! Pure, I/O-free building blocks shared by the chain client and the
//! deployer: well-known addresses and names, ENS hashing, ACL permission
//! records, and receipt event scanning.

pub mod constants;
pub mod error;
pub mod hashing;
pub mod permission;
pub mod receipt;
pub mod resolve;
