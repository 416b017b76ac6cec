//! Execution context for the open APM deployment.
//!
//! [`ApmChain`] names every remote call the deployer makes against the
//! Aragon contracts; [`RpcChain`] implements it over Ethereum JSON-RPC
//! with `alloy`. Contract interfaces live in [`bindings`].

pub mod bindings;
pub mod client;
pub mod error;
pub mod events;
pub mod rpc;

pub use client::ApmChain;
pub use error::ChainError;
pub use rpc::RpcChain;
