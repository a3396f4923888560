//! Traits and implementations for the external collaborators of the PortGenie
//! credential workflow: the wallet, the certificate contract, the IPFS pinning
//! service and the durable store.

pub mod common_models;
pub mod contract;
pub mod credential_storage;
pub mod eth_provider;
pub mod http_client;
pub mod ipfs;
pub mod network;
