pub mod credential_service;
pub mod error;
pub mod metadata_service;
pub mod mint_service;
pub mod verification_service;
pub mod wallet_service;
