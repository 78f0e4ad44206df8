//! # Payables Hex
//!
//! Application service layer and HTTP adapter for the payables service.
//!
//! ## Architecture
//!
//! - `service` - Application service (masking, persistence, payable derivation)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served by the adapter
//!
//! The service is generic over `T: TransactionRepository` and
//! `P: PayableRepository`, so any pair of adapters can be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::TransactionService;
