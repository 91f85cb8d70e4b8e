//! Monitor SAT API Library
//!
//! Validates Mexican taxpayer identifiers (RFC), queries the Finkok CFDI
//! status API and reshapes its answer into a normalized payload with alerts.
//!
//! # Modules
//!
//! - `api`: Router and boundary-level error mapping.
//! - `config`: Configuration management.
//! - `credentials`: Certificate and private key loading.
//! - `errors`: Error handling types.
//! - `finkok_client`: Finkok status API client.
//! - `handlers`: HTTP request handlers.
//! - `models`: Response models.
//! - `monitor`: Status query workflow shared by the handlers.
//! - `normalizer`: Finkok response reshaping and alert derivation.
//! - `rfc`: RFC format validation.

pub mod api;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod finkok_client;
pub mod handlers;
pub mod models;
pub mod monitor;
pub mod normalizer;
pub mod rfc;
