//! Transparencia: Portal da Transparência API client
//!
//! Query building, API-key handling, and HTTP access to the Brazilian
//! federal transparency data service.
//!
//! ## Quick start
//!
//! ```no_run
//! use transparencia::client::PortalClient;
//!
//! let client = PortalClient::new("my-api-key").unwrap();
//! let data = client.query("/despesas", &[("pagina".into(), "1".into())]);
//! ```

pub mod client;
pub mod config;
pub mod error;
