//! Telecare backend library.
//!
//! A token-authenticated REST service over an injected key-value record
//! store: identity and sessions, appointments, direct messaging, the
//! doctor directory, editorial content, and the payment/withdrawal
//! ledger. Laid out hexagonally: [`domain`] holds entities, ports, and
//! services; [`inbound`] and [`outbound`] hold the adapters; [`server`]
//! wires everything into an Actix application.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(test)]
pub(crate) mod test_support;

pub use doc::ApiDoc;
pub use middleware::Trace;
