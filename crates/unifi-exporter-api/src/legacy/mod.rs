// Legacy API client modules
//
// Hand-written client for the UniFi controller's session-based endpoints
// wrapped in the standard `{ meta: { rc, msg }, data: [...] }` envelope.

pub mod auth;
pub mod client;
pub mod clients;
pub mod models;
pub mod networks;
pub mod system;

pub use client::LegacyClient;
