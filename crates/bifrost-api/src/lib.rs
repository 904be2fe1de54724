// bifrost-api: Async Rust client for the Bifrost fibre signup API

pub mod client;
pub mod error;
pub mod models;
pub mod signup;
pub mod sites;
pub mod transport;

pub use client::SignupClient;
pub use error::Error;
pub use models::{ErrorBody, SignupReceipt, SignupRequest, SiteResponse, UnitNumber};
pub use transport::TransportConfig;
