mod auth;
pub mod channel;
pub mod client;
mod pickups;
pub mod types;

pub use client::*;
pub use types::*;
