//! kasa-http - reqwest-backed implementation of the kasa [`Api`](kasa_core::Api) trait.

mod client;
mod error;

pub use client::{DEFAULT_TIMEOUT, HttpApi};
