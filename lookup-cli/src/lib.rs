pub mod client;
pub mod pricing;

pub use client::{Error, LookupClient};
