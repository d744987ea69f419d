//! Cuckoo search engine.
//!
//! Nests hold candidate selections; each iteration perturbs every nest
//! with a Lévy-flight bit-flip walk (Mantegna's algorithm for the
//! heavy-tailed step), keeps candidates greedily, then abandons a fixed
//! fraction of the worst nests in favor of fresh random ones.
//!
//! # Key Types
//!
//! - [`CuckooConfig`]: nest count, abandonment fraction, Lévy exponent
//! - [`CuckooEngine`]: the [`Optimizer`](crate::optimizer::Optimizer)
//!   implementation
//!
//! # References
//!
//! - Yang & Deb (2009), "Cuckoo Search via Lévy Flights"
//! - Mantegna (1994), "Fast, accurate algorithm for numerical simulation
//!   of Lévy stable stochastic processes"

mod config;
mod engine;

pub use config::CuckooConfig;
pub use engine::CuckooEngine;
