//! Binary particle swarm engine.
//!
//! Particles carry a binary position, a real-valued velocity, and a
//! personal best; one global best is shared by the swarm. Velocities
//! follow the classic inertia/cognitive/social update and positions are
//! re-sampled bitwise through a logistic sigmoid.
//!
//! # Key Types
//!
//! - [`PsoConfig`]: particle count, inertia, cognitive/social coefficients
//! - [`PsoEngine`]: the [`Optimizer`](crate::optimizer::Optimizer)
//!   implementation
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Kennedy & Eberhart (1997), "A discrete binary version of the
//!   particle swarm algorithm"

mod config;
mod engine;

pub use config::PsoConfig;
pub use engine::PsoEngine;
