//! Common, shared types.

pub mod layers;
pub mod lifecycle;
pub mod rng;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
