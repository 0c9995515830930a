//! Assorted helper functions for the engine.
mod addresses;

pub use addresses::random_deposit_address;
