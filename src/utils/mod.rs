/// Supporting utilities for the metronome SDK
///
/// Address derivation lives here. Derivation is pure: callers on the read and
/// write paths independently re-derive the same address and must agree
/// without any shared cache.
pub mod addresses;

pub use addresses::*;
