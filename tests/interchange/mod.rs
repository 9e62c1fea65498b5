//! Interchange layer tests
//!
//! - Range-address codec
//! - Whole-document round trips over every tree kind
//! - Golden wire bytes and decode failures

pub mod tests_round_trip;
pub mod tests_wire_format;
