//! Utilities shared by the format layers.

pub mod xml;
