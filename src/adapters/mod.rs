//! Adapters implementing the capability ports.

pub mod capabilities;
