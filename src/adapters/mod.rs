// Adapters layer: concrete implementations of the domain ports.

pub mod persistence;
