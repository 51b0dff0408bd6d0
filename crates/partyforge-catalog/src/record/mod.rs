//! Catalog records.
//!
//! - [`ElementType`] - the 18 elemental types and their effectiveness chart
//! - [`Move`] - a learnable move with its damage class and power figures
//! - [`Species`] - a creature with base stats, types, flags and learnable moves

pub use self::{element_type::*, moves::*, species::*};

mod element_type;
mod moves;
mod species;
