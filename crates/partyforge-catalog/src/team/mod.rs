//! Team representations.
//!
//! During search a team is a [`Roster`]: six [`Slot`]s holding indices into the candidate
//! list and into each species' learnable moves. [`Loadout`] borrows the records a slot
//! points to, and [`Team`] is the owned, serializable result handed back to callers.

pub use self::{resolved::*, roster::*};

mod roster;
mod resolved;
