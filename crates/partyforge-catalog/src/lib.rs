//! Immutable catalog records and team representations for the team optimizer.
//!
//! This crate holds the data the optimizer reads but never mutates:
//!
//! - [`record`] - [`Species`], [`Move`], [`ElementType`] and the type-effectiveness chart
//! - [`team`] - [`Roster`] (index form used during search) and [`Team`] (resolved output)
//!
//! Catalog loading and candidate filtering live outside this workspace. Records are
//! deserialized with `serde` from whatever the upstream pipeline produced and are then
//! shared by reference for the rest of a run.
//!
//! # Example
//!
//! ```
//! use partyforge_catalog::{ElementType, Roster, Slot};
//!
//! let multiplier = ElementType::Water.effectiveness_against(ElementType::Fire);
//! assert_eq!(multiplier, 2.0);
//!
//! let roster: Roster = (0..6).map(|species| Slot::new(species, [])).collect();
//! assert_eq!(roster.len(), 6);
//! ```

pub use self::{record::*, team::*};

pub mod record;
pub mod team;
