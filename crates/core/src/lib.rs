//! Karat core domain logic.
//!
//! Pure, synchronous building blocks for composing jewelry products out of
//! combinatorial attributes: the reference catalog, product selections, the
//! variant matrix builder, the product form state machine and the save
//! payload handed to the persistence layer.

pub mod cartesian;
pub mod catalog;
pub mod error;
pub mod form;
pub mod matrix;
pub mod mix_mode;
pub mod naming;
pub mod payload;
pub mod record;
pub mod selection;
pub mod types;
pub mod variant;
