//! Button input handling
//!
//! Debounced polling of the three active-low buttons and the sequential
//! edit session they drive.

pub mod debounce;
pub mod edit;

pub use debounce::{Debouncer, LineLevels};
pub use edit::{EditPosition, EditSession, EditStep};
