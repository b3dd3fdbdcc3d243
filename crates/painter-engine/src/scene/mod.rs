//! Scene state.
//!
//! Responsibilities:
//! - hold the current background, highlight region and figures
//! - expose the mutation rules operations are built from
//!
//! No internal locking: the paint loop confines the state to its consumer thread.

mod state;

pub use state::State;
