//! Application layer managing state and business workflows.
//!
//! [`Wizard`] is the form state for one note; [`App`] layers the terminal's
//! screen, focus, and status handling on top of it.

pub mod state;
pub mod wizard;

pub use state::*;
pub use wizard::*;
