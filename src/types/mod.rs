//! Core types for eventscout.

pub mod generation;
pub mod message;
pub mod profile;
pub mod state;

pub use generation::*;
pub use message::*;
pub use profile::*;
pub use state::*;
