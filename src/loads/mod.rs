//! Loads applied to the beam

mod beam_load;

pub use beam_load::{Load, LoadKind};
