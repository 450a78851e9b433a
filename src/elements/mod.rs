//! Structural elements module

mod member;
mod node;
mod support;

pub use member::Element;
pub use node::Node;
pub use support::{BoundaryCondition, Reaction, ReactionKind};
