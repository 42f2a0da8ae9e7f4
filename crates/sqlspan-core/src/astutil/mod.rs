//! AST rewriting utilities.
//!
//! [`apply`] walks a tree in pre/post order handing each child slot to
//! the callbacks through a [`Cursor`], which supports replacing the
//! node and, for list slots, deleting it or inserting siblings.

mod apply;
mod node;

pub use apply::{apply, Cursor};
pub use node::Node;
