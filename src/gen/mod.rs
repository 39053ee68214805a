//! Code emitters consuming the final sorted module list.
//!
//! Each emitter writes one self-contained routine of the generated
//! artifact into a [`crate::emit::ScriptBuilder`]; none of them feeds back
//! into parsing.

pub mod complete;
pub mod dispatch;
pub mod dump;
pub mod help;

pub use complete::{CompletionState, FunctionCompletion, Suggestions};
