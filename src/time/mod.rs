//! Time handling: the global clock abstraction and the `simulate` command.

pub mod simulate;
pub mod source;
