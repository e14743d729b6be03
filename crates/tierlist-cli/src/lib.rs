//! Library side of the `tierlist` command-line editor.

pub mod logging;
pub mod script;
