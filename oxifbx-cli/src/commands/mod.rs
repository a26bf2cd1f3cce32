//! Command implementations for OxiFBX CLI.

pub mod array;
pub mod inflate;
pub mod inspect;

pub use array::{ArrayOptions, ElementArg, cmd_array};
pub use inflate::{ChecksumArg, cmd_inflate};
pub use inspect::cmd_inspect;
