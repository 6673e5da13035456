//! XML property list reading and writing.
//!
//! Property lists are parsed into a [`Value`] tree and written back with the
//! standard XML declaration and Apple DOCTYPE, so files produced here can be
//! consumed by `launchd` and the daemons it manages.

pub mod parser;
pub mod value;
pub mod writer;

pub use parser::{parse, parse_file, ParseError};
pub use value::{Dict, Value};
pub use writer::{write, write_file, WriteError};
