//! Input readers - parse source files into the syntax model.

#[cfg(feature = "read-csharp")]
pub mod csharp;

#[cfg(feature = "read-csharp")]
pub use csharp::{CSHARP_READER, CSharpReader, read_csharp};

pub mod json;

pub use json::{JSON_READER, JsonSyntaxReader, read_json};
