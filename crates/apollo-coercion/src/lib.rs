#![doc = include_str!("../README.md")]

pub mod ast;
pub mod coercion;
pub mod diagnostic;
mod name;
mod node;
pub mod parser;
pub mod response;
pub mod schema;
pub mod validation;

pub use self::ast::ExecutableDocument;
pub use self::name::InvalidNameError;
pub use self::name::Name;
pub use self::node::FileId;
pub use self::node::Node;
pub use self::node::NodeLocation;
pub use self::parser::Parser;
pub use self::parser::SourceFile;
pub use self::parser::SourceMap;
pub use self::schema::Schema;
/// Re-export of the version of the `serde_json_bytes` crate used for [`JsonValue`] and [`JsonMap`]
pub use serde_json_bytes;

/// A JSON-compatible dynamically-typed value: the result of coercion,
/// and the representation of runtime variable values.
///
/// Note: [`serde_json_bytes::Value`] is similar
/// to [`serde_json::Value`][serde_json_bytes::serde_json::Value]
/// but uses its reference-counted [`ByteString`][serde_json_bytes::ByteString]
/// for string values and map keys.
pub type JsonValue = serde_json_bytes::Value;

/// A JSON-compatible object/map with string keys and dynamically-typed values.
pub type JsonMap = serde_json_bytes::Map<serde_json_bytes::ByteString, JsonValue>;
