//! The [error format](https://spec.graphql.org/October2021/#sec-Errors)
//! of a GraphQL response, for reporting coercion errors to clients.

use crate::coercion::CoercionErrors;
use crate::JsonMap;
use crate::Name;
use crate::NodeLocation;
use crate::SourceMap;
use serde::Serialize;

/// A [GraphQL response](https://spec.graphql.org/October2021/#sec-Response-Format)
/// for a request that failed before execution.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    // <https://spec.graphql.org/October2021/#note-6f005> suggests serializing this first
    pub errors: Vec<GraphQLError>,

    /// Reserved for any additional information
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub extensions: JsonMap,
}

/// A serializable [error](https://spec.graphql.org/October2021/#sec-Errors.Error-result-format),
/// as found in a GraphQL [response][Response].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,

    /// Locations in the document relevant to the error, if any.
    pub locations: Vec<GraphQLLocation>,

    /// Where in the coerced value the error is.
    /// Serialized as `null` for an error about a whole value.
    pub path: Option<Vec<PathElement>>,

    /// Reserved for any additional information
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub extensions: JsonMap,
}

/// A source location (line and column numbers) for a [`GraphQLError`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub struct GraphQLLocation {
    /// The line number for this location, starting at 1 for the first line.
    pub line: usize,
    /// The column number for this location, starting at 1 and counting characters (Unicode Scalar
    /// Values) like [`str::chars`].
    pub column: usize,
}

/// An element of [`GraphQLError::path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathElement {
    /// The relevant key in an input object value
    Field(Name),

    /// The index of the relevant item in a list value
    ListIndex(usize),
}

impl Response {
    /// Create a response for a [request error]:
    /// handling of a request was aborted before execution started.
    /// The `data` entry is absent.
    ///
    /// [request error]: https://spec.graphql.org/October2021/#sec-Errors.Request-errors
    pub fn from_request_errors(errors: &CoercionErrors, sources: &SourceMap) -> Self {
        Self {
            errors: errors.to_graphql_errors(sources),
            extensions: JsonMap::new(),
        }
    }
}

impl GraphQLLocation {
    /// Convert a `NodeLocation` to a line and column number
    pub fn from_node(sources: &SourceMap, location: Option<NodeLocation>) -> Option<Self> {
        let loc = location?;
        let source = sources.get(&loc.file_id())?;
        source
            .get_line_column(loc.offset())
            .map(|(line, column)| GraphQLLocation {
                line: line + 1,
                column: column + 1,
            })
    }
}
