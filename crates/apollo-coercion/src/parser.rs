//! Adapter from [`apollo_parser`]'s concrete syntax tree to this crate's located AST.
//!
//! Parsing itself belongs to `apollo-parser`. This module only configures it,
//! keeps source text around to map byte offsets to line and column numbers,
//! and converts the parts of a document that coercion needs.

use crate::ast;
use crate::ExecutableDocument;
use crate::FileId;
use crate::NodeLocation;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;

/// Configuration for parsing an input string as GraphQL syntax
#[derive(Default, Debug, Clone)]
pub struct Parser {
    recursion_limit: Option<usize>,
    token_limit: Option<usize>,
    recursion_reached: usize,
    tokens_reached: usize,
}

/// Records information about a file that was parsed,
/// for converting node locations to line and column numbers.
#[derive(Clone)]
pub struct SourceFile {
    pub(crate) path: PathBuf,
    pub(crate) source_text: String,
    line_starts: OnceLock<Vec<usize>>,
}

/// Parsed source files by ID
pub type SourceMap = Arc<IndexMap<FileId, Arc<SourceFile>>>;

/// A syntax error, or a parser limit that was reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub location: Option<NodeLocation>,
}

/// Returned when parsing fails. Contains every error reported by the parser.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} syntax error(s) in {}", .errors.len(), .path.display())]
pub struct ParseErrors {
    pub errors: Vec<ParseError>,
    pub path: PathBuf,
    pub sources: SourceMap,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the recursion limit to use while parsing.
    ///
    /// Coercion recurses as deep as values are nested,
    /// so this limit also bounds coercion depth.
    pub fn recursion_limit(mut self, value: usize) -> Self {
        self.recursion_limit = Some(value);
        self
    }

    /// Configure the limit on the number of tokens to parse.
    /// If an input document is too big, parsing will be aborted.
    /// By default, there is no limit.
    pub fn token_limit(mut self, value: usize) -> Self {
        self.token_limit = Some(value);
        self
    }

    /// Parse the given source text as an executable document:
    /// operations with their variable definitions and field arguments.
    ///
    /// `path` is the filesystem path (or arbitrary string) used in diagnostics
    /// to identify this source file to users.
    pub fn parse_executable(
        &mut self,
        source_text: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<ExecutableDocument, ParseErrors> {
        let file_id = FileId::new();
        let (tree, sources, errors) = self.parse_common(
            source_text.into(),
            path.as_ref().to_owned(),
            file_id,
            |parser| parser.parse(),
        );
        if !errors.is_empty() {
            return Err(ParseErrors {
                errors,
                path: path.as_ref().to_owned(),
                sources,
            });
        }
        Ok(ExecutableDocument::from_cst(tree.document(), file_id, sources))
    }

    /// Parse the given source text as a reference to an input type, such as `[Int!]!`.
    pub fn parse_type(
        &mut self,
        source_text: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<ast::Type, ParseErrors> {
        let file_id = FileId::new();
        let (tree, sources, mut errors) = self.parse_common(
            source_text.into(),
            path.as_ref().to_owned(),
            file_id,
            |parser| parser.parse_type(),
        );
        let ty = ast::Type::from_cst(&tree.ty(), file_id);
        match ty {
            Some(ty) if errors.is_empty() => Ok(ty),
            _ => {
                if errors.is_empty() {
                    errors.push(ParseError {
                        message: "expected a type".to_owned(),
                        location: None,
                    })
                }
                Err(ParseErrors {
                    errors,
                    path: path.as_ref().to_owned(),
                    sources,
                })
            }
        }
    }

    fn parse_common<T: apollo_parser::cst::CstNode>(
        &mut self,
        source_text: String,
        path: PathBuf,
        file_id: FileId,
        parse: impl FnOnce(apollo_parser::Parser) -> apollo_parser::SyntaxTree<T>,
    ) -> (apollo_parser::SyntaxTree<T>, SourceMap, Vec<ParseError>) {
        let mut parser = apollo_parser::Parser::new(&source_text);
        if let Some(value) = self.recursion_limit {
            parser = parser.recursion_limit(value)
        }
        if let Some(value) = self.token_limit {
            parser = parser.token_limit(value)
        }
        let tree = parse(parser);
        self.recursion_reached = tree.recursion_limit().high;
        self.tokens_reached = tree.token_limit().high;
        let errors = tree
            .errors()
            .map(|parser_error| {
                // Silently drop locations at index beyond 4 GiB.
                let location = u32::try_from(parser_error.index())
                    .ok()
                    .zip(u32::try_from(parser_error.data().len()).ok())
                    .map(|(start, len)| NodeLocation {
                        file_id,
                        start,
                        end: start.saturating_add(len),
                    });
                ParseError {
                    message: parser_error.message().to_owned(),
                    location,
                }
            })
            .collect::<Vec<_>>();
        if !errors.is_empty() {
            tracing::debug!(
                path = %path.display(),
                errors = errors.len(),
                "GraphQL source failed to parse"
            );
        }
        let source_file = Arc::new(SourceFile::new(path, source_text));
        let sources = Arc::new(IndexMap::from([(file_id, source_file)]));
        (tree, sources, errors)
    }

    /// Get the current recursion limit reached while parsing.
    pub fn recursion_reached(&self) -> usize {
        self.recursion_reached
    }

    /// Get the current number of tokens parsed.
    pub fn tokens_reached(&self) -> usize {
        self.tokens_reached
    }
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, source_text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source_text: source_text.into(),
            line_starts: OnceLock::new(),
        }
    }

    /// The filesystem path (or arbitrary string) used in diagnostics
    /// to identify this source file to users.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    fn line_starts(&self) -> &[usize] {
        self.line_starts.get_or_init(|| {
            let mut starts = vec![0];
            let bytes = self.source_text.as_bytes();
            let mut i = 0;
            while i < bytes.len() {
                match bytes[i] {
                    b'\n' => starts.push(i + 1),
                    // https://spec.graphql.org/October2021/#LineTerminator
                    b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
                    _ => {}
                }
                i += 1;
            }
            starts
        })
    }

    /// Returns zero-based line and column numbers for a UTF-8 byte offset.
    /// Columns count Unicode Scalar Values like [`str::chars`].
    pub fn get_line_column(&self, index: usize) -> Option<(usize, usize)> {
        if index > self.source_text.len() {
            return None;
        }
        let starts = self.line_starts();
        let line = starts.partition_point(|&start| start <= index) - 1;
        let line_text = self.source_text.get(starts[line]..index)?;
        Some((line, line_text.chars().count()))
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            path,
            source_text,
            line_starts: _, // Skipped: it’s a cache and would make debugging other things noisy
        } = self;
        f.debug_struct("SourceFile")
            .field("path", path)
            .field("source_text", source_text)
            .finish()
    }
}
