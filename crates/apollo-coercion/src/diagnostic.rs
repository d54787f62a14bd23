//! Pretty-printing of errors for command-line tools,
//! with labeled lines of GraphQL source code.
//!
//! ```
//! use apollo_coercion::diagnostic::ToDiagnostic;
//! # use apollo_coercion::{ExecutableDocument, Schema, JsonMap};
//! # let schema = Schema::builder().build().unwrap();
//! let document = ExecutableDocument::parse("query($n: Int!) { a }", "query.graphql").unwrap();
//! let operation = document.get_operation(None).unwrap();
//! let values = JsonMap::new();
//! let Err(errors) =
//!     apollo_coercion::coercion::coerce_variable_values(&schema, operation, &values)
//! else {
//!     panic!("expected a missing variable")
//! };
//! for error in &errors {
//!     eprintln!("{}", error.to_diagnostic(&document.sources))
//! }
//! ```

use crate::coercion::CoercionError;
use crate::coercion::CoercionErrorKind;
use crate::parser::ParseError;
use crate::response::GraphQLLocation;
use crate::FileId;
use crate::NodeLocation;
use crate::SourceFile;
use crate::SourceMap;
use ariadne::ColorGenerator;
use ariadne::ReportKind;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

/// An error together with the sources its locations point into.
///
/// `Display` renders the report without colors, `Debug` with colors.
pub struct Diagnostic<T> {
    pub sources: SourceMap,
    pub error: T,
}

/// An error report in progress, with labels on lines of GraphQL source.
pub struct CliReport {
    sources: SourceMap,
    colors: ColorGenerator,
    report: ariadne::ReportBuilder<'static, MappedSpan>,
}

/// Whether to print ANSI colors
#[derive(Debug, Clone, Copy)]
pub enum Color {
    Never,
    StderrIsTerminal,
}

/// Errors that can be rendered as a [`Diagnostic`]
pub trait ToDiagnostic {
    /// Where the report points first
    fn location(&self) -> Option<NodeLocation>;

    /// Adds the message, labels and notes for this error
    fn report(&self, report: &mut CliReport);

    /// Pairs the error with `sources`, usually
    /// [`ExecutableDocument::sources`][crate::ExecutableDocument::sources].
    fn to_diagnostic(self, sources: &SourceMap) -> Diagnostic<Self>
    where
        Self: Sized,
    {
        Diagnostic {
            sources: sources.clone(),
            error: self,
        }
    }
}

type MappedSpan = (FileId, Range<usize>);

/// ariadne spans count chars, node locations count bytes
fn map_span(sources: &SourceMap, location: NodeLocation) -> Option<MappedSpan> {
    let source = sources.get(&location.file_id())?;
    let start = char_index(source, location.offset())?;
    let end = char_index(source, location.end_offset())?;
    Some((location.file_id(), start..end))
}

fn char_index(source: &SourceFile, byte_index: usize) -> Option<usize> {
    Some(source.source_text().get(..byte_index)?.chars().count())
}

impl CliReport {
    /// Starts a report pointing at `location` in one of `sources`.
    pub fn builder(sources: SourceMap, location: Option<NodeLocation>, color: Color) -> Self {
        let (file_id, range) = location
            .and_then(|location| map_span(&sources, location))
            .unwrap_or((FileId::NONE, 0..0));
        // With the `auto-color` feature, ariadne checks that stderr is a terminal
        let enable_color = matches!(color, Color::StderrIsTerminal);
        let config = ariadne::Config::default().with_color(enable_color);
        Self {
            sources,
            colors: ColorGenerator::new(),
            report: ariadne::Report::build(ReportKind::Error, file_id, range.start)
                .with_config(config),
        }
    }

    /// Set the main message for the report.
    pub fn with_message(&mut self, message: impl ToString) {
        self.report.set_message(message);
    }

    /// Set a note not related to a source location.
    pub fn with_note(&mut self, note: impl ToString) {
        self.report.set_note(note);
    }

    /// Labels a location. Nothing is labeled for a node without location.
    pub fn with_label_opt(&mut self, location: Option<NodeLocation>, message: impl ToString) {
        if let Some(mapped_span) = location.and_then(|location| map_span(&self.sources, location)) {
            self.report.add_label(
                ariadne::Label::new(mapped_span)
                    .with_message(message)
                    .with_color(self.colors.next()),
            );
        }
    }

    /// Write the report to a [`Write`].
    ///
    /// [`Write`]: std::io::Write
    pub fn write(self, w: impl std::io::Write) -> std::io::Result<()> {
        let report = self.report.finish();
        report.write(
            Cache {
                sources: &self.sources,
                loaded: HashMap::new(),
            },
            w,
        )
    }

    /// Write the report to a [`fmt::Formatter`].
    pub fn fmt(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Vec::new();
        self.write(&mut buffer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer))
    }
}

/// Source text for ariadne, loaded on first use
struct Cache<'a> {
    sources: &'a SourceMap,
    loaded: HashMap<FileId, ariadne::Source>,
}

impl ariadne::Cache<FileId> for Cache<'_> {
    type Storage = String;

    fn fetch(&mut self, file_id: &FileId) -> Result<&ariadne::Source, Box<dyn fmt::Debug + '_>> {
        let sources = self.sources;
        let text = match sources.get(file_id) {
            Some(source_file) => source_file.source_text(),
            None if *file_id == FileId::NONE => "",
            None => return Err(Box::new(format!("source file not found: {file_id:?}"))),
        };
        let source = self
            .loaded
            .entry(*file_id)
            .or_insert_with(|| ariadne::Source::from(text.to_owned()));
        Ok(&*source)
    }

    fn display<'a>(&self, file_id: &'a FileId) -> Option<Box<dyn fmt::Display + 'a>> {
        let name = match self.sources.get(file_id) {
            Some(source_file) => source_file.path().display().to_string(),
            None => "(no source file)".to_owned(),
        };
        Some(Box::new(name))
    }
}

impl ToDiagnostic for CoercionError {
    fn location(&self) -> Option<NodeLocation> {
        self.locations.first().copied()
    }

    fn report(&self, report: &mut CliReport) {
        report.with_message(&self.message);
        let mut locations = self.locations.iter().copied();
        report.with_label_opt(locations.next(), self.kind.tag());
        let secondary = match self.kind {
            CoercionErrorKind::VariableUsageIncompatible => "variable used here",
            _ => "variable defined here",
        };
        for location in locations {
            report.with_label_opt(Some(location), secondary);
        }
        if let Some(extensions) = &self.extensions {
            report.with_note(format_args!(
                "see {} ({})",
                extensions.rule.spec_url(),
                extensions.rule.name()
            ));
        }
    }
}

impl ToDiagnostic for ParseError {
    fn location(&self) -> Option<NodeLocation> {
        self.location
    }

    fn report(&self, report: &mut CliReport) {
        report.with_message("syntax error");
        report.with_label_opt(self.location, &self.message);
    }
}

impl<T: ToDiagnostic> ToDiagnostic for &T {
    fn location(&self) -> Option<NodeLocation> {
        ToDiagnostic::location(*self)
    }

    fn report(&self, report: &mut CliReport) {
        ToDiagnostic::report(*self, report)
    }
}

impl<T: ToDiagnostic> Diagnostic<T> {
    /// Get the line and column number where this diagnostic was raised.
    pub fn get_line_column(&self) -> Option<GraphQLLocation> {
        GraphQLLocation::from_node(&self.sources, self.error.location())
    }

    /// Produce the diagnostic report, optionally with colors for the CLI.
    fn report(&self, color: Color) -> CliReport {
        let mut report = CliReport::builder(self.sources.clone(), self.error.location(), color);
        self.error.report(&mut report);
        report
    }

    /// Pretty-print the diagnostic to a [`Write`].
    ///
    /// [`Write`]: std::io::Write
    pub fn write(&self, color: Color, w: impl std::io::Write) -> std::io::Result<()> {
        self.report(color).write(w)
    }
}

impl<T: ToDiagnostic> fmt::Debug for Diagnostic<T> {
    /// Colored if stderr is a terminal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report(Color::StderrIsTerminal).fmt(f)
    }
}

impl<T: ToDiagnostic> fmt::Display for Diagnostic<T> {
    /// Never colored
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report(Color::Never).fmt(f)
    }
}
