//! Result type shared by every operation that touches the remote document
//!
//! Mirrors the split the dashboard makes between problems shown to the user
//! (a missing column, an unknown work order) and faults that end the current
//! interaction (the API is down, a write was rejected).

use std::fmt;

/// Category of a user-facing error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// A required column is missing from a sheet
    Schema,
    /// The chosen work order is not usable on this sheet
    Selection,
    /// A remote fault that was turned into a message
    Remote,
    /// The sheet changed underneath an edit
    Conflict,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Selection => "selection",
            Self::Remote => "remote",
            Self::Conflict => "conflict",
        }
    }
}

/// A recoverable error meant to be shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub kind: ReportKind,
    pub message: String,
}

impl Report {
    pub fn new(kind: ReportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ReportKind::Schema, message)
    }

    pub fn selection(message: impl Into<String>) -> Self {
        Self::new(ReportKind::Selection, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ReportKind::Remote, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ReportKind::Conflict, message)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a boundary operation
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation succeeded
    Ready(T),
    /// The operation was refused; show the report and carry on
    Reported(Report),
    /// An unrecovered fault; the current interaction ends here
    Fatal(anyhow::Error),
}

impl<T> Outcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Reported(report) => Some(report),
            _ => None,
        }
    }

    /// The success value, if any
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Ready(value) => Outcome::Ready(f(value)),
            Self::Reported(report) => Outcome::Reported(report),
            Self::Fatal(err) => Outcome::Fatal(err),
        }
    }

    /// Separate fatal faults from the rest: `Err` only for [`Outcome::Fatal`]
    pub fn into_result(self) -> anyhow::Result<Result<T, Report>> {
        match self {
            Self::Ready(value) => Ok(Ok(value)),
            Self::Reported(report) => Ok(Err(report)),
            Self::Fatal(err) => Err(err),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// The value together with any report; a report yields the empty value
    pub fn into_parts(self) -> anyhow::Result<(T, Option<Report>)> {
        match self.into_result()? {
            Ok(value) => Ok((value, None)),
            Err(report) => Ok((T::default(), Some(report))),
        }
    }
}

impl<T> From<Report> for Outcome<T> {
    fn from(report: Report) -> Self {
        Self::Reported(report)
    }
}

impl<T> From<anyhow::Result<T>> for Outcome<T> {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Fatal(err),
        }
    }
}
