use std::fmt::{Display, Formatter};
use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTarget {
    Meal,
    Corner,
    Date,
}

impl ReferenceTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Corner => "corner",
            Self::Date => "date",
        }
    }
}

impl Display for ReferenceTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("failed to read page JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF data does not exist")]
    DocumentAbsent,

    #[error("meal header does not match `name(HH:MM~HH:MM)`: {text:?}")]
    MalformedHeader { text: String },

    #[error("no preceding {target} for cell at ({x:.2}, {y:.2})")]
    UnresolvedReference {
        target: ReferenceTarget,
        x: f64,
        y: f64,
    },

    #[error("date cell {text:?} is not a calendar date")]
    InvalidDate { text: String },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}
