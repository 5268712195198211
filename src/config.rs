use std::fmt::{self, Debug, Display};

/// Type used for numeric record/variant labels and positional field indices.
pub type FieldIndex = u32;

/// Byte offset into the source text.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub usize);

impl Position {
    /// Compute 1-based line/column number in string.
    pub fn loc(self: &Self, input: &str) -> (u32, u32) {
        let offset = self.0.min(input.len());
        let mut line = 1;
        let mut line_start = 0;
        for (index, chr) in input.char_indices() {
            if index >= offset {
                break;
            }
            if chr == '\n' {
                line += 1;
                line_start = index + 1;
            }
        }
        let column = input[line_start..offset].chars().count() as u32 + 1;
        (line, column)
    }
}

impl Debug for Position {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl Display for Position {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}", self.0)
    }
}

/// How the parser treats a `type` definition whose name was already defined.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Duplicates {
    /// The later definition replaces the earlier one and a warning is logged.
    Shadow,
    /// The later definition is reported as a parse error and ignored.
    Reject,
}

/// Options controlling the parser.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    pub duplicates: Duplicates,
    /// Attach the nearest preceding comment to definitions, fields and methods.
    pub doc_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            duplicates  : Duplicates::Shadow,
            doc_comments: cfg!(feature = "comments"),
        }
    }
}
