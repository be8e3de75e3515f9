/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some are recovered from internally --- e.g. a malformed DIMACS token is
  skipped with a warning rather than surfaced.
- Others are external --- e.g. [InputNotReadable](ErrorKind::InputNotReadable)
  reports a path which could not be opened.

Nothing is retried; an error which is not explicitly recoverable is fatal to
the analysis session which observed it.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The input path is missing or unreadable.
    InputNotReadable,

    /// An error related to parsing.
    Parse(ParseError),

    /// A semantic check was requested but no oracle could be initialized.
    SolverUnavailable,

    /// A resource limit imposed by a collaborator was exceeded.
    ResourceExceeded,
}

/// Errors during parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// The final clause of the input was not terminated by `0`.
    MissingDelimiter,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNotReadable => write!(f, "The input could not be read"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::SolverUnavailable => write!(f, "No SAT oracle is available"),
            Self::ResourceExceeded => write!(f, "A resource limit was exceeded"),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProblemSpecification => write!(f, "invalid problem specification"),
            Self::Line(line) => write!(f, "failed to read line {line}"),
            Self::MissingDelimiter => write!(f, "a clause was left unterminated"),
        }
    }
}
