use std::fmt;

/// Why a script line was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnknownCommand(String),
    ArgumentCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    InvalidNumber {
        command: &'static str,
        value: String,
    },
    /// The script source could not be read.
    Io(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnknownCommand(name) => write!(f, "unknown command: {name}"),
            ParseErrorKind::ArgumentCount { command, expected: 0, .. } => {
                write!(f, "unexpected arguments for {command} command")
            }
            ParseErrorKind::ArgumentCount { command, expected, found } => write!(
                f,
                "{command} command requires {expected} arguments, got {found}"
            ),
            ParseErrorKind::InvalidNumber { command, value } => {
                write!(f, "invalid argument for {command}: {value:?} is not a finite number")
            }
            ParseErrorKind::Io(msg) => write!(f, "read failed: {msg}"),
        }
    }
}

/// A rejected script. The whole batch is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// 1-based number of the offending line.
    pub line: usize,
    /// The offending line as written (empty for read failures).
    pub text: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: usize, text: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self { line, text: text.into(), kind }
    }

    pub(crate) fn io(line: usize, err: std::io::Error) -> Self {
        Self::new(line, String::new(), ParseErrorKind::Io(err.to_string()))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Io(_) => write!(f, "line {}: {}", self.line, self.kind),
            kind => write!(
                f,
                "line {}: failed to parse command '{}': {}",
                self.line, self.text, kind
            ),
        }
    }
}

impl std::error::Error for ParseError {}
