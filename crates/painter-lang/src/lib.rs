//! Parser for the **painter command script**.
//!
//! One command per line, whitespace-separated fields, case-sensitive
//! keywords:
//!
//! | Line | Operation |
//! |------|-----------|
//! | `white` / `green` | background color |
//! | `bgrect x1 y1 x2 y2` | highlight rectangle, fractional coordinates |
//! | `figure x y` | add a figure, fractional coordinates |
//! | `move dx dy` | translate all figures, fractional deltas |
//! | `reset` | clear the scene |
//! | `update` | publish the current scene |
//!
//! Blank lines are ignored. Unknown keywords, wrong argument counts and
//! non-numeric arguments reject the whole script.
//!
//! # Quick start
//!
//! ```rust
//! use painter_lang::parse_str;
//!
//! let ops = parse_str("white\nfigure 0.5 0.5\nupdate").unwrap();
//! assert_eq!(ops.len(), 3);
//! assert!(parse_str("bgrect 0.1 0.2").is_err());
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse_reader, parse_str};
