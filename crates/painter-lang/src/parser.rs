use std::io::BufRead;

use painter_engine::Operation;

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{lines, Line};

// ── Entry points ──────────────────────────────────────────────────────────

/// Parses a whole script. All-or-nothing: the first bad line fails the batch.
pub fn parse_str(src: &str) -> Result<Vec<Operation>, ParseError> {
    lines(src).map(|line| parse_line(&line)).collect()
}

/// Like [`parse_str`], reading the script line by line from `reader`.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Operation>, ParseError> {
    let mut ops = Vec::new();

    for (i, text) in reader.lines().enumerate() {
        let number = i + 1;
        let text = text.map_err(|e| ParseError::io(number, e))?;
        if let Some(line) = Line::split(number, &text) {
            ops.push(parse_line(&line)?);
        }
    }

    Ok(ops)
}

// ── Commands ──────────────────────────────────────────────────────────────

fn parse_line(line: &Line<'_>) -> Result<Operation, ParseError> {
    command(line).map_err(|kind| ParseError::new(line.number, line.text, kind))
}

fn command(line: &Line<'_>) -> Result<Operation, ParseErrorKind> {
    let args = line.args.as_slice();

    match line.keyword {
        "white" => {
            numbers::<0>("white", args)?;
            Ok(Operation::white())
        }
        "green" => {
            numbers::<0>("green", args)?;
            Ok(Operation::green())
        }
        "update" => {
            numbers::<0>("update", args)?;
            Ok(Operation::RequestUpdate)
        }
        "reset" => {
            numbers::<0>("reset", args)?;
            Ok(Operation::Reset)
        }
        "bgrect" => {
            let [x1, y1, x2, y2] = numbers("bgrect", args)?;
            Ok(Operation::SetHighlightRegion { x1, y1, x2, y2 })
        }
        "figure" => {
            let [x, y] = numbers("figure", args)?;
            Ok(Operation::AddFigure { x, y })
        }
        "move" => {
            let [dx, dy] = numbers("move", args)?;
            Ok(Operation::MoveFigures { dx, dy })
        }
        other => Err(ParseErrorKind::UnknownCommand(other.to_string())),
    }
}

/// Checks the argument count and parses every argument as a finite `f64`.
fn numbers<const N: usize>(command: &'static str, args: &[&str]) -> Result<[f64; N], ParseErrorKind> {
    if args.len() != N {
        return Err(ParseErrorKind::ArgumentCount {
            command,
            expected: N,
            found: args.len(),
        });
    }

    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseErrorKind::InvalidNumber {
                command,
                value: (*arg).to_string(),
            })?;
    }
    Ok(out)
}
