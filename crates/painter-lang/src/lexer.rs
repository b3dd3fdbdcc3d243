// ── Line ──────────────────────────────────────────────────────────────────

/// One non-blank script line split into whitespace-separated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'s> {
    /// 1-based line number in the script.
    pub number: usize,
    /// The line as written, without its terminator.
    pub text: &'s str,
    pub keyword: &'s str,
    pub args: Vec<&'s str>,
}

impl<'s> Line<'s> {
    /// Splits `text`; returns `None` for blank or whitespace-only lines.
    pub fn split(number: usize, text: &'s str) -> Option<Self> {
        let mut fields = text.split_whitespace();
        let keyword = fields.next()?;
        Some(Self {
            number,
            text,
            keyword,
            args: fields.collect(),
        })
    }
}

// ── Lexer ─────────────────────────────────────────────────────────────────

/// Iterates the non-blank lines of `src`. Accepts `\n` and `\r\n` endings.
pub fn lines(src: &str) -> impl Iterator<Item = Line<'_>> {
    src.lines()
        .enumerate()
        .filter_map(|(i, text)| Line::split(i + 1, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let line = Line::split(3, "  figure \t0.5   0.25 ").unwrap();
        assert_eq!(line.number, 3);
        assert_eq!(line.keyword, "figure");
        assert_eq!(line.args, vec!["0.5", "0.25"]);
    }

    #[test]
    fn blank_lines_are_skipped_but_counted() {
        let numbers: Vec<usize> = lines("white\n\n   \r\nupdate\r\n").map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 4]);
    }

    #[test]
    fn empty_source_has_no_lines() {
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines(" \n\t\n").count(), 0);
    }
}
