//! Line and field reader shared by the text formats.
//!
//! Records are newline separated with an optional `\r`; fields are tab
//! separated. Empty fields (from trailing tabs) are dropped. Line numbers in
//! errors are 1-based.

use std::str::FromStr;

use crate::{FormatError, FormatResult};

pub struct Lines<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Lines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').map(|l| l.trim_end_matches('\r')).collect(),
            pos: 0,
        }
    }

    /// Next line as (line number, fields).
    pub fn next_record(&mut self, what: &'static str) -> FormatResult<(usize, Vec<&'a str>)> {
        let line: &'a str = self
            .lines
            .get(self.pos)
            .copied()
            .ok_or(FormatError::Truncated { what })?;
        self.pos += 1;
        Ok((self.pos, fields(line)))
    }

    /// Next line holding a single number.
    pub fn next_value<T: FromStr>(&mut self, what: &'static str) -> FormatResult<T> {
        let (line, fields) = self.next_record(what)?;
        let first = fields.first().ok_or_else(|| FormatError::Line {
            line,
            reason: format!("missing {what}"),
        })?;
        parse_field(first, line, what)
    }

    /// Next line holding exactly `count` values (extra fields are ignored).
    pub fn next_values<T: FromStr>(
        &mut self,
        count: usize,
        what: &'static str,
    ) -> FormatResult<(usize, Vec<T>)> {
        let (line, fields) = self.next_record(what)?;
        if fields.len() < count {
            return Err(FormatError::Line {
                line,
                reason: format!("expected {count} {what}, found {}", fields.len()),
            });
        }
        let values = fields[..count]
            .iter()
            .map(|f| parse_field(f, line, what))
            .collect::<FormatResult<Vec<T>>>()?;
        Ok((line, values))
    }

    /// True when only blank lines remain.
    pub fn at_end(&self) -> bool {
        self.lines[self.pos.min(self.lines.len())..]
            .iter()
            .all(|l| l.trim().is_empty())
    }
}

pub fn fields(line: &str) -> Vec<&str> {
    line.split('\t')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

pub fn parse_field<T: FromStr>(field: &str, line: usize, what: &'static str) -> FormatResult<T> {
    field.parse().map_err(|_| FormatError::Line {
        line,
        reason: format!("invalid {what} '{field}'"),
    })
}
