//! Split a migration file into executable statements.
//!
//! The file is tokenized with sqlparser's tokenizer rather than parsed, so any
//! statement the target database accepts survives, while unterminated string
//! literals, quoted identifiers and block comments are still caught before
//! anything touches the database.

use crate::config::Dialect;
use sqlparser::dialect::{
    Dialect as ParserDialect, DuckDbDialect, GenericDialect, MySqlDialect, PostgreSqlDialect,
    SQLiteDialect,
};
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer};
use thiserror::Error;

/// A migration file that could not be tokenized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct SplitError {
    pub message: String,
    pub line: u64,
    pub column: u64,
}

impl Dialect {
    fn parser_dialect(self) -> Box<dyn ParserDialect> {
        match self {
            Dialect::Generic => Box::new(GenericDialect {}),
            Dialect::Sqlite => Box::new(SQLiteDialect {}),
            Dialect::DuckDb => Box::new(DuckDbDialect {}),
            Dialect::Postgres => Box::new(PostgreSqlDialect {}),
            Dialect::MySql => Box::new(MySqlDialect {}),
        }
    }
}

/// Split `sql` on top-level semicolons.
///
/// Statements are returned trimmed and in source order. Segments holding only
/// whitespace or comments are dropped, so an empty result means the file has
/// nothing to execute. Semicolons inside `CASE ... END` and inside a
/// `BEGIN ... END` block that does not open a statement (trigger bodies) do
/// not split.
pub fn split_statements(sql: &str, dialect: Dialect) -> Result<Vec<String>, SplitError> {
    let parser_dialect = dialect.parser_dialect();
    let tokens = Tokenizer::new(parser_dialect.as_ref(), sql)
        .with_unescape(false)
        .tokenize_with_location()
        .map_err(|e| SplitError {
            message: e.message,
            line: e.location.line,
            column: e.location.column,
        })?;

    let line_starts = line_starts(sql);
    let mut statements = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut has_code = false;

    for TokenWithSpan { token, span } in &tokens {
        match token {
            Token::Whitespace(_) => continue,
            Token::SemiColon if depth == 0 => {
                let end = byte_offset(sql, &line_starts, span.start);
                if has_code {
                    statements.push(sql[start..end].trim().to_string());
                }
                start = end + 1;
                has_code = false;
                continue;
            }
            Token::Word(word) if word.quote_style.is_none() => match word.keyword {
                Keyword::BEGIN if has_code => depth += 1,
                Keyword::CASE => depth += 1,
                Keyword::END => depth = depth.saturating_sub(1),
                _ => {}
            },
            _ => {}
        }
        has_code = true;
    }

    if has_code {
        statements.push(sql[start..].trim().to_string());
    }

    Ok(statements)
}

/// Byte offset at which each line begins.
fn line_starts(sql: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(sql.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Convert a 1-based line/column (columns counted in chars) into a byte offset.
fn byte_offset(sql: &str, line_starts: &[usize], location: Location) -> usize {
    let line_index = usize::try_from(location.line.saturating_sub(1)).unwrap_or(usize::MAX);
    let Some(&line_start) = line_starts.get(line_index) else {
        return sql.len();
    };
    let column = usize::try_from(location.column.saturating_sub(1)).unwrap_or(usize::MAX);
    sql[line_start..]
        .char_indices()
        .nth(column)
        .map_or(sql.len(), |(i, _)| line_start + i)
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
