use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Token, Tokenizer};
use thiserror::Error;

/// Which path a statement takes through the executor.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatementKind {
    Describe,
    Query,
    Update,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Usage: DESC tableName")]
pub struct DescribeUsage;

impl StatementKind {
    /// Classify by the leading keyword, case-insensitively.
    pub fn of(sql: &str) -> StatementKind {
        match leading_keyword(sql).as_deref() {
            Some("DESC" | "DESCRIBE") => StatementKind::Describe,
            Some("SELECT" | "SHOW" | "WITH") => StatementKind::Query,
            _ => StatementKind::Update,
        }
    }
}

/// First word of the statement, upper-cased. Comments, whitespace and
/// opening parentheses in front of it are skipped.
pub fn leading_keyword(sql: &str) -> Option<String> {
    let dialect = GenericDialect {};

    let Ok(tokens) = Tokenizer::new(&dialect, sql).tokenize() else {
        // unterminated quotes and the like; the database will complain
        return sql
            .split_whitespace()
            .next()
            .map(|word| word.trim_start_matches('(').to_uppercase());
    };

    tokens
        .into_iter()
        .find(|token| !matches!(token, Token::Whitespace(_) | Token::LParen))
        .and_then(|token| match token {
            Token::Word(word) if word.quote_style.is_none() => Some(word.value.to_uppercase()),
            _ => None,
        })
}

/// The table a `DESC`/`DESCRIBE` statement names, upper-cased for lookup.
pub fn describe_target(sql: &str) -> Result<String, DescribeUsage> {
    sql.split_whitespace()
        .nth(1)
        .map(str::to_uppercase)
        .ok_or(DescribeUsage)
}
