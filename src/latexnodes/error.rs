//! Error types surfaced to callers of the tokenizer and parser framework.
//!
//! Following the teacher's convention (see
//! `lex-parser/src/lex/lexing/common.rs::LexError`), these are plain structs
//! with hand-written `Display` impls — no `thiserror`/`anyhow`. Internal
//! contract violations that valid input can never trigger (e.g.
//! `ParsingState::sub_context` being asked for `in_math_mode(true)` with no
//! delimiter) are reported as a `panic!`, not one of these error types.

use std::fmt;

use crate::latexnodes::node::Node;

/// The lexer could not produce a well-formed token at the current
/// position: e.g. `\begin` without a following `{name}` when environments
/// are enabled, a bare trailing backslash at end of input, or an
/// unterminated verbatim argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParseError {
    pub pos: usize,
    pub message: String,
}

impl TokenParseError {
    pub fn new(pos: usize, message: impl Into<String>) -> Self {
        TokenParseError {
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for TokenParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token parse error at position {}: {}", self.pos, self.message)
    }
}

impl std::error::Error for TokenParseError {}

/// A parser rejected the tokens it saw: a required delimited argument was
/// not found, or an unknown argument spec was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub pos: usize,
    pub message: String,
    /// Whatever nodes had already been built before the failure, if the
    /// parser that raised this chose to keep them.
    pub partial_nodes: Option<Vec<Node>>,
}

impl ParseError {
    pub fn new(pos: usize, message: impl Into<String>) -> Self {
        ParseError {
            pos,
            message: message.into(),
            partial_nodes: None,
        }
    }

    pub fn with_partial_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.partial_nodes = Some(nodes);
        self
    }

    /// Wraps a [`TokenParseError`] encountered while a parser was reading
    /// tokens; the parser's own position context (if any) is not added —
    /// callers surface the token error's own position unchanged, per the
    /// "the standard argument parser does not wrap errors" propagation
    /// policy.
    pub fn from_token_error(err: TokenParseError) -> Self {
        ParseError::new(err.pos, err.message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at position {}: {}", self.pos, self.message)
    }
}

impl std::error::Error for ParseError {}
