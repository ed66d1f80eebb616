//! The parser-combinator framework: a [`Parser`] trait plus a [`Walker`]
//! that threads [`CarryoverInfo`] between sibling parsers.
//!
//! Parsers never call each other directly. A parser that needs to parse
//! nested content always goes through [`Walker::parse_content`], so that a
//! sub-context it builds for that nested call cannot leak back into its own
//! caller, and so the call graph never becomes a cycle of parsers invoking
//! parsers invoking parsers.

pub mod delimited_group;
pub mod expression;
pub mod optional_marker;
pub mod standard_argument;
pub mod verbatim;

use crate::latexnodes::error::ParseError;
use crate::latexnodes::node::{CarryoverInfo, Node};
use crate::latexnodes::parsing_state::ParsingState;
use crate::latexnodes::token_reader::TokenReader;

/// One syntactic unit a [`Walker`] can invoke.
///
/// A parser must not retain `token_reader` across calls to `parse`, and must
/// not mutate `state` in place — any change it wants applied to later
/// siblings goes out through the returned [`CarryoverInfo`].
pub trait Parser {
    fn parse(
        &self,
        walker: &Walker,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, CarryoverInfo), ParseError>;
}

/// Drives a parse by invoking [`Parser`]s and threading carryover state
/// between siblings. The walker holds no parse state of its own; it exists
/// so that a carryover from one parser can reach the *next* sibling without
/// any parser needing a reference to its caller.
#[derive(Debug, Default)]
pub struct Walker {
    _private: (),
}

impl Walker {
    pub fn new() -> Self {
        Walker { _private: () }
    }

    /// Invokes `parser` and applies any carryover it returns to `state`,
    /// yielding the state the *next* sibling parser should use. The
    /// carryover never reaches back into `parser` itself.
    pub fn parse_content<P: Parser + ?Sized>(
        &self,
        parser: &P,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, ParsingState), ParseError> {
        let (nodes, carryover) = parser.parse(self, token_reader, state)?;
        let next_state = carryover.apply_to(state);
        Ok((nodes, next_state))
    }

    /// Runs `parsers` in order as siblings, threading the state carried
    /// over by each into the next, and concatenating every node produced.
    pub fn parse_sequence<P: Parser>(
        &self,
        parsers: &[P],
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        let mut current_state = state.clone();
        for parser in parsers {
            let (mut produced, next_state) =
                self.parse_content(parser, token_reader, &current_state)?;
            nodes.append(&mut produced);
            current_state = next_state;
        }
        Ok(nodes)
    }
}
