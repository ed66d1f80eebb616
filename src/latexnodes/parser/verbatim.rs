//! DelimitedVerbatimParser — reads content between delimiters without
//! tokenizing the body as LaTeX.

use crate::latexnodes::error::{ParseError, TokenParseError};
use crate::latexnodes::node::{CarryoverInfo, Node};
use crate::latexnodes::parsing_state::ParsingState;
use crate::latexnodes::token_reader::TokenReader;

use super::{Parser, Walker};

#[derive(Debug, Clone)]
pub struct DelimitedVerbatimParser {
    /// Explicit `(open, close)` delimiter pair, or `None` to autodetect:
    /// the first non-space character becomes the opening delimiter, paired
    /// with its natural counterpart (braces pair; any other character
    /// self-pairs).
    pub delimiter_chars: Option<(String, String)>,
}

fn natural_counterpart(open: char) -> char {
    match open {
        '{' => '}',
        '(' => ')',
        '[' => ']',
        '<' => '>',
        other => other,
    }
}

impl Parser for DelimitedVerbatimParser {
    fn parse(
        &self,
        _walker: &Walker,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, CarryoverInfo), ParseError> {
        let peeked = token_reader
            .peek_token(state)
            .map_err(ParseError::from_token_error)?;
        let open_pos = peeked
            .map(|tok| tok.pos)
            .ok_or_else(|| ParseError::new(token_reader.cur_pos(), "expected verbatim content, found end of input"))?;

        let (open, close) = match &self.delimiter_chars {
            Some((open, close)) => (open.clone(), close.clone()),
            None => {
                let c = token_reader.char_at(open_pos).ok_or_else(|| {
                    ParseError::new(open_pos, "expected verbatim content, found end of input")
                })?;
                (c.to_string(), natural_counterpart(c).to_string())
            }
        };

        if !token_reader.matches_literal(open_pos, &open) {
            return Err(ParseError::new(
                open_pos,
                format!("expected verbatim opening delimiter '{open}'"),
            ));
        }

        let body_start = open_pos + open.chars().count();
        let body_end = token_reader
            .find_literal(body_start, &close)
            .ok_or_else(|| {
                ParseError::from_token_error(TokenParseError::new(
                    body_start,
                    "unterminated verbatim argument",
                ))
            })?;

        let text = token_reader.slice(body_start, body_end);
        let pos_end = body_end + close.chars().count();
        token_reader.move_to_pos_chars(pos_end);

        Ok((
            vec![Node::Verbatim {
                text,
                pos: open_pos,
                pos_end,
            }],
            CarryoverInfo::none(),
        ))
    }
}
