//! OptionalCharsMarkerParser — reads a fixed literal string such as the `*`
//! in `\section*`.

use crate::latexnodes::error::ParseError;
use crate::latexnodes::node::{CarryoverInfo, Node};
use crate::latexnodes::parsing_state::ParsingState;
use crate::latexnodes::token::TokenKind;
use crate::latexnodes::token_reader::TokenReader;

use super::{Parser, Walker};

#[derive(Debug, Clone)]
pub struct OptionalCharsMarkerParser {
    pub chars: String,
    pub allow_pre_space: bool,
}

impl Parser for OptionalCharsMarkerParser {
    fn parse(
        &self,
        _walker: &Walker,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, CarryoverInfo), ParseError> {
        let start_pos = token_reader.cur_pos();
        let mut pos_end = start_pos;

        for (i, expected) in self.chars.chars().enumerate() {
            let peeked = token_reader
                .peek_token(state)
                .map_err(ParseError::from_token_error)?;

            let matches = matches!(
                &peeked,
                Some(tok) if tok.kind == TokenKind::Char
                    && tok.arg.chars().next() == Some(expected)
                    && (self.allow_pre_space || i > 0 || tok.pre_space.is_empty())
            );

            if !matches {
                token_reader.move_to_pos_chars(start_pos);
                return Ok((Vec::new(), CarryoverInfo::none()));
            }

            let tok = token_reader
                .next_token(state)
                .map_err(ParseError::from_token_error)?
                .expect("peeked token must still be present");
            pos_end = tok.pos_end;
        }

        Ok((
            vec![Node::Marker {
                text: self.chars.clone(),
                pos: start_pos,
                pos_end,
            }],
            CarryoverInfo::none(),
        ))
    }
}
