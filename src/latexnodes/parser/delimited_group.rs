//! DelimitedGroupParser — reads `<open>…<close>`, honoring nested balanced
//! pairs of the same delimiters.

use crate::latexnodes::error::ParseError;
use crate::latexnodes::node::{CarryoverInfo, Node};
use crate::latexnodes::parsing_state::ParsingState;
use crate::latexnodes::token::{Token, TokenKind};
use crate::latexnodes::token_reader::TokenReader;

use super::expression::ExpressionParser;
use super::{Parser, Walker};

#[derive(Debug, Clone)]
pub struct DelimitedGroupParser {
    pub delimiters: (String, String),
    pub optional: bool,
    pub allow_pre_space: bool,
}

fn token_matches(token: &Token, delim: &str) -> bool {
    match delim {
        "{" => token.kind == TokenKind::BraceOpen,
        "}" => token.kind == TokenKind::BraceClose,
        other => token.kind == TokenKind::Char && token.arg == other,
    }
}

impl Parser for DelimitedGroupParser {
    fn parse(
        &self,
        walker: &Walker,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, CarryoverInfo), ParseError> {
        let start_pos = token_reader.cur_pos();

        let peeked = token_reader
            .peek_token(state)
            .map_err(ParseError::from_token_error)?;
        let opens = matches!(
            &peeked,
            Some(tok) if token_matches(tok, &self.delimiters.0)
                && (self.allow_pre_space || tok.pre_space.is_empty())
        );

        if !opens {
            if self.optional {
                return Ok((Vec::new(), CarryoverInfo::none()));
            }
            return Err(ParseError::new(
                start_pos,
                format!("expected opening delimiter '{}'", self.delimiters.0),
            ));
        }

        let open_tok = token_reader
            .next_token(state)
            .map_err(ParseError::from_token_error)?
            .expect("peeked token must still be present");

        // Brace groups nest for free: a nested `{...}` is fully consumed by
        // ExpressionParser's own recursive brace handling, so this loop
        // never sees an inner open/close brace directly. Non-brace
        // delimiters (e.g. parens used by an `r(  )` arg spec) aren't
        // recognized by ExpressionParser at all, so nested occurrences are
        // tracked here by depth instead.
        let is_brace = self.delimiters.0 == "{" && self.delimiters.1 == "}";
        let mut depth: usize = 1;
        let mut children = Vec::new();
        let mut current_state = state.clone();

        loop {
            let peeked = token_reader
                .peek_token(&current_state)
                .map_err(ParseError::from_token_error)?;

            match peeked {
                None => {
                    return Err(ParseError::new(
                        token_reader.cur_pos(),
                        "unterminated delimited group",
                    )
                    .with_partial_nodes(children));
                }
                Some(tok) if token_matches(&tok, &self.delimiters.1) => {
                    let close_tok = token_reader
                        .next_token(&current_state)
                        .map_err(ParseError::from_token_error)?
                        .expect("peeked token must still be present");
                    depth -= 1;
                    if depth == 0 {
                        return Ok((
                            vec![Node::Group {
                                delimiters: self.delimiters.clone(),
                                children,
                                pos: open_tok.pos,
                                pos_end: close_tok.pos_end,
                            }],
                            CarryoverInfo::none(),
                        ));
                    }
                    children.push(Node::Chars {
                        text: close_tok.arg,
                        pos: close_tok.pos,
                        pos_end: close_tok.pos_end,
                    });
                }
                Some(tok) if !is_brace && token_matches(&tok, &self.delimiters.0) => {
                    let open_tok = token_reader
                        .next_token(&current_state)
                        .map_err(ParseError::from_token_error)?
                        .expect("peeked token must still be present");
                    depth += 1;
                    children.push(Node::Chars {
                        text: open_tok.arg,
                        pos: open_tok.pos,
                        pos_end: open_tok.pos_end,
                    });
                }
                _ => {
                    let (mut nodes, next_state) = walker.parse_content(
                        &ExpressionParser::default(),
                        token_reader,
                        &current_state,
                    )?;
                    children.append(&mut nodes);
                    current_state = next_state;
                }
            }
        }
    }
}
