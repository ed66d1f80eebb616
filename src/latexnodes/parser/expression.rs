//! ExpressionParser — reads exactly one expression.

use crate::latexnodes::error::ParseError;
use crate::latexnodes::node::{CarryoverInfo, Node};
use crate::latexnodes::parsing_state::ParsingState;
use crate::latexnodes::token::TokenKind;
use crate::latexnodes::token_reader::TokenReader;

use super::delimited_group::DelimitedGroupParser;
use super::{Parser, Walker};

/// Reads one of: a single non-special character, a macro invocation, a
/// brace group `{…}`, or a specials token.
///
/// Recognizing a macro invocation stops at the macro token itself — this
/// crate does not fold a macro's own arguments into the returned node, since
/// [`Node`] has no shape for "macro with arguments" and building one is a
/// concern of whatever layer assembles a full document tree from these
/// fragments. See `DESIGN.md`.
#[derive(Debug, Clone)]
pub struct ExpressionParser {
    pub include_skipped_comments: bool,
    pub single_token_requiring_arg_is_error: bool,
}

impl Default for ExpressionParser {
    fn default() -> Self {
        ExpressionParser {
            include_skipped_comments: false,
            single_token_requiring_arg_is_error: false,
        }
    }
}

impl Parser for ExpressionParser {
    fn parse(
        &self,
        walker: &Walker,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, CarryoverInfo), ParseError> {
        let mut skipped_comments = Vec::new();

        loop {
            let pos = token_reader.cur_pos();
            let token = token_reader
                .next_token(state)
                .map_err(ParseError::from_token_error)?
                .ok_or_else(|| {
                    ParseError::new(pos, "expected an expression, found end of input")
                })?;

            if token.kind == TokenKind::Comment {
                if self.include_skipped_comments {
                    skipped_comments.push(Node::Comment {
                        text: token.arg,
                        pos: token.pos,
                        pos_end: token.pos_end,
                    });
                }
                continue;
            }

            let mut nodes = skipped_comments;

            match token.kind {
                TokenKind::BraceOpen => {
                    token_reader.move_to_pos_chars(token.pos);
                    let group = DelimitedGroupParser {
                        delimiters: ("{".to_string(), "}".to_string()),
                        optional: false,
                        allow_pre_space: true,
                    };
                    let (mut group_nodes, next_state) =
                        walker.parse_content(&group, token_reader, state)?;
                    nodes.append(&mut group_nodes);
                    let carryover = if next_state.tokenizer_relevant_eq(state) {
                        CarryoverInfo::none()
                    } else {
                        CarryoverInfo::with_parsing_state(next_state)
                    };
                    return Ok((nodes, carryover));
                }
                TokenKind::Macro => {
                    if self.single_token_requiring_arg_is_error {
                        if let Some(spec) = state.macros().lookup(&token.arg) {
                            if spec.requires_args {
                                return Err(ParseError::new(
                                    token.pos,
                                    format!(
                                        "macro '\\{}' requires arguments but appears alone in an expression slot",
                                        token.arg
                                    ),
                                ));
                            }
                        }
                    }
                    nodes.push(Node::Macro {
                        name: token.arg,
                        pos: token.pos,
                        pos_end: token.pos_end,
                    });
                }
                TokenKind::Specials => {
                    nodes.push(Node::Specials {
                        text: token.arg,
                        pos: token.pos,
                        pos_end: token.pos_end,
                    });
                }
                _ => {
                    nodes.push(Node::Chars {
                        text: token.arg,
                        pos: token.pos,
                        pos_end: token.pos_end,
                    });
                }
            }

            return Ok((nodes, CarryoverInfo::none()));
        }
    }
}
