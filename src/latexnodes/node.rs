//! Node and CarryoverInfo — the results a [`crate::latexnodes::parser::Parser`]
//! hands back to its [`crate::latexnodes::parser::Walker`].
//!
//! A node's internal representation is, per the core's contract, a concern
//! of whatever layer builds a document out of parsed fragments. The
//! primitive parsers in this crate still have to return *something*
//! concrete to compile and to be testable on their own, so [`Node`] is kept
//! to the minimal shape each primitive actually produces; a caller
//! building a richer AST is expected to fold these into its own node type
//! rather than treat [`Node`] as a rendering target.

use crate::latexnodes::parsing_state::ParsingState;

/// The result of a successful parse of one syntactic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of plain characters (a single character, or a paragraph-break
    /// run such as `"\n\n"`).
    Chars {
        text: String,
        pos: usize,
        pos_end: usize,
    },
    /// A macro invocation. Recursive argument parsing, if any, is the
    /// walker's responsibility and is not represented here — this node
    /// only covers the control sequence itself.
    Macro {
        name: String,
        pos: usize,
        pos_end: usize,
    },
    /// A comment preserved as a sibling node (only produced when
    /// `include_skipped_comments` is set on the parser that encountered it).
    Comment {
        text: String,
        pos: usize,
        pos_end: usize,
    },
    /// A delimited group, e.g. `{...}` or `[...]`, holding its parsed body.
    Group {
        delimiters: (String, String),
        children: Vec<Node>,
        pos: usize,
        pos_end: usize,
    },
    /// A caller-declared specials sequence.
    Specials {
        text: String,
        pos: usize,
        pos_end: usize,
    },
    /// A matched literal marker, e.g. the `*` in `\section*`.
    Marker {
        text: String,
        pos: usize,
        pos_end: usize,
    },
    /// Verbatim content: the body between delimiters, untokenized.
    Verbatim {
        text: String,
        pos: usize,
        pos_end: usize,
    },
}

impl Node {
    pub fn pos(&self) -> usize {
        match self {
            Node::Chars { pos, .. }
            | Node::Macro { pos, .. }
            | Node::Comment { pos, .. }
            | Node::Group { pos, .. }
            | Node::Specials { pos, .. }
            | Node::Marker { pos, .. }
            | Node::Verbatim { pos, .. } => *pos,
        }
    }

    pub fn pos_end(&self) -> usize {
        match self {
            Node::Chars { pos_end, .. }
            | Node::Macro { pos_end, .. }
            | Node::Comment { pos_end, .. }
            | Node::Group { pos_end, .. }
            | Node::Specials { pos_end, .. }
            | Node::Marker { pos_end, .. }
            | Node::Verbatim { pos_end, .. } => *pos_end,
        }
    }
}

/// Information a parser hands back to the walker alongside its nodes.
///
/// When `set_parsing_state` is present, the walker substitutes it for the
/// state used by *subsequent sibling* parsers — it must never reach back
/// into a parser that already ran, and a parser must never apply it to its
/// own nested `parse_content` calls.
#[derive(Debug, Clone, Default)]
pub struct CarryoverInfo {
    set_parsing_state: Option<ParsingState>,
}

impl CarryoverInfo {
    pub fn none() -> Self {
        CarryoverInfo {
            set_parsing_state: None,
        }
    }

    pub fn with_parsing_state(state: ParsingState) -> Self {
        CarryoverInfo {
            set_parsing_state: Some(state),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set_parsing_state.is_none()
    }

    /// Consumes self, applying the carryover to `state` if present.
    pub fn apply_to(self, state: &ParsingState) -> ParsingState {
        self.set_parsing_state.unwrap_or_else(|| state.clone())
    }
}
