//! Token — the unit produced by [`crate::latexnodes::token_reader::TokenReader`].

/// The kind of lexical unit a [`Token`] represents.
///
/// The tokenizer does not judge whether a token makes the document
/// syntactically valid — see the module docs on
/// [`crate::latexnodes::token_reader`] for the "state obliviousness" rule
/// that applies to the mathmode variants in particular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A single non-special character, including a paragraph-break run
    /// (`arg` is the run itself, e.g. `"\n\n"`).
    Char,
    /// A control sequence: `arg` is the macro name without the backslash.
    Macro,
    /// A `%`-introduced comment: `arg` is the comment body, not including
    /// the leading `%` or the terminating newline.
    Comment,
    /// `{`
    BraceOpen,
    /// `}`
    BraceClose,
    /// `$` or `\(`/`\)`: `arg` is the literal delimiter text.
    MathmodeInline,
    /// `$$` or `\[`/`\]`: `arg` is the literal delimiter text.
    MathmodeDisplay,
    /// `\begin{name}`: `arg` is `name`.
    BeginEnvironment,
    /// `\end{name}`: `arg` is `name`.
    EndEnvironment,
    /// A caller-declared specials sequence: `arg` is the matched text.
    Specials,
}

/// A single lexical token together with its source extent and the
/// whitespace that surrounded it.
///
/// `pos` and `pos_end` are Unicode scalar-value offsets into the source
/// (not byte offsets): `pos <= pos_end`, and the substring `[pos, pos_end)`
/// covers the token body plus any `post_space` it absorbed. `pre_space`
/// lies immediately before `pos` and is *not* part of `[pos, pos_end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub arg: String,
    pub pos: usize,
    pub pos_end: usize,
    pub pre_space: String,
    pub post_space: String,
}

impl Token {
    /// Builds a token with empty `pre_space`/`post_space`; chain
    /// [`Token::with_pre_space`]/[`Token::with_post_space`] to set them.
    pub fn new(kind: TokenKind, arg: impl Into<String>, pos: usize, pos_end: usize) -> Self {
        assert!(
            pos <= pos_end,
            "token pos ({pos}) must not exceed pos_end ({pos_end})"
        );
        Token {
            kind,
            arg: arg.into(),
            pos,
            pos_end,
            pre_space: String::new(),
            post_space: String::new(),
        }
    }

    pub fn with_pre_space(mut self, pre_space: impl Into<String>) -> Self {
        self.pre_space = pre_space.into();
        self
    }

    pub fn with_post_space(mut self, post_space: impl Into<String>) -> Self {
        self.post_space = post_space.into();
        self
    }

    /// Length, in scalar values, of `pre_space` plus the token's own extent.
    pub fn full_len(&self) -> usize {
        self.pre_space.chars().count() + (self.pos_end - self.pos)
    }
}
