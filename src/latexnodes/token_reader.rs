//! TokenReader — turns source text plus a [`ParsingState`] into a stream of
//! [`Token`]s.
//!
//! The reader itself carries no mode: every call to [`TokenReader::peek_token`]
//! or [`TokenReader::next_token`] takes the state to tokenize under as an
//! explicit argument. The reader's only mutable state is its cursor position
//! and a one-token peek cache.
//!
//! ## State obliviousness
//!
//! For the *unambiguous* closers — `\)`, `\]`, and a lone `$` not immediately
//! followed by a second `$` — the token kind and extent returned at a given
//! position never depends on `in_math_mode` or `math_mode_delimiter`. Two
//! consecutive `$` characters are the one documented exception: if the state
//! says we are already inside inline math (`in_math_mode` with
//! `math_mode_delimiter` exactly `"$"`), the reader reports a single closing
//! `$` rather than greedily merging the pair into `$$`; in every other state
//! it prefers the greedy `$$`. This is the only place the reader consults
//! `in_math_mode`/`math_mode_delimiter` at all.
use std::cell::RefCell;

use crate::latexnodes::error::TokenParseError;
use crate::latexnodes::parsing_state::ParsingState;
use crate::latexnodes::token::{Token, TokenKind};

struct PeekCache {
    pos: usize,
    state: ParsingState,
    token: Option<Token>,
}

/// Scans `source` for [`Token`]s under a caller-supplied [`ParsingState`].
pub struct TokenReader {
    chars: Vec<char>,
    pos: usize,
    cache: RefCell<Option<PeekCache>>,
}

impl TokenReader {
    pub fn new(source: &str) -> Self {
        TokenReader {
            chars: source.chars().collect(),
            pos: 0,
            cache: RefCell::new(None),
        }
    }

    /// Current cursor position, in Unicode scalar values.
    pub fn cur_pos(&self) -> usize {
        self.pos
    }

    /// Total length of the source, in scalar values.
    pub fn len_chars(&self) -> usize {
        self.chars.len()
    }

    /// The scalar value at `pos`, used by verbatim parsing to inspect raw
    /// source outside of tokenization.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Whether the literal string `needle` occurs starting at `pos`.
    pub fn matches_literal(&self, pos: usize, needle: &str) -> bool {
        let needle: Vec<char> = needle.chars().collect();
        if pos + needle.len() > self.chars.len() {
            return false;
        }
        self.chars[pos..pos + needle.len()] == needle[..]
    }

    /// Finds the first occurrence of the literal string `needle` at or after
    /// `pos`, returning its starting index.
    pub fn find_literal(&self, pos: usize, needle: &str) -> Option<usize> {
        let needle: Vec<char> = needle.chars().collect();
        if needle.is_empty() || pos > self.chars.len() {
            return None;
        }
        (pos..=self.chars.len().saturating_sub(needle.len()))
            .find(|&i| self.chars[i..i + needle.len()] == needle[..])
    }

    /// Returns the raw source text in `[start, end)`, bypassing tokenization.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Moves the cursor and invalidates the peek cache.
    pub fn move_to_pos_chars(&mut self, pos: usize) {
        self.pos = pos;
        *self.cache.borrow_mut() = None;
    }

    /// Returns the next token without advancing the cursor. Calling this
    /// repeatedly at the same position with states that agree on
    /// [`ParsingState::tokenizer_relevant_eq`] returns the identical token
    /// without recomputing it.
    pub fn peek_token(&self, state: &ParsingState) -> Result<Option<Token>, TokenParseError> {
        if let Some(cached) = self.cache.borrow().as_ref() {
            if cached.pos == self.pos && cached.state.tokenizer_relevant_eq(state) {
                return Ok(cached.token.clone());
            }
        }
        let token = self.compute_next(self.pos, state)?;
        *self.cache.borrow_mut() = Some(PeekCache {
            pos: self.pos,
            state: state.clone(),
            token: token.clone(),
        });
        Ok(token)
    }

    /// Returns the next token and advances the cursor past it (to
    /// `token.pos_end`, which already includes any absorbed `post_space`).
    pub fn next_token(&mut self, state: &ParsingState) -> Result<Option<Token>, TokenParseError> {
        let token = self.peek_token(state)?;
        if let Some(tok) = &token {
            self.pos = tok.pos_end;
        }
        *self.cache.borrow_mut() = None;
        Ok(token)
    }

    fn compute_next(
        &self,
        start: usize,
        state: &ParsingState,
    ) -> Result<Option<Token>, TokenParseError> {
        let chars = &self.chars;
        let len = chars.len();

        let ws_end = scan_whitespace_run(chars, start);

        if state.enable_double_newline_paragraphs() {
            if let Some((nl1, run_end)) = find_paragraph_break(chars, start, ws_end) {
                let pre_space: String = chars[start..nl1].iter().collect();
                let arg: String = chars[nl1..run_end].iter().collect();
                return Ok(Some(
                    Token::new(TokenKind::Char, arg, nl1, run_end).with_pre_space(pre_space),
                ));
            }
        }

        let pre_space: String = chars[start..ws_end].iter().collect();
        let pos = ws_end;

        if pos >= len {
            return Ok(None);
        }

        let c = chars[pos];

        let token = match c {
            '\\' => self.read_macro(pos, state)?,
            '%' if state.enable_comments() => self.read_comment(pos, state),
            '{' => Token::new(TokenKind::BraceOpen, "{", pos, pos + 1),
            '}' => Token::new(TokenKind::BraceClose, "}", pos, pos + 1),
            '$' => self.read_dollar(pos, state),
            _ => self.read_catchall(pos, state),
        };

        Ok(Some(token.with_pre_space(pre_space)))
    }

    fn read_macro(&self, pos: usize, state: &ParsingState) -> Result<Token, TokenParseError> {
        let chars = &self.chars;
        let len = chars.len();
        let name_start = pos + 1;

        let c1 = *chars.get(name_start).ok_or_else(|| {
            TokenParseError::new(pos, "macro name expected after backslash at end of input")
        })?;

        if !state.is_macro_alpha_char(c1) {
            let name_end = name_start + 1;
            return Ok(match c1 {
                '(' => Token::new(TokenKind::MathmodeInline, r"\(", pos, name_end),
                ')' => Token::new(TokenKind::MathmodeInline, r"\)", pos, name_end),
                '[' => Token::new(TokenKind::MathmodeDisplay, r"\[", pos, name_end),
                ']' => Token::new(TokenKind::MathmodeDisplay, r"\]", pos, name_end),
                other => Token::new(TokenKind::Macro, other.to_string(), pos, name_end),
            });
        }

        let mut name_end = name_start;
        while name_end < len && state.is_macro_alpha_char(chars[name_end]) {
            name_end += 1;
        }
        let name: String = chars[name_start..name_end].iter().collect();

        if state.enable_environments() && (name == "begin" || name == "end") {
            if chars.get(name_end) == Some(&'{') {
                return self.read_environment_name(pos, name_end, &name);
            }
            return Err(TokenParseError::new(
                pos,
                format!(
                    "\\{name} must be immediately followed by {{name}} when environments are enabled"
                ),
            ));
        }

        let (post_space, pos_end) = absorb_post_whitespace(chars, name_end, state);
        Ok(Token::new(TokenKind::Macro, name, pos, pos_end).with_post_space(post_space))
    }

    fn read_environment_name(
        &self,
        macro_pos: usize,
        brace_pos: usize,
        name: &str,
    ) -> Result<Token, TokenParseError> {
        let chars = &self.chars;
        let name_start = brace_pos + 1;
        let close = chars[name_start..]
            .iter()
            .position(|&c| c == '}')
            .map(|offset| name_start + offset);

        let close = close.ok_or_else(|| {
            TokenParseError::new(
                macro_pos,
                format!("unterminated environment name after \\{name}"),
            )
        })?;

        let env_name: String = chars[name_start..close].iter().collect();
        let kind = if name == "begin" {
            TokenKind::BeginEnvironment
        } else {
            TokenKind::EndEnvironment
        };
        Ok(Token::new(kind, env_name, macro_pos, close + 1))
    }

    fn read_comment(&self, pos: usize, state: &ParsingState) -> Token {
        let chars = &self.chars;
        let len = chars.len();
        let content_start = pos + 1;
        let nl = chars[content_start..]
            .iter()
            .position(|&c| c == '\n')
            .map(|offset| content_start + offset)
            .unwrap_or(len);

        let text: String = chars[content_start..nl].iter().collect();
        let (post_space, pos_end) = absorb_post_whitespace(chars, nl, state);
        Token::new(TokenKind::Comment, text, pos, pos_end).with_post_space(post_space)
    }

    fn read_dollar(&self, pos: usize, state: &ParsingState) -> Token {
        let chars = &self.chars;
        if chars.get(pos + 1) == Some(&'$') {
            let is_closing_single_dollar =
                state.in_math_mode() && state.math_mode_delimiter() == Some("$");
            if is_closing_single_dollar {
                return Token::new(TokenKind::MathmodeInline, "$", pos, pos + 1);
            }
            return Token::new(TokenKind::MathmodeDisplay, "$$", pos, pos + 2);
        }
        Token::new(TokenKind::MathmodeInline, "$", pos, pos + 1)
    }

    fn read_catchall(&self, pos: usize, state: &ParsingState) -> Token {
        let upcoming: String = self.chars[pos..].iter().collect();
        if let Some((text, match_len)) = state.specials().match_at(&upcoming) {
            if match_len > 0 {
                return Token::new(TokenKind::Specials, text, pos, pos + match_len);
            }
        }
        Token::new(TokenKind::Char, self.chars[pos].to_string(), pos, pos + 1)
    }
}

fn scan_whitespace_run(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

/// Finds the first run of two or more line-feed scalars within
/// `chars[start..end]` separated only by other whitespace scalars, returning
/// `(first_newline, end_of_run)` where `end_of_run` is exclusive and sits
/// right after the second newline. `chars[start..end]` is assumed to already
/// be whitespace-only (the caller establishes this via [`scan_whitespace_run`]).
fn find_paragraph_break(chars: &[char], start: usize, end: usize) -> Option<(usize, usize)> {
    let mut i = start;
    while i < end {
        if chars[i] == '\n' {
            let mut j = i + 1;
            while j < end && chars[j] != '\n' {
                j += 1;
            }
            if j < end && chars[j] == '\n' {
                return Some((i, j + 1));
            }
        }
        i += 1;
    }
    None
}

/// Absorbs trailing whitespace into a token's `post_space`, stopping before
/// (and not consuming any of) a paragraph-break run when
/// `enable_double_newline_paragraphs` is set. Returns the absorbed text and
/// the new `pos_end`.
fn absorb_post_whitespace(chars: &[char], start: usize, state: &ParsingState) -> (String, usize) {
    let ws_end = scan_whitespace_run(chars, start);
    let absorbed_end = if state.enable_double_newline_paragraphs() {
        match find_paragraph_break(chars, start, ws_end) {
            Some((nl1, _)) => nl1,
            None => ws_end,
        }
    } else {
        ws_end
    };
    (chars[start..absorbed_end].iter().collect(), absorbed_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ps(source: &str) -> ParsingState {
        ParsingState::new(source)
    }

    #[test]
    fn simple_char() {
        let mut tr = TokenReader::new("Some Chars");
        let state = ps("Some Chars");
        assert_eq!(
            tr.next_token(&state).unwrap(),
            Some(Token::new(TokenKind::Char, "S", 0, 1))
        );
    }

    #[test]
    fn simple_char_pre_space() {
        let pre = "   \t\n \t";
        let text = format!("{pre}Some Chars");
        let mut tr = TokenReader::new(&text);
        let state = ps(&text);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.arg, "S");
        assert_eq!(tok.pre_space, pre);
        assert_eq!(tok.pos, pre.chars().count());
        assert_eq!(tok.pos_end, pre.chars().count() + 1);
    }

    #[test]
    fn macro_with_post_space() {
        let text = r"\somemacro and more stuff";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::Macro);
        assert_eq!(tok.arg, "somemacro");
        assert_eq!(tok.pos, 0);
        assert_eq!(tok.pos_end, r"\somemacro ".chars().count());
        assert_eq!(tok.post_space, " ");
    }

    #[test]
    fn symbolic_macro_has_no_post_space() {
        let text = r"\& next";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.arg, "&");
        assert_eq!(tok.pos_end, 2);
        assert_eq!(tok.post_space, "");
    }

    #[test]
    fn comment_absorbs_line_and_indentation() {
        let text = "% Comment here\n  more stuff";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::Comment);
        assert_eq!(tok.arg, " Comment here");
        assert_eq!(tok.pos_end, "% Comment here\n  ".chars().count());
        assert_eq!(tok.post_space, "\n  ");
    }

    #[test]
    fn comment_before_paragraph_absorbs_nothing() {
        let text = "% Comment here\n\nBegin new paragraph here";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.arg, " Comment here");
        assert_eq!(tok.pos_end, "% Comment here".chars().count());
        assert_eq!(tok.post_space, "");
    }

    #[test]
    fn comment_at_end_of_input() {
        let text = "% Comment here";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.arg, " Comment here");
        assert_eq!(tok.pos_end, text.chars().count());
        assert_eq!(tok.post_space, "");
    }

    #[test]
    fn disabled_comments_fall_back_to_char() {
        let text = "a % not a comment";
        let mut tr = TokenReader::new(text);
        let state = ps(text).with_enable_comments(false);
        tr.move_to_pos_chars(2);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::Char);
        assert_eq!(tok.arg, "%");
    }

    #[test]
    fn begin_end_environment() {
        let text = r"\begin{enumerate}[(i)]";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::BeginEnvironment);
        assert_eq!(tok.arg, "enumerate");
        assert_eq!(tok.pos_end, r"\begin{enumerate}".chars().count());
    }

    #[test]
    fn disabled_environments_yield_plain_macro() {
        let text = r"\begin{enumerate}";
        let mut tr = TokenReader::new(text);
        let state = ps(text).with_enable_environments(false);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::Macro);
        assert_eq!(tok.arg, "begin");
        assert_eq!(tok.pos_end, r"\begin".chars().count());
    }

    #[test]
    fn begin_without_brace_is_an_error() {
        let text = r"\begin nice text";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        assert!(tr.next_token(&state).is_err());
    }

    #[test]
    fn trailing_backslash_is_an_error() {
        let text = r"abc\";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        tr.move_to_pos_chars(3);
        assert!(tr.next_token(&state).is_err());
    }

    #[test]
    fn paragraph_break_is_its_own_char_token() {
        let text = "\\mymacro\n\nNew";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let macro_tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(macro_tok.post_space, "");
        let par_tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(par_tok.kind, TokenKind::Char);
        assert_eq!(par_tok.arg, "\n\n");
        assert_eq!(par_tok.pre_space, "");
    }

    #[test]
    fn disabling_paragraphs_treats_blank_line_as_plain_whitespace() {
        let text = "a\n\nb";
        let mut tr = TokenReader::new(text);
        let state = ps(text).with_enable_double_newline_paragraphs(false);
        tr.move_to_pos_chars(1);
        let tok = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(tok.arg, "b");
        assert_eq!(tok.pre_space, "\n\n");
    }

    #[test]
    fn lone_dollar_is_state_oblivious() {
        let text = r"\)";
        let mut tr = TokenReader::new(text);
        let default_state = ps(text);
        let math_state = default_state.sub_context(
            crate::latexnodes::parsing_state::StateOverrides::new()
                .in_math_mode(true)
                .math_mode_delimiter(r"\("),
        );
        assert_eq!(
            tr.peek_token(&math_state).unwrap(),
            tr.peek_token(&default_state).unwrap()
        );
    }

    #[test]
    fn dollardollar_ambiguity_depends_on_delimiter_state() {
        let text = r"x$\dagger$$\dagger$$$A=B\mbox{$b=a$}$$";
        let mut tr = TokenReader::new(text);
        let default_state = ps(text);
        let inline_dollar_state = default_state.sub_context(
            crate::latexnodes::parsing_state::StateOverrides::new()
                .in_math_mode(true)
                .math_mode_delimiter("$"),
        );

        tr.move_to_pos_chars(9);
        let tok = tr.peek_token(&inline_dollar_state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::MathmodeInline);
        assert_eq!(tok.pos_end, 10);

        tr.move_to_pos_chars(19);
        let tok = tr.peek_token(&default_state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::MathmodeDisplay);
        assert_eq!(tok.arg, "$$");
        assert_eq!(tok.pos_end, 21);

        let display_dollar_state = default_state.sub_context(
            crate::latexnodes::parsing_state::StateOverrides::new()
                .in_math_mode(true)
                .math_mode_delimiter("$$"),
        );
        tr.move_to_pos_chars(36);
        let tok = tr.peek_token(&display_dollar_state).unwrap().unwrap();
        assert_eq!(tok.kind, TokenKind::MathmodeDisplay);
        assert_eq!(tok.pos_end, 38);
    }

    #[test]
    fn peek_cache_recomputes_when_state_changes_at_same_position() {
        let text = r"$$";
        let mut tr = TokenReader::new(text);
        let default_state = ps(text);
        let inline_dollar_state = default_state.sub_context(
            crate::latexnodes::parsing_state::StateOverrides::new()
                .in_math_mode(true)
                .math_mode_delimiter("$"),
        );

        let first = tr.peek_token(&default_state).unwrap().unwrap();
        assert_eq!(first.kind, TokenKind::MathmodeDisplay);

        let second = tr.peek_token(&inline_dollar_state).unwrap().unwrap();
        assert_eq!(second.kind, TokenKind::MathmodeInline);
    }

    #[test]
    fn backslash_paren_tokens() {
        let text = r"\(a\)";
        let mut tr = TokenReader::new(text);
        let state = ps(text);
        let open = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(open.kind, TokenKind::MathmodeInline);
        assert_eq!(open.arg, r"\(");
        tr.move_to_pos_chars(3);
        let close = tr.next_token(&state).unwrap().unwrap();
        assert_eq!(close.kind, TokenKind::MathmodeInline);
        assert_eq!(close.arg, r"\)");
    }

    #[test]
    fn end_of_input_yields_none() {
        let mut tr = TokenReader::new("");
        let state = ps("");
        assert_eq!(tr.next_token(&state).unwrap(), None);
    }
}
