//! ParsingState — the immutable context consulted by the token reader and
//! every parser.
//!
//! A state is a value: [`ParsingState::sub_context`] returns a new state
//! that shares every field with its parent except those explicitly
//! overridden via [`StateOverrides`]. No method ever mutates `self`.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::latexnodes::catalog::{
    EnvironmentCatalog, MacroCatalog, NoEnvironments, NoMacros, NoSpecials, SpecialsCatalog,
};

/// A paired opening/closing math-mode delimiter recognized by the catalog
/// carried on a [`ParsingState`]. The tokenizer itself never consults this
/// table — see the "state obliviousness" rule on
/// [`crate::latexnodes::token_reader::TokenReader`] — it exists purely as
/// data for a caller that wants to validate delimiter matching above the
/// tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathDelimiterPair {
    pub open: String,
    pub close: String,
}

fn default_math_delimiters() -> Rc<Vec<MathDelimiterPair>> {
    Rc::new(vec![
        MathDelimiterPair {
            open: "$".to_string(),
            close: "$".to_string(),
        },
        MathDelimiterPair {
            open: "$$".to_string(),
            close: "$$".to_string(),
        },
        MathDelimiterPair {
            open: r"\(".to_string(),
            close: r"\)".to_string(),
        },
        MathDelimiterPair {
            open: r"\[".to_string(),
            close: r"\]".to_string(),
        },
    ])
}

fn default_macro_alpha_chars() -> Rc<HashSet<char>> {
    Rc::new(('a'..='z').chain('A'..='Z').collect())
}

/// The immutable context object consulted by [`crate::latexnodes::token_reader::TokenReader`]
/// and every [`crate::latexnodes::parser::Parser`].
#[derive(Clone)]
pub struct ParsingState {
    source: Rc<str>,
    in_math_mode: bool,
    math_mode_delimiter: Option<String>,
    enable_comments: bool,
    enable_environments: bool,
    enable_double_newline_paragraphs: bool,
    macro_alpha_chars: Rc<HashSet<char>>,
    macros: Rc<dyn MacroCatalog>,
    environments: Rc<dyn EnvironmentCatalog>,
    specials: Rc<dyn SpecialsCatalog>,
    math_delimiters: Rc<Vec<MathDelimiterPair>>,
}

impl fmt::Debug for ParsingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsingState")
            .field("in_math_mode", &self.in_math_mode)
            .field("math_mode_delimiter", &self.math_mode_delimiter)
            .field("enable_comments", &self.enable_comments)
            .field("enable_environments", &self.enable_environments)
            .field(
                "enable_double_newline_paragraphs",
                &self.enable_double_newline_paragraphs,
            )
            .field("macro_alpha_chars_len", &self.macro_alpha_chars.len())
            .finish_non_exhaustive()
    }
}

impl ParsingState {
    /// Constructs a state with the default flags: `in_math_mode=false`,
    /// `enable_comments=true`, `enable_environments=true`,
    /// `enable_double_newline_paragraphs=true`, a macro-alpha set of ASCII
    /// letters, and empty macro/environment/specials catalogs.
    pub fn new(source: impl Into<String>) -> Self {
        ParsingState {
            source: Rc::from(source.into()),
            in_math_mode: false,
            math_mode_delimiter: None,
            enable_comments: true,
            enable_environments: true,
            enable_double_newline_paragraphs: true,
            macro_alpha_chars: default_macro_alpha_chars(),
            macros: Rc::new(NoMacros),
            environments: Rc::new(NoEnvironments),
            specials: Rc::new(NoSpecials),
            math_delimiters: default_math_delimiters(),
        }
    }

    pub fn with_macros(mut self, macros: Rc<dyn MacroCatalog>) -> Self {
        self.macros = macros;
        self
    }

    pub fn with_environments(mut self, environments: Rc<dyn EnvironmentCatalog>) -> Self {
        self.environments = environments;
        self
    }

    pub fn with_specials(mut self, specials: Rc<dyn SpecialsCatalog>) -> Self {
        self.specials = specials;
        self
    }

    pub fn with_enable_comments(mut self, enable: bool) -> Self {
        self.enable_comments = enable;
        self
    }

    pub fn with_enable_environments(mut self, enable: bool) -> Self {
        self.enable_environments = enable;
        self
    }

    pub fn with_enable_double_newline_paragraphs(mut self, enable: bool) -> Self {
        self.enable_double_newline_paragraphs = enable;
        self
    }

    pub fn with_macro_alpha_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.macro_alpha_chars = Rc::new(chars.into_iter().collect());
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn in_math_mode(&self) -> bool {
        self.in_math_mode
    }

    pub fn math_mode_delimiter(&self) -> Option<&str> {
        self.math_mode_delimiter.as_deref()
    }

    pub fn enable_comments(&self) -> bool {
        self.enable_comments
    }

    pub fn enable_environments(&self) -> bool {
        self.enable_environments
    }

    pub fn enable_double_newline_paragraphs(&self) -> bool {
        self.enable_double_newline_paragraphs
    }

    pub fn is_macro_alpha_char(&self, c: char) -> bool {
        self.macro_alpha_chars.contains(&c)
    }

    pub fn macros(&self) -> &dyn MacroCatalog {
        self.macros.as_ref()
    }

    pub fn environments(&self) -> &dyn EnvironmentCatalog {
        self.environments.as_ref()
    }

    pub fn specials(&self) -> &dyn SpecialsCatalog {
        self.specials.as_ref()
    }

    pub fn math_delimiters(&self) -> &[MathDelimiterPair] {
        &self.math_delimiters
    }

    /// Compares only the fields that affect tokenization, used by
    /// [`crate::latexnodes::token_reader::TokenReader`]'s peek cache to
    /// decide whether a cached token is still valid for a newly supplied
    /// state. This is deliberately narrower than a general equality
    /// comparison — two states that differ only in their macro catalog,
    /// say, tokenize identically.
    pub fn tokenizer_relevant_eq(&self, other: &Self) -> bool {
        self.in_math_mode == other.in_math_mode
            && self.math_mode_delimiter == other.math_mode_delimiter
            && self.enable_comments == other.enable_comments
            && self.enable_environments == other.enable_environments
            && self.enable_double_newline_paragraphs == other.enable_double_newline_paragraphs
            && *self.macro_alpha_chars == *other.macro_alpha_chars
            && std::ptr::eq(
                Rc::as_ptr(&self.specials) as *const (),
                Rc::as_ptr(&other.specials) as *const (),
            )
    }

    /// Returns a new state equal to `self` except for the fields set on
    /// `overrides`.
    ///
    /// # Panics
    ///
    /// Panics if the resulting state would have `in_math_mode=true` with no
    /// `math_mode_delimiter` — this is a contract violation, not a
    /// recoverable input error, matching spec §4.1.
    pub fn sub_context(&self, overrides: StateOverrides) -> Self {
        let mut next = self.clone();

        if let Some(v) = overrides.in_math_mode {
            next.in_math_mode = v;
        }
        if let Some(v) = overrides.math_mode_delimiter {
            next.math_mode_delimiter = v;
        }
        if let Some(v) = overrides.enable_comments {
            next.enable_comments = v;
        }
        if let Some(v) = overrides.enable_environments {
            next.enable_environments = v;
        }
        if let Some(v) = overrides.enable_double_newline_paragraphs {
            next.enable_double_newline_paragraphs = v;
        }
        if let Some(v) = overrides.macro_alpha_chars {
            next.macro_alpha_chars = v;
        }

        assert!(
            !(next.in_math_mode && next.math_mode_delimiter.is_none()),
            "sub_context: in_math_mode=true requires a math_mode_delimiter"
        );

        next
    }
}

/// The set of field overrides passed to [`ParsingState::sub_context`].
///
/// Unset fields default to "no change" rather than to a concrete value, so
/// `StateOverrides::default()` is a no-op override set.
#[derive(Debug, Clone, Default)]
pub struct StateOverrides {
    in_math_mode: Option<bool>,
    math_mode_delimiter: Option<Option<String>>,
    enable_comments: Option<bool>,
    enable_environments: Option<bool>,
    enable_double_newline_paragraphs: Option<bool>,
    macro_alpha_chars: Option<Rc<HashSet<char>>>,
}

impl StateOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_math_mode(mut self, v: bool) -> Self {
        self.in_math_mode = Some(v);
        self
    }

    pub fn math_mode_delimiter(mut self, v: impl Into<String>) -> Self {
        self.math_mode_delimiter = Some(Some(v.into()));
        self
    }

    pub fn clear_math_mode_delimiter(mut self) -> Self {
        self.math_mode_delimiter = Some(None);
        self
    }

    pub fn enable_comments(mut self, v: bool) -> Self {
        self.enable_comments = Some(v);
        self
    }

    pub fn enable_environments(mut self, v: bool) -> Self {
        self.enable_environments = Some(v);
        self
    }

    pub fn enable_double_newline_paragraphs(mut self, v: bool) -> Self {
        self.enable_double_newline_paragraphs = Some(v);
        self
    }

    pub fn macro_alpha_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.macro_alpha_chars = Some(Rc::new(chars.into_iter().collect()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.in_math_mode.is_none()
            && self.math_mode_delimiter.is_none()
            && self.enable_comments.is_none()
            && self.enable_environments.is_none()
            && self.enable_double_newline_paragraphs.is_none()
            && self.macro_alpha_chars.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_context_overrides_only_named_fields() {
        let ps = ParsingState::new("hello");
        let ps2 = ps.sub_context(StateOverrides::new().enable_comments(false));

        assert!(ps.enable_comments());
        assert!(!ps2.enable_comments());
        assert_eq!(ps.enable_environments(), ps2.enable_environments());
        assert_eq!(ps.source(), ps2.source());
    }

    #[test]
    #[should_panic(expected = "in_math_mode=true requires a math_mode_delimiter")]
    fn sub_context_rejects_math_mode_without_delimiter() {
        let ps = ParsingState::new("hello");
        let _ = ps.sub_context(StateOverrides::new().in_math_mode(true));
    }

    #[test]
    fn sub_context_accepts_math_mode_with_delimiter() {
        let ps = ParsingState::new("hello");
        let ps2 = ps.sub_context(
            StateOverrides::new()
                .in_math_mode(true)
                .math_mode_delimiter("$"),
        );
        assert!(ps2.in_math_mode());
        assert_eq!(ps2.math_mode_delimiter(), Some("$"));
    }

    #[test]
    fn default_macro_alpha_chars_are_ascii_letters() {
        let ps = ParsingState::new("x");
        assert!(ps.is_macro_alpha_char('z'));
        assert!(ps.is_macro_alpha_char('Z'));
        assert!(!ps.is_macro_alpha_char('1'));
        assert!(!ps.is_macro_alpha_char('_'));
    }
}
