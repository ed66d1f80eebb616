//! Catalog traits — the capability interface the core reads from a
//! caller-populated macro/environment/specials catalog.
//!
//! The core never builds or owns a catalog; it only ever calls `lookup`/
//! `match_at` on whatever the caller hands to
//! [`crate::latexnodes::parsing_state::ParsingState::new`]. Populating a
//! catalog with real LaTeX package definitions is the job of a layer
//! outside this crate.

use std::fmt;

/// What a macro catalog knows about one macro name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroSpec {
    /// The argument-spec mini-language string, e.g. `"mm"` for a macro
    /// taking two mandatory arguments. See
    /// [`crate::latexnodes::parser::standard_argument`].
    pub signature: String,
    /// Whether [`crate::latexnodes::parser::expression::ExpressionParser`]
    /// should treat this macro as requiring arguments when it appears
    /// alone with no room to parse them.
    pub requires_args: bool,
}

/// What an environment catalog knows about one environment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSpec {
    /// The argument-spec mini-language string for the environment's
    /// `\begin{...}` arguments, if any.
    pub signature: String,
}

/// Looks up macro definitions by name.
pub trait MacroCatalog: fmt::Debug {
    fn lookup(&self, name: &str) -> Option<MacroSpec>;
}

/// Looks up environment definitions by name.
pub trait EnvironmentCatalog: fmt::Debug {
    fn lookup(&self, name: &str) -> Option<EnvSpec>;
}

/// Recognizes caller-declared "specials" sequences (e.g. `~`, `---`) by
/// greedy longest-prefix match.
pub trait SpecialsCatalog: fmt::Debug {
    /// `upcoming` is the remaining source starting at the current cursor
    /// position. Returns the matched specials text and its length in
    /// Unicode scalar values, or `None` if nothing in the catalog matches
    /// here.
    fn match_at(&self, upcoming: &str) -> Option<(String, usize)>;
}

/// A macro catalog that knows no macros. The default used when a caller
/// does not supply one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMacros;

impl MacroCatalog for NoMacros {
    fn lookup(&self, _name: &str) -> Option<MacroSpec> {
        None
    }
}

/// An environment catalog that knows no environments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEnvironments;

impl EnvironmentCatalog for NoEnvironments {
    fn lookup(&self, _name: &str) -> Option<EnvSpec> {
        None
    }
}

/// A specials catalog that never matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpecials;

impl SpecialsCatalog for NoSpecials {
    fn match_at(&self, _upcoming: &str) -> Option<(String, usize)> {
        None
    }
}
