//! # latexnodes
//!
//!     A re-entrant LaTeX tokenizer and parser-combinator core.
//!
//! Overview
//!
//!     LaTeX is a macro-based typesetting language whose lexical rules are
//!     context-sensitive: whether `$` opens or closes math mode, which
//!     characters may extend a macro name, whether `\begin{...}` starts an
//!     environment — all of this depends on a parsing state that is
//!     supplied at read time, not baked into the reader itself. This crate
//!     provides that reader together with a small combinator framework
//!     for writing parsers against it.
//!
//! Parser Architecture
//!
//!     1. **ParsingState** ([latexnodes::parsing_state]) - the immutable
//!        context consulted by every read: mode flags, enabled features,
//!        the macro-alpha character set, and references to the caller's
//!        macro/environment/specials catalogs.
//!     2. **TokenReader** ([latexnodes::token_reader]) - a stateful cursor
//!        over the source that classifies the next [Token](latexnodes::token::Token)
//!        given a parsing state.
//!     3. **Parser + Walker** ([latexnodes::parser]) - the combinator
//!        contract: a parser consumes tokens through a reader and a state,
//!        producing nodes and carryover information that may change the
//!        state seen by subsequent sibling parsers.
//!     4. **StandardArgumentParser** ([latexnodes::parser::standard_argument])
//!        - maps the compact argument-spec mini-language (`m`, `o`, `s`,
//!        `t<c>`, `r<a><b>`, `d<a><b>`, `v`, `v<a><b>`) onto the primitive
//!        parsers.
//!
//! Out of Scope
//!
//!     The macro/environment/specials *catalog* is consumed only through
//!     the traits in [latexnodes::catalog]; populating it with real LaTeX
//!     packages, converting parsed nodes back to text, and any CLI or
//!     editor-facing glue are external collaborators, not part of this
//!     crate.
//!
//! Testing
//!
//!     Unit tests for a single algorithm live alongside it in a
//!     `#[cfg(test)] mod tests`. Cross-module scenarios, the property
//!     suite, and the dispatch-table tables live under `tests/`. See
//!     [latexnodes::testing] for the shared fixtures used by both.

#![allow(rustdoc::invalid_html_tags)]

pub mod latexnodes;
