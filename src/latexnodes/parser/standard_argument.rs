//! StandardArgumentParser — dispatches the argument-spec mini-language onto
//! one of the four primitive parsers, with a process-wide interner so that
//! repeated requests for the same constructor arguments return the same
//! instance.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::latexnodes::error::ParseError;
use crate::latexnodes::node::{CarryoverInfo, Node};
use crate::latexnodes::parsing_state::{ParsingState, StateOverrides};
use crate::latexnodes::token_reader::TokenReader;

use super::delimited_group::DelimitedGroupParser;
use super::expression::ExpressionParser;
use super::optional_marker::OptionalCharsMarkerParser;
use super::verbatim::DelimitedVerbatimParser;
use super::{Parser, Walker};

/// The state-override bag accepted alongside `is_math_mode`, applied as a
/// sub-context when parsing this argument. Kept separate from the general
/// [`StateOverrides`] builder (which also covers `macro_alpha_chars`, not
/// hashable here) so it can be part of the interning key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ArgStateOverrides {
    pub enable_comments: Option<bool>,
    pub enable_environments: Option<bool>,
    pub enable_double_newline_paragraphs: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct InternKey {
    arg_spec: String,
    include_skipped_comments: bool,
    expression_single_token_requiring_arg_is_error: bool,
    is_math_mode: Option<bool>,
    allow_pre_space: bool,
    set_arg_parsing_state_kwargs: ArgStateOverrides,
}

static INTERNER: Lazy<Mutex<HashMap<InternKey, Rc<StandardArgumentParser>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

enum Primitive {
    Expression(ExpressionParser),
    DelimitedGroup(DelimitedGroupParser),
    OptionalCharsMarker(OptionalCharsMarkerParser),
    DelimitedVerbatim(DelimitedVerbatimParser),
}

impl Parser for Primitive {
    fn parse(
        &self,
        walker: &Walker,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, CarryoverInfo), ParseError> {
        match self {
            Primitive::Expression(p) => p.parse(walker, token_reader, state),
            Primitive::DelimitedGroup(p) => p.parse(walker, token_reader, state),
            Primitive::OptionalCharsMarker(p) => p.parse(walker, token_reader, state),
            Primitive::DelimitedVerbatim(p) => p.parse(walker, token_reader, state),
        }
    }
}

/// A parser for one LaTeX macro/environment argument, constructed from the
/// argument-spec mini-language (see the dispatch table in `dispatch_arg_spec`).
pub struct StandardArgumentParser {
    state_overrides: StateOverrides,
    primitive: Primitive,
}

impl Parser for StandardArgumentParser {
    fn parse(
        &self,
        walker: &Walker,
        token_reader: &mut TokenReader,
        state: &ParsingState,
    ) -> Result<(Vec<Node>, CarryoverInfo), ParseError> {
        if self.state_overrides.is_empty() {
            self.primitive.parse(walker, token_reader, state)
        } else {
            let sub_state = state.sub_context(self.state_overrides.clone());
            self.primitive.parse(walker, token_reader, &sub_state)
        }
    }
}

/// Returns the (process-wide, shared) parser for `arg_spec`, constructing
/// and interning it on first request. Two calls with identical arguments
/// return `Rc::ptr_eq` instances.
pub fn get_standard_argument_parser(
    arg_spec: impl Into<String>,
    include_skipped_comments: bool,
    expression_single_token_requiring_arg_is_error: bool,
    is_math_mode: Option<bool>,
    allow_pre_space: bool,
    set_arg_parsing_state_kwargs: ArgStateOverrides,
) -> Result<Rc<StandardArgumentParser>, ParseError> {
    let arg_spec = arg_spec.into();
    let key = InternKey {
        arg_spec: arg_spec.clone(),
        include_skipped_comments,
        expression_single_token_requiring_arg_is_error,
        is_math_mode,
        allow_pre_space,
        set_arg_parsing_state_kwargs: set_arg_parsing_state_kwargs.clone(),
    };

    {
        let cache = INTERNER.lock().expect("standard argument parser interner poisoned");
        if let Some(existing) = cache.get(&key) {
            return Ok(Rc::clone(existing));
        }
    }

    let primitive = dispatch_arg_spec(
        &arg_spec,
        include_skipped_comments,
        expression_single_token_requiring_arg_is_error,
        allow_pre_space,
    )?;

    let mut state_overrides = StateOverrides::new();
    if let Some(v) = is_math_mode {
        state_overrides = state_overrides.in_math_mode(v);
        // sub_context panics if in_math_mode is set without a delimiter;
        // callers that need a different delimiter should use `set_arg_parsing_state_kwargs`
        // to pre-set it, or this defaults to plain inline math.
        if v {
            state_overrides = state_overrides.math_mode_delimiter("$");
        }
    }
    if let Some(v) = set_arg_parsing_state_kwargs.enable_comments {
        state_overrides = state_overrides.enable_comments(v);
    }
    if let Some(v) = set_arg_parsing_state_kwargs.enable_environments {
        state_overrides = state_overrides.enable_environments(v);
    }
    if let Some(v) = set_arg_parsing_state_kwargs.enable_double_newline_paragraphs {
        state_overrides = state_overrides.enable_double_newline_paragraphs(v);
    }

    let parser = Rc::new(StandardArgumentParser {
        state_overrides,
        primitive,
    });

    let mut cache = INTERNER.lock().expect("standard argument parser interner poisoned");
    let parser = cache.entry(key).or_insert(parser).clone();
    Ok(parser)
}

fn dispatch_arg_spec(
    arg_spec: &str,
    include_skipped_comments: bool,
    expression_single_token_requiring_arg_is_error: bool,
    allow_pre_space: bool,
) -> Result<Primitive, ParseError> {
    match arg_spec {
        "m" | "{" => Ok(Primitive::Expression(ExpressionParser {
            include_skipped_comments,
            single_token_requiring_arg_is_error: expression_single_token_requiring_arg_is_error,
        })),
        "o" | "[" => Ok(Primitive::DelimitedGroup(DelimitedGroupParser {
            delimiters: ("[".to_string(), "]".to_string()),
            optional: true,
            allow_pre_space,
        })),
        "s" | "*" => Ok(Primitive::OptionalCharsMarker(OptionalCharsMarkerParser {
            chars: "*".to_string(),
            allow_pre_space,
        })),
        "v" => Ok(Primitive::DelimitedVerbatim(DelimitedVerbatimParser {
            delimiter_chars: None,
        })),
        _ => dispatch_parameterized_arg_spec(arg_spec, allow_pre_space),
    }
}

fn dispatch_parameterized_arg_spec(
    arg_spec: &str,
    allow_pre_space: bool,
) -> Result<Primitive, ParseError> {
    let chars: Vec<char> = arg_spec.chars().collect();

    match chars.first() {
        Some('t') => {
            if chars.len() != 2 {
                return Err(unknown_arg_spec(
                    arg_spec,
                    "'t<c>' must have exactly one character after 't'",
                ));
            }
            Ok(Primitive::OptionalCharsMarker(OptionalCharsMarkerParser {
                chars: chars[1].to_string(),
                allow_pre_space,
            }))
        }
        Some('r') => {
            if chars.len() != 3 {
                return Err(unknown_arg_spec(
                    arg_spec,
                    "'r<a><b>' must have exactly two characters after 'r'",
                ));
            }
            Ok(Primitive::DelimitedGroup(DelimitedGroupParser {
                delimiters: (chars[1].to_string(), chars[2].to_string()),
                optional: false,
                allow_pre_space,
            }))
        }
        Some('d') => {
            if chars.len() != 3 {
                return Err(unknown_arg_spec(
                    arg_spec,
                    "'d<a><b>' must have exactly two characters after 'd'",
                ));
            }
            Ok(Primitive::DelimitedGroup(DelimitedGroupParser {
                delimiters: (chars[1].to_string(), chars[2].to_string()),
                optional: true,
                allow_pre_space,
            }))
        }
        Some('v') => {
            if chars.len() != 3 {
                return Err(unknown_arg_spec(
                    arg_spec,
                    "'v<a><b>' must have exactly two characters after 'v'",
                ));
            }
            Ok(Primitive::DelimitedVerbatim(DelimitedVerbatimParser {
                delimiter_chars: Some((chars[1].to_string(), chars[2].to_string())),
            }))
        }
        _ => Err(unknown_arg_spec(arg_spec, "unknown argument specification")),
    }
}

fn unknown_arg_spec(arg_spec: &str, detail: &str) -> ParseError {
    ParseError::new(0, format!("invalid argument specification '{arg_spec}': {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interner_returns_same_instance_for_same_arguments() {
        let a = get_standard_argument_parser(
            "m",
            false,
            false,
            None,
            true,
            ArgStateOverrides::default(),
        )
        .unwrap();
        let b = get_standard_argument_parser(
            "m",
            false,
            false,
            None,
            true,
            ArgStateOverrides::default(),
        )
        .unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn interner_distinguishes_different_arguments() {
        let a = get_standard_argument_parser(
            "m",
            false,
            false,
            None,
            true,
            ArgStateOverrides::default(),
        )
        .unwrap();
        let b = get_standard_argument_parser(
            "o",
            false,
            false,
            None,
            true,
            ArgStateOverrides::default(),
        )
        .unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn unknown_arg_spec_is_an_error() {
        let result =
            get_standard_argument_parser("q", false, false, None, true, ArgStateOverrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn t_spec_requires_exactly_one_char() {
        let result = get_standard_argument_parser(
            "tab",
            false,
            false,
            None,
            true,
            ArgStateOverrides::default(),
        );
        assert!(result.is_err());
    }
}
