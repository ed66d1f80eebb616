//! Parameterized scenario tables: the argument-spec dispatch table (every
//! entry in the arg-spec mini-language resolves to the primitive the table
//! in spec.md §4.5 says it should), plus a handful of tokenizer scenarios
//! that don't fit naturally as proptest properties or colocated unit tests.

use std::rc::Rc;

use rstest::rstest;

use latexnodes::latexnodes::parser::standard_argument::{
    get_standard_argument_parser, ArgStateOverrides,
};
use latexnodes::latexnodes::parser::{Parser, Walker};
use latexnodes::latexnodes::testing::reader_and_state;

#[rstest]
#[case::mandatory_long("m", "{x}", true)]
#[case::mandatory_short("{", "{x}", true)]
#[case::optional_long("o", "[x]", true)]
#[case::optional_long_absent("o", "x", true)]
#[case::optional_short("[", "[x]", true)]
#[case::star_present("s", "*rest", true)]
#[case::star_absent("s", "rest", true)]
#[case::star_alias("*", "*rest", true)]
#[case::verbatim_autodetect("v", "|raw text|", true)]
#[case::verbatim_explicit_pair("v{}", "{raw text}", true)]
#[case::t_single_char("t*", "*rest", true)]
#[case::r_custom_delims("r()", "(x)", true)]
#[case::r_custom_delims_missing_is_error("r()", "x", false)]
#[case::d_custom_delims_optional("d()", "x", true)]
#[case::mandatory_missing_is_error("m", "", false)]
fn arg_spec_dispatches_and_parses(#[case] arg_spec: &str, #[case] source: &str, #[case] expect_ok: bool) {
    let parser = get_standard_argument_parser(
        arg_spec,
        false,
        false,
        None,
        true,
        ArgStateOverrides::default(),
    )
    .expect("arg_spec should be recognized");

    let (mut reader, state) = reader_and_state(source);
    let walker = Walker::new();
    let result = parser.parse(&walker, &mut reader, &state);
    assert_eq!(result.is_ok(), expect_ok, "parsing {source:?} with spec {arg_spec:?}");
}

#[rstest]
#[case("q")]
#[case("tab")]
#[case("rx")]
#[case("dxyz")]
fn unrecognized_arg_specs_are_rejected(#[case] arg_spec: &str) {
    let result = get_standard_argument_parser(
        arg_spec,
        false,
        false,
        None,
        true,
        ArgStateOverrides::default(),
    );
    assert!(result.is_err());
}

#[rstest]
#[case::macro_boundary(r"\foo", "foo")]
#[case::macro_with_digits_excluded(r"\foo2", "foo")]
fn plain_macro_name_stops_at_first_non_alpha(#[case] source: &str, #[case] expected_name: &str) {
    let (mut reader, state) = reader_and_state(source);
    let tok = reader.next_token(&state).unwrap().unwrap();
    assert_eq!(tok.arg, expected_name);
}

#[test]
fn get_standard_argument_parser_returns_shared_instance_across_equal_override_bags() {
    let overrides = ArgStateOverrides {
        enable_comments: Some(false),
        enable_environments: None,
        enable_double_newline_paragraphs: None,
    };
    let a = get_standard_argument_parser("m", true, true, Some(true), false, overrides.clone())
        .unwrap();
    let b = get_standard_argument_parser("m", true, true, Some(true), false, overrides).unwrap();
    assert!(Rc::ptr_eq(&a, &b));
}
