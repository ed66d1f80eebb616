//! One snapshot test covering the paragraph-break/post_space interaction
//! ported from the original tokenizer test suite (a macro immediately
//! followed by a blank line absorbs no post_space, and the blank line
//! becomes its own `Char` token), where asserting every token field
//! individually would be unwieldy.

use latexnodes::latexnodes::testing::reader_and_state;
use latexnodes::latexnodes::token::Token;

#[test]
fn multiple_tokens_advances_and_stuff() {
    let text = "\\mymacro\n\nNew";
    let (mut reader, state) = reader_and_state(text);

    let mut tokens: Vec<Token> = Vec::new();
    while let Some(tok) = reader.next_token(&state).unwrap() {
        tokens.push(tok);
    }

    insta::assert_debug_snapshot!(tokens);
}
