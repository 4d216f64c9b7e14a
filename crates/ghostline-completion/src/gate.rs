//! Position gate
//!
//! Decides whether a caret position is a poor place for a suggestion, judging
//! only by the character under the caret and the one after it:
//!
//! ```text
//! int x = 12|3;           inside a literal or identifier
//! int x = 123;|           after `;`, `{`, `}` or `)`
//! System.out.println|();  before `(`
//! "Hello, world!|"        at a string or char literal boundary
//! ```
//!
//! Offsets are Unicode scalar indices into the document text. Positions past
//! the end read as `'\n'`.

const OUT_OF_BOUNDS: char = '\n';

/// Whether the caret at `offset` should get no suggestion
pub fn should_skip(text: &str, offset: usize) -> bool {
    let mut chars = text.chars().skip(offset);
    let before = chars.next().unwrap_or(OUT_OF_BOUNDS);
    let after = chars.next().unwrap_or(OUT_OF_BOUNDS);

    after_statement_end(before)
        || after == '('
        || (is_word_char(before) && is_word_char(after))
        || at_literal_boundary(before, after)
}

// Letters and ASCII decimal digits. Other numerics such as `²` or `½` and
// non-Latin digit sets do not join a word.
fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit()
}

fn after_statement_end(before: char) -> bool {
    matches!(before, ';' | '{' | '}' | ')')
}

fn at_literal_boundary(before: char, after: char) -> bool {
    before == '"' || after == '"' || before == '\'' || after == '\''
}
