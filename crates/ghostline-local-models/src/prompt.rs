//! Fill-in-the-middle prompt construction and output cleanup

const END_OF_TEXT: &str = "<EOT>";

/// Build a code-infilling prompt from the text around the caret
///
/// ```
/// use ghostline_local_models::build_fim_prompt;
///
/// assert_eq!(build_fim_prompt("foo.bar", ""), "<PRE> foo.bar <SUF> <MID>");
/// ```
pub fn build_fim_prompt(prefix: &str, suffix: &str) -> String {
    format!("<PRE> {} <SUF>{} <MID>", prefix, suffix)
}

/// Strip a trailing end-of-text marker, then surrounding whitespace
pub fn post_process(raw: &str) -> String {
    raw.strip_suffix(END_OF_TEXT).unwrap_or(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_suffix() {
        assert_eq!(
            build_fim_prompt("fn main() {", "}"),
            "<PRE> fn main() { <SUF>} <MID>"
        );
    }

    #[test]
    fn test_strips_eot() {
        assert_eq!(post_process(" baz() <EOT>"), "baz()");
    }

    #[test]
    fn test_only_trailing_eot_is_stripped() {
        assert_eq!(post_process("<EOT> x"), "<EOT> x");
    }

    #[test]
    fn test_blank_output() {
        assert_eq!(post_process("  \n<EOT>"), "");
        assert_eq!(post_process(""), "");
    }
}
