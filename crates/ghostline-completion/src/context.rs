//! Per-request view of the text around the caret

/// Text split around the caret
///
/// The prefix runs up to and including the character at the caret offset,
/// matching what an editor reports as the position of the last typed
/// character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    prefix: String,
    suffix: String,
    last_prefix_line: String,
}

impl RequestContext {
    /// Split `text` after the character at `offset`, clamped to the text length
    pub fn new(text: &str, offset: usize) -> Self {
        let split = text
            .char_indices()
            .nth(offset.saturating_add(1))
            .map(|(index, _)| index)
            .unwrap_or(text.len());
        let (prefix, suffix) = text.split_at(split);
        let last_prefix_line = prefix.rsplit('\n').next().unwrap_or(prefix);

        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            last_prefix_line: last_prefix_line.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Text after the last newline of the prefix
    pub fn last_prefix_line(&self) -> &str {
        &self.last_prefix_line
    }

    /// Cache lookup order: the full prefix, then its last line
    pub fn lookup_keys(&self) -> [&str; 2] {
        [&self.prefix, &self.last_prefix_line]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_includes_caret_character() {
        let ctx = RequestContext::new("foo.bar(x)", 6);
        assert_eq!(ctx.prefix(), "foo.bar");
        assert_eq!(ctx.suffix(), "(x)");
        assert_eq!(ctx.last_prefix_line(), "foo.bar");
    }

    #[test]
    fn test_last_line() {
        let ctx = RequestContext::new("fn main() {\n    let x = 1;\n    x.", 32);
        assert_eq!(ctx.last_prefix_line(), "    x.");
        assert_eq!(ctx.suffix(), "");
    }

    #[test]
    fn test_prefix_ending_in_newline() {
        let ctx = RequestContext::new("abc\ndef", 3);
        assert_eq!(ctx.prefix(), "abc\n");
        assert_eq!(ctx.suffix(), "def");
        assert_eq!(ctx.last_prefix_line(), "");
    }

    #[test]
    fn test_offset_clamped() {
        let ctx = RequestContext::new("abc", 99);
        assert_eq!(ctx.prefix(), "abc");
        assert_eq!(ctx.suffix(), "");

        let ctx = RequestContext::new("abc", usize::MAX);
        assert_eq!(ctx.prefix(), "abc");
    }

    #[test]
    fn test_empty_text() {
        let ctx = RequestContext::new("", 0);
        assert_eq!(ctx.prefix(), "");
        assert_eq!(ctx.suffix(), "");
    }

    #[test]
    fn test_multibyte_characters() {
        let ctx = RequestContext::new("naïve()", 4);
        assert_eq!(ctx.prefix(), "naïve");
        assert_eq!(ctx.suffix(), "()");
    }
}
