//! Editor events that may trigger a suggestion

/// Something that happened in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionEvent {
    /// The document was edited; the caret sits at `offset`
    DocumentChange { text: String, offset: usize },
    /// The user explicitly asked for a suggestion
    DirectCall { text: String, offset: usize },
    /// The lookup popup changed its selection
    LookupChange,
    /// The caret moved without an edit
    CaretMove { offset: usize },
}

impl CompletionEvent {
    /// Document text and caret offset, for events that carry them
    pub fn request(&self) -> Option<(&str, usize)> {
        match self {
            CompletionEvent::DocumentChange { text, offset }
            | CompletionEvent::DirectCall { text, offset } => Some((text.as_str(), *offset)),
            CompletionEvent::LookupChange | CompletionEvent::CaretMove { .. } => None,
        }
    }
}
