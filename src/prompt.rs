/// Role assigned to a plain-text prompt.
pub const USER_ROLE: &str = "user";

/// Role of model-authored turns in a conversation history.
pub const MODEL_ROLE: &str = "model";

/// Input to a generation call.
///
/// Either a single user prompt or an ordered conversation. Anything that
/// converts into a `Prompt` can be passed to
/// [`Client::generate`](crate::Client::generate):
///
/// ```
/// use vertex_genai::{Prompt, Turn};
///
/// let single: Prompt = "What is GoFr?".into();
/// let history: Prompt = vec![
///     Turn::user("Hi"),
///     Turn::model("Hello! How can I help?"),
///     Turn::user("Summarize the release notes"),
/// ]
/// .into();
///
/// assert_eq!(single.len(), 1);
/// assert_eq!(history.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Text(String),
    Turns(Vec<Turn>),
}

impl Prompt {
    /// Number of messages this prompt produces in the request.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::Turns(turns) => turns.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Turns(turns) => turns.is_empty(),
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Turn>> for Prompt {
    fn from(turns: Vec<Turn>) -> Self {
        Self::Turns(turns)
    }
}

/// One role/text pair of a conversation. The role is sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: String,
    pub text: String,
}

impl Turn {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(USER_ROLE, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(MODEL_ROLE, text)
    }
}
