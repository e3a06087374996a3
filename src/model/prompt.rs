use crate::model::directive::DirectiveCall;

/// Options offered by a `choice` prompt. Submitted lower-cased.
pub const CHOICE_OPTIONS: [&str; 2] = ["Yes", "No"];

/// The five positional arguments of a `%prompt(...)` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptArgs {
    pub title: String,
    pub target_url: String,
    pub field: String,
    pub label: String,
    pub input_kind: String,
}

impl PromptArgs {
    pub const ARITY: usize = 5;

    /// Returns `None` unless `call` is a `prompt` with exactly five arguments.
    pub fn from_call(call: &DirectiveCall) -> Option<Self> {
        if call.name != "prompt" || call.args.len() != Self::ARITY {
            return None;
        }

        Some(Self {
            title: call.args[0].clone(),
            target_url: call.args[1].clone(),
            field: call.args[2].clone(),
            label: call.args[3].clone(),
            input_kind: call.args[4].clone(),
        })
    }
}

/// A word-fill form piece: either letters the player cannot change or a
/// blank they fill in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordFillPart {
    Fixed(String),
    Blank { width: usize, default: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFillForm {
    pub parts: Vec<WordFillPart>,
}

impl WordFillForm {
    pub fn blank_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, WordFillPart::Blank { .. }))
            .count()
    }

    /// Concatenates the parts in order, using a blank's default when the
    /// matching value is empty. `None` if `values` does not cover every blank.
    pub fn assemble(&self, values: &[String]) -> Option<String> {
        if values.len() != self.blank_count() {
            return None;
        }

        let mut values = values.iter();
        let mut word = String::new();
        for part in &self.parts {
            match part {
                WordFillPart::Fixed(text) => word.push_str(text),
                WordFillPart::Blank { default, .. } => {
                    let value = values.next()?;
                    if value.is_empty() {
                        word.push_str(default);
                    } else {
                        word.push_str(value);
                    }
                }
            }
        }
        Some(word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptMode {
    /// Single input; `input_type` is the literal kind from the directive
    /// (`text`, `number`, or anything else the server sends).
    FreeText { input_type: String },
    Choice { options: Vec<String> },
    /// `form` stays `None` until `/getWordFillForm` has been fetched.
    WordFill { form: Option<WordFillForm> },
}

impl PromptMode {
    pub fn for_kind(input_kind: &str) -> Self {
        match input_kind {
            "choice" => PromptMode::Choice {
                options: CHOICE_OPTIONS.iter().map(|o| o.to_string()).collect(),
            },
            "wordFill" => PromptMode::WordFill { form: None },
            other => PromptMode::FreeText {
                input_type: other.to_string(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PromptMode::FreeText { .. } => "free-text",
            PromptMode::Choice { .. } => "choice",
            PromptMode::WordFill { .. } => "word-fill",
        }
    }
}

/// The active directive-driven interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSession {
    /// Increases every time a new session opens, so the UI can tell a
    /// replacement apart from the one it is editing.
    pub id: u64,
    pub args: PromptArgs,
    pub mode: PromptMode,
    /// Last validation error the server returned for this session.
    pub error: Option<String>,
}

impl PromptSession {
    pub fn open(id: u64, args: PromptArgs) -> Self {
        let mode = PromptMode::for_kind(&args.input_kind);
        Self {
            id,
            args,
            mode,
            error: None,
        }
    }
}

/// What the player entered for a prompt, as collected by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Text(String),
    Choice(String),
    /// One value per blank, in document order.
    WordFill(Vec<String>),
}

/// A fully resolved write request for a prompt session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResponse {
    pub session_id: u64,
    pub target_url: String,
    pub field: String,
    pub value: String,
}
