/// One `%name(arg, ...)` occurrence decoded from an alert string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveCall {
    pub name: String,
    pub args: Vec<String>,
}

/// How an alert string was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAlert {
    Empty,
    /// Plain text meant to be shown as a server broadcast.
    Broadcast(String),
    Directives(Vec<DirectiveCall>),
}
