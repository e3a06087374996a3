use std::sync::OnceLock;

use regex::Regex;

use crate::model::directive::{DirectiveCall, ParsedAlert};

// `%name(args)`: alphanumeric name, argument characters limited to what the
// server emits. Commas and parentheses cannot be escaped.
fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"%([a-zA-Z0-9]+)\(([/a-zA-Z0-9'.:_?, ]+)\)").expect("directive pattern is valid")
    })
}

/// Classify an alert string: empty, plain broadcast text, or one or more
/// directives. Directive names are not checked here.
pub fn parse_alert(alert: &str) -> ParsedAlert {
    if alert.is_empty() {
        return ParsedAlert::Empty;
    }

    let calls: Vec<DirectiveCall> = directive_regex()
        .captures_iter(alert)
        .map(|caps| DirectiveCall {
            name: caps[1].to_string(),
            args: caps[2].split(',').map(|a| a.trim().to_string()).collect(),
        })
        .collect();

    if calls.is_empty() {
        ParsedAlert::Broadcast(alert.to_string())
    } else {
        ParsedAlert::Directives(calls)
    }
}
