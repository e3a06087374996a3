use std::sync::OnceLock;

use regex::Regex;

use crate::model::prompt::{WordFillForm, WordFillPart};

fn element_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<input\b([^>]*)>|<span\b[^>]*>(.*?)</span>").expect("element pattern is valid")
    })
}

fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"([a-zA-Z-]+)\s*=\s*"([^"]*)""#).expect("attribute pattern is valid"))
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attribute_regex()
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Decode the `/getWordFillForm` fragment: each `<input>` is a blank whose
/// default is its `value` (or `placeholder`), each `<span>` holds letters
/// that are already known. Anything else is ignored.
pub fn parse_word_fill_form(markup: &str) -> WordFillForm {
    let mut parts = Vec::new();

    for caps in element_regex().captures_iter(markup) {
        if let Some(attrs) = caps.get(1) {
            let attrs = attrs.as_str();
            let default = attribute(attrs, "value")
                .filter(|v| !v.is_empty())
                .or_else(|| attribute(attrs, "placeholder"))
                .unwrap_or_default()
                .to_string();
            let width = attribute(attrs, "maxlength")
                .and_then(|m| m.trim().parse::<usize>().ok())
                .unwrap_or_else(|| default.chars().count().max(1));

            parts.push(WordFillPart::Blank { width, default });
        } else if let Some(text) = caps.get(2) {
            let text = text.as_str().trim();
            if !text.is_empty() {
                parts.push(WordFillPart::Fixed(text.to_string()));
            }
        }
    }

    WordFillForm { parts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_form() {
        let markup = "<div class=\"input-group\">\t<input class=\"form-control\" type=\"text\" maxlength=\"1\" value=\"-\">\t<span class=\"input-group-addon\">mb</span>\t<input class=\"form-control\" type=\"text\" maxlength=\"2\" value=\"--\">\t<span class=\"input-group-addon\">is</span></div>";
        let form = parse_word_fill_form(markup);

        assert_eq!(
            form.parts,
            vec![
                WordFillPart::Blank { width: 1, default: "-".into() },
                WordFillPart::Fixed("mb".into()),
                WordFillPart::Blank { width: 2, default: "--".into() },
                WordFillPart::Fixed("is".into()),
            ]
        );
        assert_eq!(form.blank_count(), 2);
    }

    #[test]
    fn placeholder_is_used_when_value_is_missing() {
        let form = parse_word_fill_form(r#"<input maxlength="3" placeholder="abc">"#);
        assert_eq!(
            form.parts,
            vec![WordFillPart::Blank { width: 3, default: "abc".into() }]
        );
    }

    #[test]
    fn assembles_submitted_word_in_document_order() {
        let markup = r#"<div><input maxlength="1" value="-"><span>mb</span><input maxlength="2" value="--"></div>"#;
        let form = parse_word_fill_form(markup);

        let word = form.assemble(&["a".to_string(), String::new()]).unwrap();
        assert_eq!(word, "amb--");
    }

    #[test]
    fn unrelated_markup_yields_empty_form() {
        let form = parse_word_fill_form("<p>nothing to fill</p>");
        assert!(form.parts.is_empty());
        assert_eq!(form.assemble(&[]).as_deref(), Some(""));
    }
}
