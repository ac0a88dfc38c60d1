use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Tags and comments; group 1 is the tag name. Quoted attribute values may
/// contain `>`.
static HTML_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|</?([A-Za-z][A-Za-z0-9]*)\b(?:"[^"]*"|'[^']*'|[^'">])*>"#)
        .expect("Invalid HTML tag regex")
});

static LEADING_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9]+\.\s").expect("Invalid leading number regex"));

static LINE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[0-9]+\.\s").expect("Invalid line number regex"));

/// A period and the whitespace run after it.
static SENTENCE_END_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+").expect("Invalid sentence end regex"));

const STEP_SEPARATOR: &str = "<br>";

/// Raw instructions as a recipe source provides them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstructionText {
    Text(String),
    Fragments(Vec<String>),
    #[default]
    Absent,
}

impl From<&str> for InstructionText {
    fn from(text: &str) -> Self {
        InstructionText::Text(text.to_string())
    }
}

impl From<String> for InstructionText {
    fn from(text: String) -> Self {
        InstructionText::Text(text)
    }
}

impl From<Vec<String>> for InstructionText {
    fn from(fragments: Vec<String>) -> Self {
        InstructionText::Fragments(fragments)
    }
}

impl<T: Into<InstructionText>> From<Option<T>> for InstructionText {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Turn raw instructions into `1. ...<br>2. ...` form.
///
/// Text that already carries step numbers is only re-flowed on its `<br>`
/// breaks. Anything else is split into sentences and numbered from 1.
/// Returns an empty string when nothing meaningful is left.
pub fn normalize_instructions(input: impl Into<InstructionText>) -> String {
    let text = match input.into() {
        InstructionText::Absent => return String::new(),
        InstructionText::Text(text) if text.trim().is_empty() => return String::new(),
        InstructionText::Text(text) => text,
        InstructionText::Fragments(fragments) if fragments.is_empty() => return String::new(),
        InstructionText::Fragments(fragments) => fragments.join(" "),
    };

    let text = strip_tags(&text);

    if is_pre_numbered(&text) {
        return non_empty_trimmed(text.split(STEP_SEPARATOR)).join(STEP_SEPARATOR);
    }

    let steps = non_empty_trimmed(split_sentences(&text));
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join(STEP_SEPARATOR)
}

/// Remove every tag except `<p>` and `<br>`, keeping the text between tags.
fn strip_tags(html: &str) -> String {
    HTML_TAG_REGEX
        .replace_all(html, |caps: &Captures| match caps.get(1) {
            Some(name) if is_kept_tag(name.as_str()) => caps[0].to_string(),
            _ => String::new(),
        })
        .into_owned()
}

fn is_kept_tag(name: &str) -> bool {
    name.eq_ignore_ascii_case("p") || name.eq_ignore_ascii_case("br")
}

// Heuristic: a stray "3. " at the very start also counts as numbering.
fn is_pre_numbered(text: &str) -> bool {
    LEADING_NUMBER_REGEX.is_match(text) || LINE_NUMBER_REGEX.is_match(text)
}

/// Split after each period that is followed by whitespace; the period stays
/// with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for end in SENTENCE_END_REGEX.find_iter(text) {
        sentences.push(&text[start..end.start() + 1]);
        start = end.end();
    }
    sentences.push(&text[start..]);
    sentences
}

fn non_empty_trimmed<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
