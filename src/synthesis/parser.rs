use regex::Regex;
use std::sync::OnceLock;

/// Leading enumeration: digits, punctuation and whitespace ("1. ", "- ", "2) ", "**")
fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\s\d\p{P}]+").expect("static regex"))
}

/// Split synthesized text into at most `cap` action lines.
///
/// Each line is trimmed and stripped of leading enumeration markers; blank
/// lines, and lines that were nothing but markers, are dropped.
pub fn parse_action_lines(raw: &str, cap: usize) -> Vec<String> {
    raw.lines()
        .map(|line| marker_re().replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(cap)
        .collect()
}
