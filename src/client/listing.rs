//! Dashboard helpers: entries grouped under a date heading with a short
//! plain-text preview of each entry's HTML.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::DiaryEntry;

pub const PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a DiaryEntry>,
}

/// Groups entries by date, newest date first. Entries keep their input order within a day.
pub fn group_by_date(entries: &[DiaryEntry]) -> Vec<DateGroup<'_>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&DiaryEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.date).or_default().push(entry);
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, entries)| DateGroup { date, entries })
        .collect()
}

/// `Wednesday, May 1, 2024`
pub fn format_date_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Strips markup from editor HTML and truncates to `max_chars` characters.
pub fn preview_text(html: &str, max_chars: usize) -> String {
    let text = collapse_whitespace(&decode_entities(&strip_tags(html)));

    if text.chars().count() <= max_chars {
        return text;
    }

    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut tag: Option<String> = None;

    for c in html.chars() {
        match tag.as_mut() {
            None if c == '<' => tag = Some(String::new()),
            None => out.push(c),
            Some(name) if c == '>' => {
                // Block boundaries would otherwise glue words together
                if is_block_tag(name) {
                    out.push(' ');
                }
                tag = None;
            }
            Some(name) => name.push(c),
        }
    }

    out
}

/// `p`, `/div`, `br/`, `li class="x"` and the like.
fn is_block_tag(raw: &str) -> bool {
    let name: String = raw
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    matches!(
        name.as_str(),
        "p" | "div" | "br" | "li" | "ul" | "ol" | "blockquote" | "pre"
            | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
