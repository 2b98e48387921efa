//! Single-line rendering of a search result

use super::types::SearchResult;
use textwrap::{Options, WordSplitter};

/// Descriptions longer than this are cut to their first wrapped line
pub const MAX_DESCRIPTION_WIDTH: usize = 200;

/// Render a result as `title - description - uri`.
///
/// The description segment is omitted when empty.
pub fn format_result(result: &SearchResult) -> String {
    let mut line = result.title.clone();
    line.push_str(" - ");

    let description = normalize_description(result.description());
    if !description.is_empty() {
        line.push_str(&truncate_description(&description));
        line.push_str(" - ");
    }

    line.push_str(&result.uri);
    line
}

/// Reduce a description to its first paragraph on a single line.
///
/// Line feeds become spaces; carriage returns mark paragraph breaks.
/// Blank leading paragraphs are skipped.
pub fn normalize_description(description: &str) -> String {
    let description = description.replace('\n', " ").replace('\r', "\n");
    description
        .lines()
        .map(str::trim)
        .find(|paragraph| !paragraph.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Keep the first line of a 200-column word wrap, followed by `...`.
///
/// Lines break at spaces only; hyphenated words stay whole.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_WIDTH {
        return description.to_string();
    }

    let options = Options::new(MAX_DESCRIPTION_WIDTH)
        .break_words(false)
        .word_splitter(WordSplitter::NoHyphenation);
    let first = textwrap::wrap(description, options)
        .into_iter()
        .next()
        .map(|line| line.into_owned())
        .unwrap_or_default();

    format!("{}...", first)
}
