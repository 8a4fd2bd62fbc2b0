use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Document delimiter: a `---` line at the start of the stream or directly
/// after a newline, with optional whitespace before the newline and on the
/// rest of the delimiter line. `^` is not in multiline mode, so a mid-line
/// `---` never splits. The trailing run excludes `\n`: consuming it would
/// swallow the newline the next delimiter needs, and `---\n---` would no
/// longer collapse. `\s` here is Unicode-aware; the per-segment trims are
/// too, so exotic whitespace lands in trimmed-away segment edges either way.
static DOC_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s*\n)---[^\S\n]*").expect("valid regex"));

/// Splits a multi-document YAML stream into individual trimmed documents.
///
/// The whole input is trimmed first so a delimiter on the first non-blank
/// line still counts as "start of stream". Each segment between delimiters
/// is trimmed; segments that end up empty (leading/trailing delimiters,
/// consecutive delimiters) are dropped.
///
/// Pure function: calling it twice on the same input yields the same
/// sequence, in order of appearance.
///
/// # Examples
///
/// ```
/// use yamlsplit::split_documents;
///
/// let docs = split_documents("kind: Pod\n---\nkind: Service\n");
/// assert_eq!(docs, vec!["kind: Pod", "kind: Service"]);
/// ```
#[must_use]
pub fn split_documents(text: &str) -> Vec<String> {
    let trimmed = text.trim();

    let docs: Vec<String> = DOC_SEPARATOR
        .split(trimmed)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(ToString::to_string)
        .collect();

    debug!("Split input ({} bytes) into {} documents", text.len(), docs.len());

    docs
}
