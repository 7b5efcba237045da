#![forbid(unsafe_code)]

//! Search-term highlighting.
//!
//! Splits a rendered string into plain and marked segments so the host can
//! wrap matches of the active search in highlight markup. Quoted phrases
//! stay whole, `\"` escapes a literal quote, and longer terms are applied
//! first so a short term never splits a longer match. Mark keys are scoped
//! to a single marking pass.

use regex::RegexBuilder;

/// One piece of a marked-up string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Unmatched text, rendered as-is.
    Plain(String),
    /// A search-term match.
    Marked {
        /// The matched text, original casing preserved.
        text: String,
        /// Render key, unique within one `mark_search_terms` call.
        key: usize,
    },
}

impl Segment {
    /// The segment's text regardless of kind.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Marked { text, .. } => text,
        }
    }
}

/// Mark every case-insensitive occurrence of the search terms in `base`.
///
/// Terms are matched literally; regex metacharacters in a search string
/// have no special meaning. An empty or all-whitespace search yields a
/// single plain segment.
#[must_use]
pub fn mark_search_terms(base: &str, search: &str) -> Vec<Segment> {
    let mut terms = parse_terms(search);
    // Decreasing length so "light year" is marked before "light" can split it.
    terms.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut segments = vec![Segment::Plain(base.to_string())];
    let mut keys = 0usize;
    for term in &terms {
        segments = mark_term(segments, term, &mut keys);
    }
    segments
}

/// Split the search string into terms: whitespace-separated words, except
/// that double quotes group a phrase and `\"` is a literal quote.
fn parse_terms(search: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = search.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

/// Re-split the plain segments on occurrences of one term.
fn mark_term(segments: Vec<Segment>, term: &str, keys: &mut usize) -> Vec<Segment> {
    let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return segments;
    };

    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Plain(text) = segment else {
            out.push(segment);
            continue;
        };
        let mut last = 0;
        for found in pattern.find_iter(&text) {
            if found.start() > last {
                out.push(Segment::Plain(text[last..found.start()].to_string()));
            }
            *keys += 1;
            out.push(Segment::Marked {
                text: found.as_str().to_string(),
                key: *keys,
            });
            last = found.end();
        }
        if last == 0 {
            out.push(Segment::Plain(text));
        } else if last < text.len() {
            out.push(Segment::Plain(text[last..].to_string()));
        }
    }
    out
}
