//! Span scanner: locates marker-delimited regions in a source buffer.
//!
//! Each applicable rule is scanned independently with a forward-moving cursor.
//! A start marker without a matching end marker ends the scan for that rule and
//! produces no span.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::config::Rule;

/// A half-open `[start, end)` byte range of the original buffer slated for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "span start {} must precede end {}", start, end);
        Self { start, end }
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Returns the text after the final `.` of `id`, or the whole id when it has none.
pub fn file_type_of(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or_default()
}

/// Finds every span the enabled rules scoped to `file_type` mark for deletion.
///
/// Spans are returned grouped by rule, in rule order, and ascending within a rule.
pub fn find_spans(rules: &[Rule], code: &str, file_type: &str) -> Vec<Span> {
    let mut spans = Vec::new();

    for rule in rules {
        if !rule.applies_to(file_type) {
            continue;
        }
        let before = spans.len();
        scan_rule(rule, code, &mut spans);
        debug!(
            target: "flagstrip_core::scanner",
            "Rule '{}'..'{}' matched {} span(s) in '{}' content.",
            rule.start,
            rule.end,
            spans.len() - before,
            file_type
        );
    }

    spans
}

fn scan_rule(rule: &Rule, code: &str, spans: &mut Vec<Span>) {
    // An empty needle matches everywhere without advancing the cursor.
    if rule.start.is_empty() {
        debug!(target: "flagstrip_core::scanner", "Skipping rule with an empty start marker.");
        return;
    }
    let mut cursor = 0;

    while let Some(found) = code[cursor..].find(&rule.start) {
        let start_pos = cursor + found;
        let search_from = start_pos + rule.start.len();

        let Some(found_end) = code[search_from..].find(&rule.end) else {
            debug!(
                target: "flagstrip_core::scanner",
                "Unterminated '{}' at offset {}; ignoring.",
                rule.start,
                start_pos
            );
            break;
        };

        let end = search_from + found_end + rule.end.len();
        spans.push(Span::new(start_pos, end));
        cursor = end;
    }
}
