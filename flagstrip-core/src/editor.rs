//! Text editor: removes scanned spans and derives a source map for the edit.
//!
//! The edited text is produced by copying only the retained runs of the
//! original buffer, visiting spans from the highest start offset to the lowest
//! so stored offsets are never invalidated. Spans that overlap, nest or repeat
//! (two rules matching the same region) are folded into their union first. The source map is computed in one
//! pass afterwards: every retained run, and every line start inside a run,
//! gets one segment pointing at its original position. Deleted text maps to
//! nothing.
//!
//! Source map columns are UTF-16 code units, as the v3 format expects.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use sourcemap::{SourceMap, SourceMapBuilder};

use crate::errors::FlagStripError;
use crate::scanner::Span;

/// The edited text plus a map from its positions back to the original.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub code: String,
    pub map: SourceMap,
}

impl TransformResult {
    /// Serializes the source map as v3 JSON.
    pub fn map_json(&self) -> Result<String, FlagStripError> {
        let mut buf = Vec::new();
        self.map.to_writer(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Byte offsets of line starts, used to turn offsets into line/column pairs.
struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Zero-based line and UTF-16 column of the byte `offset`.
    fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let col = self.text[line_start..offset].encode_utf16().count();
        (line as u32, col as u32)
    }
}

/// A contiguous piece of the original kept in the output.
#[derive(Debug, Clone, Copy)]
struct RetainedRun {
    original_start: usize,
    original_end: usize,
    output_start: usize,
}

/// Deletes `spans` from `code` and maps the result back to `source_name`.
///
/// Spans may arrive in any order and may overlap; the union of all spans is
/// removed.
pub fn apply_spans(
    code: &str,
    spans: &[Span],
    source_name: &str,
) -> Result<TransformResult, FlagStripError> {
    for span in spans {
        debug_assert!(span.start < span.end, "empty or inverted span {:?}", span);
        debug_assert!(span.end <= code.len(), "span {:?} out of bounds", span);
    }
    let ordered = coalesce_descending(spans);

    let runs = retained_runs(code.len(), &ordered);
    let mut output = String::with_capacity(code.len());
    for run in &runs {
        output.push_str(&code[run.original_start..run.original_end]);
    }

    debug!(
        "Removed {} span(s): {} -> {} bytes.",
        ordered.len(),
        code.len(),
        output.len()
    );

    let map = build_map(code, &output, &runs, source_name);
    Ok(TransformResult { code: output, map })
}

/// Sorts `spans`, folds overlapping ones into their union and returns them
/// from the highest start offset to the lowest. Touching spans stay separate.
fn coalesce_descending(spans: &[Span]) -> Vec<Span> {
    let mut sorted = spans.to_vec();
    sorted.sort();

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if last.overlaps(&span) => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    if merged.len() < spans.len() {
        debug!("Merged {} overlapping span(s).", spans.len() - merged.len());
    }
    merged.reverse();
    merged
}

/// Walks descending spans from the end of the buffer and returns the kept
/// runs in ascending order with their offsets in the output.
fn retained_runs(len: usize, descending: &[Span]) -> Vec<RetainedRun> {
    let mut pieces = Vec::with_capacity(descending.len() + 1);
    let mut upper = len;
    for span in descending {
        if span.end < upper {
            pieces.push((span.end, upper));
        }
        upper = span.start;
    }
    if upper > 0 {
        pieces.push((0, upper));
    }
    pieces.reverse();

    let mut output_start = 0;
    pieces
        .into_iter()
        .map(|(original_start, original_end)| {
            let run = RetainedRun {
                original_start,
                original_end,
                output_start,
            };
            output_start += original_end - original_start;
            run
        })
        .collect()
}

fn build_map(original: &str, output: &str, runs: &[RetainedRun], source_name: &str) -> SourceMap {
    let original_index = LineIndex::new(original);
    let output_index = LineIndex::new(output);

    let mut builder = SourceMapBuilder::new(None);
    let src_id = builder.add_source(source_name);
    builder.set_source_contents(src_id, Some(original));

    for run in runs {
        let mut add_segment = |original_offset: usize| {
            let output_offset = run.output_start + (original_offset - run.original_start);
            let (dst_line, dst_col) = output_index.position(output_offset);
            let (src_line, src_col) = original_index.position(original_offset);
            builder.add_raw(dst_line, dst_col, src_line, src_col, Some(src_id), None);
        };

        add_segment(run.original_start);
        let text = &original[run.original_start..run.original_end];
        for (i, _) in text.match_indices('\n') {
            let next_line = run.original_start + i + 1;
            if next_line < run.original_end {
                add_segment(next_line);
            }
        }
    }

    builder.into_sourcemap()
}
