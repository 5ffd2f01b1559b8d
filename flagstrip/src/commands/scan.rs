//! `scan` command: reports feature-flag blocks without modifying anything.

use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;
use std::io::{self, Write};

use flagstrip_core::{FeatureFlagPlugin, Span};

use crate::cli::ScanCommand;
use crate::commands::{build_plugin, read_inputs, Input};

/// Scan results for one input.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanReport {
    pub id: String,
    pub admitted: bool,
    pub spans: Vec<ReportedSpan>,
}

/// A span plus the 1-based lines it starts and ends on, for human readers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportedSpan {
    pub start: usize,
    pub end: usize,
    pub start_line: usize,
    pub end_line: usize,
}

impl ReportedSpan {
    fn new(content: &str, span: Span) -> Self {
        let line_of = |offset: usize| content[..offset].matches('\n').count() + 1;
        Self {
            start: span.start,
            end: span.end,
            start_line: line_of(span.start),
            end_line: line_of(span.end),
        }
    }
}

pub fn run_scan(cmd: &ScanCommand) -> Result<()> {
    let plugin = build_plugin(&cmd.plugin, None)?;
    let inputs = read_inputs(&cmd.inputs, &cmd.plugin.stdin_id)?;
    let reports = scan_inputs(&plugin, &inputs);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json {
        let json = serde_json::to_string_pretty(&reports).context("Failed to serialize scan report")?;
        writeln!(writer, "{}", json)?;
    } else {
        print_reports(&reports, &mut writer)?;
    }

    let total: usize = reports.iter().map(|r| r.spans.len()).sum();
    info!("Scan found {} block(s) across {} input(s).", total, reports.len());
    if cmd.fail_on_match && total > 0 {
        bail!("{} feature-flag block(s) found", total);
    }
    Ok(())
}

pub fn scan_inputs(plugin: &FeatureFlagPlugin, inputs: &[Input]) -> Vec<ScanReport> {
    inputs
        .iter()
        .map(|input| match plugin.find_spans(&input.content, &input.id) {
            Some(spans) => {
                let mut spans: Vec<ReportedSpan> = spans
                    .into_iter()
                    .map(|span| ReportedSpan::new(&input.content, span))
                    .collect();
                spans.sort_by_key(|s| s.start);
                ScanReport {
                    id: input.id.clone(),
                    admitted: true,
                    spans,
                }
            }
            None => ScanReport {
                id: input.id.clone(),
                admitted: false,
                spans: Vec::new(),
            },
        })
        .collect()
}

pub fn print_reports<W: Write>(reports: &[ScanReport], writer: &mut W) -> io::Result<()> {
    for report in reports {
        if !report.admitted {
            writeln!(writer, "{}: skipped (not admitted)", report.id)?;
            continue;
        }
        writeln!(writer, "{}: {} block(s)", report.id, report.spans.len())?;
        for span in &report.spans {
            writeln!(
                writer,
                "  lines {}-{} (bytes {}..{})",
                span.start_line, span.end_line, span.start, span.end
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagstrip_core::PluginOptions;

    #[test]
    fn test_scan_reports_lines_and_admission() {
        let plugin = FeatureFlagPlugin::new(PluginOptions::default()).unwrap();
        let inputs = vec![
            Input {
                id: "a.ts".to_string(),
                path: None,
                content: "x\n// @delete-start\ny\n// @delete-end\n".to_string(),
            },
            Input {
                id: "notes.txt".to_string(),
                path: None,
                content: "// @delete-start\n// @delete-end".to_string(),
            },
        ];
        let reports = scan_inputs(&plugin, &inputs);

        assert!(reports[0].admitted);
        assert_eq!(
            reports[0].spans,
            vec![ReportedSpan {
                start: 2,
                end: 35,
                start_line: 2,
                end_line: 4
            }]
        );
        assert!(!reports[1].admitted);

        let mut buf = Vec::new();
        print_reports(&reports, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("a.ts: 1 block(s)\n  lines 2-4 (bytes 2..35)\n"));
        assert!(out.contains("notes.txt: skipped (not admitted)"));
    }
}
