//! `strip` command: runs the transform hook over each input and writes the result.
//!
//! Inputs the admission filter rejects are written through unchanged, the same
//! way a build pipeline keeps content when the hook declines it.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flagstrip_core::FeatureFlagPlugin;

use crate::cli::StripCommand;
use crate::commands::{build_plugin, read_inputs, Input};
use crate::ui::{diff_viewer, output_format};

/// Options for the ergonomic `run_strip_opts` API.
#[derive(Debug, Clone, Default)]
pub struct StripOptions {
    pub out_dir: Option<PathBuf>,
    pub source_map: bool,
    pub diff: bool,
    pub quiet: bool,
}

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    Transformed { removed_bytes: usize },
    PassedThrough,
}

pub fn run_strip(cmd: &StripCommand, quiet: bool) -> Result<()> {
    let plugin = build_plugin(&cmd.plugin, cmd.enforce.map(Into::into))?;
    let inputs = read_inputs(&cmd.inputs, &cmd.plugin.stdin_id)?;
    let opts = StripOptions {
        out_dir: cmd.out_dir.clone(),
        source_map: cmd.source_map,
        diff: cmd.diff,
        quiet,
    };

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    run_strip_opts(&plugin, &inputs, &opts, &mut writer, supports_color)?;
    Ok(())
}

/// The main operation runner for the `strip` command.
pub fn run_strip_opts<W: Write>(
    plugin: &FeatureFlagPlugin,
    inputs: &[Input],
    opts: &StripOptions,
    writer: &mut W,
    supports_color: bool,
) -> Result<Vec<StripOutcome>> {
    info!("Starting strip over {} input(s), enforce = {}.", inputs.len(), plugin.enforce());

    if let Some(dir) = opts.out_dir.as_ref().filter(|_| !opts.diff) {
        check_output_names(inputs)?;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut outcomes = Vec::with_capacity(inputs.len());
    for input in inputs {
        let transformed = plugin
            .transform(&input.content, &input.id)
            .with_context(|| format!("Failed to strip feature flags from '{}'", input.id))?;

        let (code, map_json, outcome) = match transformed {
            Some(result) => {
                let removed_bytes = input.content.len() - result.code.len();
                debug!("'{}': removed {} bytes.", input.id, removed_bytes);
                let map_json = if opts.source_map {
                    Some(result.map_json()?)
                } else {
                    None
                };
                (result.code, map_json, StripOutcome::Transformed { removed_bytes })
            }
            None => {
                debug!("'{}' is not admitted; passing through.", input.id);
                if input.path.is_some() && !opts.quiet {
                    let _ = output_format::print_warn_message(
                        &mut io::stderr(),
                        &format!("{} is not admitted by the filter; copied unchanged", input.id),
                        io::stderr().is_terminal(),
                    );
                }
                (input.content.clone(), None, StripOutcome::PassedThrough)
            }
        };

        if opts.diff {
            diff_viewer::print_diff(&input.id, &input.content, &code, writer, supports_color)?;
        } else if let Some(dir) = &opts.out_dir {
            write_output(dir, input, &code, map_json.as_deref(), opts.quiet)?;
        } else {
            write!(writer, "{}", code)?;
        }
        outcomes.push(outcome);
    }

    writer.flush()?;
    info!("Strip completed.");
    Ok(outcomes)
}

fn output_name(input: &Input) -> String {
    input
        .path
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.id.rsplit(['/', '\\']).next().unwrap_or_default().to_string())
}

/// Fails when two inputs would be written to the same file in the output directory.
fn check_output_names(inputs: &[Input]) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(inputs.len());
    for input in inputs {
        if let Some(previous) = seen.insert(output_name(input), &input.id) {
            bail!(
                "'{}' and '{}' would both be written as '{}' in the output directory",
                previous,
                input.id,
                output_name(input)
            );
        }
    }
    Ok(())
}

fn write_output(dir: &Path, input: &Input, code: &str, map_json: Option<&str>, quiet: bool) -> Result<()> {
    let target = dir.join(output_name(input));
    fs::write(&target, code)
        .with_context(|| format!("Failed to write output file: {}", target.display()))?;

    if let Some(json) = map_json {
        let mut map_path = target.clone().into_os_string();
        map_path.push(".map");
        let map_path = PathBuf::from(map_path);
        fs::write(&map_path, json)
            .with_context(|| format!("Failed to write source map: {}", map_path.display()))?;
    }

    if !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        let _ = output_format::print_info_message(
            &mut io::stderr(),
            &format!("Wrote {}", target.display()),
            stderr_supports_color,
        );
    }
    Ok(())
}
