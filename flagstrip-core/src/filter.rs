//! Admission filter: decides from a file id whether the transform runs at all.
//!
//! Glob patterns are expanded so a bare name such as `node_modules` matches at
//! any depth; regex patterns are tested against the normalized id as-is.
//! Exclude always wins over include.

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FilterPattern;
use crate::errors::FlagStripError;

/// Include pattern used when none is configured: script, markup and style files.
pub const DEFAULT_INCLUDE: &str = r"\.(jsx?|tsx?|less|css|html)$";

static DEFAULT_INCLUDE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_INCLUDE).unwrap());

#[derive(Debug, Clone)]
enum Matcher {
    Globs(GlobSet),
    Regex(Regex),
}

impl Matcher {
    fn compile(pattern: &FilterPattern) -> Result<Self, FlagStripError> {
        match pattern {
            FilterPattern::Regex { regex } => Ok(Matcher::Regex(Regex::new(regex)?)),
            FilterPattern::Single(glob) => Self::globs(std::slice::from_ref(glob)),
            FilterPattern::List(globs) => Self::globs(globs),
        }
    }

    fn globs(patterns: &[String]) -> Result<Self, FlagStripError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            for expanded in expand_pattern(pattern) {
                let glob = Glob::new(&expanded)
                    .map_err(|e| FlagStripError::InvalidPattern(pattern.clone(), e))?;
                builder.add(glob);
            }
        }
        let set = builder
            .build()
            .map_err(|e| FlagStripError::InvalidPattern(patterns.join(", "), e))?;
        Ok(Matcher::Globs(set))
    }

    fn is_match(&self, id: &str) -> bool {
        match self {
            Matcher::Globs(set) => set.is_match(id),
            Matcher::Regex(re) => re.is_match(id),
        }
    }
}

fn expand_pattern(raw: &str) -> Vec<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('/') || trimmed.starts_with("**") {
        return vec![trimmed.to_owned(), format!("{trimmed}/**")];
    }
    vec![
        trimmed.to_owned(),
        format!("{trimmed}/**"),
        format!("**/{trimmed}"),
        format!("**/{trimmed}/**"),
    ]
}

/// Compiled include/exclude predicate.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Matcher,
    exclude: Option<Matcher>,
}

impl FileFilter {
    pub fn new(
        include: Option<&FilterPattern>,
        exclude: Option<&FilterPattern>,
    ) -> Result<Self, FlagStripError> {
        let include = match include {
            Some(pattern) => Matcher::compile(pattern)?,
            None => Matcher::Regex(DEFAULT_INCLUDE_RE.clone()),
        };
        let exclude = exclude.map(Matcher::compile).transpose()?;
        Ok(Self { include, exclude })
    }

    /// Returns whether `id` should be processed.
    ///
    /// Ids carrying a NUL byte name virtual modules and are never admitted.
    pub fn is_match(&self, id: &str) -> bool {
        if id.contains('\0') {
            return false;
        }
        let normalized = id.replace('\\', "/");
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(&normalized) {
                debug!("Excluded by filter: {}", normalized);
                return false;
            }
        }
        self.include.is_match(&normalized)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            include: Matcher::Regex(DEFAULT_INCLUDE_RE.clone()),
            exclude: None,
        }
    }
}
