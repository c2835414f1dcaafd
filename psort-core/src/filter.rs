//! Include/exclude predicates for directory mode.
//!
//! Pattern forms:
//! - `**/<glob>` matches the last path segment only, at any depth.
//! - `<glob>` matches the whole relative path. `*` and `?` never cross a `/`,
//!   and a run of stars such as `**` is just another `*`.
//! - Exclude only: a plain `<dir>` also removes everything beneath `<dir>/`.
//!
//! A pattern that does not compile never matches.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path};

use crate::config::SortConfig;

const RECURSIVE_MARKER: &str = "**/";

/// Which side of the filter a pattern set sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRole {
    Include,
    /// Adds the `<dir>` / `<dir>/...` prefix rule.
    Exclude,
}

#[derive(Debug, Clone)]
enum CompiledPattern {
    /// `**/` stripped; tested against the basename.
    Basename(Option<GlobMatcher>),
    /// Tested against the full relative path.
    FullPath {
        raw: String,
        glob: Option<GlobMatcher>,
    },
}

#[derive(Debug, Clone)]
pub struct PatternSet {
    role: PatternRole,
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    pub fn new(patterns: &[String], role: PatternRole) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| match p.strip_prefix(RECURSIVE_MARKER) {
                Some(base) => CompiledPattern::Basename(compile(base, p)),
                None => CompiledPattern::FullPath {
                    raw: p.trim_end_matches('/').to_string(),
                    glob: compile(p, p),
                },
            })
            .collect();

        Self { role, patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if any pattern matches the `/`-separated relative path.
    pub fn matches(&self, rel: &str) -> bool {
        let base = rel.rsplit('/').next().unwrap_or(rel);

        self.patterns.iter().any(|pattern| match pattern {
            CompiledPattern::Basename(glob) => glob.as_ref().is_some_and(|g| g.is_match(base)),
            CompiledPattern::FullPath { raw, glob } => {
                if glob.as_ref().is_some_and(|g| g.is_match(rel)) {
                    return true;
                }
                self.role == PatternRole::Exclude && is_dir_prefix(raw, rel)
            }
        })
    }
}

/// `vendor` covers `vendor` and `vendor/...`, never `vendors/...`.
fn is_dir_prefix(dir: &str, rel: &str) -> bool {
    match rel.strip_prefix(dir) {
        Some("") => !dir.is_empty(),
        Some(rest) => !dir.is_empty() && rest.starts_with('/'),
        None => false,
    }
}

/// Collapse every unescaped run of `*` into one, so `**` never acts as a
/// recursive wildcard.
fn collapse_stars(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());
    let mut chars = glob.chars();
    let mut after_star = false;
    while let Some(c) = chars.next() {
        match c {
            '*' if after_star => continue,
            '\\' => {
                out.push(c);
                out.extend(chars.next());
            }
            _ => out.push(c),
        }
        after_star = c == '*';
    }
    out
}

fn compile(glob: &str, original: &str) -> Option<GlobMatcher> {
    match GlobBuilder::new(&collapse_stars(glob))
        .literal_separator(true)
        .build()
    {
        Ok(g) => Some(g.compile_matcher()),
        Err(e) => {
            tracing::warn!("Ignoring invalid pattern {:?}: {}", original, e);
            None
        }
    }
}

/// Decides which paths take part in a directory-mode run.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: PatternSet,
    exclude: PatternSet,
}

impl PathFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: PatternSet::new(include, PatternRole::Include),
            exclude: PatternSet::new(exclude, PatternRole::Exclude),
        }
    }

    pub fn from_config(config: &SortConfig) -> Self {
        Self::new(&config.include, &config.exclude)
    }

    pub fn is_included(&self, rel: &Path) -> bool {
        self.include.matches(&normalize(rel))
    }

    pub fn is_excluded(&self, rel: &Path) -> bool {
        self.exclude.matches(&normalize(rel))
    }

    /// Excluded directories are pruned with their whole subtree.
    pub fn should_visit_dir(&self, rel: &Path) -> bool {
        !self.is_excluded(rel)
    }

    pub fn should_process_file(&self, rel: &Path) -> bool {
        let rel = normalize(rel);
        !self.exclude.matches(&rel) && self.include.matches(&rel)
    }
}

/// Relative path as a `/`-joined string, without `.` components.
pub fn normalize(rel: &Path) -> String {
    let mut out = String::new();
    for comp in rel.components() {
        let part = match comp {
            Component::CurDir => continue,
            Component::Normal(s) => s.to_string_lossy(),
            Component::ParentDir => "..".into(),
            Component::RootDir | Component::Prefix(_) => continue,
        };
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&part);
    }
    out
}
