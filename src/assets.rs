//! Build asset validation.
//!
//! Checks that the icons and splash images the app bundle references exist
//! under the project root. Required paths must be relative and may not climb
//! out of the root.

use serde::Serialize;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_REQUIRED_ASSETS: &[&str] = &[
    "assets/icon.png",
    "assets/adaptive-icon.png",
    "assets/splash.png",
    "assets/favicon.png",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetProblem {
    Missing,
    NotAFile,
    /// Absolute, or escapes the root with `..`.
    OutsideRoot,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetIssue {
    pub path: String,
    pub problem: AssetProblem,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetReport {
    pub present: Vec<String>,
    pub issues: Vec<AssetIssue>,
}

impl AssetReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Resolve `relative` under `root`, rejecting anything that is not a plain
/// relative path.
fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let rel = Path::new(relative);
    if relative.is_empty() || rel.is_absolute() {
        return None;
    }
    let clean = rel
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !clean {
        return None;
    }
    Some(root.join(rel))
}

pub fn validate_assets<S: AsRef<str>>(root: &Path, required: &[S]) -> AssetReport {
    let mut report = AssetReport::default();

    for relative in required {
        let relative = relative.as_ref();
        let problem = match resolve(root, relative) {
            None => Some(AssetProblem::OutsideRoot),
            Some(path) if path.is_file() => None,
            Some(path) if path.exists() => Some(AssetProblem::NotAFile),
            Some(_) => Some(AssetProblem::Missing),
        };
        match problem {
            None => report.present.push(relative.to_string()),
            Some(problem) => report.issues.push(AssetIssue {
                path: relative.to_string(),
                problem,
            }),
        }
    }

    report
}
