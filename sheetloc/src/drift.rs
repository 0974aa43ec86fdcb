//! Detects drift between freshly rendered resources and the files on disk.
//!
//! Both sides are compared as sequences of lines, so `\r\n` and `\n` files compare
//! equal. A mismatch is reported as a unified diff with three lines of context.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::error::Error;

/// Lines of unchanged context around each change in a reported diff.
pub const CONTEXT_LINES: usize = 3;

/// The difference found for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageDrift {
    pub language: String,
    pub path: PathBuf,
    pub diff: String,
}

/// Compares `remote` (rendered from the sheet) with `local` (read from disk).
///
/// Returns `None` if both contain the same lines, otherwise a unified diff from
/// `remote_name` to `local_name`.
pub fn diff_lines(remote_name: &str, remote: &str, local_name: &str, local: &str) -> Option<String> {
    let remote_lines: Vec<&str> = remote.lines().collect();
    let local_lines: Vec<&str> = local.lines().collect();
    if remote_lines == local_lines {
        return None;
    }

    let diff = TextDiff::from_slices(&remote_lines, &local_lines);
    Some(
        diff.unified_diff()
            .context_radius(CONTEXT_LINES)
            .header(remote_name, local_name)
            .to_string(),
    )
}

/// Checks the rendered content of one language against its file.
pub fn check_language(
    language: &str,
    path: &Path,
    rendered: &str,
    on_disk: &str,
) -> Option<LanguageDrift> {
    let name = path.display();
    diff_lines(
        &format!("{} (remote)", name),
        rendered,
        &format!("{} (local)", name),
        on_disk,
    )
    .map(|diff| LanguageDrift {
        language: language.to_string(),
        path: path.to_path_buf(),
        diff,
    })
}

/// Fails with [`Error::Drift`] carrying every diff if any language drifted.
pub fn ensure_no_drift(drifts: &[LanguageDrift]) -> Result<(), Error> {
    if drifts.is_empty() {
        return Ok(());
    }
    Err(Error::Drift(
        drifts
            .iter()
            .map(|d| d.diff.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    ))
}
