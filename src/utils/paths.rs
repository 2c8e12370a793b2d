use std::path::{Component, Path, PathBuf};

/// Character substituted for every non-alphanumeric character of a project id
const DIR_FILLER: char = '-';

/// Encodes a project identifier into Claude Code's project directory name
///
/// Claude Code replaces every character that is not an ASCII letter or digit
/// (path separators, dots, underscores, spaces) with `-`. The mapping is lossy:
/// `/foo/bar` and `/foo.bar` encode identically.
///
/// # Examples
///
/// ```
/// use session_transcripts::encode_project_dir;
///
/// assert_eq!(encode_project_dir("/Users/foo/bar"), "-Users-foo-bar");
/// assert_eq!(encode_project_dir("/srv/app.v2"), "-srv-app-v2");
/// ```
pub fn encode_project_dir(project_id: &str) -> String {
    project_id.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { DIR_FILLER }).collect()
}

/// Folds `.` and `..` components without touching the filesystem
///
/// `..` at the root of an absolute path stays at the root; on a relative path
/// a leading `..` is kept so the result still escapes.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Returns true if `path` lies strictly inside `root`
///
/// Comparison is component-wise, so `/data/root-evil` is not inside `/data/root`.
/// Both paths are expected to be in the same form (both canonical, or both
/// lexically normalized).
pub fn is_descendant(path: &Path, root: &Path) -> bool {
    path != root && path.starts_with(root)
}
