use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::models::tree::TreeNode;

/// Base names pruned together with everything below them.
pub const IGNORED_NAMES: [&str; 8] = [
    "node_modules",
    ".git",
    "package-lock.json",
    "yarn.lock",
    "dist",
    "build",
    "README.md",
    ".env",
];

/// Extensions a file needs to show up as a leaf.
pub const ALLOWED_EXTENSIONS: [&str; 7] = ["js", "jsx", "css", "html", "svg", "jpg", "png"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Scans `root` into a filtered tree.
///
/// The root itself is never matched against [`IGNORED_NAMES`]; only its
/// descendants are. `Ok(None)` means the root is a file whose extension is
/// not allowed. Symlinks are not followed.
///
/// Entries arrive pre-order from the walker. Each open directory sits on a
/// stack indexed by depth and is closed as soon as the walk moves back up past
/// it, so children are always complete before their parent is built.
pub fn scan(root: &Path) -> Result<Option<TreeNode>, ScanError> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry));

    let mut open: Vec<OpenDir> = Vec::new();
    let mut finished: Option<TreeNode> = None;

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Unreadable {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        while open.len() > entry.depth() {
            close_top(&mut open, &mut finished);
        }

        let label = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().is_dir() {
            open.push(OpenDir {
                label,
                children: Vec::new(),
            });
        } else if has_allowed_extension(entry.path()) {
            attach(&mut open, &mut finished, TreeNode::file(label));
        }
    }

    while !open.is_empty() {
        close_top(&mut open, &mut finished);
    }

    debug!(
        root = %root.display(),
        nodes = finished.as_ref().map_or(0, TreeNode::count),
        "scanned directory tree"
    );
    Ok(finished)
}

pub fn is_ignored_name(name: &str) -> bool {
    IGNORED_NAMES.contains(&name)
}

pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext))
}

struct OpenDir {
    label: String,
    children: Vec<TreeNode>,
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(is_ignored_name)
}

fn close_top(open: &mut Vec<OpenDir>, finished: &mut Option<TreeNode>) {
    if let Some(dir) = open.pop() {
        attach(open, finished, TreeNode::directory(dir.label, dir.children));
    }
}

fn attach(open: &mut [OpenDir], finished: &mut Option<TreeNode>, node: TreeNode) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *finished = Some(node),
    }
}
