use std::{
    fmt, fs, io,
    path::{Component, Path},
    str::FromStr,
};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

impl FromStr for EntryKind {
    type Err = CreateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "file" => Ok(EntryKind::File),
            "folder" => Ok(EntryKind::Folder),
            other => Err(CreateError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryKind::File => "file",
            EntryKind::Folder => "folder",
        })
    }
}

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("Invalid type. Must be \"file\" or \"folder\".")]
    InvalidKind(String),
    #[error("Invalid name {0:?}. Must be a relative path inside the parent folder.")]
    InvalidName(String),
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Creates `parent/name` on disk.
///
/// Files are created empty and silently truncate whatever was there. Folders
/// fail when the target already exists or `parent` is missing. `name` must
/// stay below `parent`: absolute names and `..` are rejected.
pub fn create(parent: &Path, name: &str, kind: EntryKind) -> Result<(), CreateError> {
    if !is_contained(Path::new(name)) {
        return Err(CreateError::InvalidName(name.to_string()));
    }

    let target = parent.join(name);
    match kind {
        EntryKind::File => {
            fs::File::create(&target)?;
        }
        EntryKind::Folder => fs::create_dir(&target)?,
    }
    info!(path = %target.display(), %kind, "created node");
    Ok(())
}

fn is_contained(name: &Path) -> bool {
    let mut has_normal = false;
    for component in name.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => return false,
        }
    }
    has_normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::tree::TreeNode, scan::scan};
    use tempfile::tempdir;

    #[test]
    fn parses_only_known_kinds() {
        assert_eq!("file".parse::<EntryKind>().unwrap(), EntryKind::File);
        assert_eq!("folder".parse::<EntryKind>().unwrap(), EntryKind::Folder);

        let err = "directory".parse::<EntryKind>().unwrap_err();
        assert!(matches!(err, CreateError::InvalidKind(ref kind) if kind == "directory"));
        assert_eq!(err.to_string(), r#"Invalid type. Must be "file" or "folder"."#);
    }

    #[test]
    fn created_file_shows_up_in_scan() {
        let tmp = tempdir().unwrap();
        create(tmp.path(), "x.js", EntryKind::File).unwrap();

        let tree = scan(tmp.path()).unwrap().unwrap();

        assert!(tree.children().contains(&TreeNode::file("x.js")));
    }

    #[test]
    fn file_creation_truncates_existing_content() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("app.css");
        fs::write(&target, "body {}").unwrap();

        create(tmp.path(), "app.css", EntryKind::File).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "");
    }

    #[test]
    fn folder_creation_fails_when_name_exists() {
        let tmp = tempdir().unwrap();
        create(tmp.path(), "src", EntryKind::Folder).unwrap();
        let before = scan(tmp.path()).unwrap();

        let err = create(tmp.path(), "src", EntryKind::Folder).unwrap_err();

        assert!(matches!(err, CreateError::Io(ref source) if source.kind() == io::ErrorKind::AlreadyExists));
        assert_eq!(scan(tmp.path()).unwrap(), before);
    }

    #[test]
    fn names_escaping_the_parent_are_rejected() {
        let parent = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let victim = outside.path().join("victim.js");
        fs::write(&victim, "important").unwrap();

        let absolute = victim.to_string_lossy().into_owned();
        for name in [absolute.as_str(), "../victim.js", "", "."] {
            let err = create(parent.path(), name, EntryKind::File).unwrap_err();
            assert!(matches!(err, CreateError::InvalidName(ref rejected) if rejected == name));
        }

        assert_eq!(fs::read_to_string(&victim).unwrap(), "important");
        assert!(scan(parent.path()).unwrap().unwrap().children().is_empty());
    }

    #[test]
    fn nested_relative_names_stay_under_parent() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();

        create(tmp.path(), "./src/app.js", EntryKind::File).unwrap();

        assert!(tmp.path().join("src").join("app.js").is_file());
    }

    #[test]
    fn folder_creation_fails_without_parent() {
        let tmp = tempdir().unwrap();
        let err = create(&tmp.path().join("missing"), "src", EntryKind::Folder).unwrap_err();
        assert!(matches!(err, CreateError::Io(ref source) if source.kind() == io::ErrorKind::NotFound));
    }
}
