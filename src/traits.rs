//! Declaration of traits reused across the code.

use crate::walk::WalkError;

/// Implementation of the LayoutDisplay trait.
/// It is used to display the on-disk region layout of a volume.
pub trait LayoutDisplay {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error>;
}

/// A directory entry that survived a backend's filtering, classified as
/// either a directory to descend into or a regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry<D, F> {
    Dir { name: String, dir: D },
    File { name: String, file: F },
}

impl<D, F> WalkEntry<D, F> {
    pub fn name(&self) -> &str {
        match self {
            WalkEntry::Dir { name, .. } | WalkEntry::File { name, .. } => name,
        }
    }
}

/// Directory iteration shared by every supported filesystem.
///
/// A backend decodes one directory at a time into a finite list of
/// [`WalkEntry`] values; the consumers in [`crate::walk`] build trees and
/// search files on top of it without knowing the on-disk format.
pub trait DirWalk {
    /// Locator of a directory (inode number, first cluster, ...).
    type Dir;
    /// Locator of a regular file's content.
    type File;
    type Error: From<WalkError>;

    /// Returns the locator of the root directory.
    fn root(&self) -> Self::Dir;

    /// Decodes the entries of `dir` in on-disk order.
    ///
    /// The list never contains self/parent links or entries that are neither
    /// a directory nor a regular file. Calling it again restarts from the
    /// first entry.
    fn read_dir(&mut self, dir: &Self::Dir)
    -> Result<Vec<WalkEntry<Self::Dir, Self::File>>, Self::Error>;

    /// Reads the content of a regular file.
    fn read_file(&mut self, file: &Self::File) -> Result<Vec<u8>, Self::Error>;

    /// Whether an entry called `name` satisfies a lookup for `query`.
    fn name_matches(&self, name: &str, query: &str) -> bool {
        name == query
    }
}
