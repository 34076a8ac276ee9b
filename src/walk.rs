//! Consumers of [`DirWalk`]: tree building and first-match file search.
//!
//! Both walks keep their pending work on an explicit stack instead of the
//! call stack, so a deeply nested or cyclic image is bounded by
//! [`MAX_DEPTH`] rather than by the thread's stack size.

use log::{debug, trace};
use thiserror::Error;

use crate::traits::{DirWalk, WalkEntry};
use crate::tree::Tree;

/// Maximum number of directory levels below the root that a walk descends.
pub const MAX_DEPTH: usize = 256;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WalkError {
    /// The walk went deeper than [`MAX_DEPTH`] levels.
    #[error("Directory hierarchy deeper than {0} levels")]
    TooDeep(usize),
}

/// Builds the full directory tree below the root of `fs`.
///
/// Every directory and regular file becomes a node; each node's children are
/// in on-disk order. The walk never stops early.
pub fn build_tree<W: DirWalk>(fs: &mut W) -> Result<Tree, W::Error> {
    let mut tree = Tree::new();
    let mut pending = vec![(fs.root(), tree.root(), 0usize)];

    while let Some((dir, node, depth)) = pending.pop() {
        if depth > MAX_DEPTH {
            return Err(WalkError::TooDeep(MAX_DEPTH).into());
        }

        let mut subdirs = Vec::new();
        for entry in fs.read_dir(&dir)? {
            match entry {
                WalkEntry::Dir { name, dir } => {
                    trace!("dir  {name} at depth {}", depth + 1);
                    let child = tree.add_child(node, name);
                    subdirs.push((dir, child, depth + 1));
                }
                WalkEntry::File { name, .. } => {
                    trace!("file {name} at depth {}", depth + 1);
                    tree.add_child(node, name);
                }
            }
        }
        pending.extend(subdirs.into_iter().rev());
    }

    debug!("Built a tree of {} nodes", tree.len());
    Ok(tree)
}

/// Searches `fs` depth-first, in pre-order and on-disk entry order, for a
/// regular file matching `query`, and returns the first one encountered.
pub fn find_file<W: DirWalk>(fs: &mut W, query: &str) -> Result<Option<W::File>, W::Error> {
    let root = fs.root();
    let mut stack = vec![fs.read_dir(&root)?.into_iter()];

    while let Some(entries) = stack.last_mut() {
        match entries.next() {
            None => {
                stack.pop();
            }
            Some(WalkEntry::File { name, file }) => {
                if fs.name_matches(&name, query) {
                    debug!("Found {query:?} at depth {}", stack.len());
                    return Ok(Some(file));
                }
            }
            Some(WalkEntry::Dir { dir, .. }) => {
                if stack.len() > MAX_DEPTH {
                    return Err(WalkError::TooDeep(MAX_DEPTH).into());
                }
                let children = fs.read_dir(&dir)?.into_iter();
                stack.push(children);
            }
        }
    }

    Ok(None)
}

/// Finds `query` and reads its content.
pub fn cat_file<W: DirWalk>(fs: &mut W, query: &str) -> Result<Option<Vec<u8>>, W::Error> {
    match find_file(fs, query)? {
        Some(file) => fs.read_file(&file).map(Some),
        None => Ok(None),
    }
}
