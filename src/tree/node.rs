//! Arena-backed entry tree shared by directory indexes and diff results
//!
//! Entry names are kept as raw `OsString`s, so names that only differ in
//! bytes that are not valid UTF-8 stay distinct. Lossy conversion happens only
//! when a path is rendered for display.

use crate::error::CompareError;
use crate::tree::path;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path};

/// Handle to an entry inside an [`EntryTree`].
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

/// Node kind, fixed when the node is created.
#[derive(Debug, Clone)]
pub enum EntryKind<L> {
    /// A directory and its children, ordered by raw name
    Directory { children: BTreeMap<OsString, EntryId> },
    /// A non-directory object with a per-tree payload
    Leaf(L),
}

/// A single filesystem object in the tree
#[derive(Debug, Clone)]
pub struct Entry<L> {
    name: OsString,
    parent: Option<EntryId>,
    kind: EntryKind<L>,
}

impl<L> Entry<L> {
    /// Raw path segment of this entry (empty for the root)
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Name for display; invalid UTF-8 is replaced
    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    /// Parent handle, used only for path reconstruction
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn kind(&self) -> &EntryKind<L> {
        &self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, EntryKind::Leaf(_))
    }

    /// Leaf payload, `None` for directories
    pub fn payload(&self) -> Option<&L> {
        match &self.kind {
            EntryKind::Leaf(payload) => Some(payload),
            EntryKind::Directory { .. } => None,
        }
    }
}

/// Tree of named entries stored in a flat arena.
///
/// Children are owned by their directory through the arena; the parent link is
/// a plain index so there is no ownership cycle.
#[derive(Debug, Clone)]
pub struct EntryTree<L> {
    nodes: Vec<Entry<L>>,
    leaf_count: usize,
}

impl<L> Default for EntryTree<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> EntryTree<L> {
    /// Create a tree holding only an empty root directory
    pub fn new() -> Self {
        Self {
            nodes: vec![Entry {
                name: OsString::new(),
                parent: None,
                kind: EntryKind::Directory {
                    children: BTreeMap::new(),
                },
            }],
            leaf_count: 0,
        }
    }

    pub fn root(&self) -> EntryId {
        EntryId(0)
    }

    /// Get an entry by id.
    ///
    /// Panics if the id was issued by a different tree.
    pub fn get(&self, id: EntryId) -> &Entry<L> {
        &self.nodes[id.0]
    }

    /// Total number of entries, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Look up a direct child by raw name
    pub fn child(&self, id: EntryId, name: impl AsRef<OsStr>) -> Option<EntryId> {
        match &self.get(id).kind {
            EntryKind::Directory { children } => children.get(name.as_ref()).copied(),
            EntryKind::Leaf(_) => None,
        }
    }

    /// Children of a directory ordered by name; empty for leaves
    pub fn children(&self, id: EntryId) -> impl Iterator<Item = EntryId> + '_ {
        let children = match &self.get(id).kind {
            EntryKind::Directory { children } => Some(children.values().copied()),
            EntryKind::Leaf(_) => None,
        };
        children.into_iter().flatten()
    }

    /// Child names of a directory for display, ordered
    pub fn names(&self, id: EntryId) -> Vec<Cow<'_, str>> {
        match &self.get(id).kind {
            EntryKind::Directory { children } => {
                children.keys().map(|name| name.to_string_lossy()).collect()
            }
            EntryKind::Leaf(_) => Vec::new(),
        }
    }

    /// Raw names from the root down to `id`, root excluded
    pub fn segments(&self, id: EntryId) -> Vec<&OsStr> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let entry = self.get(node);
            if entry.parent.is_some() {
                segments.push(entry.name.as_os_str());
            }
            current = entry.parent;
        }
        segments.reverse();
        segments
    }

    /// Root-relative, '/'-separated display path of an entry ("" for the root)
    pub fn path(&self, id: EntryId) -> String {
        self.segments(id)
            .iter()
            .map(|segment| segment.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Resolve a sequence of raw names from the root
    pub fn find<'s, I>(&self, segments: I) -> Option<EntryId>
    where
        I: IntoIterator<Item = &'s OsStr>,
    {
        segments
            .into_iter()
            .try_fold(self.root(), |node, segment| self.child(node, segment))
    }

    /// Resolve a '/'-separated relative path; empty segments are ignored
    pub fn entry_at(&self, relative_path: &str) -> Option<EntryId> {
        self.find(path::segments(relative_path).map(OsStr::new))
    }

    /// Resolve a host path relative to the root, keeping raw names
    pub fn entry_at_path(&self, relative: &Path) -> Option<EntryId> {
        self.find(relative.components().filter_map(|component| match component {
            Component::Normal(name) => Some(name),
            _ => None,
        }))
    }

    /// Number of leaves at or below `id`
    pub fn descendant_leaves(&self, id: EntryId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            match &self.get(node).kind {
                EntryKind::Leaf(_) => count += 1,
                EntryKind::Directory { children } => stack.extend(children.values().copied()),
            }
        }
        count
    }

    /// Get the directory `name` under `parent`, creating it if missing.
    ///
    /// Fails with `KindConflict` if a leaf already holds that name.
    pub fn ensure_directory(
        &mut self,
        parent: EntryId,
        name: impl AsRef<OsStr>,
    ) -> Result<EntryId, CompareError> {
        let name = name.as_ref();
        if let Some(existing) = self.child(parent, name) {
            return if self.get(existing).is_dir() {
                Ok(existing)
            } else {
                Err(CompareError::KindConflict(self.path(existing)))
            };
        }
        self.attach(
            parent,
            name,
            EntryKind::Directory {
                children: BTreeMap::new(),
            },
        )
    }

    /// Create every directory along `segments` and return the last one
    pub fn ensure_directories<'s, I>(&mut self, segments: I) -> Result<EntryId, CompareError>
    where
        I: IntoIterator<Item = &'s OsStr>,
    {
        let mut current = self.root();
        for segment in segments {
            current = self.ensure_directory(current, segment)?;
        }
        Ok(current)
    }

    /// Insert a new leaf under `parent`.
    ///
    /// Fails with `DuplicateEntry` if the name is already taken.
    pub fn insert_leaf(
        &mut self,
        parent: EntryId,
        name: impl AsRef<OsStr>,
        payload: L,
    ) -> Result<EntryId, CompareError> {
        let name = name.as_ref();
        if self.child(parent, name).is_some() {
            return Err(CompareError::DuplicateEntry(path::join(
                &self.path(parent),
                &name.to_string_lossy(),
            )));
        }
        let id = self.attach(parent, name, EntryKind::Leaf(payload))?;
        self.leaf_count += 1;
        Ok(id)
    }

    /// Insert a leaf at the end of `segments`, creating missing ancestors
    pub fn insert_leaf_at_segments(
        &mut self,
        segments: &[&OsStr],
        payload: L,
    ) -> Result<EntryId, CompareError> {
        match segments.split_last() {
            Some((name, ancestors)) => {
                let parent = self.ensure_directories(ancestors.iter().copied())?;
                self.insert_leaf(parent, name, payload)
            }
            None => Err(CompareError::DuplicateEntry(String::new())),
        }
    }

    /// Insert a leaf at a '/'-separated path, creating missing ancestors
    pub fn insert_leaf_at(&mut self, relative_path: &str, payload: L) -> Result<EntryId, CompareError> {
        let segments: Vec<&OsStr> = path::segments(relative_path).map(OsStr::new).collect();
        self.insert_leaf_at_segments(&segments, payload)
    }

    fn attach(&mut self, parent: EntryId, name: &OsStr, kind: EntryKind<L>) -> Result<EntryId, CompareError> {
        debug_assert!(
            !name.is_empty() && !name.to_string_lossy().contains('/'),
            "invalid segment {name:?}"
        );
        if !self.get(parent).is_dir() {
            return Err(CompareError::KindConflict(self.path(parent)));
        }
        let id = EntryId(self.nodes.len());
        if let EntryKind::Directory { children } = &mut self.nodes[parent.0].kind {
            children.insert(name.to_os_string(), id);
        }
        self.nodes.push(Entry {
            name: name.to_os_string(),
            parent: Some(parent),
            kind,
        });
        Ok(id)
    }
}
