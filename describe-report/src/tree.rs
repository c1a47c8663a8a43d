// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconstructs the nesting of groups from flat assertion records.
//!
//! Each [`AssertionRecord`] only knows the names of its enclosing groups. [`GroupTree`] folds a
//! sequence of records into a forest of named groups, stored as an arena: nodes live in a single
//! `Vec` and refer to their children by [`GroupIndex`].
//!
//! # Ordering rules
//!
//! 1. **Tests** within a group keep the order in which they were inserted.
//! 2. **Sibling groups** are ordered by first appearance. Inserting into an existing group never
//!    moves it.
//! 3. **The root group**, which holds tests declared outside of any group, is a top-level sibling
//!    like any other and is also ordered by first appearance. It is never given a heading.

use crate::{AssertionRecord, TestStatus, serialize::serialize_forest};
use indexmap::{IndexMap, map::Entry};
use std::{fmt, ops::Index};

/// The display name of the group holding tests declared outside of any group.
pub const ROOT_GROUP_NAME: &str = "(root)";

/// The index of a node within a [`GroupTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIndex(usize);

impl GroupIndex {
    /// Returns the position of the node in the arena.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// The name of a group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupName {
    /// The implicit group holding tests declared outside of any group.
    ///
    /// This group only ever appears at the top level of a tree.
    Root,

    /// A group declared by the test file.
    Named(String),
}

impl GroupName {
    /// Returns the declared name, or `None` for the root group.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            GroupName::Root => None,
            GroupName::Named(name) => Some(name),
        }
    }

    /// Returns true if this is the root group.
    pub fn is_root(&self) -> bool {
        matches!(self, GroupName::Root)
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupName::Root => f.write_str(ROOT_GROUP_NAME),
            GroupName::Named(name) => f.write_str(name),
        }
    }
}

/// A test that belongs directly to a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestLeaf {
    /// The name of the test.
    pub title: String,

    /// The outcome of the test.
    pub status: TestStatus,
}

impl TestLeaf {
    /// Creates a new `TestLeaf`.
    pub fn new(title: impl Into<String>, status: TestStatus) -> Self {
        Self {
            title: title.into(),
            status,
        }
    }
}

/// A named group within a [`GroupTree`].
#[derive(Clone, Debug)]
pub struct GroupNode {
    name: GroupName,
    tests: Vec<TestLeaf>,
    // Child names are unique among siblings; IndexMap keeps first-insertion order.
    children: IndexMap<String, GroupIndex>,
}

impl GroupNode {
    fn new(name: GroupName) -> Self {
        Self {
            name,
            tests: vec![],
            children: IndexMap::new(),
        }
    }

    /// Returns the name of this group.
    pub fn name(&self) -> &GroupName {
        &self.name
    }

    /// Returns the tests that belong directly to this group, in insertion order.
    pub fn tests(&self) -> &[TestLeaf] {
        &self.tests
    }

    /// Returns the child groups of this group, in first-seen order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = GroupIndex> + '_ {
        self.children.values().copied()
    }

    /// Looks up a direct child group by name.
    pub fn child(&self, name: &str) -> Option<GroupIndex> {
        self.children.get(name).copied()
    }
}

/// A forest of groups built from flat assertion records.
///
/// For more, see the [module-level documentation](self).
#[derive(Clone, Debug, Default)]
pub struct GroupTree {
    nodes: Vec<GroupNode>,
    top_level: IndexMap<GroupName, GroupIndex>,
}

impl GroupTree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree by inserting each assertion in order.
    pub fn from_assertions<'a>(assertions: impl IntoIterator<Item = &'a AssertionRecord>) -> Self {
        let mut tree = Self::new();
        for assertion in assertions {
            tree.insert(assertion);
        }
        tree
    }

    /// Inserts a single assertion, creating any groups along its path that don't exist yet.
    ///
    /// Returns the index of the group the test was added to.
    pub fn insert(&mut self, assertion: &AssertionRecord) -> GroupIndex {
        self.insert_test(
            assertion.ancestor_titles.as_slice(),
            TestLeaf::new(assertion.title.clone(), assertion.status.clone()),
        )
    }

    /// Appends `test` to the group at `ancestor_titles`, outermost first.
    ///
    /// An empty path refers to the root group.
    pub fn insert_test<S: AsRef<str>>(
        &mut self,
        ancestor_titles: &[S],
        test: TestLeaf,
    ) -> GroupIndex {
        let target = match ancestor_titles.split_first() {
            None => self.top_level_or_insert(GroupName::Root),
            Some((first, rest)) => {
                let top = self.top_level_or_insert(GroupName::Named(first.as_ref().to_owned()));
                self.descend_or_insert(top, rest)
            }
        };
        self.nodes[target.0].tests.push(test);
        target
    }

    fn top_level_or_insert(&mut self, name: GroupName) -> GroupIndex {
        let nodes = &mut self.nodes;
        match self.top_level.entry(name) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = push_node(nodes, entry.key().clone());
                entry.insert(index);
                index
            }
        }
    }

    fn descend_or_insert<S: AsRef<str>>(
        &mut self,
        parent: GroupIndex,
        remaining: &[S],
    ) -> GroupIndex {
        let Some((name, rest)) = remaining.split_first() else {
            return parent;
        };
        let name = name.as_ref();

        let child = match self.nodes[parent.0].child(name) {
            Some(child) => child,
            None => {
                let child = push_node(&mut self.nodes, GroupName::Named(name.to_owned()));
                self.nodes[parent.0].children.insert(name.to_owned(), child);
                child
            }
        };
        self.descend_or_insert(child, rest)
    }

    /// Returns the top-level groups, in first-seen order.
    pub fn top_level(&self) -> impl ExactSizeIterator<Item = GroupIndex> + '_ {
        self.top_level.values().copied()
    }

    /// Returns the group at `index`, if it exists.
    pub fn get(&self, index: GroupIndex) -> Option<&GroupNode> {
        self.nodes.get(index.0)
    }

    /// Looks up a group by its path of names, outermost first.
    ///
    /// An empty path refers to the root group, which only exists once a test without ancestors has
    /// been inserted.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<GroupIndex> {
        let Some((first, rest)) = path.split_first() else {
            return self.top_level.get(&GroupName::Root).copied();
        };
        let mut current = *self
            .top_level
            .get(&GroupName::Named(first.as_ref().to_owned()))?;
        for name in rest {
            current = self.nodes[current.0].child(name.as_ref())?;
        }
        Some(current)
    }

    /// Returns the total number of groups in the tree, including the root group if present.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been inserted into the tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders the tree as indented Markdown text, starting at `depth`.
    ///
    /// Each level of depth is indented by two spaces.
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        serialize_forest(self, self.top_level(), depth, &mut out);
        out
    }
}

impl Index<GroupIndex> for GroupTree {
    type Output = GroupNode;

    fn index(&self, index: GroupIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}

fn push_node(nodes: &mut Vec<GroupNode>, name: GroupName) -> GroupIndex {
    let index = GroupIndex(nodes.len());
    nodes.push(GroupNode::new(name));
    index
}
