//! Expand/collapse and selection state for the workspace file tree
//!
//! The tree itself is replaced wholesale on every fetch; expansion and
//! selection live beside it keyed by path, so a refetch never collapses
//! what the user had open. Rendering derives everything from
//! `(tree, expansion set, selection)`; it never inspects previously
//! drawn output, which is what keeps overlapping refreshes from
//! drifting.

use std::collections::HashSet;

use botdeck_core::{FileNode, NodeType};

/// The single active selection (files and directories share one slot)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: String,
    pub node_type: NodeType,
}

impl Selection {
    /// Only files can be opened or downloaded
    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }
}

/// One flattened row of the visible tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub path: String,
    pub name: String,
    pub node_type: NodeType,
    pub depth: usize,
    pub expanded: bool,
}

/// File tree state independent of render identity
#[derive(Debug, Clone, Default)]
pub struct WorkspaceTree {
    nodes: Vec<FileNode>,
    expanded: HashSet<String>,
    selection: Option<Selection>,
    loaded: bool,
}

impl WorkspaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached tree wholesale. Expansion entries for paths
    /// that no longer exist are harmless; they are simply never
    /// consulted until the path reappears.
    pub fn set_tree(&mut self, nodes: Vec<FileNode>) {
        self.nodes = nodes;
        self.loaded = true;
        if let Some(selection) = &self.selection {
            if !self.contains(&selection.path) {
                self.selection = None;
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    /// Flip expansion membership for `path`; returns whether the path is
    /// now expanded. Double-toggle is the identity.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_string());
            true
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Set the single active selection
    pub fn select(&mut self, path: impl Into<String>, node_type: NodeType) {
        self.selection = Some(Selection {
            path: path.into(),
            node_type,
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Whether `path` exists anywhere in the current tree
    pub fn contains(&self, path: &str) -> bool {
        fn walk(nodes: &[FileNode], path: &str) -> bool {
            nodes
                .iter()
                .any(|n| n.path == path || walk(&n.children, path))
        }
        walk(&self.nodes, path)
    }

    /// Flatten `(tree, expansion set)` into the rows the renderer draws.
    /// Children of collapsed directories are skipped entirely.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.flatten_into(&self.nodes, 0, &mut rows);
        rows
    }

    fn flatten_into(&self, nodes: &[FileNode], depth: usize, rows: &mut Vec<TreeRow>) {
        for node in nodes {
            let expanded = node.is_dir() && self.is_expanded(&node.path);
            rows.push(TreeRow {
                path: node.path.clone(),
                name: node.name.clone(),
                node_type: node.node_type,
                depth,
                expanded,
            });
            if expanded {
                self.flatten_into(&node.children, depth + 1, rows);
            }
        }
    }

    /// Move the selection up/down the visible rows; returns the newly
    /// selected row, if any.
    pub fn move_selection(&mut self, delta: isize) -> Option<TreeRow> {
        let rows = self.visible_rows();
        if rows.is_empty() {
            self.selection = None;
            return None;
        }
        let current = self
            .selection
            .as_ref()
            .and_then(|s| rows.iter().position(|r| r.path == s.path));
        let next = match current {
            Some(index) => index
                .saturating_add_signed(delta)
                .min(rows.len().saturating_sub(1)),
            None => 0,
        };
        let row = rows[next].clone();
        self.selection = Some(Selection {
            path: row.path.clone(),
            node_type: row.node_type,
        });
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> FileNode {
        FileNode {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            node_type: NodeType::File,
            children: Vec::new(),
        }
    }

    fn dir(path: &str, children: Vec<FileNode>) -> FileNode {
        FileNode {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            node_type: NodeType::Directory,
            children,
        }
    }

    fn sample_tree() -> Vec<FileNode> {
        vec![
            dir(
                "src",
                vec![file("src/index.js"), dir("src/lib", vec![file("src/lib/util.js")])],
            ),
            file("package.json"),
        ]
    }

    #[test]
    fn test_toggle_is_involutive() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());

        assert!(!tree.is_expanded("src"));
        assert!(tree.toggle("src"));
        assert!(tree.is_expanded("src"));
        assert!(!tree.toggle("src"));
        assert!(!tree.is_expanded("src"));
    }

    #[test]
    fn test_collapsed_directories_hide_children() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());

        let rows = tree.visible_rows();
        assert_eq!(
            rows.iter().map(|r| r.path.as_str()).collect::<Vec<_>>(),
            vec!["src", "package.json"]
        );

        tree.toggle("src");
        let rows = tree.visible_rows();
        assert_eq!(
            rows.iter().map(|r| r.path.as_str()).collect::<Vec<_>>(),
            vec!["src", "src/index.js", "src/lib", "package.json"]
        );

        tree.toggle("src/lib");
        let rows = tree.visible_rows();
        assert!(rows.iter().any(|r| r.path == "src/lib/util.js"));
    }

    #[test]
    fn test_depth_tracks_nesting() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());
        tree.toggle("src");
        tree.toggle("src/lib");

        let rows = tree.visible_rows();
        let util = rows.iter().find(|r| r.path == "src/lib/util.js").unwrap();
        assert_eq!(util.depth, 2);
    }

    #[test]
    fn test_refetch_preserves_expansion() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());
        tree.toggle("src");

        // Backend adds a file; the tree is replaced wholesale
        let mut refreshed = sample_tree();
        refreshed.push(file("README.md"));
        tree.set_tree(refreshed);

        assert!(tree.is_expanded("src"), "expansion survives refetch");
        assert!(tree.visible_rows().iter().any(|r| r.path == "src/index.js"));
    }

    #[test]
    fn test_stale_expansion_entries_are_harmless() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());
        tree.toggle("src");
        tree.toggle("src/lib");

        // The directory vanishes server-side
        tree.set_tree(vec![file("package.json")]);
        let rows = tree.visible_rows();
        assert_eq!(rows.len(), 1);

        // ...and comes back: the old expansion applies again
        tree.set_tree(sample_tree());
        assert!(tree.is_expanded("src"));
        assert!(tree.visible_rows().iter().any(|r| r.path == "src/lib"));
    }

    #[test]
    fn test_selection_single_slot() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());

        tree.select("src", NodeType::Directory);
        assert!(!tree.selection().unwrap().is_file());

        tree.select("package.json", NodeType::File);
        let selection = tree.selection().unwrap();
        assert!(selection.is_file());
        assert_eq!(selection.path, "package.json");
    }

    #[test]
    fn test_selection_cleared_when_path_vanishes() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());
        tree.select("package.json", NodeType::File);

        tree.set_tree(vec![file("other.json")]);
        assert!(tree.selection().is_none());
    }

    #[test]
    fn test_move_selection_walks_visible_rows() {
        let mut tree = WorkspaceTree::new();
        tree.set_tree(sample_tree());
        tree.toggle("src");

        let row = tree.move_selection(1).unwrap();
        assert_eq!(row.path, "src");
        let row = tree.move_selection(1).unwrap();
        assert_eq!(row.path, "src/index.js");
        let row = tree.move_selection(-1).unwrap();
        assert_eq!(row.path, "src");

        // Clamped at the ends
        let row = tree.move_selection(-5).unwrap();
        assert_eq!(row.path, "src");
        let row = tree.move_selection(99).unwrap();
        assert_eq!(row.path, "package.json");
    }
}
