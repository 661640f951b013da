//! Workspace file tree pane

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use botdeck_app::workspace::WorkspaceTree;
use botdeck_core::NodeType;

use crate::theme::{palette, styles};

/// Renders the flattened `(tree, expansion set, selection)` view.
///
/// Everything is derived from the model; the pane never inspects what a
/// previous frame drew.
pub struct FileTreePane<'a> {
    tree: &'a WorkspaceTree,
    loading: bool,
}

impl<'a> FileTreePane<'a> {
    pub fn new(tree: &'a WorkspaceTree, loading: bool) -> Self {
        Self { tree, loading }
    }
}

impl Widget for FileTreePane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.loading { "Files (…)" } else { "Files" };
        let block = styles::panel_block(title, true);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let rows = self.tree.visible_rows();
        if rows.is_empty() {
            let note = if self.loading {
                " loading tree"
            } else {
                " empty workspace"
            };
            buf.set_line(
                inner.x,
                inner.y,
                &Line::from(Span::styled(note, Style::default().fg(palette::TEXT_MUTED))),
                inner.width,
            );
            return;
        }

        let selected_index = self
            .tree
            .selection()
            .and_then(|s| rows.iter().position(|r| r.path == s.path));

        let visible = inner.height as usize;
        let offset = selected_index
            .map(|i| i.saturating_sub(visible.saturating_sub(1)))
            .unwrap_or(0);

        for (i, row) in rows.iter().skip(offset).take(visible).enumerate() {
            let marker = match row.node_type {
                NodeType::Directory if row.expanded => "▾ ",
                NodeType::Directory => "▸ ",
                NodeType::File => "  ",
            };
            let text = format!(" {}{}{}", "  ".repeat(row.depth), marker, row.name);
            let line = if Some(offset + i) == selected_index {
                Line::from(Span::styled(text, styles::selected_row()))
            } else {
                let color = match row.node_type {
                    NodeType::Directory => palette::ACCENT,
                    NodeType::File => palette::TEXT_PRIMARY,
                };
                Line::from(Span::styled(text, Style::default().fg(color)))
            };
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use botdeck_core::FileNode;

    fn tree() -> WorkspaceTree {
        let nodes: Vec<FileNode> = serde_json::from_value(serde_json::json!([
            {"path": "src", "name": "src", "type": "directory", "children": [
                {"path": "src/index.js", "name": "index.js", "type": "file"}
            ]},
            {"path": "package.json", "name": "package.json", "type": "file"}
        ]))
        .unwrap();
        let mut tree = WorkspaceTree::new();
        tree.set_tree(nodes);
        tree
    }

    #[test]
    fn test_collapsed_directory_hides_children() {
        let mut term = TestTerminal::new();
        let tree = tree();
        term.render_widget(FileTreePane::new(&tree, false), term.area());
        assert!(term.buffer_contains("▸ src"));
        assert!(!term.buffer_contains("index.js"));
        assert!(term.buffer_contains("package.json"));
    }

    #[test]
    fn test_expanded_directory_shows_children() {
        let mut term = TestTerminal::new();
        let mut tree = tree();
        tree.toggle("src");
        term.render_widget(FileTreePane::new(&tree, false), term.area());
        assert!(term.buffer_contains("▾ src"));
        assert!(term.buffer_contains("index.js"));
    }

    #[test]
    fn test_empty_tree_note() {
        let mut term = TestTerminal::new();
        let tree = WorkspaceTree::new();
        term.render_widget(FileTreePane::new(&tree, false), term.area());
        assert!(term.buffer_contains("empty workspace"));
    }

    #[test]
    fn test_loading_title() {
        let mut term = TestTerminal::new();
        let tree = WorkspaceTree::new();
        term.render_widget(FileTreePane::new(&tree, true), term.area());
        assert!(term.buffer_contains("Files (…)"));
        assert!(term.buffer_contains("loading tree"));
    }
}
