//! Before/after views of a plan: a flat diff list and a directory tree.
//!
//! Both are derived from the operation list on demand and never feed back
//! into it.

use std::path::{Component, Path};

use colored::Colorize;

use crate::rename_engine::RenameOperation;

pub const EMPTY_PLAN_NOTICE: &str = "No files or folders need renaming.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewNode {
    pub old_name: String,
    pub new_name: String,
    pub is_dir: bool,
    pub children: Vec<PreviewNode>,
}

impl PreviewNode {
    fn new(name: &str) -> Self {
        Self {
            old_name: name.to_string(),
            new_name: name.to_string(),
            is_dir: false,
            children: Vec::new(),
        }
    }

    pub fn is_renamed(&self) -> bool {
        self.old_name != self.new_name
    }

    fn child_mut(&mut self, name: &str) -> &mut Self {
        let index = match self.children.iter().position(|child| child.old_name == name) {
            Some(index) => index,
            None => {
                self.children.push(Self::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    fn sort(&mut self) {
        self.children.sort_by(|a, b| a.old_name.cmp(&b.old_name));
        for child in &mut self.children {
            child.sort();
        }
    }
}

/// Group operations by shared path prefix under `root`.
///
/// Leaves without an extension are taken to be directories.
pub fn build_tree(root: &Path, operations: &[RenameOperation]) -> PreviewNode {
    let root_name = root
        .file_name()
        .map_or_else(|| root.to_string_lossy(), |name| name.to_string_lossy());
    let mut tree = PreviewNode::new(&root_name);
    tree.is_dir = true;

    for operation in operations {
        let parts = relative_parts(root, &operation.old_path);
        let Some((last, parents)) = parts.split_last() else {
            continue;
        };

        let mut node = &mut tree;
        for part in parents {
            node = node.child_mut(part);
            node.is_dir = true;
        }

        let leaf = node.child_mut(last);
        leaf.new_name = operation.new_name();
        if leaf.children.is_empty() {
            leaf.is_dir = Path::new(last).extension().is_none();
        } else {
            leaf.is_dir = true;
        }
    }

    tree.sort();
    tree
}

fn relative_parts(root: &Path, path: &Path) -> Vec<String> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// One rendered row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub prefix: String,
    pub old_name: String,
    /// Set only when the entry is renamed.
    pub new_name: Option<String>,
    pub is_dir: bool,
}

pub fn render_tree(tree: &PreviewNode) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    lines.push(tree_line(tree, String::new()));
    push_children(tree, "", &mut lines);
    lines
}

fn push_children(node: &PreviewNode, indent: &str, lines: &mut Vec<TreeLine>) {
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let is_last = index + 1 == count;
        let branch = if is_last { "└── " } else { "├── " };
        lines.push(tree_line(child, format!("{indent}{branch}")));

        let child_indent = format!("{indent}{}", if is_last { "    " } else { "│   " });
        push_children(child, &child_indent, lines);
    }
}

fn tree_line(node: &PreviewNode, prefix: String) -> TreeLine {
    TreeLine {
        prefix,
        old_name: node.old_name.clone(),
        new_name: node.is_renamed().then(|| node.new_name.clone()),
        is_dir: node.is_dir,
    }
}

/// `(old, new)` display pairs relative to `root`.
pub fn render_flat(root: &Path, operations: &[RenameOperation]) -> Vec<(String, String)> {
    operations
        .iter()
        .map(|operation| {
            (
                display_relative(root, &operation.old_path),
                display_relative(root, &operation.new_path),
            )
        })
        .collect()
}

// A plan of only no-ops has nothing to show or confirm either.
pub fn empty_plan_notice(operations: &[RenameOperation]) -> Option<&'static str> {
    operations
        .iter()
        .all(RenameOperation::is_noop)
        .then_some(EMPTY_PLAN_NOTICE)
}

fn display_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

pub fn print_tree(tree: &PreviewNode) {
    for line in render_tree(tree) {
        let old_name = if line.is_dir {
            line.old_name.bold()
        } else {
            line.old_name.normal()
        };
        match line.new_name {
            Some(new_name) => println!(
                "{}{} {}",
                line.prefix,
                old_name.red().strikethrough(),
                new_name.green()
            ),
            None => println!("{}{old_name}", line.prefix),
        }
    }
}

pub fn print_flat(root: &Path, operations: &[RenameOperation]) {
    for (old, new) in render_flat(root, operations) {
        println!("{}", old.red());
        println!("{}", new.green());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn sample_plan(root: &Path) -> Vec<RenameOperation> {
        let season = root.join("Season 1");
        vec![
            RenameOperation::new(season.join("b.mkv"), season.join("Foo_S01_E02.mkv")),
            RenameOperation::new(season.join("a.mkv"), season.join("Foo_S01_E01.mkv")),
            RenameOperation::new(
                season.join("subs").join("a.srt"),
                season.join("subs").join("Foo_S01_E01.srt"),
            ),
            RenameOperation::new(season, root.join("Foo_S01")),
        ]
    }

    #[test]
    fn test_tree_groups_by_shared_prefix() {
        let root = PathBuf::from("/media/Foo");
        let tree = build_tree(&root, &sample_plan(&root));

        assert_eq!(tree.old_name, "Foo");
        assert!(!tree.is_renamed());
        assert_eq!(tree.children.len(), 1);

        let season = &tree.children[0];
        assert_eq!(season.old_name, "Season 1");
        assert_eq!(season.new_name, "Foo_S01");
        assert!(season.is_dir);

        let names: Vec<_> = season.children.iter().map(|c| c.old_name.as_str()).collect();
        assert_eq!(names, vec!["a.mkv", "b.mkv", "subs"]);

        let subs = &season.children[2];
        assert!(subs.is_dir);
        assert!(!subs.is_renamed());
        assert_eq!(subs.children[0].new_name, "Foo_S01_E01.srt");
        assert!(!subs.children[0].is_dir);
    }

    #[test]
    fn test_render_tree_prefixes() {
        let root = PathBuf::from("/media/Foo");
        let lines = render_tree(&build_tree(&root, &sample_plan(&root)));

        let prefixes: Vec<_> = lines.iter().map(|l| l.prefix.as_str()).collect();
        assert_eq!(
            prefixes,
            vec!["", "└── ", "    ├── ", "    ├── ", "    └── ", "        └── "]
        );
        assert_eq!(lines[1].new_name.as_deref(), Some("Foo_S01"));
        assert_eq!(lines[4].new_name, None);
    }

    #[test]
    fn test_tree_rebuilds_identically() {
        let root = PathBuf::from("/media/Foo");
        let plan = sample_plan(&root);
        assert_eq!(build_tree(&root, &plan), build_tree(&root, &plan));
    }

    #[test]
    fn test_empty_plan_notice() {
        let root = PathBuf::from("/media/Foo");
        let unchanged = root.join("Foo_S01");

        assert_eq!(empty_plan_notice(&[]), Some(EMPTY_PLAN_NOTICE));
        assert_eq!(
            empty_plan_notice(&[RenameOperation::new(&unchanged, &unchanged)]),
            Some(EMPTY_PLAN_NOTICE)
        );
        assert_eq!(empty_plan_notice(&sample_plan(&root)), None);
    }

    #[test]
    fn test_flat_render_is_relative_to_root() {
        let root = PathBuf::from("/media/Foo");
        let flat = render_flat(&root, &sample_plan(&root));

        assert_eq!(flat.len(), 4);
        assert_eq!(flat[3], ("Season 1".to_string(), "Foo_S01".to_string()));
    }
}
