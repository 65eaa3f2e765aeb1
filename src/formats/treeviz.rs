//! Treeviz formatter for parse trees

use crate::resolver::{ParseTree, TreeNode};

/// Render the tree as an indented unicode outline, root line first.
pub fn to_treeviz_str(tree: &ParseTree) -> String {
    let root = tree.root();
    let mut result = format!("{}\n", render_node(root));
    let count = root.children.len();
    for (position, &child) in root.children.iter().enumerate() {
        append_node(&mut result, tree, child, "", position == count - 1);
    }
    result
}

fn render_node(node: &TreeNode) -> String {
    format!("{} [{},{})", node.label, node.start, node.end)
}

fn append_node(result: &mut String, tree: &ParseTree, index: usize, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let node = tree.node(index);
    result.push_str(&format!("{}{} {}\n", prefix, connector, render_node(node)));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = node.children.len();
    for (position, &child) in node.children.iter().enumerate() {
        append_node(result, tree, child, &child_prefix, position == count - 1);
    }
}
