//! Forest rendering for the terminal

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::config::{RenderConfig, RenderStyle};
use crate::domain::{Forest, Node, NodeRef, Selection};

const EMPTY: &str = "(empty)";

/// Render `forest` with the selected node marked by a trailing `*`.
pub fn render(forest: &Forest, selection: Selection, config: &RenderConfig) -> String {
    if forest.is_empty() {
        return format!("{EMPTY}\n");
    }
    match config.style {
        RenderStyle::Tree => forest
            .roots()
            .iter()
            .map(|root| to_tree(root, selection, config.color).to_string())
            .join(""),
        RenderStyle::Indent => forest
            .iter()
            .map(|(depth, node)| {
                format!(
                    "{}{}\n",
                    " ".repeat(depth * config.indent),
                    label(node, selection, config.color)
                )
            })
            .join(""),
    }
}

fn to_tree(node: &NodeRef, selection: Selection, color: bool) -> Tree<String> {
    let leaves: Vec<_> = node
        .children()
        .iter()
        .map(|child| to_tree(child, selection, color))
        .collect();
    Tree::new(label(node, selection, color)).with_leaves(leaves)
}

fn label(node: &Node, selection: Selection, color: bool) -> String {
    let text = node.to_string();
    match (selection.is_selected(node.id()), color) {
        (false, _) => text,
        (true, false) => format!("{text} *"),
        (true, true) => format!("{} {}", text.green().bold(), "*".green()),
    }
}
