/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! DOM-like element tree for a rendered card. The builder constructs it, the
//! interaction engine mutates classes and styles on it, and the optional
//! `rsx` feature translates it into dioxus nodes for a web host.

use std::collections::BTreeMap;

pub mod builder;
#[cfg(feature = "rsx")]
pub mod rsx;

pub use builder::{BuiltCard, CardParts, LayerPart, build, build_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Img,
    Button,
    Span,
    Pre,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Img => "img",
            Tag::Button => "button",
            Tag::Span => "span",
            Tag::Pre => "pre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub tag: Tag,
    pub classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    pub fn set_style(&mut self, name: &str, value: impl Into<String>) {
        self.styles.insert(name.to_string(), value.into());
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    /// Inline-style text in `name: value;` form, custom properties included.
    pub fn style_string(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.styles {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("; ");
        }
        out.trim_end().to_string()
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

/// Arena of nodes; ids stay valid for the lifetime of the tree. Detached
/// nodes are simply unparented, never reused.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, tag: Tag) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    pub fn detach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.retain(|&c| c != child);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_a_set() {
        let mut tree = Tree::new();
        let id = tree.create(Tag::Div);
        let node = tree.node_mut(id);
        node.add_class("left");
        node.add_class("left");
        node.add_class("center");
        assert_eq!(node.class_string(), "left center");
        node.remove_class("left");
        assert!(!node.has_class("left"));
        assert!(node.has_class("center"));
    }

    #[test]
    fn style_string_includes_custom_properties() {
        let mut tree = Tree::new();
        let id = tree.create(Tag::Div);
        let node = tree.node_mut(id);
        node.set_style("--gx", "50%");
        node.set_style("width", "320px");
        assert_eq!(node.style_string(), "--gx: 50%; width: 320px;");
    }

    #[test]
    fn detach_removes_only_the_given_child() {
        let mut tree = Tree::new();
        let parent = tree.create(Tag::Div);
        let a = tree.create(Tag::Span);
        let b = tree.create(Tag::Span);
        tree.append(parent, a);
        tree.append(parent, b);
        tree.detach(parent, a);
        assert_eq!(tree.node(parent).children, vec![b]);
    }
}
