/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use dioxus::prelude::*;

use crate::{NodeId, Tag, Tree};

/// Translates a built card tree into dioxus nodes for a web host. The tree
/// stays the source of truth; re-render after the engine mutates it.
pub fn render_to_rsx(tree: &Tree, root: NodeId) -> Element {
    render_node(tree, root)
}

fn render_node(tree: &Tree, id: NodeId) -> Element {
    let node = tree.node(id);
    let class = node.class_string();
    let style = node.style_string();
    let text = node.text.clone().unwrap_or_default();
    let children = node.children.iter().map(|&child| render_node(tree, child));

    match node.tag {
        Tag::Img => {
            let src = node.attr("src").unwrap_or("").to_string();
            let alt = node.attr("alt").unwrap_or("").to_string();
            rsx! {
                img { class: "{class}", style: "{style}", src: "{src}", alt: "{alt}" }
            }
        }
        Tag::Button => rsx! {
            button { class: "{class}", style: "{style}", "{text}" }
        },
        Tag::Span => rsx! {
            span { class: "{class}", style: "{style}", "{text}" }
        },
        Tag::Pre => rsx! {
            pre { class: "{class}", style: "{style}", "{text}" }
        },
        Tag::Div => rsx! {
            div {
                class: "{class}",
                style: "{style}",
                "{text}"
                {children}
            }
        },
    }
}
