/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use parallax_core::{CardConfig, CardState, host::Vault, resolver::resolve_source};

use crate::{NodeId, Tag, Tree};

pub const HINT_TEXT: &str =
    "Tip: Shift+Drag to move • Drag corner to resize • Double-click viewer to reset";

/// One rendered layer: its positioned wrapper, the image inside it, and the
/// depth the interaction engine uses to compute its parallax shift.
#[derive(Debug, Clone)]
pub struct LayerPart {
    pub root: NodeId,
    pub img: NodeId,
    pub depth: f64,
}

/// The nodes the interaction engine and settings panel mutate after build.
#[derive(Debug, Clone)]
pub struct CardParts {
    pub controls: NodeId,
    pub settings_button: NodeId,
    pub reset_button: NodeId,
    pub stage: NodeId,
    pub resizer: NodeId,
    pub wrap: NodeId,
    pub card: NodeId,
    pub layers: Vec<LayerPart>,
    pub badge: Option<NodeId>,
    pub gloss: NodeId,
    pub edge: NodeId,
}

#[derive(Debug)]
pub struct BuiltCard {
    pub tree: Tree,
    pub root: NodeId,
    pub parts: CardParts,
    pub state: CardState,
}

/// Builds the visual hierarchy for a valid configuration:
/// controls strip, then stage → resizer → translate wrapper → card →
/// layers / badge / gloss / edge. Returns the tree together with the initial
/// live state seeded from the configuration.
pub fn build(config: &CardConfig, vault: &dyn Vault) -> BuiltCard {
    let mut tree = Tree::new();
    let root = tree.create(Tag::Div);

    // Controls live outside the 3D-transformed subtree.
    let controls = tree.create(Tag::Div);
    tree.node_mut(controls).add_class("parallax-controls");
    tree.append(root, controls);

    let settings_button = tree.create(Tag::Button);
    tree.node_mut(settings_button).set_text("Settings");
    tree.append(controls, settings_button);

    let reset_button = tree.create(Tag::Button);
    tree.node_mut(reset_button).set_text("Reset");
    tree.append(controls, reset_button);

    let hint = tree.create(Tag::Div);
    let hint_node = tree.node_mut(hint);
    hint_node.add_class("hint");
    hint_node.set_text(HINT_TEXT);
    tree.append(controls, hint);

    let stage = tree.create(Tag::Div);
    let stage_node = tree.node_mut(stage);
    stage_node.add_class("parallax-stage");
    stage_node.add_class(config.align.class());
    tree.append(root, stage);

    let resizer = tree.create(Tag::Div);
    let resizer_node = tree.node_mut(resizer);
    resizer_node.add_class("parallax-resizer");
    resizer_node.set_style("width", px(config.width));
    resizer_node.set_style("height", px(config.height));
    resizer_node.set_style("resize", "both");
    tree.append(stage, resizer);

    let wrap = tree.create(Tag::Div);
    let wrap_node = tree.node_mut(wrap);
    wrap_node.add_class("parallax-wrap");
    wrap_node.set_style("transform", translate(config.offset_x, config.offset_y));
    tree.append(resizer, wrap);

    let card = tree.create(Tag::Div);
    let card_node = tree.node_mut(card);
    card_node.add_class("parallax-card");
    card_node.set_style("--pt-card-w", px(config.width));
    card_node.set_style("--pt-card-h", px(config.height));
    card_node.set_attr("aria-label", "Parallax thumbnail");
    tree.append(wrap, card);

    let mut layers = Vec::with_capacity(config.layers.len());
    for spec in &config.layers {
        let layer = tree.create(Tag::Div);
        let layer_node = tree.node_mut(layer);
        layer_node.add_class("parallax-layer");
        layer_node.set_attr("data-depth", spec.depth.to_string());
        tree.append(card, layer);

        let img = tree.create(Tag::Img);
        let img_node = tree.node_mut(img);
        img_node.set_attr("src", resolve_source(vault, &spec.src));
        img_node.set_attr("alt", "parallax-layer");
        tree.append(layer, img);

        layers.push(LayerPart {
            root: layer,
            img,
            depth: spec.depth,
        });
    }

    let badge = config
        .badge
        .as_deref()
        .map(|text| make_badge(&mut tree, card, text));

    let gloss = tree.create(Tag::Div);
    tree.node_mut(gloss).add_class("parallax-gloss");
    tree.append(card, gloss);

    let edge = tree.create(Tag::Div);
    tree.node_mut(edge).add_class("parallax-edge");
    tree.append(card, edge);

    BuiltCard {
        tree,
        root,
        parts: CardParts {
            controls,
            settings_button,
            reset_button,
            stage,
            resizer,
            wrap,
            card,
            layers,
            badge,
            gloss,
            edge,
        },
        state: CardState::from_config(config),
    }
}

/// Inline placeholder for a block that failed validation: a lone `pre` with
/// the message, no card elements at all.
pub fn build_error(message: &str) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.create(Tag::Div);
    let pre = tree.create(Tag::Pre);
    tree.node_mut(pre).set_text(message);
    tree.append(root, pre);
    (tree, root)
}

/// Badge element: a classed div holding a single span of text. Also used by
/// the settings panel when a badge is added after build.
pub fn make_badge(tree: &mut Tree, card: NodeId, text: &str) -> NodeId {
    let badge = tree.create(Tag::Div);
    tree.node_mut(badge).add_class("parallax-badge");
    tree.append(card, badge);
    let span = tree.create(Tag::Span);
    tree.node_mut(span).set_text(text);
    tree.append(badge, span);
    badge
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

pub fn translate(x: f64, y: f64) -> String {
    format!("translate({x}px, {y}px)")
}
