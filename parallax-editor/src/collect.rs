/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use parallax_core::{Align, CardConfig};

use crate::{ParallaxCard, parse_translate};

/// Reads the card's current visual state back into a configuration.
///
/// Geometry comes from the live state and the wrapper's translate value,
/// alignment from the stage class. Layers, badge, intensity and follow are
/// carried over from the live configuration, so settings edits survive the
/// round trip.
pub fn collect(card: &ParallaxCard) -> CardConfig {
    let mut config = card.live.clone();
    config.width = card.state.size.x.round();
    config.height = card.state.size.y.round();
    config.scale = card.state.scale;

    let transform = card
        .tree
        .node(card.parts.wrap)
        .style("transform")
        .unwrap_or("");
    let pan = parse_translate(transform);
    config.offset_x = pan.x;
    config.offset_y = pan.y;

    let stage = card.tree.node(card.parts.stage);
    config.align = if stage.has_class("center") {
        Align::Center
    } else if stage.has_class("right") {
        Align::Right
    } else {
        Align::Left
    };
    config
}
