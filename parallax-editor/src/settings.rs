/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Settings panel model: every control change is applied to the card
//! immediately, nothing is staged behind an OK button.

use parallax_core::{Align, Vec2, host::Clipboard};

use crate::{ParallaxCard, collect::collect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderLimits {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub const SCALE_LIMITS: SliderLimits = SliderLimits {
    min: 0.5,
    max: 2.0,
    step: 0.01,
};
pub const OFFSET_LIMITS: SliderLimits = SliderLimits {
    min: -300.0,
    max: 300.0,
    step: 1.0,
};
pub const WIDTH_LIMITS: SliderLimits = SliderLimits {
    min: 200.0,
    max: 1400.0,
    step: 1.0,
};
pub const HEIGHT_LIMITS: SliderLimits = SliderLimits {
    min: 120.0,
    max: 900.0,
    step: 1.0,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    Scale(f64),
    OffsetX(f64),
    OffsetY(f64),
    Align(Align),
    Width(f64),
    Height(f64),
    Badge(String),
}

/// Control values mirrored for the host's widgets. Opened from the live card
/// so a re-opened panel reflects drags and resizes that happened in between.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub align: Align,
    pub width: f64,
    pub height: f64,
    pub badge: String,
}

impl SettingsPanel {
    pub fn open(card: &ParallaxCard) -> Self {
        Self {
            scale: card.state.scale,
            offset_x: card.state.pan.x,
            offset_y: card.state.pan.y,
            align: card.state.align,
            width: card.state.size.x,
            height: card.state.size.y,
            badge: card.live.badge.clone().unwrap_or_default(),
        }
    }

    /// Applies one control change to the card and records it in the panel.
    pub fn apply(&mut self, card: &mut ParallaxCard, change: SettingChange) {
        match change {
            SettingChange::Scale(value) => {
                let value = SCALE_LIMITS.clamp(value);
                card.state.scale = value;
                card.apply();
                self.scale = value;
            }
            SettingChange::OffsetX(value) => {
                let value = OFFSET_LIMITS.clamp(value).round();
                card.live.offset_x = value;
                let pan = Vec2::new(value, card.state.pan.y);
                card.set_pan(pan);
                self.offset_x = value;
            }
            SettingChange::OffsetY(value) => {
                let value = OFFSET_LIMITS.clamp(value).round();
                card.live.offset_y = value;
                let pan = Vec2::new(card.state.pan.x, value);
                card.set_pan(pan);
                self.offset_y = value;
            }
            SettingChange::Align(align) => {
                card.set_align(align);
                card.live.align = align;
                self.align = align;
            }
            SettingChange::Width(value) => {
                let value = WIDTH_LIMITS.clamp(value).round();
                card.set_box_width(value);
                self.width = value;
            }
            SettingChange::Height(value) => {
                let value = HEIGHT_LIMITS.clamp(value).round();
                card.set_box_height(value);
                self.height = value;
            }
            SettingChange::Badge(text) => {
                let trimmed = text.trim();
                card.set_badge(if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                });
                self.badge = trimmed.to_string();
            }
        }
    }

    /// Panel reset. Deliberately not the same as double-click: scale and size
    /// return to the declared values, while offsets go to zero and alignment
    /// to center regardless of what was declared.
    pub fn reset(&mut self, card: &mut ParallaxCard) {
        let declared = card.declared.clone();

        card.state.scale = declared.scale;
        card.apply();
        self.scale = declared.scale;

        card.live.offset_x = 0.0;
        card.live.offset_y = 0.0;
        card.set_pan(Vec2::ZERO);
        self.offset_x = 0.0;
        self.offset_y = 0.0;

        card.set_align(Align::Center);
        card.live.align = Align::Center;
        self.align = Align::Center;

        card.set_box_size(declared.width, declared.height);
        self.width = declared.width;
        self.height = declared.height;

        card.notifier.notify("Reset applied.");
    }

    /// Serializes the current visual state back to a configuration and puts
    /// it on the clipboard.
    pub fn copy(&self, card: &ParallaxCard, clipboard: &mut dyn Clipboard) {
        let config = collect(card);
        clipboard.write_text(&config.serialize());
        card.notifier.notify("Copied updated JSON.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{mount, two_layer_config};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeClipboard(Rc<RefCell<Vec<String>>>);

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }
    }

    #[test]
    fn opens_with_the_live_card_values() {
        let mut fx = mount(two_layer_config());
        fx.card.resized(500.0, 260.0);
        let panel = SettingsPanel::open(&fx.card);
        assert_eq!(panel.width, 500.0);
        assert_eq!(panel.height, 260.0);
        assert_eq!(panel.scale, 1.0);
        assert_eq!(panel.align, Align::Left);
        assert_eq!(panel.badge, "");
    }

    #[test]
    fn scale_change_is_applied_immediately() {
        let mut fx = mount(two_layer_config());
        let mut panel = SettingsPanel::open(&fx.card);
        panel.apply(&mut fx.card, SettingChange::Scale(1.3));
        assert_eq!(fx.card.state.scale, 1.3);
        assert!(
            fx.card
                .tree
                .node(fx.card.parts.card)
                .style("transform")
                .unwrap()
                .starts_with("scale(1.3)")
        );
    }

    #[test]
    fn offset_changes_round_and_move_one_axis() {
        let mut fx = mount(two_layer_config());
        let mut panel = SettingsPanel::open(&fx.card);
        panel.apply(&mut fx.card, SettingChange::OffsetX(40.6));
        panel.apply(&mut fx.card, SettingChange::OffsetY(-12.2));
        assert_eq!(fx.card.state.pan, Vec2::new(41.0, -12.0));
        assert_eq!(
            fx.card.tree.node(fx.card.parts.wrap).style("transform"),
            Some("translate(41px, -12px)")
        );
        assert_eq!(fx.card.live.offset_x, 41.0);
        assert_eq!(fx.card.live.offset_y, -12.0);
    }

    #[test]
    fn values_are_held_to_the_slider_limits() {
        let mut fx = mount(two_layer_config());
        let mut panel = SettingsPanel::open(&fx.card);
        panel.apply(&mut fx.card, SettingChange::Scale(9.0));
        assert_eq!(fx.card.state.scale, SCALE_LIMITS.max);
        panel.apply(&mut fx.card, SettingChange::OffsetX(-5000.0));
        assert_eq!(fx.card.state.pan.x, OFFSET_LIMITS.min);
        panel.apply(&mut fx.card, SettingChange::Width(50.0));
        assert_eq!(fx.card.state.size.x, WIDTH_LIMITS.min);
    }

    #[test]
    fn align_change_swaps_the_stage_class() {
        let mut fx = mount(two_layer_config());
        let mut panel = SettingsPanel::open(&fx.card);
        panel.apply(&mut fx.card, SettingChange::Align(Align::Right));
        let stage = fx.card.tree.node(fx.card.parts.stage);
        assert!(stage.has_class("right"));
        assert!(!stage.has_class("left"));
        assert_eq!(fx.card.state.align, Align::Right);
    }

    #[test]
    fn badge_edits_add_update_and_remove() {
        let mut fx = mount(two_layer_config());
        let mut panel = SettingsPanel::open(&fx.card);
        assert!(fx.card.parts.badge.is_none());

        panel.apply(&mut fx.card, SettingChange::Badge("NEW".to_string()));
        let badge = fx.card.parts.badge.expect("badge created");
        let span = fx.card.tree.node(badge).children[0];
        assert_eq!(fx.card.tree.node(span).text.as_deref(), Some("NEW"));

        panel.apply(&mut fx.card, SettingChange::Badge("  HOT  ".to_string()));
        assert_eq!(fx.card.parts.badge, Some(badge));
        assert_eq!(fx.card.tree.node(span).text.as_deref(), Some("HOT"));

        panel.apply(&mut fx.card, SettingChange::Badge("   ".to_string()));
        assert!(fx.card.parts.badge.is_none());
        assert!(
            !fx.card
                .tree
                .node(fx.card.parts.card)
                .children
                .contains(&badge)
        );
    }

    #[test]
    fn panel_reset_differs_from_double_click() {
        let mut config = two_layer_config();
        config.offset_x = 80.0;
        config.align = Align::Right;
        config.scale = 1.4;
        let mut fx = mount(config);
        let mut panel = SettingsPanel::open(&fx.card);

        panel.apply(&mut fx.card, SettingChange::Scale(0.7));
        panel.apply(&mut fx.card, SettingChange::Width(900.0));
        panel.reset(&mut fx.card);

        // Scale and size come back from the declaration; offsets and
        // alignment are forced to zero/center even though the declaration
        // said otherwise.
        assert_eq!(fx.card.state.scale, 1.4);
        assert_eq!(fx.card.state.size, Vec2::new(320.0, 180.0));
        assert_eq!(fx.card.state.pan, Vec2::ZERO);
        assert_eq!(fx.card.state.align, Align::Center);
        assert_eq!(fx.notices.borrow().as_slice(), ["Reset applied."]);
    }

    #[test]
    fn copy_serializes_the_collected_state() {
        let mut fx = mount(two_layer_config());
        let mut panel = SettingsPanel::open(&fx.card);
        panel.apply(&mut fx.card, SettingChange::OffsetX(25.0));
        let texts = Rc::new(RefCell::new(Vec::new()));
        let mut clipboard = FakeClipboard(Rc::clone(&texts));
        panel.copy(&fx.card, &mut clipboard);

        let written = texts.borrow();
        assert_eq!(written.len(), 1);
        let round: parallax_core::CardConfig =
            parallax_core::CardConfig::parse(&written[0]).unwrap();
        assert_eq!(round.offset_x, 25.0);
        assert_eq!(round.layers.len(), 2);
        assert_eq!(
            fx.notices.borrow().last().map(String::as_str),
            Some("Copied updated JSON.")
        );
    }
}
