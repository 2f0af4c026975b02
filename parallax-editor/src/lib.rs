/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Interaction engine for one rendered card: pointer tilt with per-frame
//! coalescing, shift-drag panning, resize tracking, and the declarative
//! reset paths. All handlers run on the host's single logical thread.

use std::rc::Rc;

use parallax_core::{Align, CardConfig, CardState, Vec2, host::Notifier};
use parallax_render::builder::{BuiltCard, CardParts, make_badge, px, translate};
use parallax_render::{NodeId, Tree};
use tracing::debug;

pub mod collect;
pub mod settings;

pub use collect::collect;
pub use settings::{SettingChange, SettingsPanel};

/// Pan offset clamp, pixels per axis.
pub const PAN_LIMIT: f64 = 2000.0;

/// One pending visual apply at a time; the host calls back into
/// [`ParallaxCard::on_frame`] on its next animation frame.
pub trait FrameScheduler {
    fn request_frame(&mut self);

    /// Called on teardown so a still-pending callback can be dropped.
    fn cancel_frame(&mut self) {}
}

/// Guard for the host's resize observation of the resizer box; cancelled
/// exactly once when the card is torn down.
pub trait ResizeWatch {
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    last: Vec2,
}

/// A mounted card: the element tree, the live visual state, and the original
/// declared configuration captured at build time for the reset paths.
pub struct ParallaxCard {
    pub(crate) tree: Tree,
    pub(crate) root: NodeId,
    pub(crate) parts: CardParts,
    pub(crate) state: CardState,
    /// Build-time snapshot; double-click reset restores these values even
    /// after settings edits.
    pub(crate) declared: CardConfig,
    /// Live-edited copy; the settings panel writes badge/offset/align intent
    /// here and `collect` carries its non-visual fields over.
    pub(crate) live: CardConfig,
    pub(crate) notifier: Rc<dyn Notifier>,
    origin: Vec2,
    drag: Option<DragGesture>,
    frame_pending: bool,
    scheduler: Box<dyn FrameScheduler>,
    resize_watch: Option<Box<dyn ResizeWatch>>,
    disposed: bool,
}

impl std::fmt::Debug for ParallaxCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallaxCard")
            .field("root", &self.root)
            .field("state", &self.state)
            .field("origin", &self.origin)
            .field("drag", &self.drag)
            .field("frame_pending", &self.frame_pending)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl ParallaxCard {
    pub fn new(
        config: CardConfig,
        built: BuiltCard,
        scheduler: Box<dyn FrameScheduler>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let mut card = Self {
            tree: built.tree,
            root: built.root,
            parts: built.parts,
            state: built.state,
            declared: config.clone(),
            live: config,
            notifier,
            origin: Vec2::ZERO,
            drag: None,
            frame_pending: false,
            scheduler,
            resize_watch: None,
            disposed: false,
        };
        card.apply();
        card
    }

    /// Client position of the stage box, used to derive the pointer's
    /// normalized offset from the card center.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Hands over the host's resize-observation subscription.
    pub fn watch_resize(&mut self, watch: Box<dyn ResizeWatch>) {
        self.resize_watch = Some(watch);
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn parts(&self) -> &CardParts {
        &self.parts
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn declared(&self) -> &CardConfig {
        &self.declared
    }

    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn disposed(&self) -> bool {
        self.disposed
    }

    /// Pointer enter/move over the card. Smoothing advances once per event;
    /// gloss and layer shifts are written synchronously, while the card
    /// transform write is coalesced to at most one per animation frame.
    pub fn pointer_move(&mut self, p: Vec2) {
        if self.disposed || self.drag.is_some() {
            return;
        }
        let w = self.state.size.x;
        let h = self.state.size.y;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let center = Vec2::new(
            self.origin.x + self.state.pan.x + w / 2.0,
            self.origin.y + self.state.pan.y + h / 2.0,
        );
        let nx = (p.x - center.x) / (w / 2.0);
        let ny = (p.y - center.y) / (h / 2.0);

        let max = self.state.intensity;
        self.state.rot_y += (nx * max - self.state.rot_y) * self.state.follow;
        self.state.rot_x += (-ny * max - self.state.rot_x) * self.state.follow;

        let gloss = self.tree.node_mut(self.parts.gloss);
        gloss.set_style("--gx", format!("{:.1}%", nx * 35.0 + 50.0));
        gloss.set_style("--gy", format!("{:.1}%", ny * 35.0 + 50.0));

        for layer in &self.parts.layers {
            let d = layer.depth;
            self.tree.node_mut(layer.root).set_style(
                "transform",
                format!(
                    "translateZ({}px) translate({:.2}px, {:.2}px)",
                    d * 10.0,
                    flush_zero(-nx * d * 4.0),
                    flush_zero(ny * d * 4.0),
                ),
            );
        }

        if !self.frame_pending {
            self.frame_pending = true;
            self.scheduler.request_frame();
        }
    }

    /// Animation-frame callback: performs the coalesced card-transform write
    /// and clears the pending slot.
    pub fn on_frame(&mut self) {
        if self.disposed || !self.frame_pending {
            return;
        }
        self.apply();
        self.frame_pending = false;
    }

    /// Immediate relax: rotation and gloss snap back without waiting for a
    /// frame, so a fast exit never leaves the card stuck tilted. Depth
    /// elevation is retained.
    pub fn pointer_leave(&mut self) {
        if self.disposed {
            return;
        }
        self.state.rot_x = 0.0;
        self.state.rot_y = 0.0;
        self.apply();

        let gloss = self.tree.node_mut(self.parts.gloss);
        gloss.set_style("--gx", "50%");
        gloss.set_style("--gy", "50%");

        for layer in &self.parts.layers {
            self.tree
                .node_mut(layer.root)
                .set_style("transform", format!("translateZ({}px)", layer.depth * 10.0));
        }
    }

    /// Shift starts an exclusive panning gesture; without the modifier the
    /// event falls through to tilt tracking. The starting offset is read back
    /// from the wrapper's live translate value so independent settings edits
    /// are honored, soft-failing to the origin.
    pub fn pointer_down(&mut self, p: Vec2, modifiers: Modifiers) {
        if self.disposed || !modifiers.shift {
            return;
        }
        let transform = self
            .tree
            .node(self.parts.wrap)
            .style("transform")
            .unwrap_or("")
            .to_string();
        self.state.pan = parse_translate(&transform);
        self.drag = Some(DragGesture { last: p });
    }

    /// Document-level move while dragging; the gesture survives the pointer
    /// leaving the card bounds.
    pub fn drag_move(&mut self, p: Vec2) {
        if self.disposed {
            return;
        }
        let Some(gesture) = self.drag.as_mut() else {
            return;
        };
        let dx = p.x - gesture.last.x;
        let dy = p.y - gesture.last.y;
        gesture.last = p;
        let pan = Vec2::new(
            (self.state.pan.x + dx).clamp(-PAN_LIMIT, PAN_LIMIT),
            (self.state.pan.y + dy).clamp(-PAN_LIMIT, PAN_LIMIT),
        );
        self.set_pan(pan);
    }

    /// One-shot end of the drag gesture.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Same reset as the controls-strip Reset button, plus a user-visible
    /// confirmation. Idempotent.
    pub fn double_click(&mut self) {
        if self.disposed {
            return;
        }
        self.reset();
        self.notifier.notify("Parallax reset.");
    }

    /// Silent full reset to the configuration declared at build time; the
    /// host wires the controls-strip Reset button to this.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        let declared = self.declared.clone();
        self.state.rot_x = 0.0;
        self.state.rot_y = 0.0;
        self.state.scale = declared.scale;
        self.set_box_size(declared.width, declared.height);
        self.set_align(declared.align);
        self.set_pan(Vec2::new(declared.offset_x, declared.offset_y));
        self.apply();
    }

    /// Resize-observation callback for the resizer box: keeps the exposed
    /// custom properties and the live size in step with a manual resize.
    pub fn resized(&mut self, width: f64, height: f64) {
        if self.disposed {
            return;
        }
        let w = width.round();
        let h = height.round();
        let card = self.tree.node_mut(self.parts.card);
        card.set_style("--pt-card-w", px(w));
        card.set_style("--pt-card-h", px(h));
        self.state.size = Vec2::new(w, h);
    }

    /// Detaches the card from its host: cancels any pending frame and the
    /// resize subscription. Every handler is inert afterwards.
    pub fn teardown(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.drag = None;
        if self.frame_pending {
            self.frame_pending = false;
            self.scheduler.cancel_frame();
        }
        if let Some(mut watch) = self.resize_watch.take() {
            watch.cancel();
        }
    }

    pub(crate) fn apply(&mut self) {
        let transform = format!(
            "scale({}) rotateX({}deg) rotateY({}deg)",
            self.state.scale, self.state.rot_x, self.state.rot_y
        );
        self.tree
            .node_mut(self.parts.card)
            .set_style("transform", transform);
    }

    pub(crate) fn set_pan(&mut self, pan: Vec2) {
        self.state.pan = pan;
        self.tree
            .node_mut(self.parts.wrap)
            .set_style("transform", translate(pan.x, pan.y));
    }

    pub(crate) fn set_align(&mut self, align: Align) {
        let stage = self.tree.node_mut(self.parts.stage);
        stage.remove_class("left");
        stage.remove_class("center");
        stage.remove_class("right");
        stage.add_class(align.class());
        self.state.align = align;
    }

    pub(crate) fn set_box_width(&mut self, width: f64) {
        self.tree
            .node_mut(self.parts.resizer)
            .set_style("width", px(width));
        self.tree
            .node_mut(self.parts.card)
            .set_style("--pt-card-w", px(width));
        self.state.size.x = width;
    }

    pub(crate) fn set_box_height(&mut self, height: f64) {
        self.tree
            .node_mut(self.parts.resizer)
            .set_style("height", px(height));
        self.tree
            .node_mut(self.parts.card)
            .set_style("--pt-card-h", px(height));
        self.state.size.y = height;
    }

    pub(crate) fn set_box_size(&mut self, width: f64, height: f64) {
        self.set_box_width(width);
        self.set_box_height(height);
    }

    pub(crate) fn set_badge(&mut self, text: Option<String>) {
        self.live.badge = text.clone();
        match text {
            Some(text) => {
                if let Some(badge) = self.parts.badge {
                    let span = self.tree.node(badge).children[0];
                    self.tree.node_mut(span).set_text(text);
                } else {
                    let badge = make_badge(&mut self.tree, self.parts.card, &text);
                    self.parts.badge = Some(badge);
                }
            }
            None => {
                if let Some(badge) = self.parts.badge.take() {
                    self.tree.detach(self.parts.card, badge);
                }
            }
        }
    }
}

/// Recovers `(x, y)` from a `translate(Xpx, Ypx)` value previously written by
/// this engine. Failure means a cosmetic bug, not data loss, so it defaults
/// to the origin and leaves a diagnostic.
pub fn parse_translate(transform: &str) -> Vec2 {
    match try_parse_translate(transform) {
        Some(pan) => pan,
        None => {
            debug!(transform, "unparseable translate value, defaulting to (0, 0)");
            Vec2::ZERO
        }
    }
}

fn try_parse_translate(transform: &str) -> Option<Vec2> {
    let start = transform.find("translate(")? + "translate(".len();
    let end = start + transform[start..].find(')')?;
    let mut parts = transform[start..end].splitn(2, ',');
    let x = parse_px(parts.next()?)?;
    let y = parse_px(parts.next()?)?;
    Some(Vec2::new(x, y))
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

/// IEEE negative zero prints as "-0.00"; the original never emits it.
fn flush_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
