/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Host-side flows: turning a fenced block into a live card, writing an
//! edited card back into the document, and inserting a fresh block.

use std::rc::Rc;

use parallax_core::{Align, CardConfig, ConfigError, LayerSpec, host::{EditorSurface, HostError, Notifier, Vault}};
use parallax_editor::{FrameScheduler, ParallaxCard};
use parallax_render::{NodeId, Tree, build, build_error};
use thiserror::Error;
use tracing::{debug, warn};

pub mod block;

pub use block::{BLOCK_TAG, BlockContext, SectionSpan, format_block};

const INVALID_JSON_TEXT: &str = "parallax: invalid JSON. Provide a JSON config.";
const MISSING_LAYERS_TEXT: &str = "parallax: missing \"layers\" array.";

/// Turns the body of a fenced block into a mounted card. A body that fails
/// validation yields an inline placeholder tree instead, never a card and
/// never an interactive handler.
pub fn process_block(
    source: &str,
    vault: &dyn Vault,
    scheduler: Box<dyn FrameScheduler>,
    notifier: Rc<dyn Notifier>,
) -> Result<ParallaxCard, (Tree, NodeId)> {
    let config = match CardConfig::parse(source) {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "rejected parallax block");
            let message = match err {
                ConfigError::Parse(_) => INVALID_JSON_TEXT,
                ConfigError::MissingLayers | ConfigError::LayersNotAnArray => MISSING_LAYERS_TEXT,
            };
            return Err(build_error(message));
        }
    };
    debug!(layers = config.layers.len(), "mounting parallax card");
    let built = build(&config, vault);
    Ok(ParallaxCard::new(config, built, scheduler, notifier))
}

#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("section span of the original block is unknown")]
    MissingSection,
    #[error("no document is open for editing")]
    NoActiveDocument,
    #[error("active document is not the block's source document")]
    WrongDocument,
    #[error(transparent)]
    Editor(#[from] HostError),
}

/// Writes an edited configuration back over its original fenced block.
///
/// Refused, with a notification and no text mutation, unless the section span
/// is known and the block's source document is the one currently open.
pub fn replace_block(
    config: &CardConfig,
    ctx: &BlockContext,
    surface: &mut dyn EditorSurface,
    notifier: &dyn Notifier,
) -> Result<(), ReplaceError> {
    let Some(section) = ctx.section else {
        notifier.notify("Could not locate the original code block in the file.");
        return Err(ReplaceError::MissingSection);
    };
    let Some(active) = surface.active_document() else {
        notifier.notify("Open the note to replace the block.");
        return Err(ReplaceError::NoActiveDocument);
    };
    if active != ctx.source_path {
        notifier.notify("Open the source note to replace the block.");
        return Err(ReplaceError::WrongDocument);
    }
    if let Err(err) = surface.replace_lines(section.line_start, section.line_end, &format_block(config)) {
        notifier.notify("Replace failed (see console).");
        return Err(err.into());
    }
    notifier.notify("Replaced parallax code block.");
    Ok(())
}

#[derive(Debug, Error)]
pub enum InsertError {
    #[error("no document is open for editing")]
    NoActiveDocument,
    #[error(transparent)]
    Editor(#[from] HostError),
}

/// Depths assigned to inserted layers, front to back to front. Chosen so the
/// first two images recede and the next ones pop forward.
pub const INSERT_DEPTHS: [f64; 6] = [-2.0, -1.0, 1.0, 2.0, 3.0, -3.0];

/// Builds the configuration for a freshly inserted block from the images the
/// user picked. At most six layers are taken, each assigned the next depth
/// from the cycle.
pub fn insert_config(
    images: &[String],
    width: f64,
    height: f64,
    badge: Option<String>,
) -> CardConfig {
    let layers = images
        .iter()
        .take(INSERT_DEPTHS.len())
        .zip(INSERT_DEPTHS)
        .map(|(src, depth)| LayerSpec {
            src: src.clone(),
            depth,
        })
        .collect();
    CardConfig {
        width,
        height,
        badge,
        intensity: 16.0,
        follow: 0.12,
        align: Align::Center,
        layers,
        ..CardConfig::default()
    }
}

/// Inserts a new fenced block at the current selection.
pub fn insert_block(
    config: &CardConfig,
    surface: &mut dyn EditorSurface,
    notifier: &dyn Notifier,
) -> Result<(), InsertError> {
    if surface.active_document().is_none() {
        notifier.notify("Open a Markdown note to insert.");
        return Err(InsertError::NoActiveDocument);
    }
    surface.insert_at_cursor(&format_block(config))?;
    notifier.notify("Inserted parallax block.");
    Ok(())
}

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"];

/// Vault files the insert dialog offers, i.e. anything with an image
/// extension. The dialog notifies "No image files found in this vault." when
/// this comes back empty.
pub fn image_candidates(vault: &dyn Vault) -> Vec<String> {
    vault
        .files()
        .into_iter()
        .filter(|path| {
            path.rsplit_once('.')
                .is_some_and(|(_, ext)| {
                    IMAGE_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                })
        })
        .collect()
}
