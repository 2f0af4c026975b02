/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use parallax_core::CardConfig;

/// Fence tag identifying a card block in a Markdown document.
pub const BLOCK_TAG: &str = "parallax";

/// Renders a configuration as the fenced block persisted in the document.
/// The body round-trips through [`CardConfig::parse`].
pub fn format_block(config: &CardConfig) -> String {
    format!("```{BLOCK_TAG}\n{}\n```\n", config.serialize())
}

/// Line span of a rendered block within its source document, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub line_start: usize,
    pub line_end: usize,
}

/// Where a rendered block came from. The section is captured when the block
/// is processed and may be unknown, e.g. in an export preview.
#[derive(Debug, Clone)]
pub struct BlockContext {
    pub source_path: String,
    pub section: Option<SectionSpan>,
}
