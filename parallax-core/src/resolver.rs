/*
    Parallax Thumbs - interactive parallax thumbnail cards
    Copyright (C) 2026 veyl

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use tracing::warn;

use crate::host::Vault;

/// Resolves an image reference to a displayable address.
///
/// Explicit URLs pass through unchanged. Anything else is treated as a
/// vault-relative file path and mapped to the host's resource-serving
/// address. A miss or an internal lookup failure falls back to the original
/// reference; the image may simply fail to load, which is an acceptable
/// degraded state rather than an error.
pub fn resolve_source(vault: &dyn Vault, src: &str) -> String {
    if is_external(src) {
        return src.to_string();
    }
    match vault.resource_url(src) {
        Ok(Some(url)) => url,
        Ok(None) => src.to_string(),
        Err(err) => {
            warn!(src, %err, "vault lookup failed, keeping original reference");
            src.to_string()
        }
    }
}

fn is_external(src: &str) -> bool {
    starts_with_ignore_case(src, "http:")
        || starts_with_ignore_case(src, "https:")
        || starts_with_ignore_case(src, "app://")
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    // Byte-wise compare: a &str slice would panic when a multi-byte
    // character straddles the prefix length.
    value.len() >= prefix.len()
        && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
