use crate::types::RawBinding;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, warn};

/// A binding table read from a keymap file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keymap {
    pub name: Option<String>,
    pub bindings: Vec<RawBinding>,
}

pub fn load_keymap<P: AsRef<Path>>(path: P) -> Result<Keymap> {
    let path = path.as_ref();
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read keymap {}", path.display()))?;
    let text = decode_keymap_bytes(&raw);
    let keymap = parse_keymap(text.as_ref());
    info!(
        "Loaded keymap {:?} with {} bindings from {}",
        keymap.name.as_deref().unwrap_or("(unnamed)"),
        keymap.bindings.len(),
        path.display()
    );
    Ok(keymap)
}

fn decode_keymap_bytes(raw: &[u8]) -> Cow<'_, str> {
    // 1. BOM
    if let Some((enc, bom_len)) = encoding_rs::Encoding::for_bom(raw) {
        debug!("Decoded using BOM: {}", enc.name());
        let (cow, _, had_errors) = enc.decode(&raw[bom_len..]);
        if had_errors {
            warn!("Decode had errors (replacement characters used)");
        }
        return cow;
    }

    // 2. UTF-8
    match std::str::from_utf8(raw) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            // 3. Shift_JIS fallback
            debug!("UTF-8 decode failed, falling back to Shift_JIS");
            let (cow, _, had_errors) = encoding_rs::SHIFT_JIS.decode(raw);
            if had_errors {
                warn!("Shift_JIS decode had errors");
            }
            cow
        }
    }
}

/// Parses `combination = action` lines.
///
/// Blank lines and `;`/`#` comments are skipped. A `;` comment before the
/// first binding names the keymap. Malformed lines are logged and skipped.
pub fn parse_keymap(content: &str) -> Keymap {
    let mut keymap = Keymap::default();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix(';') {
            if keymap.name.is_none() && keymap.bindings.is_empty() {
                let name = comment.trim();
                if !name.is_empty() {
                    keymap.name = Some(name.to_string());
                }
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let Some((combination, action)) = line.split_once('=') else {
            warn!("Keymap line {}: missing '=': {}", line_no + 1, line);
            continue;
        };
        let combination = combination.trim();
        let action = action.trim();
        if combination.is_empty() || action.is_empty() {
            warn!("Keymap line {}: empty combination or action", line_no + 1);
            continue;
        }

        keymap.bindings.push(RawBinding::new(combination, action));
    }

    keymap
}
