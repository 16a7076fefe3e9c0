//! HD number → Tycho-2 identifier table.
//!
//! One entry per line, `"<hd> <id1> <id2> <id3>"`. Blank lines and lines
//! starting with `#` are ignored. When an HD number appears twice the first
//! entry wins, matching a top-down read of the file.

use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::query::TycId;

#[derive(Debug, Clone, Default)]
pub struct HdMapping {
    map: HashMap<u32, TycId>,
}

impl HdMapping {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mapping = Self::parse(&text)?;
        info!("Loaded {} HD mappings from {:?}", mapping.len(), path);
        Ok(mapping)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (hd, id) = parse_line(line, line_num + 1)?;
            if map.contains_key(&hd) {
                debug!("Duplicate mapping for HD {} on line {}, keeping first", hd, line_num + 1);
                continue;
            }
            map.insert(hd, id);
        }
        Ok(Self { map })
    }

    pub fn get(&self, hd: u32) -> Option<&TycId> {
        self.map.get(&hd)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn parse_line(line: &str, line_num: usize) -> Result<(u32, TycId)> {
    let (hd, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| CatalogError::Format {
            line: line_num,
            reason: format!("expected \"<hd> <id1> <id2> <id3>\", got {:?}", line),
        })?;

    let hd: u32 = hd.parse().map_err(|e| CatalogError::Format {
        line: line_num,
        reason: format!("invalid HD number {:?}: {}", hd, e),
    })?;

    let id = rest.parse::<TycId>().map_err(|e| match e {
        CatalogError::InvalidId { reason } => CatalogError::Format {
            line: line_num,
            reason,
        },
        other => other,
    })?;

    Ok((hd, id))
}
