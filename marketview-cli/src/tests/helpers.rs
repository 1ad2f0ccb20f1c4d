//! Test helpers for composing request files in a temporary workspace.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Temporary directory with a UTF-8 root path.
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write file");
}

/// A coffee-shop request with `count` competitors, three of them direct.
pub(super) fn request_json(count: usize, radius: u32) -> Value {
    let competitors: Vec<Value> = (0..count)
        .map(|index| {
            let kind = if index < 3 { "direct" } else { "adjacent" };
            json!({
                "name": format!("Cafe {index}"),
                "distance": 1.5,
                "rating": 4.2,
                "reviewCount": 120,
                "estimatedRevenue": 400_000.0,
                "type": kind,
                "tier": "midMarket",
            })
        })
        .collect();
    json!({
        "address": "500 Congress Ave, Austin, TX",
        "category": "coffee_shop",
        "radius": radius,
        "populationEstimate": 50_000.0,
        "competitors": competitors,
        "aiInsight": "A walkable downtown block with steady foot traffic.",
    })
}

pub(super) fn write_request(path: &Utf8Path, request: &Value) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
