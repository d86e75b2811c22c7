//! Asynchronous asset loading.
//!
//! Scene builders request raw bytes by path; decoding stays with the caller.
//! Every failure is reported as `StageError::AssetLoadFailed` carrying the path.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::StageError;

/// Future returned by [`AssetSource::load`].
pub type AssetFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, StageError>> + 'a>>;

/// Where scene builders fetch asset bytes from.
pub trait AssetSource {
    fn load<'a>(&'a self, path: &'a str) -> AssetFuture<'a>;
}

/// Loads assets from the filesystem, relative to `root`.
#[derive(Debug, Clone)]
pub struct FileAssets {
    root: PathBuf,
}

impl FileAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileAssets {
    fn load<'a>(&'a self, path: &'a str) -> AssetFuture<'a> {
        Box::pin(async move {
            let full = self.root.join(path);
            log::debug!("loading asset {}", full.display());
            std::fs::read(&full).map_err(|e| StageError::asset(path, e))
        })
    }
}

/// In-memory asset table, for embedded data and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.entries.insert(path.into(), bytes.into());
        self
    }
}

impl AssetSource for MemoryAssets {
    fn load<'a>(&'a self, path: &'a str) -> AssetFuture<'a> {
        Box::pin(async move {
            self.entries
                .get(path)
                .cloned()
                .ok_or_else(|| StageError::asset(path, "not found"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_assets_round_trip() {
        let mut assets = MemoryAssets::new();
        assets.insert("fonts/a.ttf", vec![1u8, 2, 3]);
        let bytes = pollster::block_on(assets.load("fonts/a.ttf")).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn missing_memory_asset_fails_with_path() {
        let assets = MemoryAssets::new();
        match pollster::block_on(assets.load("nope.ttf")) {
            Err(StageError::AssetLoadFailed { path, .. }) => assert_eq!(path, "nope.ttf"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_file_fails() {
        let assets = FileAssets::new(std::env::temp_dir());
        let result = pollster::block_on(assets.load("vista-definitely-missing.bin"));
        assert!(matches!(result, Err(StageError::AssetLoadFailed { .. })));
    }
}
