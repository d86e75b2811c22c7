use glam::Vec3;

use crate::assets::AssetSource;
use crate::camera::PerspectiveCamera;
use crate::coords::Color;
use crate::error::StageError;
use crate::geometry::{text, TextParams};
use crate::scene::Scene;
use crate::stage::{BuildFuture, SceneBuilder, DEFAULT_FAR, DEFAULT_FOV, DEFAULT_NEAR};

use super::cube::add_outlined;

/// Font path used when none is configured, relative to the asset root.
pub const DEFAULT_FONT: &str = "fonts/text.ttf";

/// Extruded "GIS" lettering, centered, with its edges overlaid.
///
/// The font is fetched through the stage's [`AssetSource`]; a missing or
/// unreadable font fails with [`StageError::AssetLoadFailed`] and leaves the
/// scene without text.
#[derive(Debug, Clone)]
pub struct TextScene {
    pub font_path: String,
    pub content: String,
    pub params: TextParams,
}

impl Default for TextScene {
    fn default() -> Self {
        Self::new(DEFAULT_FONT)
    }
}

impl TextScene {
    pub fn new(font_path: impl Into<String>) -> Self {
        Self {
            font_path: font_path.into(),
            content: "GIS".to_owned(),
            params: TextParams { size: 9.0, depth: 1.8, resolution: 32 },
        }
    }
}

impl SceneBuilder for TextScene {
    fn name(&self) -> &'static str {
        "text"
    }

    fn camera(&self, aspect: f32) -> Result<PerspectiveCamera, StageError> {
        Ok(PerspectiveCamera::new(DEFAULT_FOV, aspect, DEFAULT_NEAR, DEFAULT_FAR)?
            .with_position(Vec3::new(-15.0, 0.0, 15.0)))
    }

    fn setup_model<'a>(&'a mut self, scene: &'a mut Scene, assets: &'a dyn AssetSource) -> BuildFuture<'a> {
        Box::pin(async move {
            let bytes = assets.load(&self.font_path).await?;
            let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
                .map_err(|e| StageError::asset(self.font_path.as_str(), e))?;

            let mut geometry = text(&font, &self.content, self.params)?;
            geometry.center();
            add_outlined(scene, geometry, Color::hex(0x515151), "text")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;

    #[test]
    fn missing_font_is_asset_error() {
        let mut scene = Scene::new();
        let result = pollster::block_on(TextScene::new("fonts/nope.ttf").setup_model(&mut scene, &MemoryAssets::new()));
        match result {
            Err(StageError::AssetLoadFailed { path, .. }) => assert_eq!(path, "fonts/nope.ttf"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn garbage_font_is_asset_error() {
        let mut assets = MemoryAssets::new();
        assets.insert(DEFAULT_FONT, b"not a font".to_vec());
        let mut scene = Scene::new();
        let result = pollster::block_on(TextScene::default().setup_model(&mut scene, &assets));
        assert!(matches!(result, Err(StageError::AssetLoadFailed { .. })));
    }

    #[test]
    fn camera_sits_off_axis() {
        let camera = TextScene::default().camera(1.0).unwrap();
        assert_eq!(camera.position, Vec3::new(-15.0, 0.0, 15.0));
    }
}
