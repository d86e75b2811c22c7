//! Sample scenes.
//!
//! Each builder only picks parameters for the built-in shapes. [`by_name`]
//! resolves the identifiers accepted on the command line.

mod cube;
mod lines;
mod materials;
mod solar;
mod text;

pub use cube::{CubeScene, TorusKnotScene, WireframeBoxScene};
pub use lines::{DashedLineScene, HeartScene, SinCurveScene};
pub use materials::{MaterialsScene, ParticlesScene};
pub use solar::SolarSystemScene;
pub use text::{TextScene, DEFAULT_FONT};

use crate::error::StageError;
use crate::stage::SceneBuilder;

/// Every name [`by_name`] accepts.
pub const NAMES: &[&str] = &[
    "cube",
    "wireframe-box",
    "sin-curve",
    "heart",
    "text",
    "solar-system",
    "materials",
    "dashed-line",
    "particles",
    "torus-knot",
];

/// Options forwarded to builders that load assets.
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    pub font_path: String,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self { font_path: DEFAULT_FONT.to_owned() }
    }
}

pub fn by_name(name: &str, options: &BuilderOptions) -> Result<Box<dyn SceneBuilder>, StageError> {
    let builder: Box<dyn SceneBuilder> = match name {
        "cube" => Box::new(CubeScene::new()),
        "wireframe-box" => Box::new(WireframeBoxScene),
        "sin-curve" => Box::new(SinCurveScene::default()),
        "heart" => Box::new(HeartScene::default()),
        "text" => Box::new(TextScene::new(options.font_path.clone())),
        "solar-system" => Box::new(SolarSystemScene::new()),
        "materials" => Box::new(MaterialsScene::default()),
        "dashed-line" => Box::new(DashedLineScene),
        "particles" => Box::new(ParticlesScene::default()),
        "torus-knot" => Box::new(TorusKnotScene::default()),
        other => {
            return Err(StageError::invalid(
                "scene",
                format!("unknown scene `{other}`, expected one of: {}", NAMES.join(", ")),
            ));
        }
    };
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves_to_itself() {
        let options = BuilderOptions::default();
        for name in NAMES {
            let builder = by_name(name, &options).unwrap();
            assert_eq!(builder.name(), *name);
        }
    }

    #[test]
    fn unknown_name_is_invalid_parameter() {
        let err = by_name("teapot", &BuilderOptions::default()).err().unwrap();
        assert!(matches!(err, StageError::InvalidParameter { name: "scene", .. }));
    }

    #[test]
    fn only_cube_and_solar_system_disable_controls() {
        let options = BuilderOptions::default();
        let fixed: Vec<_> = NAMES
            .iter()
            .filter(|n| !by_name(n, &options).unwrap().orbit_controls())
            .copied()
            .collect();
        assert_eq!(fixed, vec!["cube", "solar-system"]);
    }
}
