use crate::coords::Color;
use crate::error::{ensure_positive, ensure_unit, StageError};

/// Lighting model a mesh material is shaded with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShadingModel {
    /// Unlit; `color` only.
    Basic,
    /// Diffuse only.
    Lambert,
    /// Diffuse plus Blinn-Phong specular (`specular`, `shininess`).
    Phong,
    /// Roughness/metalness approximation.
    Standard,
    /// `Standard` plus a clear-coat specular layer.
    Physical,
}

/// Which triangle faces are drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Surface material for triangle meshes.
///
/// Construct with one of the model constructors, adjust fields with the `with_*`
/// helpers, then call [`build`](Self::build) to validate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshMaterial {
    pub model: ShadingModel,
    pub color: Color,
    pub emissive: Color,
    pub specular: Color,
    pub shininess: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub flat_shading: bool,
    pub wireframe: bool,
    pub transparent: bool,
    pub opacity: f32,
    pub side: Side,
    pub depth_test: bool,
    pub depth_write: bool,
}

impl MeshMaterial {
    fn with_model(model: ShadingModel, color: Color) -> Self {
        Self {
            model,
            color,
            emissive: Color::black(),
            specular: Color::hex(0x111111),
            shininess: 30.0,
            roughness: 1.0,
            metalness: 0.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            flat_shading: false,
            wireframe: false,
            transparent: false,
            opacity: 1.0,
            side: Side::Front,
            depth_test: true,
            depth_write: true,
        }
    }

    pub fn basic(color: Color) -> Self {
        Self::with_model(ShadingModel::Basic, color)
    }

    pub fn lambert(color: Color) -> Self {
        Self::with_model(ShadingModel::Lambert, color)
    }

    pub fn phong(color: Color) -> Self {
        Self::with_model(ShadingModel::Phong, color)
    }

    pub fn standard(color: Color) -> Self {
        Self::with_model(ShadingModel::Standard, color)
    }

    pub fn physical(color: Color) -> Self {
        Self::with_model(ShadingModel::Physical, color)
    }

    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_specular(mut self, specular: Color, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    pub fn with_pbr(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    pub fn with_clearcoat(mut self, clearcoat: f32, roughness: f32) -> Self {
        self.clearcoat = clearcoat;
        self.clearcoat_roughness = roughness;
        self
    }

    pub fn with_flat_shading(mut self, flat: bool) -> Self {
        self.flat_shading = flat;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    /// Enables blending at the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Validates ranges and returns the material unchanged.
    pub fn build(self) -> Result<Self, StageError> {
        if !(self.color.is_finite() && self.emissive.is_finite() && self.specular.is_finite()) {
            return Err(StageError::invalid("color", "non-finite channel"));
        }
        ensure_unit("opacity", self.opacity)?;
        ensure_unit("roughness", self.roughness)?;
        ensure_unit("metalness", self.metalness)?;
        ensure_unit("clearcoat", self.clearcoat)?;
        ensure_unit("clearcoat_roughness", self.clearcoat_roughness)?;
        ensure_positive("shininess", self.shininess)?;
        Ok(self)
    }

    /// Effective alpha written by the fragment stage.
    pub fn alpha(&self) -> f32 {
        if self.transparent { self.opacity } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        for m in [
            MeshMaterial::basic(Color::white()),
            MeshMaterial::lambert(Color::white()),
            MeshMaterial::phong(Color::white()),
            MeshMaterial::standard(Color::white()),
            MeshMaterial::physical(Color::white()),
        ] {
            assert!(m.build().is_ok(), "{:?}", m.model);
        }
    }

    #[test]
    fn opacity_out_of_range_is_rejected() {
        let err = MeshMaterial::lambert(Color::white()).with_opacity(1.5).build().unwrap_err();
        assert!(matches!(err, StageError::InvalidParameter { name: "opacity", .. }));
    }

    #[test]
    fn pbr_ranges_are_checked() {
        assert!(MeshMaterial::standard(Color::white()).with_pbr(0.25, 1.0).build().is_ok());
        assert!(MeshMaterial::standard(Color::white()).with_pbr(-0.1, 1.0).build().is_err());
        assert!(MeshMaterial::physical(Color::white()).with_clearcoat(2.0, 0.0).build().is_err());
    }

    #[test]
    fn opaque_material_ignores_opacity() {
        let mut m = MeshMaterial::basic(Color::white());
        m.opacity = 0.2;
        assert_eq!(m.alpha(), 1.0);
        assert_eq!(m.with_opacity(0.5).alpha(), 0.5);
    }
}
