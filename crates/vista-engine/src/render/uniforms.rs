//! CPU-side layouts of the shader uniforms.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};

use crate::camera::PerspectiveCamera;
use crate::material::{LineMaterial, LineStyle, MeshMaterial, PointsMaterial, ShadingModel};
use crate::scene::Scene;

// Must match the MODEL_* constants in scene.wgsl.
const MODEL_BASIC: f32 = 0.0;
const MODEL_LAMBERT: f32 = 1.0;
const MODEL_PHONG: f32 = 2.0;
const MODEL_STANDARD: f32 = 3.0;
const MODEL_PHYSICAL: f32 = 4.0;

/// Group 0: per-frame camera and light.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// xyz: unit vector toward the light, w: intensity.
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    /// Physical width, physical height, pixel ratio, unused.
    pub viewport: [f32; 4],
}

impl FrameUniform {
    pub fn new(scene: &Scene, camera: &PerspectiveCamera, physical: (u32, u32), pixel_ratio: f32) -> Self {
        let (light_dir, light_color) = match scene.primary_light() {
            Some((light, travel)) => {
                let l = -travel;
                ([l.x, l.y, l.z, light.intensity], light.color.to_array())
            }
            None => ([0.0, 0.0, 1.0, 0.0], [0.0; 4]),
        };

        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).into(),
            light_dir,
            light_color,
            viewport: [physical.0.max(1) as f32, physical.1.max(1) as f32, pixel_ratio, 0.0],
        }
    }
}

/// Group 1: per-draw transform and material, bound with a dynamic offset.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct DrawUniform {
    pub model: [[f32; 4]; 4],
    /// mat3 columns padded to vec4.
    pub normal_matrix: [[f32; 4]; 3],
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    /// rgb, shininess.
    pub specular: [f32; 4],
    /// Model id, roughness, metalness, flat shading.
    pub shading: [f32; 4],
    /// Clearcoat, clearcoat roughness, point size, size attenuation.
    pub extra: [f32; 4],
    /// Dash size, gap size, scale, dashed.
    pub dash: [f32; 4],
}

impl DrawUniform {
    fn with_model(model: Mat4) -> Self {
        let n = Mat3::from_mat4(model).inverse().transpose();
        let n = if n.is_finite() { n } else { Mat3::IDENTITY };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: [
                n.x_axis.extend(0.0).into(),
                n.y_axis.extend(0.0).into(),
                n.z_axis.extend(0.0).into(),
            ],
            ..Self::zeroed()
        }
    }

    pub fn mesh(model: Mat4, material: &MeshMaterial) -> Self {
        let mut u = Self::with_model(model);
        u.color = material.color.with_alpha(material.alpha()).to_array();
        u.emissive = material.emissive.to_array();
        u.specular = [material.specular.r, material.specular.g, material.specular.b, material.shininess];
        // Wireframe overlays draw as unlit lines.
        let id = if material.wireframe { MODEL_BASIC } else { model_id(material.model) };
        u.shading = [id, material.roughness, material.metalness, flag(material.flat_shading)];
        u.extra = [material.clearcoat, material.clearcoat_roughness, 0.0, 0.0];
        u.dash[2] = 1.0;
        u
    }

    pub fn line(model: Mat4, material: &LineMaterial) -> Self {
        let mut u = Self::with_model(model);
        u.color = material.color.to_array();
        u.shading[0] = MODEL_BASIC;
        u.dash = match material.style {
            LineStyle::Solid => [0.0, 0.0, 1.0, 0.0],
            LineStyle::Dashed { dash_size, gap_size, scale } => [dash_size, gap_size, scale, 1.0],
        };
        u
    }

    pub fn points(model: Mat4, material: &PointsMaterial) -> Self {
        let mut u = Self::with_model(model);
        u.color = material.color.to_array();
        u.shading[0] = MODEL_BASIC;
        u.extra = [0.0, 0.0, material.size, flag(material.size_attenuation)];
        u.dash[2] = 1.0;
        u
    }
}

fn model_id(model: ShadingModel) -> f32 {
    match model {
        ShadingModel::Basic => MODEL_BASIC,
        ShadingModel::Lambert => MODEL_LAMBERT,
        ShadingModel::Phong => MODEL_PHONG,
        ShadingModel::Standard => MODEL_STANDARD,
        ShadingModel::Physical => MODEL_PHYSICAL,
    }
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

/// Smallest multiple of `alignment` that holds one `DrawUniform`.
pub(crate) fn draw_stride(alignment: u32) -> u64 {
    let size = std::mem::size_of::<DrawUniform>() as u64;
    let align = u64::from(alignment.max(1));
    size.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Color;
    use crate::scene::{Light, Node, Transform};
    use approx::assert_relative_eq;
    use glam::Vec3;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn sizes_are_sixteen_byte_multiples() {
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<DrawUniform>() % 16, 0);
    }

    #[test]
    fn stride_honours_alignment() {
        assert_eq!(draw_stride(256), 256);
        assert_eq!(draw_stride(64) % 64, 0);
        assert!(draw_stride(64) >= std::mem::size_of::<DrawUniform>() as u64);
    }

    // ── frame ─────────────────────────────────────────────────────────────

    #[test]
    fn light_points_back_toward_source() {
        let mut scene = Scene::new();
        scene.add(
            Node::light(Light::directional(Color::white(), 1.0))
                .with_transform(Transform::from_position(Vec3::new(-1.0, 2.0, 4.0))),
        );
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0).unwrap();
        let u = FrameUniform::new(&scene, &camera, (800, 600), 1.0);

        let expected = Vec3::new(-1.0, 2.0, 4.0).normalize();
        assert_relative_eq!(u.light_dir[0], expected.x, epsilon = 1e-6);
        assert_relative_eq!(u.light_dir[2], expected.z, epsilon = 1e-6);
        assert_eq!(u.light_dir[3], 1.0);
    }

    #[test]
    fn unlit_scene_has_zero_intensity() {
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0).unwrap();
        let u = FrameUniform::new(&Scene::new(), &camera, (0, 0), 2.0);
        assert_eq!(u.light_dir[3], 0.0);
        assert_eq!(u.viewport, [1.0, 1.0, 2.0, 0.0]);
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let u = DrawUniform::mesh(model, &MeshMaterial::lambert(Color::white()));
        assert_relative_eq!(u.normal_matrix[0][0], 0.5);
        assert_eq!(u.shading[0], MODEL_LAMBERT);
    }

    #[test]
    fn wireframe_mesh_is_unlit() {
        let m = MeshMaterial::phong(Color::white()).with_wireframe(true);
        assert_eq!(DrawUniform::mesh(Mat4::IDENTITY, &m).shading[0], MODEL_BASIC);
    }

    #[test]
    fn dashed_line_packs_pattern() {
        let m = LineMaterial::dashed(Color::white(), 0.2, 0.1, 1.0).unwrap();
        assert_eq!(DrawUniform::line(Mat4::IDENTITY, &m).dash, [0.2, 0.1, 1.0, 1.0]);
    }

    #[test]
    fn degenerate_scale_keeps_finite_normals() {
        let u = DrawUniform::mesh(Mat4::from_scale(Vec3::ZERO), &MeshMaterial::basic(Color::white()));
        assert!(u.normal_matrix.iter().flatten().all(|v| v.is_finite()));
    }
}
