use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::geometry::{wireframe, Geometry, Topology};

/// Interleaved vertex shared by meshes and lines.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub line_distance: f32,
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32    // line distance
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Missing normals or distances become zero.
    pub fn from_geometry(geometry: &Geometry) -> Vec<MeshVertex> {
        let distances = geometry
            .line_distances
            .as_deref()
            .filter(|d| d.len() == geometry.positions.len());

        geometry
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| MeshVertex {
                position: p.to_array(),
                normal: geometry.normals.get(i).map_or([0.0; 3], |n| n.to_array()),
                line_distance: distances.map_or(0.0, |d| d[i]),
            })
            .collect()
    }
}

/// One point center, stepped per instance; the shader expands it to a quad.
pub(crate) fn point_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRS,
    }
}

/// GPU copy of a [`Geometry`].
pub(crate) struct GpuGeometry {
    pub vertices: wgpu::Buffer,
    pub indices: Option<wgpu::Buffer>,
    /// Indices when indexed, otherwise vertices (point instances for clouds).
    pub count: u32,
}

impl GpuGeometry {
    /// Uploads `geometry`, or its triangle edges when `edges` is set.
    pub fn upload(device: &wgpu::Device, geometry: &Geometry, edges: bool) -> Self {
        let edge_geometry;
        let source = if edges {
            edge_geometry = wireframe(geometry);
            &edge_geometry
        } else {
            geometry
        };

        let vertices = if source.topology == Topology::Points {
            let centers: Vec<[f32; 3]> = source.positions.iter().map(|p| p.to_array()).collect();
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vista point vbo"),
                contents: bytemuck::cast_slice(&centers),
                usage: wgpu::BufferUsages::VERTEX,
            })
        } else {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vista mesh vbo"),
                contents: bytemuck::cast_slice(&MeshVertex::from_geometry(source)),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };

        let indices = source.indices.as_ref().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vista mesh ibo"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertices,
            indices,
            count: source.element_count() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 28);
    }

    #[test]
    fn distances_follow_positions() {
        let mut g = Geometry::new(Topology::LineStrip, vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 2.0, 0.0)]);
        g.compute_line_distances();
        let v = MeshVertex::from_geometry(&g);
        assert_eq!(v.iter().map(|v| v.line_distance).collect::<Vec<_>>(), vec![0.0, 1.0, 3.0]);
        assert_eq!(v[1].normal, [0.0; 3]);
    }

    #[test]
    fn mismatched_distances_are_dropped() {
        let mut g = Geometry::new(Topology::LineStrip, vec![Vec3::ZERO, Vec3::X]);
        g.line_distances = Some(vec![0.0]);
        assert!(MeshVertex::from_geometry(&g).iter().all(|v| v.line_distance == 0.0));
    }
}
