use bytemuck::{Pod, Zeroable};
use mackcube_assets::TextureImage;
use mackcube_scene::TextureFilter;
use std::ops::Range;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];
}

#[rustfmt::skip]
const CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
    [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
];

/// Per face: corners as seen from outside, top-left, top-right,
/// bottom-right, bottom-left (clockwise), and the outward normal.
#[rustfmt::skip]
const FACES: [([usize; 4], [f32; 3]); 6] = [
    ([3, 2, 1, 0], [ 0.0,  0.0,  1.0]), // front
    ([6, 7, 4, 5], [ 0.0,  0.0, -1.0]), // back
    ([2, 6, 5, 1], [ 1.0,  0.0,  0.0]), // right
    ([7, 3, 0, 4], [-1.0,  0.0,  0.0]), // left
    ([7, 6, 2, 3], [ 0.0,  1.0,  0.0]), // top
    ([0, 1, 5, 4], [ 0.0, -1.0,  0.0]), // bottom
];

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Cube spanning ±1 on every axis, each face carrying the whole texture.
#[derive(Debug, Clone)]
pub struct CubeGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl Default for CubeGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeGeometry {
    pub fn new() -> Self {
        let mut vertices = Vec::with_capacity(FACES.len() * 4);
        let mut indices = Vec::with_capacity(FACES.len() * 6);

        for (corners, normal) in FACES {
            let base = vertices.len() as u16;
            for (corner, uv) in corners.into_iter().zip(FACE_UVS) {
                vertices.push(MeshVertex {
                    position: CORNERS[corner],
                    normal,
                    uv,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self { vertices, indices }
    }
}

/// Sampler settings for each filter mode. The non-mip modes clamp sampling
/// to the base level.
pub(crate) fn sampler_descriptor(filter: TextureFilter) -> wgpu::SamplerDescriptor<'static> {
    let (label, texel, lod_max_clamp) = match filter {
        TextureFilter::Nearest => ("cube_sampler_nearest", wgpu::FilterMode::Nearest, 0.0),
        TextureFilter::Linear => ("cube_sampler_linear", wgpu::FilterMode::Linear, 0.0),
        TextureFilter::MipmapLinear => ("cube_sampler_mipmap", wgpu::FilterMode::Linear, 32.0),
    };
    let mipmap_filter = match filter {
        TextureFilter::MipmapLinear => wgpu::FilterMode::Linear,
        _ => wgpu::FilterMode::Nearest,
    };
    wgpu::SamplerDescriptor {
        label: Some(label),
        mag_filter: texel,
        min_filter: texel,
        mipmap_filter,
        lod_max_clamp,
        ..Default::default()
    }
}

struct CubeTexture {
    _texture: wgpu::Texture,
    bind_groups: [wgpu::BindGroup; 3],
}

/// GPU-resident cube geometry plus its texture, bound once per filter mode.
pub struct CubeMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group_layout: wgpu::BindGroupLayout,
    samplers: [wgpu::Sampler; 3],
    texture: Option<CubeTexture>,
}

impl CubeMesh {
    pub fn new(device: &wgpu::Device) -> Self {
        let geometry = CubeGeometry::new();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cube_texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let samplers =
            TextureFilter::ALL.map(|filter| device.create_sampler(&sampler_descriptor(filter)));

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
            bind_group_layout,
            samplers,
            texture: None,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn is_loaded(&self) -> bool {
        self.texture.is_some()
    }

    /// Upload `image` with its full mip chain, replacing any previous texture.
    pub fn load_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
    ) {
        let levels = image.mip_chain();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cube_texture"),
            size: wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            let (width, height) = level.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                level.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * 4),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_groups = TextureFilter::ALL.map(|filter| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("cube_texture_bind_group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.samplers[filter.index()]),
                    },
                ],
            })
        });

        tracing::info!(
            "cube texture uploaded ({}x{}, {} mip levels)",
            image.width(),
            image.height(),
            levels.len()
        );
        self.texture = Some(CubeTexture {
            _texture: texture,
            bind_groups,
        });
    }

    /// Draw `instances` with the texture sampled through `filter`.
    ///
    /// The caller binds the pipeline, the uniform group and the instance
    /// buffer. Nothing is drawn until a texture has been loaded.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        filter: TextureFilter,
        instances: Range<u32>,
    ) {
        let Some(texture) = &self.texture else {
            return;
        };
        pass.set_bind_group(1, &texture.bind_groups[filter.index()], &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, instances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_has_six_quads() {
        let cube = CubeGeometry::new();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }

    #[test]
    fn faces_lie_on_their_planes() {
        let cube = CubeGeometry::new();
        for v in &cube.vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            assert_eq!(p.dot(n), 1.0);
            assert_eq!(p.abs(), Vec3::ONE);
        }
    }

    #[test]
    fn every_face_maps_the_whole_texture() {
        let cube = CubeGeometry::new();
        for face in cube.vertices.chunks(4) {
            let uvs: Vec<[f32; 2]> = face.iter().map(|v| v.uv).collect();
            assert_eq!(uvs, FACE_UVS.to_vec());
        }
    }

    #[test]
    fn winding_is_consistent() {
        let cube = CubeGeometry::new();
        for tri in cube.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from(cube.vertices[i as usize].position));
            let n = Vec3::from(cube.vertices[tri[0] as usize].normal);
            // Clockwise seen from outside.
            assert!((b - a).cross(c - a).dot(n) < 0.0);
        }
    }

    #[test]
    fn uses_all_eight_corners() {
        let cube = CubeGeometry::new();
        let mut corners: Vec<[i32; 3]> = cube
            .vertices
            .iter()
            .map(|v| v.position.map(|c| c as i32))
            .collect();
        corners.sort();
        corners.dedup();
        assert_eq!(corners.len(), 8);
    }

    #[test]
    fn samplers_match_filter_modes() {
        let nearest = sampler_descriptor(TextureFilter::Nearest);
        assert_eq!(nearest.min_filter, wgpu::FilterMode::Nearest);
        assert_eq!(nearest.lod_max_clamp, 0.0);

        let linear = sampler_descriptor(TextureFilter::Linear);
        assert_eq!(linear.mag_filter, wgpu::FilterMode::Linear);
        assert_eq!(linear.lod_max_clamp, 0.0);

        let mip = sampler_descriptor(TextureFilter::MipmapLinear);
        assert_eq!(mip.min_filter, wgpu::FilterMode::Linear);
        assert_eq!(mip.mipmap_filter, wgpu::FilterMode::Linear);
        assert!(mip.lod_max_clamp > 0.0);
    }
}
