use super::helpers::{self, PipelineDesc, UNIFORM_STRIDE};
use crate::core::scene::Mesh;
use crate::core::{Scene, Shape};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal_mat: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    surface: [f32; 4],
}

impl ObjectUniforms {
    fn from_mesh(mesh: &Mesh) -> Self {
        let model = mesh.transform.matrix();
        let m = &mesh.material;
        let emissive = m
            .emissive
            .map(|e| e.color.extend(e.intensity).to_array())
            .unwrap_or([0.0; 4]);
        Self {
            model: model.to_cols_array_2d(),
            normal_mat: model.inverse().transpose().to_cols_array_2d(),
            color: m.color.extend(m.opacity).to_array(),
            emissive,
            surface: [m.metalness, m.roughness, 0.0, 0.0],
        }
    }
}

struct ShapeBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    edges: wgpu::Buffer,
    edge_count: u32,
}

/// GPU copies of the shared shape geometry plus the lit and wireframe
/// pipelines. Per-object uniforms live in one buffer at a fixed stride and
/// are selected with a dynamic offset.
pub(crate) struct MeshResources {
    shapes: Vec<ShapeBuffers>,
    lit_opaque: wgpu::RenderPipeline,
    lit_blend: wgpu::RenderPipeline,
    wire: wgpu::RenderPipeline,
    object_buffer: wgpu::Buffer,
    object_bg: wgpu::BindGroup,
    staging: Vec<u8>,
    capacity: usize,
}

pub(crate) fn create_mesh_resources(
    device: &wgpu::Device,
    globals_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    scene: &Scene,
) -> MeshResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let object_bgl = helpers::uniform_layout(
        device,
        "object_bgl",
        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        true,
    );
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[globals_bgl, &object_bgl],
        push_constant_ranges: &[],
    });
    let buffers = [helpers::mesh_vertex_layout()];
    let lit_opaque = helpers::make_pipeline(
        device,
        &pl,
        &shader,
        &buffers,
        color_format,
        PipelineDesc {
            label: "lit_opaque",
            vs_entry: "vs_main",
            fs_entry: "fs_lit",
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: Some(wgpu::BlendState::REPLACE),
            depth_write: true,
        },
    );
    let lit_blend = helpers::make_pipeline(
        device,
        &pl,
        &shader,
        &buffers,
        color_format,
        PipelineDesc {
            label: "lit_blend",
            vs_entry: "vs_main",
            fs_entry: "fs_lit",
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
            depth_write: false,
        },
    );
    let wire = helpers::make_pipeline(
        device,
        &pl,
        &shader,
        &buffers,
        color_format,
        PipelineDesc {
            label: "wire",
            vs_entry: "vs_main",
            fs_entry: "fs_wire",
            topology: wgpu::PrimitiveTopology::LineList,
            blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
            depth_write: false,
        },
    );

    let shapes = Shape::ALL
        .iter()
        .map(|&shape| {
            let data = scene.geometry(shape);
            let edges = data.edges();
            ShapeBuffers {
                vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("shape_vertices"),
                    contents: bytemuck::cast_slice(&data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("shape_indices"),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: data.indices.len() as u32,
                edges: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("shape_edges"),
                    contents: bytemuck::cast_slice(&edges),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                edge_count: edges.len() as u32,
            }
        })
        .collect();

    let capacity = scene.meshes.len().max(1);
    let object_buffer =
        helpers::uniform_buffer(device, "object_uniforms", UNIFORM_STRIDE * capacity as u64);
    let object_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("object_bg"),
        layout: &object_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &object_buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
            }),
        }],
    });

    MeshResources {
        shapes,
        lit_opaque,
        lit_blend,
        wire,
        object_buffer,
        object_bg,
        staging: vec![0; UNIFORM_STRIDE as usize * capacity],
        capacity,
    }
}

impl MeshResources {
    /// Pack every mesh's uniforms at its slot and upload them in one write.
    pub(crate) fn upload(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        let size = std::mem::size_of::<ObjectUniforms>();
        for (i, mesh) in scene.meshes.iter().take(self.capacity).enumerate() {
            let at = i * UNIFORM_STRIDE as usize;
            let u = ObjectUniforms::from_mesh(mesh);
            self.staging[at..at + size].copy_from_slice(bytemuck::bytes_of(&u));
        }
        queue.write_buffer(&self.object_buffer, 0, &self.staging);
    }

    /// Opaque meshes first with depth writes, then blended ones on top.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, scene: &Scene) {
        let slots = || {
            scene
                .meshes
                .iter()
                .take(self.capacity)
                .enumerate()
                .filter(|(_, m)| m.visible)
        };
        rpass.set_pipeline(&self.lit_opaque);
        for (i, mesh) in slots().filter(|(_, m)| !blended(m)) {
            self.draw_one(rpass, i, mesh);
        }
        rpass.set_pipeline(&self.lit_blend);
        for (i, mesh) in slots().filter(|(_, m)| blended(m) && !m.material.wireframe) {
            self.draw_one(rpass, i, mesh);
        }
        rpass.set_pipeline(&self.wire);
        for (i, mesh) in slots().filter(|(_, m)| m.material.wireframe) {
            self.draw_one(rpass, i, mesh);
        }
    }

    fn draw_one(&self, rpass: &mut wgpu::RenderPass<'_>, slot: usize, mesh: &Mesh) {
        let buf = &self.shapes[mesh.shape.index()];
        let offset = (slot as u64 * UNIFORM_STRIDE) as u32;
        rpass.set_bind_group(1, &self.object_bg, &[offset]);
        rpass.set_vertex_buffer(0, buf.vertices.slice(..));
        if mesh.material.wireframe {
            rpass.set_index_buffer(buf.edges.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..buf.edge_count, 0, 0..1);
        } else {
            rpass.set_index_buffer(buf.indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..buf.index_count, 0, 0..1);
        }
    }
}

fn blended(mesh: &Mesh) -> bool {
    mesh.material.transparent || mesh.material.wireframe
}
