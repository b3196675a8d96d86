use super::helpers::{self, PipelineDesc};
use crate::core::scene::ParticleField;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Instance {
    center: [f32; 3],
    color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FieldUniforms {
    model: [[f32; 4]; 4],
    params: [f32; 4],
}

/// One particle field on the GPU: its instances and its uniform slot.
pub(crate) struct FieldBuffers {
    instances: wgpu::Buffer,
    count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub(crate) struct PointsResources {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    staging: Vec<Instance>,
}

pub(crate) fn create_points_resources(
    device: &wgpu::Device,
    globals_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> PointsResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::POINTS_WGSL.into()),
    });
    let layout = helpers::uniform_layout(
        device,
        "field_bgl",
        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        false,
    );
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[globals_bgl, &layout],
        push_constant_ranges: &[],
    });
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Instance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRS,
    };
    let pipeline = helpers::make_pipeline(
        device,
        &pl,
        &shader,
        &[instance_layout],
        color_format,
        PipelineDesc {
            label: "points",
            vs_entry: "vs_points",
            fs_entry: "fs_points",
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: Some(helpers::ADDITIVE),
            depth_write: false,
        },
    );
    PointsResources {
        pipeline,
        layout,
        staging: Vec::new(),
    }
}

impl PointsResources {
    pub(crate) fn create_field(&self, device: &wgpu::Device, label: &str, field: &ParticleField) -> FieldBuffers {
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<Instance>() * field.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniforms = helpers::uniform_buffer(
            device,
            "field_uniforms",
            std::mem::size_of::<FieldUniforms>() as u64,
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("field_bg"),
            layout: &self.layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        FieldBuffers {
            instances,
            count: field.len() as u32,
            uniforms,
            bind_group,
        }
    }

    /// Write the field's transform every frame and its points only when
    /// they moved. Clears the field's dirty flag.
    pub(crate) fn upload(&mut self, queue: &wgpu::Queue, gpu: &FieldBuffers, field: &mut ParticleField) {
        let u = FieldUniforms {
            model: field.matrix().to_cols_array_2d(),
            params: [field.size, field.opacity, 0.0, 0.0],
        };
        queue.write_buffer(&gpu.uniforms, 0, bytemuck::bytes_of(&u));
        if !field.dirty {
            return;
        }
        self.staging.clear();
        self.staging.extend(
            field
                .positions
                .iter()
                .zip(&field.colors)
                .take(gpu.count as usize)
                .map(|(p, c)| Instance {
                    center: p.to_array(),
                    color: c.to_array(),
                }),
        );
        queue.write_buffer(&gpu.instances, 0, bytemuck::cast_slice(&self.staging));
        field.dirty = false;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, gpu: &FieldBuffers, field: &ParticleField) {
        if !field.visible || gpu.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &gpu.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.instances.slice(..));
        rpass.draw(0..6, 0..gpu.count);
    }
}
