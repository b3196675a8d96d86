use crate::core::Scene;
use std::cell::RefCell;
use web_sys as web;

mod helpers;
mod meshes;
mod points;
mod targets;

use meshes::{create_mesh_resources, MeshResources};
use points::{create_points_resources, FieldBuffers, PointsResources};
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalsUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    point_pos: [f32; 4],
    point_color: [f32; 4],
    spot_pos: [[f32; 4]; 2],
    spot_dir: [[f32; 4]; 2],
    spot_color: [[f32; 4]; 2],
    spot_penumbra: [f32; 4],
}

impl GlobalsUniforms {
    fn from_scene(scene: &Scene) -> Self {
        let cam = &scene.camera;
        let pl = &scene.point_light;
        let mut spot_pos = [[0.0; 4]; 2];
        let mut spot_dir = [[0.0; 4]; 2];
        let mut spot_color = [[0.0; 4]; 2];
        let mut spot_penumbra = [0.0; 4];
        for (i, s) in scene.spots.iter().enumerate() {
            let dir = (s.target - s.position).normalize_or_zero();
            spot_pos[i] = s.position.extend(s.range).to_array();
            spot_dir[i] = dir.extend(s.angle.cos()).to_array();
            // hidden spots stay bound but contribute nothing
            let intensity = if s.visible { s.intensity } else { 0.0 };
            spot_color[i] = s.color.extend(intensity).to_array();
            spot_penumbra[i] = s.penumbra;
        }
        Self {
            view: cam.view_matrix().to_cols_array_2d(),
            proj: cam.projection_matrix().to_cols_array_2d(),
            camera_pos: cam.eye.extend(1.0).to_array(),
            ambient: (scene.ambient.color * scene.ambient.intensity)
                .extend(1.0)
                .to_array(),
            point_pos: pl.position.extend(pl.range).to_array(),
            point_color: pl.color.extend(pl.intensity).to_array(),
            spot_pos,
            spot_dir,
            spot_color,
            spot_penumbra,
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    meshes: MeshResources,
    points: PointsResources,
    stars: FieldBuffers,
    glow: FieldBuffers,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    /// Acquire the device and build every GPU resource for `scene`. The scene
    /// is only borrowed once the async device handshake has finished.
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &RefCell<Scene>) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the page shows through wherever nothing is drawn
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} {:?} alpha {:?}",
            width,
            height,
            format,
            alpha_mode
        );

        let depth = DepthTarget::new(&device, width, height);

        let globals_bgl = helpers::uniform_layout(
            &device,
            "globals_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            false,
        );
        let globals_buffer = helpers::uniform_buffer(
            &device,
            "globals_uniforms",
            std::mem::size_of::<GlobalsUniforms>() as u64,
        );
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let scene = scene.borrow();
        let meshes = create_mesh_resources(&device, &globals_bgl, format, &scene);
        let points = create_points_resources(&device, &globals_bgl, format);
        let stars = points.create_field(&device, "star_instances", &scene.stars);
        let glow = points.create_field(&device, "glow_instances", &scene.glow);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            globals_buffer,
            globals_bg,
            meshes,
            points,
            stars,
            glow,
            width,
            height,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame: opaque meshes, then blended meshes, then the
    /// particle layers. Hidden objects and layers are skipped.
    pub fn render(&mut self, scene: &mut Scene) -> Result<(), wgpu::SurfaceError> {
        let globals = GlobalsUniforms::from_scene(scene);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.meshes.upload(&self.queue, scene);
        self.points.upload(&self.queue, &self.stars, &mut scene.stars);
        self.points.upload(&self.queue, &self.glow, &mut scene.glow);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            self.meshes.draw(&mut rpass, scene);
            self.points.draw(&mut rpass, &self.stars, &scene.stars);
            self.points.draw(&mut rpass, &self.glow, &scene.glow);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
