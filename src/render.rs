use crate::constants::TONEMAP_EXPOSURE;
use glam::Vec4;
use mooring_core::{
    environment_meshes, hex_to_linear_rgb, plane_mesh, sun_direction, Material, ModelInstance,
    Viewer, CLEAR_COLOR, FOG_COLOR, FOG_FAR, FOG_NEAR, SKY_MIE_COEFFICIENT,
    SKY_MIE_DIRECTIONAL_G, SKY_RAYLEIGH, SKY_TURBIDITY, SUN_AZIMUTH_DEGREES, SUN_COLOR,
    SUN_ELEVATION_DEGREES, WATER_COLOR, WATER_DISTORTION_SCALE, WATER_SIZE,
};
use std::rc::Rc;
use web_sys as web;

mod helpers;
mod meshes;
mod post;
mod targets;
use meshes::{GpuMesh, InstanceBuffer, MaterialBinding, MeshDraw};
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    camera: [f32; 4],
    sun_dir: [f32; 4],
    fog: [f32; 4],
    water: [f32; 4],
    sky: [f32; 4],
    sun_color: [f32; 4],
}

fn rgb_with(hex: u32, w: f32) -> [f32; 4] {
    let [r, g, b] = hex_to_linear_rgb(hex);
    [r, g, b, w]
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    bg_hdr: wgpu::BindGroup,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    material_bgl: wgpu::BindGroupLayout,
    sky_pipeline: wgpu::RenderPipeline,
    standard_pipeline: wgpu::RenderPipeline,
    water_pipeline: wgpu::RenderPipeline,

    // Chains first, then environment, then models in load order.
    draws: Vec<MeshDraw>,
    water: MeshDraw,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, viewer: &Viewer) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
                    // Default limits; older WebGPU implementations reject unknown fields
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
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);

        // Post: tone map the HDR scene into the swapchain
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(mooring_core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let bg_hdr = post::create_bind_group(&device, &post, &linear_sampler, &targets.hdr_view);

        // Scene: sky, lit meshes and the water surface
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(mooring_core::SCENE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[helpers::uniform_layout_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pl_sky = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_sky"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let pl_mesh = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_mesh"),
            bind_group_layouts: &[&globals_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let sky_pipeline = helpers::make_sky_pipeline(&device, &pl_sky, &scene_shader);
        let standard_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pl_mesh,
            &scene_shader,
            "standard_pipeline",
            "fs_standard",
        );
        let water_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pl_mesh,
            &scene_shader,
            "water_pipeline",
            "fs_water",
        );

        // One link mesh shared by every chain
        let scene = &viewer.scene;
        let link = Rc::new(GpuMesh::upload(&device, "chain_link", scene.link_mesh()));
        let mut draws = Vec::new();
        for (object, chain) in scene.chains().iter().enumerate() {
            let material = scene
                .objects()
                .get(object)
                .map(|o| o.material)
                .unwrap_or_else(Material::metal);
            draws.push(MeshDraw {
                mesh: link.clone(),
                material: MaterialBinding::new(&device, &material_bgl, chain.name(), material),
                instances: InstanceBuffer::new(
                    &device,
                    &queue,
                    chain.name(),
                    chain.capacity(),
                    chain.transforms(),
                ),
                object: Some(object),
            });
        }
        for (i, (mesh, material)) in environment_meshes().iter().enumerate() {
            let label = format!("environment_{i}");
            draws.push(MeshDraw {
                mesh: Rc::new(GpuMesh::upload(&device, &label, mesh)),
                material: MaterialBinding::new(&device, &material_bgl, &label, *material),
                instances: InstanceBuffer::single(&device, &queue, &label),
                object: None,
            });
        }
        let water = MeshDraw {
            mesh: Rc::new(GpuMesh::upload(
                &device,
                "water",
                &plane_mesh(WATER_SIZE, WATER_SIZE),
            )),
            material: MaterialBinding::new(
                &device,
                &material_bgl,
                "water",
                Material::basic(WATER_COLOR),
            ),
            instances: InstanceBuffer::single(&device, &queue, "water"),
            object: None,
        };
        log::info!(
            "[scene] renderer ready: {}x{} {:?}, {} draws",
            width,
            height,
            format,
            draws.len() + 1
        );

        let [r, g, b] = hex_to_linear_rgb(CLEAR_COLOR);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            bg_hdr,
            globals_buffer,
            globals_bg,
            material_bgl,
            sky_pipeline,
            standard_pipeline,
            water_pipeline,
            draws,
            water,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    /// Upload the meshes of a freshly placed model.
    pub fn add_model(&mut self, model: &ModelInstance) {
        for (i, (mesh, material)) in model.meshes.iter().enumerate() {
            if mesh.is_empty() {
                continue;
            }
            let label = format!("{}_{i}", model.name);
            self.draws.push(MeshDraw {
                mesh: Rc::new(GpuMesh::upload(&self.device, &label, mesh)),
                material: MaterialBinding::new(&self.device, &self.material_bgl, &label, *material),
                instances: InstanceBuffer::single(&self.device, &self.queue, &label),
                object: model.object,
            });
        }
        log::info!(
            "[assets] {} uploaded: {} meshes",
            model.name,
            model.meshes.len()
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reconfigure the surface and rebuild size-dependent targets, e.g.
    /// after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width.max(1);
        self.config.height = self.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.targets
            .recreate(&self.device, self.config.width, self.config.height);
        self.bg_hdr = post::create_bind_group(
            &self.device,
            &self.post,
            &self.linear_sampler,
            &self.targets.hdr_view,
        );
    }

    pub fn render(&mut self, viewer: &Viewer) -> Result<(), wgpu::SurfaceError> {
        self.write_globals(viewer);
        for draw in &mut self.draws {
            let Some(object) = draw.object else { continue };
            if let Some(o) = viewer.scene.objects().get(object) {
                draw.material.sync_color(&self.queue, o.material.color);
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: scene into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);

            rpass.set_pipeline(&self.sky_pipeline);
            rpass.draw(0..3, 0..1);

            rpass.set_pipeline(&self.standard_pipeline);
            for draw in &self.draws {
                draw.draw(&mut rpass);
            }

            rpass.set_pipeline(&self.water_pipeline);
            self.water.draw(&mut rpass);
        }

        // Pass 2: tone map to swapchain
        post::write_post_uniforms(
            &self.queue,
            &self.post.uniform_buffer,
            [self.width as f32, self.height as f32],
            TONEMAP_EXPOSURE,
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.bg_hdr,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_globals(&self, viewer: &Viewer) {
        let view_proj = viewer.rig.view_proj();
        let eye = viewer.rig.pose.position;
        let sun = sun_direction(SUN_ELEVATION_DEGREES, SUN_AZIMUTH_DEGREES);
        let u = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            camera: [eye.x, eye.y, eye.z, viewer.water_time],
            sun_dir: [sun.x, sun.y, sun.z, 0.0],
            fog: rgb_with(FOG_COLOR, FOG_NEAR),
            water: rgb_with(WATER_COLOR, FOG_FAR),
            sky: Vec4::new(
                SKY_TURBIDITY,
                SKY_RAYLEIGH,
                SKY_MIE_COEFFICIENT,
                SKY_MIE_DIRECTIONAL_G,
            )
            .to_array(),
            sun_color: rgb_with(SUN_COLOR, WATER_DISTORTION_SCALE),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&u));
    }
}
