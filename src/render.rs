use lob_core::constants::BALL_RADIUS;
use lob_core::FrameOutput;
use web_sys as web;

mod ball;
mod helpers;
use ball::{create_ball_resources, BallResources, BallUniforms};

// Gaussian width of the drag pull, in squared object units.
const PULL_FALLOFF: f32 = 0.6;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    ball: BallResources,
    depth_view: wgpu::TextureView,
    _depth_tex: wgpu::Texture,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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

        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        let ball = create_ball_resources(&device, format, helpers::DEPTH_FORMAT, BALL_RADIUS);
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            ball,
            depth_view,
            _depth_tex: depth_tex,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.05,
                g: 0.07,
                b: 0.06,
                a: 1.0,
            },
            time_accum: 0.0,
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
            let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
            self._depth_tex = tex;
            self.depth_view = view;
        }
    }

    pub fn render(
        &mut self,
        dt_sec: f32,
        out: &FrameOutput,
        revealed: bool,
        hovered: bool,
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let cam = out.camera.camera(aspect);
        let d = out.deform;
        let u = BallUniforms {
            view_proj: cam.view_proj().to_cols_array_2d(),
            model: out.ball_model.to_cols_array_2d(),
            grab: [d.grab_point.x, d.grab_point.y, d.grab_point.z, d.grab_strength],
            drag: [d.drag_delta.x, d.drag_delta.y, d.drag_delta.z, self.time_accum],
            params: [
                if revealed { 1.0 } else { 0.0 },
                if hovered { 1.0 } else { 0.0 },
                PULL_FALLOFF,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.ball.uniform_buffer, 0, bytemuck::bytes_of(&u));

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
                label: Some("ball_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.ball.pipeline);
            rpass.set_bind_group(0, &self.ball.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.ball.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.ball.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.ball.index_count, 0, 0..1);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
