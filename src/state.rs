use std::sync::Arc;

use winit::{
    dpi::PhysicalSize,
    event::WindowEvent,
    window::{Fullscreen, Window},
};

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

use crate::board::Board;
use crate::config::Config;
use crate::error::AppError;
use crate::geometry::GridGeometry;
use crate::input::{Action, AppEvent, InputState};
use crate::render::{draw_board, RectBatch, RectRenderer};
use crate::simulation::Simulation;
use crate::ui::{settings_panel, PanelStats};

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub board: Board,
    pub geometry: GridGeometry,
    pub input: InputState,
    pub simulation: Simulation,

    rect_renderer: RectRenderer,
    batch: RectBatch,

    // GUI fields
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub menu_open: bool,

    /// Something changed since the last frame was drawn
    pub needs_frame: bool,
}

impl State {
    pub async fn new(window: Arc<Window>, settings: &Config) -> Result<Self, AppError> {
        let size = window.inner_size();
        let board = Board::new(settings.rows as usize, settings.columns as usize)?;

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(AppError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(AppError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let present_mode = if settings.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::AutoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // One instance per cell plus the hover overlay
        let rect_renderer = RectRenderer::new(&device, surface_format, board.cells().len() + 1);
        rect_renderer.resize(&queue, config.width, config.height);
        let batch = RectBatch::new(surface_format.is_srgb());

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state =
            EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("egui initialized.");

        let mut geometry = GridGeometry::new(board.rows(), board.columns(), settings.border);
        geometry.recalculate(size.width, size.height);

        let input = InputState::new(settings.running);
        window.set_title(&input.title());

        log::info!(
            "wgpu initialized successfully: {:?}, {}x{} board",
            surface_format,
            board.rows(),
            board.columns()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            board,
            geometry,
            input,
            simulation: Simulation::new(settings.sim_delay),
            rect_renderer,
            batch,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            menu_open: false,
            needs_frame: true,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.rect_renderer.resize(&self.queue, new_size.width, new_size.height);
        }
        self.geometry.recalculate(new_size.width, new_size.height);
        self.input.refresh_hover(&self.geometry);
        self.needs_frame = true;
        log::info!("Resized to {}x{}", new_size.width, new_size.height);
    }

    /// Route one window event through egui and then the game. Returns the
    /// action the event loop itself has to act on.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Action {
        let response = self.egui_winit_state.on_window_event(&self.window, event);
        if response.repaint {
            self.needs_frame = true;
        }

        // Resizes, closes and button releases reach the game even over the panel
        let must_pass = matches!(
            event,
            WindowEvent::Resized(_)
                | WindowEvent::CloseRequested
                | WindowEvent::MouseInput { state: winit::event::ElementState::Released, .. }
        );
        if response.consumed && !must_pass {
            return Action::None;
        }

        let Some(app_event) = AppEvent::from_window_event(event) else {
            return Action::None;
        };
        self.needs_frame = true;

        let action = self.input.handle_event(app_event, &self.geometry, &mut self.board);
        match action {
            Action::Recalculate => self.resize(self.window.inner_size()),
            Action::RunStateChanged => self.window.set_title(&self.input.title()),
            Action::ToggleFullscreen => {
                let fullscreen = match self.window.fullscreen() {
                    Some(_) => None,
                    None => Some(Fullscreen::Borderless(None)),
                };
                self.window.set_fullscreen(fullscreen);
                // Some platforms only report the change through a later Resized
                self.resize(self.window.inner_size());
            }
            Action::ToggleMenu => self.menu_open = !self.menu_open,
            Action::Clear => self.simulation.reset_generation(),
            Action::Quit | Action::None => {}
        }
        action
    }

    /// True while frames have to keep coming without input events
    pub fn is_animating(&self) -> bool {
        self.input.running
    }

    /// Called once the pending events have been drained.
    pub fn end_event_batch(&mut self) {
        if self.input.end_batch(&mut self.board) {
            self.needs_frame = true;
        }
    }

    /// Advance the automaton by one paced tick if it is running.
    pub fn update(&mut self) {
        if self.input.should_simulate() {
            self.simulation.step(&mut self.board);
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.needs_frame = false;
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }

        let output_frame = self.surface.get_current_texture()?;
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        draw_board(&mut self.batch, &self.board, &self.geometry, self.input.cursor_pos);
        self.rect_renderer.prepare(&self.device, &self.queue, &self.batch);

        // --- Egui Frame and UI Definition ---
        let raw_input = self.egui_winit_state.take_egui_input(&self.window);
        self.egui_ctx.begin_frame(raw_input);
        let stats = PanelStats {
            generation: self.simulation.generation(),
            live_cells: self.board.live_count(),
            rows: self.board.rows(),
            columns: self.board.columns(),
            running: self.input.running,
        };
        let requests = settings_panel(
            &self.egui_ctx,
            &mut self.menu_open,
            &stats,
            &mut self.simulation.delay,
        );
        let full_output = self.egui_ctx.end_frame();

        if requests.toggle_running {
            self.input.toggle_running();
            self.window.set_title(&self.input.title());
        }
        if requests.step_once {
            self.simulation.step(&mut self.board);
            self.needs_frame = true;
        }
        if requests.clear {
            self.board.clear();
            self.simulation.reset_generation();
            self.needs_frame = true;
        }

        let pixels_per_point = self.window.scale_factor() as f32;
        let paint_jobs = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point,
        };

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let egui_commands = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        self.egui_winit_state
            .handle_platform_output(&self.window, full_output.platform_output);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Board Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.batch.clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.rect_renderer.render(&mut render_pass);
            // egui draws on top of the board in the same pass
            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(egui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output_frame.present();
        Ok(())
    }
}
