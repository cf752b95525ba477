use std::sync::Arc;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    assets::AssetLoader,
    config::ViewerConfig,
    gfx::{
        camera::CameraManager,
        rendering::RenderEngine,
        scene::Scene,
        ui::{hud_panel, HudState, UiManager},
    },
    input::KeyboardPan,
    layout::{neighborhood, SceneAssembler},
    performance::PerformanceMonitor,
};

/// The neighborhood viewer: one window, one scene, driven by winit.
pub struct NeighborhoodApp {
    config: ViewerConfig,
}

/// Everything that only exists once the window does.
struct Viewer {
    window: Arc<Window>,
    render_engine: RenderEngine,
    ui_manager: UiManager,
    scene: Scene,
    loader: AssetLoader,
    assembler: SceneAssembler,
}

struct AppState {
    config: ViewerConfig,
    viewer: Option<Viewer>,
    keyboard_pan: KeyboardPan,
    monitor: PerformanceMonitor,
    hud_visible: bool,
    /// Set when startup fails inside the event loop; reported by `run`.
    fatal: Option<anyhow::Error>,
}

impl NeighborhoodApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState {
            keyboard_pan: KeyboardPan::from_config(&self.config.input),
            monitor: PerformanceMonitor::new(),
            hud_visible: self.config.hud.visible,
            config: self.config,
            viewer: None,
            fatal: None,
        };

        event_loop
            .run_app(&mut state)
            .context("Event loop terminated abnormally")?;

        match state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn create_viewer(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Viewer> {
        let window_config = &self.config.window;
        let attributes = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );

        let (width, height) = window.inner_size().into();
        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            &self.config,
        ))
        .context("Failed to initialise the renderer")?;

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );

        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let mut scene = Scene::new(CameraManager::from_config(&self.config.camera, aspect));

        let mut layout = neighborhood();
        if !self.config.assets.skybox {
            layout.skybox = None;
        }
        if let Err(issues) = layout.validate() {
            for issue in &issues {
                log::error!("Layout: {}", issue);
            }
            anyhow::bail!("layout has {} issue(s)", issues.len());
        }

        let mut loader = AssetLoader::new(&self.config.assets.root);
        log::info!("Loading assets from {}", loader.root().display());
        let assembler = SceneAssembler::assemble(&layout, &mut scene, &mut loader)
            .context("Failed to assemble the neighborhood")?;

        Ok(Viewer {
            window,
            render_engine,
            ui_manager,
            scene,
            loader,
            assembler,
        })
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };

        match code {
            KeyCode::Escape if event.state == ElementState::Pressed => event_loop.exit(),
            KeyCode::F1 if event.state == ElementState::Pressed && !event.repeat => {
                self.hud_visible = !self.hud_visible;
            }
            _ => {
                if !self.keyboard_pan.handle_key(code, event.state) {
                    if let Some(viewer) = self.viewer.as_mut() {
                        viewer.scene.camera_manager.process_keyboard_event(event);
                    }
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        let elapsed = self.monitor.tick();

        for loaded in viewer.loader.poll() {
            if let Some(skybox) = viewer.assembler.apply(loaded, &mut viewer.scene) {
                viewer.render_engine.set_skybox(&skybox);
            }
        }

        self.keyboard_pan
            .update(elapsed, &mut viewer.scene.camera_manager.camera);
        viewer.assembler.animate(&mut viewer.scene);

        viewer.render_engine.prepare_scene(&mut viewer.scene);
        viewer.scene.update();
        viewer
            .render_engine
            .update(viewer.scene.camera_manager.uniform());

        let hud = self.hud_visible.then(|| {
            let camera = &viewer.scene.camera_manager.camera;
            let ball = viewer
                .assembler
                .animators()
                .first()
                .map(|a| (a.oscillator.value(), a.oscillator.direction()));
            HudState {
                metrics: self.monitor.metrics().clone(),
                frame_history: self.monitor.frame_time_history(),
                camera_eye: camera.eye.into(),
                camera_target: camera.target.into(),
                camera_distance: camera.distance,
                keys: self.keyboard_pan.keys,
                ball,
                stats: viewer.scene.statistics(),
                pending_assets: viewer.assembler.pending(),
                has_skybox: viewer.render_engine.has_skybox(),
            }
        });

        let ui_manager = &mut viewer.ui_manager;
        let window = &viewer.window;
        let overlay = hud.map(|hud| {
            move |device: &wgpu::Device,
                  queue: &wgpu::Queue,
                  encoder: &mut wgpu::CommandEncoder,
                  view: &wgpu::TextureView| {
                ui_manager.draw(device, queue, encoder, window, view, |ui| {
                    hud_panel(ui, &hud)
                });
            }
        });

        if let Err(e) = viewer.render_engine.render_frame(&viewer.scene, overlay) {
            log::error!("Rendering failed: {}", e);
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        match self.create_viewer(event_loop) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        // Pointer input over the HUD stays with the HUD.
        let captured = viewer
            .ui_manager
            .handle_event(&viewer.window, window_id, &event);
        if captured
            && matches!(
                event,
                WindowEvent::MouseInput { .. }
                    | WindowEvent::MouseWheel { .. }
                    | WindowEvent::CursorMoved { .. }
            )
        {
            return;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Focused(false) => self.keyboard_pan.release_all(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                viewer
                    .scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                viewer.render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        // Presses that start over the HUD don't orbit; releases always land.
        let camera_manager = &mut viewer.scene.camera_manager;
        camera_manager.controller.enabled = !viewer.ui_manager.wants_mouse();
        camera_manager.process_event(&event, &viewer.window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = self.viewer.as_ref() {
            viewer.window.request_redraw();
        }
    }
}
