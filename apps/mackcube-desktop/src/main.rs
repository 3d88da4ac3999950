use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use mackcube_assets::{AssetDir, Fallback};
use mackcube_input::{InputRouter, Key, TouchPhase, TouchTracker};
use mackcube_render::FrameRenderer;
use mackcube_render_wgpu::{GpuSurface, WgpuRenderer};
use mackcube_scene::{LightingConfig, SceneState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Finger id used for the mouse, well clear of real touch ids.
const MOUSE_POINTER_ID: u64 = u64::MAX;

#[derive(Parser)]
#[command(name = "mackcube-desktop", about = "Orbiting textured cubes demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory the cube texture is loaded from
    #[arg(long, default_value = "./assets")]
    assets_dir: PathBuf,

    /// Texture file inside the assets directory
    #[arg(long, default_value = "crate.png")]
    texture: String,
}

/// State owned by the event-loop thread. Input callbacks and redraws are
/// serialized by the loop, so the scene is never shared.
struct AppState {
    scene: SceneState,
    lighting: LightingConfig,
    input: InputRouter,
    touches: TouchTracker,
    cursor: Vec2,
    started: Instant,
}

impl AppState {
    fn new() -> Self {
        Self {
            scene: SceneState::new(),
            lighting: LightingConfig::default(),
            input: InputRouter::new(),
            touches: TouchTracker::new(),
            cursor: Vec2::ZERO,
            started: Instant::now(),
        }
    }

    fn pointer(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        let time = self.started.elapsed();
        if let Some(event) = self.touches.update(id, phase, position, time) {
            self.input.pointer_event(&mut self.scene, &event);
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        if let Some(key) = key_for(code) {
            self.input.key_press(&mut self.scene, key);
        }
    }
}

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowLeft => Some(Key::DpadLeft),
        KeyCode::ArrowRight => Some(Key::DpadRight),
        KeyCode::ArrowUp => Some(Key::DpadUp),
        KeyCode::ArrowDown => Some(Key::DpadDown),
        KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::Space => Some(Key::DpadCenter),
        KeyCode::KeyL => Some(Key::ToggleLighting),
        _ => None,
    }
}

fn touch_phase(phase: winit::event::TouchPhase) -> TouchPhase {
    match phase {
        winit::event::TouchPhase::Started => TouchPhase::Started,
        winit::event::TouchPhase::Moved => TouchPhase::Moved,
        winit::event::TouchPhase::Ended => TouchPhase::Ended,
        winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

fn to_vec2(position: PhysicalPosition<f64>) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32)
}

struct GpuApp {
    state: AppState,
    assets_dir: PathBuf,
    texture: String,
    window: Option<Arc<Window>>,
    renderer: Option<WgpuRenderer>,
}

impl GpuApp {
    fn new(assets_dir: PathBuf, texture: String) -> Self {
        Self {
            state: AppState::new(),
            assets_dir,
            texture,
            window: None,
            renderer: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("MackCube")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();

        let gpu = GpuSurface::new(window.clone(), size.width, size.height)?;
        let textures = Box::new(Fallback::new(AssetDir::new(&self.assets_dir)));
        let mut renderer = WgpuRenderer::new(gpu, textures, self.texture.clone());
        renderer.on_surface_created(&self.state.lighting)?;
        renderer.on_resize(size.width, size.height);

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            tracing::error!("graphics initialization failed: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.on_resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(code);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor = to_vec2(position);
                let cursor = self.state.cursor;
                self.state.pointer(MOUSE_POINTER_ID, TouchPhase::Moved, cursor);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: button_state,
                ..
            } => {
                let phase = match button_state {
                    ElementState::Pressed => TouchPhase::Started,
                    ElementState::Released => TouchPhase::Ended,
                };
                let cursor = self.state.cursor;
                self.state.pointer(MOUSE_POINTER_ID, phase, cursor);
            }
            WindowEvent::Touch(touch) => {
                self.state
                    .pointer(touch.id, touch_phase(touch.phase), to_vec2(touch.location));
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.render_frame(&mut self.state.scene) {
                        tracing::error!("frame failed: {e}");
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("mackcube-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.assets_dir, cli.texture);
    event_loop.run_app(&mut app)?;

    Ok(())
}
