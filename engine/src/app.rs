use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct AppConfig {
    pub title: String,
    /// Logical frame size; the window is created at this size and is not resizable.
    pub frame_size: SurfaceSize,
    pub vsync: Option<bool>,
    pub frame_interval: Duration,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    exit_requested: bool,
}

impl AppContext {
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

/// Keyboard activity collected between two redraws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Key presses in arrival order, including OS key-repeat.
    pub keys_pressed: Vec<VirtualKeyCode>,
    /// Printable characters typed, in arrival order.
    pub text: Vec<char>,
}

impl InputFrame {
    pub fn pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.text.clear();
    }
}

pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    );

    fn render(&self, state: &Self::State, renderer: &mut dyn Renderer2d);
}

pub fn run_game<G: GameApp + 'static>(
    config: AppConfig,
    mut game: G,
) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let frame_size = config.frame_size;
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(LogicalSize::new(frame_size.width, frame_size.height))
        .with_resizable(false)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels_builder =
        PixelsBuilder::new(frame_size.width, frame_size.height, surface_texture);
    if let Some(vsync) = config.vsync {
        pixels_builder = pixels_builder.enable_vsync(vsync);
    }
    let pixels = pixels_builder.build()?;
    let renderer = PixelsRenderer2d::new(pixels, frame_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        exit_requested: false,
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let frame_interval = config.frame_interval.max(Duration::from_millis(1));
    let mut last_frame = Instant::now();

    tracing::debug!(?frame_size, "window loop started");

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::Resized(size) => {
                let surface = SurfaceSize::new(size.width, size.height);
                if let Err(err) = ctx.renderer.resize_surface(surface) {
                    tracing::warn!("resize failed: {err}");
                }
            }
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                let surface = SurfaceSize::new(new_inner_size.width, new_inner_size.height);
                if let Err(err) = ctx.renderer.resize_surface(surface) {
                    tracing::warn!("resize failed: {err}");
                }
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(key),
                        ..
                    },
                ..
            } => {
                input.keys_pressed.push(key);
            }
            WindowEvent::ReceivedCharacter(ch) if !ch.is_control() => {
                input.text.push(ch);
            }
            _ => {}
        },
        Event::RedrawRequested(_) => {
            let now = Instant::now();
            let dt = now.saturating_duration_since(last_frame);
            last_frame = now;

            game.update_state(&mut state, &input, dt, &mut ctx);
            input.clear();

            ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
            if let Err(err) = ctx.renderer.present() {
                tracing::warn!("present failed: {err}");
                *control_flow = ControlFlow::Exit;
                return;
            }

            if ctx.exit_requested {
                *control_flow = ControlFlow::Exit;
            }
        }
        Event::MainEventsCleared => {
            if last_frame.elapsed() >= frame_interval {
                ctx.window.request_redraw();
            }
            if !matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
                *control_flow = ControlFlow::WaitUntil(last_frame + frame_interval);
            }
        }
        _ => {}
    });
}
