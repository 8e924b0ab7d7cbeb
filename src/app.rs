//! Windowed application shell
//!
//! Owns the winit window and drives the game from `RedrawRequested`: frame
//! timing, input mapping, the game update, and the window title readout.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

use hoglet_core::{Game, ItemDb, RecordingRenderer, TileGrid};
use hoglet_input::InputController;

use crate::config::AppConfig;

/// Longest simulated step; covers the first frame and focus changes
const MAX_FRAME_DT: f32 = 1.0 / 30.0;

/// Main application state
pub struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    game: Game,
    controller: InputController,
    // TODO: replace with a sprite batch renderer once a graphics backend lands
    renderer: RecordingRenderer,
    last_frame: std::time::Instant,
    show_frame_rate: bool,
    frame_count: u32,
    fps_timer: f32,
    fps: u32,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let game = Self::build_game(&config);
        let show_frame_rate = config.debug.show_frame_rate;

        Self {
            config,
            window: None,
            game,
            controller: InputController::new(),
            renderer: RecordingRenderer::new(),
            last_frame: std::time::Instant::now(),
            show_frame_rate,
            frame_count: 0,
            fps_timer: 0.0,
            fps: 0,
        }
    }

    /// Load the map and item db, then build a fresh game world
    ///
    /// Asset failures are not fatal: a bad map leaves the level without
    /// geometry and a bad item file falls back to the built-in definitions.
    fn build_game(config: &AppConfig) -> Game {
        let grid = match TileGrid::load(&config.game.map_path) {
            Ok(grid) => {
                log::info!(
                    "loaded map '{}' ({}x{} tiles)",
                    config.game.map_path,
                    grid.width(),
                    grid.height()
                );
                grid
            }
            Err(e) => {
                log::warn!(
                    "failed to load map '{}': {}; continuing without level geometry",
                    config.game.map_path,
                    e
                );
                TileGrid::empty()
            }
        };
        let items = match ItemDb::load(&config.game.items_path) {
            Ok(items) => items,
            Err(e) => {
                log::warn!(
                    "failed to load items '{}': {}; using built-in definitions",
                    config.game.items_path,
                    e
                );
                ItemDb::starter()
            }
        };
        Game::new(grid, items, config.to_game_config())
    }

    /// Run the event loop until the window closes
    pub fn run(mut self) -> Result<(), winit::error::EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn frame(&mut self) {
        let now = std::time::Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        let dt = raw_dt.min(MAX_FRAME_DT);
        self.last_frame = now;

        if self.controller.take_restart() {
            self.game = Self::build_game(&self.config);
            log::info!("game restarted");
        }
        if self.controller.take_toggle_fps() {
            self.show_frame_rate = !self.show_frame_rate;
        }

        let input = self.controller.take_frame_input();
        self.game.update(dt, &input);

        self.renderer.clear();
        self.game.draw(&mut self.renderer);

        self.frame_count += 1;
        self.fps_timer += raw_dt;
        if self.fps_timer >= 1.0 {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.fps_timer -= 1.0;
        }

        self.update_title();
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let base = &self.config.window.title;
        let title = match self.game.player().position(self.game.world()) {
            Some(pos) if self.show_frame_rate => {
                format!("{} - ({:.1}, {:.1}) - {} fps", base, pos.x, pos.y, self.fps)
            }
            Some(pos) => format!("{} - ({:.1}, {:.1})", base, pos.x, pos.y),
            None => base.clone(),
        };
        window.set_title(&title);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let mut attributes = Window::default_attributes()
                .with_title(&self.config.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ));
            if self.config.window.fullscreen {
                attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = Arc::new(
                event_loop
                    .create_window(attributes)
                    .expect("Failed to create window"),
            );
            self.last_frame = std::time::Instant::now();
            self.window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == KeyCode::Escape && event.state == ElementState::Pressed {
                        event_loop.exit();
                        return;
                    }
                    self.controller.process_keyboard(key, event.state, event.repeat);
                }
            }

            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
