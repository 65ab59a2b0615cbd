#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Crossing.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The backend owns the frame loop: it measures the frame delta, polls
//! released arrow keys, draws the board and then hands a [`Canvas`] to the
//! caller's update closure so the world can be advanced and drawn.

mod sprites;

use anyhow::Result;
use crossing_core::{Canvas, KeyCode, Position, SpriteKey};
use crossing_rendering::{
    to_vec2, Color, FrameInput, Presentation, RenderingBackend, SpriteFootprint,
};
use glam::Vec2;
use log::{info, warn};
use macroquad::input::{is_key_pressed, is_key_released, KeyCode as MacroquadKeyCode};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use self::sprites::SpriteAtlas;

const POLLED_KEYS: [MacroquadKeyCode; 4] = [
    MacroquadKeyCode::Left,
    MacroquadKeyCode::Up,
    MacroquadKeyCode::Right,
    MacroquadKeyCode::Down,
];

/// Translates a macroquad key into the raw platform code the input router expects.
#[must_use]
pub fn translate_key(key: MacroquadKeyCode) -> Option<KeyCode> {
    match key {
        MacroquadKeyCode::Left => Some(KeyCode::ARROW_LEFT),
        MacroquadKeyCode::Up => Some(KeyCode::ARROW_UP),
        MacroquadKeyCode::Right => Some(KeyCode::ARROW_RIGHT),
        MacroquadKeyCode::Down => Some(KeyCode::ARROW_DOWN),
        _ => None,
    }
}

#[derive(Clone, Debug, Default)]
struct KeyboardInput {
    quit_requested: bool,
    released: Vec<KeyCode>,
}

impl KeyboardInput {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(MacroquadKeyCode::Escape);
        let released = POLLED_KEYS
            .into_iter()
            .filter(|key| is_key_released(*key))
            .filter_map(translate_key)
            .collect();

        Self {
            quit_requested,
            released,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
    manifest_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: true,
            manifest_path: Self::default_manifest_path(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default manifest path relative to the working directory.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }

    /// Overrides the sprite manifest location.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

/// Uniform scale and letterbox offset mapping board units onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewMetrics {
    /// Screen pixels per board unit.
    pub scale: f32,
    /// Screen-space position of the board origin.
    pub offset: Vec2,
}

impl ViewMetrics {
    /// Fits a board of `canvas_size` inside the screen, centred and aspect-preserving.
    #[must_use]
    pub fn fit(canvas_size: Vec2, screen_width: f32, screen_height: f32) -> Self {
        if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
            return Self {
                scale: 1.0,
                offset: Vec2::ZERO,
            };
        }

        let scale = (screen_width / canvas_size.x)
            .min(screen_height / canvas_size.y)
            .max(0.0);
        let scaled = canvas_size * scale;
        let offset = Vec2::new(
            ((screen_width - scaled.x) * 0.5).max(0.0),
            ((screen_height - scaled.y) * 0.5).max(0.0),
        );

        Self { scale, offset }
    }

    /// Converts a board position into screen space.
    #[must_use]
    pub fn to_screen(&self, position: Position) -> Vec2 {
        self.offset + to_vec2(position) * self.scale
    }
}

struct MacroquadCanvas<'a> {
    atlas: Option<&'a SpriteAtlas>,
    metrics: ViewMetrics,
}

impl Canvas for MacroquadCanvas<'_> {
    fn draw_sprite(&mut self, sprite: SpriteKey, position: Position) {
        let origin = self.metrics.to_screen(position);
        let scale = self.metrics.scale;
        if let Some(atlas) = self.atlas {
            if atlas.draw(sprite, origin, scale) {
                return;
            }
        }

        let footprint = SpriteFootprint::of(sprite);
        let corner = origin + footprint.offset * scale;
        let size = footprint.size * scale;
        macroquad::shapes::draw_rectangle(
            corner.x,
            corner.y,
            size.x,
            size.y,
            to_macroquad_color(footprint.color),
        );
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a frame and returns the average rate once a full second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

fn load_atlas(enabled: bool, manifest_path: &Path) -> Option<SpriteAtlas> {
    if !enabled {
        return None;
    }

    match SpriteAtlas::from_manifest_path(manifest_path) {
        Ok(atlas) => {
            info!(
                "loaded {} sprites from {}",
                atlas.len(),
                manifest_path.display()
            );
            Some(atlas)
        }
        Err(error) => {
            warn!("sprite atlas unavailable, drawing flat shapes: {error:#}");
            None
        }
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_frame: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut dyn Canvas) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
            manifest_path,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            canvas_size,
            board,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: canvas_size.x.round() as i32,
            window_height: canvas_size.y.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let sprite_atlas = load_atlas(load_sprites, &manifest_path);
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardInput::poll();
                if keyboard.quit_requested {
                    info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let metrics = ViewMetrics::fit(
                    canvas_size,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let mut canvas = MacroquadCanvas {
                    atlas: sprite_atlas.as_ref(),
                    metrics,
                };
                board.draw(&mut canvas);
                update_frame(
                    frame_dt,
                    FrameInput {
                        released_keys: keyboard.released,
                    },
                    &mut canvas,
                );

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
