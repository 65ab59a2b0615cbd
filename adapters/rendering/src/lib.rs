#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Crossing adapters.

use anyhow::Result as AnyResult;
use crossing_core::{Canvas, GridGeometry, KeyCode, Position, SpriteKey};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// Pixel dimensions of every sprite image shipped with the game.
pub const SPRITE_IMAGE_SIZE: Vec2 = Vec2::new(101.0, 171.0);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Visible region of a sprite inside its padded image, used when textures are unavailable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteFootprint {
    /// Offset of the visible region from the image's top-left corner.
    pub offset: Vec2,
    /// Size of the visible region.
    pub size: Vec2,
    /// Flat color standing in for the texture.
    pub color: Color,
}

impl SpriteFootprint {
    /// Footprint of the provided sprite.
    #[must_use]
    pub const fn of(sprite: SpriteKey) -> Self {
        match sprite {
            SpriteKey::EnemyBug => Self {
                offset: Vec2::new(1.0, 77.0),
                size: Vec2::new(99.0, 66.0),
                color: Color::from_rgb_u8(0xc8, 0x2a, 0x36),
            },
            SpriteKey::CharBoy => Self {
                offset: Vec2::new(17.0, 63.0),
                size: Vec2::new(67.0, 76.0),
                color: Color::from_rgb_u8(0xff, 0xc1, 0x07),
            },
            SpriteKey::WaterBlock => Self::tile(Color::from_rgb_u8(0x3b, 0x7d, 0xd8)),
            SpriteKey::StoneBlock => Self::tile(Color::from_rgb_u8(0x8a, 0x8a, 0x8a)),
            SpriteKey::GrassBlock => Self::tile(Color::from_rgb_u8(0x2f, 0x95, 0x32)),
        }
    }

    const fn tile(color: Color) -> Self {
        Self {
            offset: Vec2::new(0.0, 50.0),
            size: Vec2::new(101.0, 121.0),
            color,
        }
    }
}

/// Input snapshot gathered by adapters before updating the world.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Raw key codes released since the previous frame, in release order.
    pub released_keys: Vec<KeyCode>,
}

/// Describes the tiled background drawn beneath every entity.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of tile columns.
    pub columns: u32,
    /// Sprite used for each row, top row first.
    pub rows: Vec<SpriteKey>,
    /// Horizontal distance between tile origins.
    pub tile_width: f32,
    /// Vertical distance between tile origins.
    pub row_height: f32,
}

impl BoardPresentation {
    /// Vertical distance between rows of the classic board.
    pub const CLASSIC_ROW_HEIGHT: f32 = 83.0;

    /// Creates a new board descriptor.
    ///
    /// Returns an error when the board would have no columns, no rows or a
    /// non-positive tile size.
    pub fn new(
        columns: u32,
        rows: Vec<SpriteKey>,
        tile_width: f32,
        row_height: f32,
    ) -> std::result::Result<Self, RenderingError> {
        if columns == 0 || rows.is_empty() {
            return Err(RenderingError::EmptyBoard {
                columns,
                rows: rows.len(),
            });
        }
        if !(tile_width > 0.0 && row_height > 0.0) {
            return Err(RenderingError::InvalidTileSize {
                tile_width,
                row_height,
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_width,
            row_height,
        })
    }

    /// Board of the classic game: water, three stone lanes, two grass rows.
    pub fn classic(geometry: &GridGeometry) -> std::result::Result<Self, RenderingError> {
        let columns = (geometry.canvas_width / geometry.cell_width).floor();
        Self::new(
            columns.max(0.0) as u32,
            vec![
                SpriteKey::WaterBlock,
                SpriteKey::StoneBlock,
                SpriteKey::StoneBlock,
                SpriteKey::StoneBlock,
                SpriteKey::GrassBlock,
                SpriteKey::GrassBlock,
            ],
            geometry.cell_width,
            Self::CLASSIC_ROW_HEIGHT,
        )
    }

    /// Iterates over every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (SpriteKey, Position)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(row, sprite)| {
            (0..self.columns).map(move |column| {
                let position = Position::new(
                    column as f32 * self.tile_width,
                    row as f32 * self.row_height,
                );
                (*sprite, position)
            })
        })
    }

    /// Draws every tile through the provided canvas.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for (sprite, position) in self.tiles() {
            canvas.draw_sprite(sprite, position);
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Size of the drawable area.
    pub canvas_size: Vec2,
    /// Background drawn before the world each frame.
    pub board: BoardPresentation,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        canvas_size: Vec2,
        board: BoardPresentation,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            canvas_size,
            board,
        }
    }
}

/// Rendering backend capable of driving and presenting a Crossing session.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// Each frame the backend clears the screen, draws the board, then calls
    /// `update_frame` with the frame delta, the input captured since the last
    /// frame and a canvas the closure renders the world onto.
    fn run<F>(self, presentation: Presentation, update_frame: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut dyn Canvas) + 'static;
}

/// Single sprite draw captured by a [`RecordingCanvas`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    /// Sprite that was drawn.
    pub sprite: SpriteKey,
    /// Top-left corner of the sprite.
    pub position: Vec2,
}

/// Canvas that records draw calls instead of rasterising them.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    /// Creates an empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls recorded so far, in submission order.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Removes and returns the recorded draw calls.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Canvas for RecordingCanvas {
    fn draw_sprite(&mut self, sprite: SpriteKey, position: Position) {
        self.calls.push(DrawCall {
            sprite,
            position: to_vec2(position),
        });
    }
}

/// Converts a world position into a glam vector.
#[must_use]
pub const fn to_vec2(position: Position) -> Vec2 {
    Vec2::new(position.x, position.y)
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The board must contain at least one column and one row.
    EmptyBoard {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: usize,
    },
    /// Tiles must have a positive size.
    InvalidTileSize {
        /// Provided tile width.
        tile_width: f32,
        /// Provided row height.
        row_height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBoard { columns, rows } => {
                write!(
                    f,
                    "board must have at least one column and row (received {columns}x{rows})"
                )
            }
            Self::InvalidTileSize {
                tile_width,
                row_height,
            } => {
                write!(
                    f,
                    "tile size must be positive (received {tile_width}x{row_height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
