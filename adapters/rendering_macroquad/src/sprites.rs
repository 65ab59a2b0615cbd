use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use crossing_core::SpriteKey;
use crossing_rendering::SPRITE_IMAGE_SIZE;
use glam::Vec2;
use log::warn;
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of textures loaded from the sprite manifest.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads sprites from the manifest located at the provided path.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Draws the sprite with its top-left corner at `position`, scaled by `scale`.
    ///
    /// Returns `false` when the atlas holds no texture for the key.
    pub(crate) fn draw(&self, key: SpriteKey, position: Vec2, scale: f32) -> bool {
        let Some(texture) = self.textures.get(&key).copied() else {
            return false;
        };

        let size = SPRITE_IMAGE_SIZE * scale;
        let params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(size.x, size.y)),
            ..DrawTextureParams::default()
        };
        texture::draw_texture_ex(texture, position.x, position.y, WHITE, params);
        true
    }

    /// Number of textures stored in the atlas.
    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    /// Loads every entry, skipping sprites whose texture cannot be loaded.
    ///
    /// Skipped sprites are drawn as flat shapes.
    fn from_entries(
        entries: Vec<(SpriteKey, PathBuf)>,
        loader: &mut impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            if textures.contains_key(&key) {
                bail!("duplicate sprite entry for {key:?}");
            }
            match loader(key, &path) {
                Ok(texture) => {
                    let _ = textures.insert(key, texture);
                }
                Err(error) => {
                    warn!(
                        "skipping sprite {} from {}: {error:#}",
                        key.name(),
                        path.display()
                    );
                }
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_key: SpriteKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    sprites: HashMap<String, String>,
}

/// Parses the manifest into one entry per known sprite in canonical order.
///
/// Sprites may be omitted; the renderer falls back to flat shapes for them.
fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(SpriteKey, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.sprites {
        let key = SpriteKey::from_name(&name)
            .with_context(|| format!("unknown sprite key `{name}` in manifest"))?;
        if resolved.insert(key, base_path.join(relative_path)).is_some() {
            bail!("sprite manifest contains duplicate entry for {key:?}");
        }
    }

    Ok(SpriteKey::ALL
        .into_iter()
        .filter_map(|key| resolved.remove(&key).map(|path| (key, path)))
        .collect())
}
