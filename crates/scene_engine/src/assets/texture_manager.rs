//! Texture registry
//!
//! Hands out stable handles for texture files under the resource directory.
//! Only the image header is read, to learn the pixel size sprites default to.

use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::AssetError;

new_key_type! {
    /// Handle to a registered texture
    pub struct TextureHandle;
}

/// Name of the built-in 1x1 white texture
pub const DEFAULT_TEXTURE_NAME: &str = "white1x1.png";

/// What the registry knows about a texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// File name as passed to [`TextureManager::load`]
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Texture registry
pub struct TextureManager {
    resource_dir: PathBuf,
    textures: SlotMap<TextureHandle, TextureInfo>,
    by_name: HashMap<String, TextureHandle>,
    default_texture: TextureHandle,
}

impl TextureManager {
    /// Create a registry rooted at `resource_dir` with the default texture registered
    pub fn new(resource_dir: impl Into<PathBuf>) -> Self {
        let mut textures = SlotMap::with_key();
        let default_texture = textures.insert(TextureInfo {
            name: DEFAULT_TEXTURE_NAME.to_string(),
            width: 1,
            height: 1,
        });

        let mut by_name = HashMap::new();
        by_name.insert(DEFAULT_TEXTURE_NAME.to_string(), default_texture);

        Self {
            resource_dir: resource_dir.into(),
            textures,
            by_name,
            default_texture,
        }
    }

    /// Directory file names are resolved against
    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    /// Register a texture file, returning the cached handle if already loaded
    pub fn load(&mut self, file_name: &str) -> Result<TextureHandle, AssetError> {
        if let Some(&handle) = self.by_name.get(file_name) {
            return Ok(handle);
        }

        let path = self.resource_dir.join(file_name);
        if !path.is_file() {
            return Err(AssetError::NotFound(path));
        }

        let (width, height) = image::image_dimensions(&path).map_err(|e| AssetError::Decode {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let handle = self.textures.insert(TextureInfo {
            name: file_name.to_string(),
            width,
            height,
        });
        self.by_name.insert(file_name.to_string(), handle);

        log::debug!("Loaded texture {} ({}x{})", path.display(), width, height);
        Ok(handle)
    }

    /// The built-in white texture
    pub fn default_texture(&self) -> TextureHandle {
        self.default_texture
    }

    /// Info for a handle
    pub fn info(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(handle)
    }

    /// Number of registered textures, including the default one
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Always false: the default texture is registered at construction
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scene_engine_tex_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_reads_dimensions_and_caches() {
        let dir = fixture_dir("cache");
        image::RgbaImage::new(64, 32).save(dir.join("sprite.png")).unwrap();

        let mut textures = TextureManager::new(&dir);
        let first = textures.load("sprite.png").unwrap();
        let second = textures.load("sprite.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(textures.len(), 2);
        let info = textures.info(first).unwrap();
        assert_eq!((info.width, info.height), (64, 32));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_texture_needs_no_file() {
        let mut textures = TextureManager::new("does/not/exist");
        let default = textures.default_texture();
        assert_eq!(textures.load(DEFAULT_TEXTURE_NAME).unwrap(), default);
        assert_eq!(textures.info(default).unwrap().width, 1);
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let dir = fixture_dir("errors");
        std::fs::write(dir.join("broken.png"), b"not a png").unwrap();

        let mut textures = TextureManager::new(&dir);
        assert!(matches!(textures.load("missing.png"), Err(AssetError::NotFound(_))));
        assert!(matches!(textures.load("broken.png"), Err(AssetError::Decode { .. })));
        assert_eq!(textures.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
