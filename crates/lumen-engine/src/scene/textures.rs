use crate::shading::ImageTexture;

/// Handle to a texture owned by a [`TextureSet`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TextureId(pub u32);

/// CPU-side texture storage addressed by [`TextureId`].
///
/// Ids are dense and never reused; textures live as long as the set.
#[derive(Debug, Default)]
pub struct TextureSet {
    textures: Vec<ImageTexture>,
}

impl TextureSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, texture: ImageTexture) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        log::debug!(
            "texture {:?} registered ({}x{})",
            id,
            texture.width(),
            texture.height()
        );
        self.textures.push(texture);
        id
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&ImageTexture> {
        self.textures.get(id.0 as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Iterates `(id, texture)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TextureId, &ImageTexture)> {
        self.textures
            .iter()
            .enumerate()
            .map(|(i, t)| (TextureId(i as u32), t))
    }
}
