use std::collections::HashMap;

use glam::Vec2;

use crate::api::error::CatalogError;
use crate::api::types::SpriteId;
use crate::assets::manifest::AtlasManifest;

/// Identifies which texture page a sprite belongs to.
/// Index into the AtlasManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Pixel rectangle inside an atlas page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A drawable atlas region with its size in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAsset {
    pub name: String,
    pub atlas: AtlasId,
    pub region: Region,
    /// Region size multiplied by the visual scale.
    pub size: Vec2,
    /// Rotation pivot relative to the sprite's lower-left corner.
    pub origin: Vec2,
}

/// Catalog of named sprites, built from an AtlasManifest.
///
/// Names resolve to a [`SpriteId`] once; draws then index by id.
#[derive(Debug, Default)]
pub struct SpriteCatalog {
    sprites: Vec<SpriteAsset>,
    by_name: HashMap<String, SpriteId>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a parsed manifest, scaling every region by `scale`
    /// so sprites share the physics unit system.
    pub fn from_manifest(manifest: &AtlasManifest, scale: Vec2) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            sprites: Vec::with_capacity(manifest.regions.len()),
            by_name: HashMap::with_capacity(manifest.regions.len()),
        };
        for desc in &manifest.regions {
            if desc.atlas as usize >= manifest.atlases.len() {
                return Err(CatalogError::MissingAtlas {
                    region: desc.name.clone(),
                    atlas: desc.atlas,
                });
            }
            if desc.width == 0 || desc.height == 0 {
                return Err(CatalogError::InvalidRegion(desc.name.clone()));
            }
            let region = Region {
                x: desc.x,
                y: desc.y,
                width: desc.width,
                height: desc.height,
            };
            catalog.insert(SpriteAsset {
                name: desc.name.clone(),
                atlas: AtlasId(desc.atlas),
                region,
                size: Vec2::new(desc.width as f32, desc.height as f32) * scale,
                origin: Vec2::ZERO,
            })?;
        }
        Ok(catalog)
    }

    /// Parse an atlas manifest and build the catalog in one go.
    pub fn from_json(json: &str, scale: Vec2) -> Result<Self, CatalogError> {
        let manifest = AtlasManifest::from_json(json)?;
        Self::from_manifest(&manifest, scale)
    }

    /// Register a sprite. Names are unique.
    pub fn insert(&mut self, sprite: SpriteAsset) -> Result<SpriteId, CatalogError> {
        if self.by_name.contains_key(&sprite.name) {
            return Err(CatalogError::Duplicate {
                kind: "sprite",
                name: sprite.name,
            });
        }
        let id = SpriteId(self.sprites.len() as u32);
        self.by_name.insert(sprite.name.clone(), id);
        self.sprites.push(sprite);
        Ok(id)
    }

    /// Resolve a name to its id.
    pub fn resolve(&self, name: &str) -> Result<SpriteId, CatalogError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::UnknownSprite(name.to_string()))
    }

    /// Look up a sprite by name.
    pub fn lookup(&self, name: &str) -> Result<&SpriteAsset, CatalogError> {
        let id = self.resolve(name)?;
        Ok(&self.sprites[id.0 as usize])
    }

    /// Look up a sprite by a previously resolved id.
    pub fn get(&self, id: SpriteId) -> Option<&SpriteAsset> {
        self.sprites.get(id.0 as usize)
    }

    /// All sprite names, in atlas order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
