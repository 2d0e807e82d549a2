use serde::{Deserialize, Serialize};

use crate::core::physics::ColliderMaterial;

/// Texture atlas description: the atlases and every named region in them.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasManifest {
    /// List of texture pages.
    pub atlases: Vec<AtlasDescriptor>,
    /// Named regions, in file order.
    #[serde(default)]
    pub regions: Vec<RegionDescriptor>,
}

/// Describes a single texture page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "sprites").
    pub name: String,
    /// Relative path to the PNG file (e.g., "sprites.png").
    pub path: String,
    /// Page width in pixels.
    pub width: u32,
    /// Page height in pixels.
    pub height: u32,
}

/// Describes a named rectangle within an atlas page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionDescriptor {
    pub name: String,
    /// Index into the atlases array.
    pub atlas: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Collision shape file: named bodies made of fixtures, in asset pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeManifest {
    pub bodies: Vec<BodyDescriptor>,
}

/// Body kind as written in shape files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKindDescriptor {
    #[default]
    Dynamic,
    Fixed,
    Kinematic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: BodyKindDescriptor,
    pub fixtures: Vec<FixtureDescriptor>,
}

/// One fixture. Exactly one of `polygon` or `circle` is expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDescriptor {
    #[serde(default = "default_density")]
    pub density: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
    #[serde(default = "default_restitution")]
    pub restitution: f32,
    /// Convex polygon vertices as `[x, y]` pairs.
    #[serde(default)]
    pub polygon: Option<Vec<[f32; 2]>>,
    #[serde(default)]
    pub circle: Option<CircleDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleDescriptor {
    #[serde(default)]
    pub center: [f32; 2],
    pub radius: f32,
}

fn default_density() -> f32 {
    ColliderMaterial::default().density
}

fn default_friction() -> f32 {
    ColliderMaterial::default().friction
}

fn default_restitution() -> f32 {
    ColliderMaterial::default().restitution
}

impl ShapeManifest {
    /// Parse a shape file from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_atlas() {
        let json = r#"{
            "atlases": [
                { "name": "sprites", "path": "sprites.png", "width": 256, "height": 128 }
            ],
            "regions": [
                { "name": "crate", "atlas": 0, "x": 0, "y": 0, "width": 100, "height": 100 }
            ]
        }"#;
        let manifest = AtlasManifest::from_json(json).unwrap();
        assert_eq!(manifest.atlases.len(), 1);
        assert_eq!(manifest.atlases[0].width, 256);
        assert_eq!(manifest.regions[0].name, "crate");
    }

    #[test]
    fn parse_shapes_with_defaults() {
        let json = r#"{
            "bodies": [
                { "name": "crate", "fixtures": [
                    { "friction": 0.8, "polygon": [[0, 0], [100, 0], [100, 100], [0, 100]] }
                ] },
                { "name": "cherry", "kind": "fixed", "fixtures": [
                    { "circle": { "radius": 12 } }
                ] }
            ]
        }"#;
        let manifest = ShapeManifest::from_json(json).unwrap();
        let crate_body = &manifest.bodies[0];
        assert_eq!(crate_body.kind, BodyKindDescriptor::Dynamic);
        let fixture = &crate_body.fixtures[0];
        assert_eq!(fixture.friction, 0.8);
        assert_eq!(fixture.density, 1.0);
        assert_eq!(fixture.restitution, 0.3);
        assert_eq!(fixture.polygon.as_ref().unwrap().len(), 4);

        let cherry = &manifest.bodies[1];
        assert_eq!(cherry.kind, BodyKindDescriptor::Fixed);
        let circle = cherry.fixtures[0].circle.as_ref().unwrap();
        assert_eq!(circle.center, [0.0, 0.0]);
        assert_eq!(circle.radius, 12.0);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"{ "bodies": [ { "name": "x", "kind": "floaty", "fixtures": [] } ] }"#;
        assert!(ShapeManifest::from_json(json).is_err());
    }
}
