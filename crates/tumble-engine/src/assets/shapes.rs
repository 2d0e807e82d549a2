use std::collections::HashMap;

use glam::Vec2;

use crate::api::error::CatalogError;
use crate::assets::manifest::{BodyKindDescriptor, FixtureDescriptor, ShapeManifest};
use crate::core::physics::{BodyKind, ColliderMaterial, FixtureGeometry, FixtureTemplate};

/// A named, reusable body definition in asset-native units.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTemplate {
    pub name: String,
    pub kind: BodyKind,
    pub fixtures: Vec<FixtureTemplate>,
}

impl ShapeTemplate {
    /// Fixtures converted to simulation units.
    pub fn scaled_fixtures(&self, scale: Vec2) -> Vec<FixtureTemplate> {
        self.fixtures
            .iter()
            .map(|f| FixtureTemplate::new(f.geometry.scaled(scale), f.material))
            .collect()
    }
}

/// Catalog of named collision shapes.
///
/// Geometry is only checked when a body is built, after scaling.
#[derive(Debug, Default)]
pub struct ShapeCatalog {
    shapes: HashMap<String, ShapeTemplate>,
}

impl ShapeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &ShapeManifest) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            shapes: HashMap::with_capacity(manifest.bodies.len()),
        };
        for body in &manifest.bodies {
            let fixtures = body
                .fixtures
                .iter()
                .enumerate()
                .map(|(index, fixture)| fixture_template(&body.name, index, fixture))
                .collect::<Result<Vec<_>, _>>()?;
            catalog.insert(ShapeTemplate {
                name: body.name.clone(),
                kind: match body.kind {
                    BodyKindDescriptor::Dynamic => BodyKind::Dynamic,
                    BodyKindDescriptor::Fixed => BodyKind::Fixed,
                    BodyKindDescriptor::Kinematic => BodyKind::Kinematic,
                },
                fixtures,
            })?;
        }
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let manifest = ShapeManifest::from_json(json)?;
        Self::from_manifest(&manifest)
    }

    /// Register a template. Names are unique.
    pub fn insert(&mut self, template: ShapeTemplate) -> Result<(), CatalogError> {
        if self.shapes.contains_key(&template.name) {
            return Err(CatalogError::Duplicate {
                kind: "shape",
                name: template.name,
            });
        }
        self.shapes.insert(template.name.clone(), template);
        Ok(())
    }

    /// Look up a template by name.
    pub fn lookup(&self, name: &str) -> Result<&ShapeTemplate, CatalogError> {
        self.shapes
            .get(name)
            .ok_or_else(|| CatalogError::UnknownShape(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn fixture_template(
    shape: &str,
    index: usize,
    desc: &FixtureDescriptor,
) -> Result<FixtureTemplate, CatalogError> {
    let geometry = match (&desc.polygon, &desc.circle) {
        (Some(vertices), None) => FixtureGeometry::Polygon(
            vertices.iter().map(|&[x, y]| Vec2::new(x, y)).collect(),
        ),
        (None, Some(circle)) => FixtureGeometry::Circle {
            center: Vec2::from(circle.center),
            radius: circle.radius,
        },
        _ => {
            return Err(CatalogError::InvalidFixture {
                shape: shape.to_string(),
                index,
            })
        }
    };
    Ok(FixtureTemplate::new(
        geometry,
        ColliderMaterial {
            restitution: desc.restitution,
            friction: desc.friction,
            density: desc.density,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: &str = r#"{
        "bodies": [
            { "name": "crate", "fixtures": [
                { "density": 2, "friction": 0.4, "restitution": 0.1,
                  "polygon": [[0, 0], [100, 0], [100, 100], [0, 100]] }
            ] },
            { "name": "cherries", "kind": "fixed", "fixtures": [
                { "circle": { "center": [20, 20], "radius": 18 } },
                { "circle": { "center": [44, 16], "radius": 14 } }
            ] }
        ]
    }"#;

    #[test]
    fn loads_templates() {
        let catalog = ShapeCatalog::from_json(SHAPES).unwrap();
        assert_eq!(catalog.len(), 2);

        let crate_shape = catalog.lookup("crate").unwrap();
        assert_eq!(crate_shape.kind, BodyKind::Dynamic);
        assert_eq!(crate_shape.fixtures[0].material.density, 2.0);
        assert_eq!(crate_shape.fixtures[0].material.friction, 0.4);

        let cherries = catalog.lookup("cherries").unwrap();
        assert_eq!(cherries.kind, BodyKind::Fixed);
        assert_eq!(cherries.fixtures.len(), 2);
    }

    #[test]
    fn scaled_fixtures_convert_units() {
        let catalog = ShapeCatalog::from_json(SHAPES).unwrap();
        let fixtures = catalog.lookup("crate").unwrap().scaled_fixtures(Vec2::splat(0.05));
        match &fixtures[0].geometry {
            FixtureGeometry::Polygon(vertices) => {
                assert_eq!(vertices[2], Vec2::new(5.0, 5.0));
            }
            other => panic!("expected polygon, got {:?}", other),
        }
        // The stored template stays in asset units.
        match &catalog.lookup("crate").unwrap().fixtures[0].geometry {
            FixtureGeometry::Polygon(vertices) => assert_eq!(vertices[2], Vec2::new(100.0, 100.0)),
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn unknown_shape_is_a_named_error() {
        let catalog = ShapeCatalog::from_json(SHAPES).unwrap();
        match catalog.lookup("barrel") {
            Err(CatalogError::UnknownShape(name)) => assert_eq!(name, "barrel"),
            other => panic!("expected UnknownShape, got {:?}", other),
        }
    }

    #[test]
    fn fixture_needs_exactly_one_geometry() {
        let both = r#"{ "bodies": [ { "name": "odd", "fixtures": [
            { "polygon": [[0,0],[1,0],[0,1]], "circle": { "radius": 1 } }
        ] } ] }"#;
        assert!(matches!(
            ShapeCatalog::from_json(both),
            Err(CatalogError::InvalidFixture { index: 0, .. })
        ));

        let neither = r#"{ "bodies": [ { "name": "odd", "fixtures": [ { "density": 1 } ] } ] }"#;
        assert!(matches!(
            ShapeCatalog::from_json(neither),
            Err(CatalogError::InvalidFixture { .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dup = r#"{ "bodies": [
            { "name": "crate", "fixtures": [ { "circle": { "radius": 1 } } ] },
            { "name": "crate", "fixtures": [ { "circle": { "radius": 2 } } ] }
        ] }"#;
        assert!(matches!(
            ShapeCatalog::from_json(dup),
            Err(CatalogError::Duplicate { kind: "shape", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ShapeCatalog::from_json("{ \"bodies\": 3 }"),
            Err(CatalogError::Parse(_))
        ));
    }
}
