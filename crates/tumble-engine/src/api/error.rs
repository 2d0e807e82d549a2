use thiserror::Error;

/// Failures resolving or loading named assets.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown shape `{0}`")]
    UnknownShape(String),

    #[error("unknown sprite `{0}`")]
    UnknownSprite(String),

    #[error("duplicate {kind} name `{name}`")]
    Duplicate { kind: &'static str, name: String },

    #[error("region `{region}` references missing atlas {atlas}")]
    MissingAtlas { region: String, atlas: u32 },

    #[error("region `{0}` has an empty size")]
    InvalidRegion(String),

    #[error("shape `{shape}` fixture {index} must have exactly one of `polygon` or `circle`")]
    InvalidFixture { shape: String, index: usize },

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fixture geometry the solver must never see.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("geometry contains a non-finite coordinate")]
    NonFinite,

    #[error("polygon has zero area")]
    ZeroArea,

    #[error("polygon is not convex")]
    NotConvex,

    #[error("circle radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("box half-extents must be positive, got {0} x {1}")]
    InvalidBox(f32, f32),

    #[error("body has no fixtures")]
    NoFixtures,
}

/// Rejected scene configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("step size must be positive, got {0}")]
    InvalidStep(f32),

    #[error("max frame delta {max_delta} is smaller than the step size {step}")]
    MaxDeltaBelowStep { max_delta: f32, step: f32 },

    #[error("solver iteration counts must be non-zero")]
    ZeroIterations,

    #[error("gravity must be finite, got ({0}, {1})")]
    InvalidGravity(f32, f32),

    #[error("visual scale must be positive, got {0} x {1}")]
    InvalidScale(f32, f32),

    #[error("minimum viewport must be positive and finite, got {0} x {1}")]
    InvalidViewport(f32, f32),

    #[error("ground friction must be positive and finite, got {0}")]
    InvalidGroundFriction(f32),

    #[error("ground half thickness must be positive and finite, got {0}")]
    InvalidGroundThickness(f32),

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything the scene loop can report to its host.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("shape `{shape}`: {source}")]
    Template {
        shape: String,
        #[source]
        source: GeometryError,
    },
}
