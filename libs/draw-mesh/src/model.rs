//! # Model Assembly
//!
//! A model is an ordered list of named meshes, each with its own placement.
//! Placements are only applied when the model is merged for export.

use crate::mesh::Mesh;
use glam::{DMat4, DVec3};
use tracing::debug;

/// Name of the frame part.
pub const FRAME_PART: &str = "frame";

/// Name of the drawing part.
pub const DRAWING_PART: &str = "drawing";

/// Non-uniform scale followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: DVec3,
    pub translation: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: DVec3::ONE,
        translation: DVec3::ZERO,
    };

    /// Pure translation.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Scale first, then translate.
    pub fn from_scale_translation(scale: DVec3, translation: DVec3) -> Self {
        Self { scale, translation }
    }

    /// The affine matrix `T * S`.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translation) * DMat4::from_scale(self.scale)
    }

    /// Applies the transform to one point.
    #[inline]
    pub fn apply(&self, point: DVec3) -> DVec3 {
        point * self.scale + self.translation
    }
}

/// One named mesh of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPart {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Transform,
}

impl ModelPart {
    pub fn new(name: impl Into<String>, mesh: Mesh, transform: Transform) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
        }
    }

    /// The mesh with the part transform applied.
    pub fn placed_mesh(&self) -> Mesh {
        let mut mesh = self.mesh.clone();
        if self.transform != Transform::IDENTITY {
            mesh.transform(&self.transform.to_matrix());
        }
        mesh
    }
}

/// An ordered collection of placed meshes.
///
/// # Example
///
/// ```rust
/// use draw_mesh::{Mesh, Model, ModelPart, Transform};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::ZERO);
///
/// let mut model = Model::new();
/// model.add_part(ModelPart::new("dot", mesh, Transform::from_translation(DVec3::X)));
/// assert_eq!(model.merged().vertex(0), DVec3::X);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    parts: Vec<ModelPart>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a part; parts keep insertion order.
    pub fn add_part(&mut self, part: ModelPart) {
        self.parts.push(part);
    }

    #[inline]
    pub fn parts(&self) -> &[ModelPart] {
        &self.parts
    }

    /// Finds a part by name.
    pub fn part(&self, name: &str) -> Option<&ModelPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Total triangle count over all parts.
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }

    /// Applies every part's transform and concatenates the results in part
    /// order.
    pub fn merged(&self) -> Mesh {
        let mut merged = Mesh::with_capacity(
            self.parts.iter().map(|p| p.mesh.vertex_count()).sum(),
            self.triangle_count(),
        );
        for part in &self.parts {
            merged.merge(&part.placed_mesh());
        }
        merged
    }

    /// Bounding box of the merged model.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        self.merged().bounding_box()
    }
}

/// Where the drawing goes relative to the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelLayout {
    /// Outer frame size
    pub width: f64,
    pub height: f64,
    /// Height of the frame floor the drawing stands on
    pub frame_depth: f64,
    /// Size the traced raster is scaled to
    pub drawing_width: f64,
    pub drawing_height: f64,
    /// Size of the traced raster in pixels
    pub raster_width: f64,
    pub raster_height: f64,
}

impl ModelLayout {
    /// Placement of the frame: centred on the origin in x and y.
    pub fn frame_transform(&self) -> Transform {
        Transform::from_translation(DVec3::new(-self.width / 2.0, -self.height / 2.0, 0.0))
    }

    /// Placement of the drawing: raster pixels scaled to the drawing size
    /// with y flipped (raster y points down), centred on the origin and
    /// lifted onto the frame floor.
    pub fn drawing_transform(&self) -> Transform {
        Transform::from_scale_translation(
            DVec3::new(
                self.drawing_width / self.raster_width,
                -(self.drawing_height / self.raster_height),
                1.0,
            ),
            DVec3::new(
                -self.drawing_width / 2.0,
                self.drawing_height / 2.0,
                self.frame_depth,
            ),
        )
    }
}

/// Combines the frame and the extruded drawing into one model.
///
/// The drawing mesh is expected in raster coordinates (x right, y down,
/// base at z = 0); the frame with its minimum corner at the origin.
pub fn assemble_model(frame: Mesh, drawing: Mesh, layout: &ModelLayout) -> Model {
    debug!(
        frame_triangles = frame.triangle_count(),
        drawing_triangles = drawing.triangle_count(),
        "Assembling model"
    );
    let mut model = Model::new();
    model.add_part(ModelPart::new(FRAME_PART, frame, layout.frame_transform()));
    model.add_part(ModelPart::new(
        DRAWING_PART,
        drawing,
        layout.drawing_transform(),
    ));
    model
}
