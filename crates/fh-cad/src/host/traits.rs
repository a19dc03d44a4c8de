//! Drafting host trait definitions
//!
//! These types define the interface a CAD application exposes to the
//! fastener command: sketches, constraints, profiles, extrusions and the
//! change history.

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::feature::ExtrudeInput;
use crate::sketch::{SketchConstraint, SketchError, SketchPlane};

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a fresh random ID
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a sketch
    SketchId
);
uuid_id!(
    /// Identifier of a component (a container of sketches and features)
    ComponentId
);
uuid_id!(
    /// Identifier of a solid feature
    FeatureId
);
uuid_id!(
    /// Identifier of a named history group
    TimelineGroupId
);

/// Unique identifier for a face within a solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceId {
    /// ID of the solid this face belongs to
    pub solid_id: Uuid,
    /// Index of the face within the solid
    pub index: u32,
}

impl FaceId {
    /// Create a new face ID
    pub fn new(solid_id: Uuid, index: u32) -> Self {
        Self { solid_id, index }
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.solid_id, self.index)
    }
}

/// Information about a face
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceInfo {
    /// Unique identifier for this face
    pub id: FaceId,
    /// Center point of the face
    pub center: Vec3,
    /// Normal vector of the face
    pub normal: Vec3,
    /// Approximate area of the face
    pub area: f32,
}

impl FaceInfo {
    /// Create a new face info
    pub fn new(id: FaceId, center: Vec3, normal: Vec3, area: f32) -> Self {
        Self {
            id,
            center,
            normal: normal.normalize(),
            area,
        }
    }
}

/// Identifier of one computed profile region of a sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId {
    /// Sketch the profile belongs to
    pub sketch: SketchId,
    /// Index of the region in host-reported order
    pub index: u32,
}

impl ProfileId {
    /// Create a new profile ID
    pub fn new(sketch: SketchId, index: u32) -> Self {
        Self { sketch, index }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sketch, self.index)
    }
}

/// One loop of a profile region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileLoop {
    /// Whether this loop bounds the region from outside
    pub is_outer: bool,
    /// Sketch entity behind each loop curve
    pub curves: Vec<Uuid>,
}

/// A closed region of a sketch usable as an extrusion profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRegion {
    /// Profile identifier
    pub id: ProfileId,
    /// Outer and inner loops
    pub loops: Vec<ProfileLoop>,
}

impl ProfileRegion {
    /// Loops flagged as outer
    pub fn outer_loops(&self) -> impl Iterator<Item = &ProfileLoop> {
        self.loops.iter().filter(|l| l.is_outer)
    }

    /// Loops forming holes in the region
    pub fn inner_loops(&self) -> impl Iterator<Item = &ProfileLoop> {
        self.loops.iter().filter(|l| !l.is_outer)
    }
}

/// A point entity inside a particular sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SketchPointRef {
    /// Sketch holding the point
    pub sketch: SketchId,
    /// Point entity
    pub point: Uuid,
}

impl SketchPointRef {
    /// Create a new point reference
    pub fn new(sketch: SketchId, point: Uuid) -> Self {
        Self { sketch, point }
    }
}

/// Error type for host operations
#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("Sketch not found: {0}")]
    SketchNotFound(SketchId),

    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    #[error("Face not found: {0}")]
    FaceNotFound(FaceId),

    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error("Timeline position {position} is past the end ({len} entries)")]
    InvalidTimelinePosition { position: usize, len: usize },

    #[error("Invalid timeline range {start}..={end} ({len} entries)")]
    InvalidTimelineRange { start: usize, end: usize, len: usize },

    #[error("Sketch error: {0}")]
    Sketch(#[from] SketchError),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// The drafting and solid-modeling capability the fastener command drives
///
/// Implementations wrap a CAD application's object model. All calls happen
/// on one thread, in order; sketch creation is positioned by the history
/// marker, so callers must not interleave marker changes.
pub trait DraftingHost {
    /// Get the name of this host
    fn name(&self) -> &str;

    // ========== Change History ==========

    /// Current history marker position
    fn timeline_position(&self) -> usize;

    /// Total number of history entries
    fn timeline_len(&self) -> usize;

    /// Move the history marker
    fn set_timeline_position(&mut self, position: usize) -> HostResult<()>;

    /// Collapse the inclusive entry range `start..=end` into one named group
    fn group_timeline(&mut self, start: usize, end: usize, name: &str)
    -> HostResult<TimelineGroupId>;

    // ========== Components ==========

    /// Component that owns a sketch
    fn sketch_component(&self, sketch: SketchId) -> HostResult<ComponentId>;

    /// Create an isolated sub-component under `parent`
    fn create_component(&mut self, parent: ComponentId, name: &str) -> HostResult<ComponentId>;

    // ========== Sketches ==========

    /// Plane a sketch is drawn on
    fn sketch_plane(&self, sketch: SketchId) -> HostResult<SketchPlane>;

    /// Create a sketch at the current history marker
    fn create_sketch(
        &mut self,
        component: ComponentId,
        plane: SketchPlane,
        name: &str,
    ) -> HostResult<SketchId>;

    /// Project a point from another sketch; returns a fixed point in `sketch`
    fn project_point(&mut self, sketch: SketchId, point: SketchPointRef) -> HostResult<Uuid>;

    /// Position of a point entity in sketch coordinates
    fn point_position(&self, sketch: SketchId, point: Uuid) -> HostResult<Vec2>;

    /// Add a free point
    fn add_point(&mut self, sketch: SketchId, position: Vec2) -> HostResult<Uuid>;

    /// Add a circle; returns (circle, center point)
    fn add_circle(&mut self, sketch: SketchId, center: Vec2, radius: f32)
    -> HostResult<(Uuid, Uuid)>;

    /// Add a line between two existing points
    fn add_line(&mut self, sketch: SketchId, start: Uuid, end: Uuid) -> HostResult<Uuid>;

    /// Mark a curve as construction (reference-only) geometry
    fn set_construction(&mut self, sketch: SketchId, curve: Uuid, construction: bool)
    -> HostResult<()>;

    /// Add a geometric constraint or dimension
    fn add_constraint(&mut self, sketch: SketchId, constraint: SketchConstraint)
    -> HostResult<Uuid>;

    // ========== Profiles & Features ==========

    /// Profile regions computed from the sketch's closed loops
    fn profiles(&self, sketch: SketchId) -> HostResult<Vec<ProfileRegion>>;

    /// Create an extrude feature in `component`
    fn extrude(&mut self, component: ComponentId, input: &ExtrudeInput) -> HostResult<FeatureId>;
}
