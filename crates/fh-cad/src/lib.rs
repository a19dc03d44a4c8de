//! Drafting Host Abstraction
//!
//! This crate provides:
//! - The `DraftingHost` trait a CAD application implements for the fastener command
//! - 2D sketch model with entities, constraints and dimensions
//! - Profile region detection for closed sketch loops
//! - Extrude feature inputs (start extent, termination, direction)
//! - Change-history timeline with a scoped cursor
//! - An in-memory host for tests and offline planning

pub mod feature;
pub mod host;
pub mod sketch;
pub mod timeline;

// Re-exports for convenience
pub use feature::{
    BooleanOp, ExtentDefinition, ExtentEntity, ExtrudeDirection, ExtrudeFeature, ExtrudeInput,
    StartExtent,
};
pub use host::{
    ComponentId, DraftingHost, FaceId, FaceInfo, FeatureId, HostError, HostResult, MemoryHost,
    ProfileId, ProfileLoop, ProfileRegion, SketchId, SketchPointRef, TimelineGroupId,
    with_cursor_at,
};
pub use sketch::{Sketch, SketchConstraint, SketchEntity, SketchError, SketchPlane};
pub use timeline::{Timeline, TimelineEntry, TimelineEntryKind, TimelineGroup};
