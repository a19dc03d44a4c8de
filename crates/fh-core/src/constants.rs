//! Global constants for fh-core

use glam::Vec2;

/// Command name shown on the toolbar button
pub const COMMAND_NAME: &str = "Cut Fastener Hole";

/// Command tooltip
pub const COMMAND_DESCRIPTION: &str = "Cutout a fastener profile around a given point";

/// Size preselected in the dialog
pub const DEFAULT_SIZE: &str = "M3";

/// Sub-component that holds every sketch and cut of one invocation
pub const COMPONENT_NAME: &str = "facet";

/// History group wrapping one invocation
pub const GROUP_NAME: &str = "cut-fastener-hole";

pub const BORE_SKETCH_NAME: &str = "bore";
pub const HEAD_SKETCH_NAME: &str = "head";
pub const ANCHOR_SKETCH_NAME: &str = "anchor";

pub const BORE_FEATURE_NAME: &str = "cut-bore";
pub const HEAD_FEATURE_NAME: &str = "head-cut";
pub const ANCHOR_FEATURE_NAME: &str = "anchor-cut";

/// Direction of the bore diameter label, in sketch space
pub const BORE_DIMENSION_DIRECTION: Vec2 = Vec2::Y;

/// Direction of the head diameter label, in sketch space
pub const HEAD_DIMENSION_DIRECTION: Vec2 = Vec2::X;

/// Direction of the anchor angle label, in sketch space
pub const ANCHOR_DIMENSION_DIRECTION: Vec2 = Vec2::NEG_Y;

/// Number of sides of a hex-nut outline
pub const HEXAGON_SIDES: usize = 6;
