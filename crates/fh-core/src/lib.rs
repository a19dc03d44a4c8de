//! Cut Fastener Hole
//!
//! Builds the sketches and cut features that seat a bolt around a point:
//! a clearance bore from the point to a face, an optional socket-head
//! counterbore and an optional hex-nut pocket.
//!
//! The pipeline runs against any [`fh_cad::DraftingHost`]:
//! size catalog, profile drafter, profile resolver, cut planner and the
//! orchestrator that sequences the cuts and groups them in the history.

pub mod catalog;
pub mod command;
pub mod config;
pub mod constants;
pub mod drafter;
pub mod error;
pub mod orchestrator;
pub mod planner;
pub mod resolver;

pub use catalog::{SizeCatalog, SizeEntry, SizeKey, SizeSpec};
pub use command::{AnchorKind, CommandInputs, FastenerRequest, HeadKind};
pub use config::{ConfigError, DefaultsConfig, FastenerConfig, NamingConfig};
pub use drafter::{DraftedCircle, DraftedHexagon, draft_circle, draft_hexagon};
pub use error::{FastenerError, FastenerResult};
pub use orchestrator::{AppliedCut, CutFastenerHole, CutReport};
pub use planner::{CutKind, CutPlan, CutPlanner, StartReference, Termination};
pub use resolver::{ResolvePolicy, resolve_outer_profile, select_outer_profile};
