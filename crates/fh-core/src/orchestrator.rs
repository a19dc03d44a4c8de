//! Cut orchestrator
//!
//! Runs the bore, head and anchor cuts in that order inside a fresh
//! sub-component and groups everything it added to the history.
//!
//! There is no rollback: when a cut fails, the cuts already applied stay in
//! the document and no history group is created.

use fh_cad::{
    ComponentId, DraftingHost, FeatureId, ProfileId, SketchId, TimelineGroupId, with_cursor_at,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::SizeCatalog;
use crate::command::{CommandInputs, FastenerRequest};
use crate::config::{FastenerConfig, NamingConfig};
use crate::drafter::{draft_circle, draft_hexagon};
use crate::error::FastenerResult;
use crate::planner::{CutKind, CutPlan, CutPlanner};
use crate::resolver::{ResolvePolicy, resolve_outer_profile};

/// One applied cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCut {
    pub kind: CutKind,
    pub sketch: SketchId,
    pub profile: ProfileId,
    pub feature: FeatureId,
    pub plan: CutPlan,
}

/// Result of one command invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutReport {
    /// Sub-component holding the sketches and cuts
    pub component: ComponentId,
    /// History group spanning the invocation
    pub group: TimelineGroupId,
    /// Applied cuts in order
    pub cuts: Vec<AppliedCut>,
}

impl CutReport {
    pub fn cut(&self, kind: CutKind) -> Option<&AppliedCut> {
        self.cuts.iter().find(|c| c.kind == kind)
    }
}

/// The "Cut Fastener Hole" command
#[derive(Debug, Clone, Default)]
pub struct CutFastenerHole {
    pub naming: NamingConfig,
    pub policy: ResolvePolicy,
}

impl CutFastenerHole {
    pub fn new(naming: NamingConfig, policy: ResolvePolicy) -> Self {
        Self { naming, policy }
    }

    pub fn from_config(config: &FastenerConfig) -> Self {
        Self::new(config.naming.clone(), config.resolve_policy)
    }

    /// Validate dialog inputs and execute
    pub fn run(
        &self,
        host: &mut dyn DraftingHost,
        inputs: &CommandInputs,
        catalog: &SizeCatalog,
    ) -> FastenerResult<CutReport> {
        let request = inputs.validate(catalog)?;
        self.execute(host, &request)
    }

    /// Apply every requested cut and group the history entries
    pub fn execute(
        &self,
        host: &mut dyn DraftingHost,
        request: &FastenerRequest,
    ) -> FastenerResult<CutReport> {
        info!(
            "Cutting {} fastener hole (head: {}, anchor: {}, invert: {}) on {}",
            request.size,
            request.head,
            request.anchor,
            request.invert,
            host.name()
        );

        let start = host.timeline_position();
        let parent = host.sketch_component(request.point.sketch)?;
        let component = host.create_component(parent, &self.naming.component)?;
        let sketch_position = host.timeline_position();

        let planner = request.planner();
        let mut cuts = Vec::new();
        for kind in request.cuts() {
            cuts.push(self.apply_cut(host, component, sketch_position, &planner, kind)?);
        }

        let end = host.timeline_position();
        let group = host.group_timeline(start, end - 1, &self.naming.group)?;
        info!("Applied {} cuts in component {}", cuts.len(), component);

        Ok(CutReport {
            component,
            group,
            cuts,
        })
    }

    fn apply_cut(
        &self,
        host: &mut dyn DraftingHost,
        component: ComponentId,
        sketch_position: usize,
        planner: &CutPlanner,
        kind: CutKind,
    ) -> FastenerResult<AppliedCut> {
        let point = planner.point;
        let plane = host.sketch_plane(point.sketch)?;
        let sketch_name = self.naming.sketch_name(kind);
        let sketch = with_cursor_at(host, sketch_position, |h| {
            h.create_sketch(component, plane, sketch_name)
        })?;

        let diameter = kind.diameter(&planner.spec);
        let direction = kind.dimension_direction();
        let curves = match kind {
            CutKind::Bore | CutKind::Head => {
                draft_circle(host, sketch, point, diameter, direction)?.outer_curves()
            }
            CutKind::Anchor => {
                draft_hexagon(host, sketch, point, diameter, direction)?.outer_curves()
            }
        };

        let region = resolve_outer_profile(host, sketch, &curves, self.policy)?;
        let plan = planner.plan(kind, self.naming.feature_name(kind));
        let feature = host.extrude(component, &plan.to_extrude_input(region.id))?;
        debug!("Applied {} cut as {} from {}", kind, feature, region.id);

        Ok(AppliedCut {
            kind,
            sketch,
            profile: region.id,
            feature,
            plan,
        })
    }
}
