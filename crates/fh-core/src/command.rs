//! Command inputs
//!
//! The values the dialog collects, and their validation into a request the
//! orchestrator can run. Validation happens before anything is drafted.

use std::fmt;
use std::str::FromStr;

use fh_cad::{FaceId, SketchPointRef};
use serde::{Deserialize, Serialize};

use crate::catalog::{SizeCatalog, SizeKey, SizeSpec};
use crate::error::{FastenerError, FastenerResult};
use crate::planner::{CutKind, CutPlanner};

/// Counterbore style at the head end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadKind {
    #[default]
    Socket,
    None,
}

impl HeadKind {
    /// Dropdown order
    pub const ALL: [HeadKind; 2] = [HeadKind::Socket, HeadKind::None];

    /// Dropdown label
    pub fn label(self) -> &'static str {
        match self {
            HeadKind::Socket => "Socket",
            HeadKind::None => "None",
        }
    }
}

/// Pocket style at the anchor end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnchorKind {
    #[default]
    HexNut,
    None,
}

impl AnchorKind {
    /// Dropdown order
    pub const ALL: [AnchorKind; 2] = [AnchorKind::HexNut, AnchorKind::None];

    /// Dropdown label
    pub fn label(self) -> &'static str {
        match self {
            AnchorKind::HexNut => "Hex Nut",
            AnchorKind::None => "None",
        }
    }
}

/// Lowercase with separators removed, so "Hex Nut", "hex-nut" and "hexnut" agree
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for HeadKind {
    type Err = FastenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| normalize(k.label()) == normalize(s))
            .ok_or_else(|| FastenerError::UnknownOption {
                field: "head",
                value: s.to_string(),
            })
    }
}

impl FromStr for AnchorKind {
    type Err = FastenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| normalize(k.label()) == normalize(s))
            .ok_or_else(|| FastenerError::UnknownOption {
                field: "anchor",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for HeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw dialog state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandInputs {
    /// Selected sketch points; exactly one is required
    pub points: Vec<SketchPointRef>,
    /// Selected faces; exactly one is required
    pub faces: Vec<FaceId>,
    pub size: SizeKey,
    pub head: HeadKind,
    pub anchor: AnchorKind,
    /// Swap the head and anchor ends
    pub invert: bool,
}

impl CommandInputs {
    /// Inputs with one point, one face and default options
    pub fn new(point: SketchPointRef, face: FaceId) -> Self {
        Self {
            points: vec![point],
            faces: vec![face],
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = SizeKey::new(size);
        self
    }

    pub fn with_head(mut self, head: HeadKind) -> Self {
        self.head = head;
        self
    }

    pub fn with_anchor(mut self, anchor: AnchorKind) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Check the selection and resolve the size
    pub fn validate(&self, catalog: &SizeCatalog) -> FastenerResult<FastenerRequest> {
        let [point] = self.points.as_slice() else {
            return Err(FastenerError::InvalidSelection(format!(
                "expected one point, got {}",
                self.points.len()
            )));
        };
        let [face] = self.faces.as_slice() else {
            return Err(FastenerError::InvalidSelection(format!(
                "expected one face, got {}",
                self.faces.len()
            )));
        };
        let spec = catalog.lookup(&self.size)?;

        Ok(FastenerRequest {
            point: *point,
            face: *face,
            size: self.size.clone(),
            spec,
            head: self.head,
            anchor: self.anchor,
            invert: self.invert,
        })
    }
}

/// Validated inputs for one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastenerRequest {
    pub point: SketchPointRef,
    pub face: FaceId,
    pub size: SizeKey,
    pub spec: SizeSpec,
    pub head: HeadKind,
    pub anchor: AnchorKind,
    pub invert: bool,
}

impl FastenerRequest {
    pub fn planner(&self) -> CutPlanner {
        CutPlanner::new(self.point, self.face, self.spec, self.invert)
    }

    /// Cuts to apply, in order
    pub fn cuts(&self) -> Vec<CutKind> {
        CutKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                CutKind::Bore => true,
                CutKind::Head => self.head != HeadKind::None,
                CutKind::Anchor => self.anchor != AnchorKind::None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fh_cad::SketchId;
    use uuid::Uuid;

    fn inputs() -> CommandInputs {
        CommandInputs::new(
            SketchPointRef::new(SketchId::new_v4(), Uuid::new_v4()),
            FaceId::new(Uuid::new_v4(), 0),
        )
    }

    #[test]
    fn test_defaults() {
        let inputs = CommandInputs::default();
        assert_eq!(inputs.size.as_str(), "M3");
        assert_eq!(inputs.head, HeadKind::Socket);
        assert_eq!(inputs.anchor, AnchorKind::HexNut);
        assert!(!inputs.invert);
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("Socket".parse::<HeadKind>().unwrap(), HeadKind::Socket);
        assert_eq!("none".parse::<HeadKind>().unwrap(), HeadKind::None);
        assert_eq!("Hex Nut".parse::<AnchorKind>().unwrap(), AnchorKind::HexNut);
        assert_eq!("hex-nut".parse::<AnchorKind>().unwrap(), AnchorKind::HexNut);
        assert!(matches!(
            "washer".parse::<AnchorKind>(),
            Err(FastenerError::UnknownOption { field: "anchor", .. })
        ));
        assert_eq!(AnchorKind::HexNut.to_string(), "Hex Nut");
    }

    #[test]
    fn test_validate() {
        let request = inputs().with_size("M5").validate(&SizeCatalog::builtin()).unwrap();
        assert_eq!(request.size.as_str(), "M5");
        assert_eq!(request.spec.bore_diameter, 5.0);
        assert_eq!(
            request.cuts(),
            vec![CutKind::Bore, CutKind::Head, CutKind::Anchor]
        );
    }

    #[test]
    fn test_validate_selection() {
        let catalog = SizeCatalog::builtin();

        let mut no_point = inputs();
        no_point.points.clear();
        assert!(matches!(
            no_point.validate(&catalog),
            Err(FastenerError::InvalidSelection(_))
        ));

        let mut two_faces = inputs();
        two_faces.faces.push(FaceId::new(Uuid::new_v4(), 1));
        assert!(matches!(
            two_faces.validate(&catalog),
            Err(FastenerError::InvalidSelection(_))
        ));

        assert!(matches!(
            inputs().with_size("M12").validate(&catalog),
            Err(FastenerError::UnknownSizeKind(_))
        ));
    }

    #[test]
    fn test_cuts_skip_none() {
        let request = inputs()
            .with_head(HeadKind::None)
            .with_anchor(AnchorKind::None)
            .validate(&SizeCatalog::builtin())
            .unwrap();
        assert_eq!(request.cuts(), vec![CutKind::Bore]);
    }
}
