use crate::foundation::core::ImageId;
use crate::foundation::error::{PosterError, PosterResult};
use crate::transform::state::{ScaleRange, Transform};

/// Persisted pairing of a source image reference with its transform.
///
/// The reference is opaque to this crate (a data URL, a blob key, a path). The transform is
/// three plain numbers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Identity of the image slot (header, gallery item).
    pub id: ImageId,
    /// Opaque source reference understood by the persistence layer.
    pub source: String,
    /// Transform in preview units.
    #[serde(default)]
    pub transform: Transform,
}

impl Placement {
    /// New placement with the identity transform.
    pub fn new(id: impl Into<ImageId>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            transform: Transform::IDENTITY,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> PosterResult<String> {
        serde_json::to_string(self).map_err(|e| PosterError::serde(format!("placement: {e}")))
    }

    /// Parse from JSON, repairing the transform into `range`.
    pub fn from_json(json: &str, range: ScaleRange) -> PosterResult<Self> {
        let mut placement: Self = serde_json::from_str(json)
            .map_err(|e| PosterError::serde(format!("parse placement JSON: {e}")))?;
        placement.transform = placement.transform.sanitized(range);
        Ok(placement)
    }
}

/// Serialize a gallery's placements as a JSON array.
pub fn placements_to_json(placements: &[Placement]) -> PosterResult<String> {
    serde_json::to_string(placements).map_err(|e| PosterError::serde(format!("placements: {e}")))
}

/// Parse a JSON array of placements, repairing every transform into `range`.
pub fn placements_from_json(json: &str, range: ScaleRange) -> PosterResult<Vec<Placement>> {
    let mut placements: Vec<Placement> = serde_json::from_str(json)
        .map_err(|e| PosterError::serde(format!("parse placements JSON: {e}")))?;
    for p in &mut placements {
        p.transform = p.transform.sanitized(range);
    }
    Ok(placements)
}

#[cfg(test)]
#[path = "../../tests/unit/document/placement.rs"]
mod tests;
