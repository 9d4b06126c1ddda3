use serde::{Deserialize, Serialize};

use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for an opening in the floor plan store.
    pub struct OpeningId;
}

/// What fills (or does not fill) an opening.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
    #[default]
    Opening,
}

/// An opening cut into a wall.
///
/// `offset` is measured along the wall from its start corner to the centre
/// of the opening.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningData {
    /// The wall this opening is cut into.
    pub wall: WallId,
    pub kind: OpeningKind,
    pub offset: f64,
    pub width: f64,
    pub height: f64,
    /// Height of the opening's bottom edge above the wall base.
    pub sill_height: f64,
}

impl OpeningData {
    /// Extent along the wall as `(from, to)`.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        let half = self.width * 0.5;
        (self.offset - half, self.offset + half)
    }

    /// Whether the two openings share any length of wall.
    #[must_use]
    pub fn overlaps(&self, other: &OpeningData) -> bool {
        let (a0, a1) = self.span();
        let (b0, b1) = other.span();
        a0 < b1 && b0 < a1
    }
}

/// Plain-data view of an opening.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningDescriptor {
    pub id: OpeningId,
    pub wall: WallId,
    pub kind: OpeningKind,
    pub offset: f64,
    pub width: f64,
    pub height: f64,
    pub sill_height: f64,
}

impl OpeningDescriptor {
    pub(crate) fn new(id: OpeningId, data: &OpeningData) -> Self {
        Self {
            id,
            wall: data.wall,
            kind: data.kind,
            offset: data.offset,
            width: data.width,
            height: data.height,
            sill_height: data.sill_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn opening(offset: f64, width: f64) -> OpeningData {
        let mut walls: SlotMap<WallId, ()> = SlotMap::with_key();
        OpeningData {
            wall: walls.insert(()),
            kind: OpeningKind::Door,
            offset,
            width,
            height: 2.1,
            sill_height: 0.0,
        }
    }

    #[test]
    fn span_is_centred_on_offset() {
        let (from, to) = opening(2.0, 0.9).span();
        assert!((from - 1.55).abs() < 1e-12);
        assert!((to - 2.45).abs() < 1e-12);
    }

    #[test]
    fn touching_openings_do_not_overlap() {
        assert!(!opening(1.0, 1.0).overlaps(&opening(2.0, 1.0)));
        assert!(opening(1.0, 1.0).overlaps(&opening(1.8, 1.0)));
    }
}
