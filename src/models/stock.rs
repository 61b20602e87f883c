use serde::{Deserialize, Serialize};

use crate::planner::constants::DEFAULT_PIECES_PER_BOX;

/// One physical representation of on-hand inventory, already paired with
/// whatever unit weight or divisor it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockComponent {
    /// Loose product weighed directly in pounds.
    LooseWeight { pounds: f64 },
    /// Trays of a fixed weight each.
    Trays { count: f64, tray_weight: f64 },
    /// Boxes of a fixed weight each.
    Boxes { count: f64, box_weight: f64 },
    /// Discrete pieces, divided down by how many make up a box.
    Pieces { count: f64, pieces_per_box: f64 },
}

impl StockComponent {
    /// Short label used when rendering a breakdown.
    pub fn label(&self) -> &'static str {
        match self {
            StockComponent::LooseWeight { .. } => "Loose weight",
            StockComponent::Trays { .. } => "Trays",
            StockComponent::Boxes { .. } => "Boxes",
            StockComponent::Pieces { .. } => "Pieces",
        }
    }

    /// Contribution of this component to the stock total, in pounds.
    #[inline]
    pub fn pounds(&self) -> f64 {
        match *self {
            StockComponent::LooseWeight { pounds } => pounds,
            StockComponent::Trays { count, tray_weight } => count * tray_weight,
            StockComponent::Boxes { count, box_weight } => count * box_weight,
            StockComponent::Pieces {
                count,
                pieces_per_box,
            } => count / effective_pieces_per_box(Some(pieces_per_box)),
        }
    }
}

/// Divisor for loose pieces. Zero and absent both fall back to one.
#[inline]
pub fn effective_pieces_per_box(pieces_per_box: Option<f64>) -> f64 {
    match pieces_per_box {
        Some(v) if v != 0.0 => v,
        _ => DEFAULT_PIECES_PER_BOX,
    }
}

/// Everything currently on hand, in whatever units it was counted.
///
/// Every field is optional; a missing field contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStockSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_in_pounds: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trays: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tray_weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxes: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pieces: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pieces_per_box: Option<f64>,
}

impl CurrentStockSnapshot {
    /// Snapshot with nothing on hand.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The components that were actually supplied.
    ///
    /// A tray, box or piece component appears as soon as either of its two
    /// fields is present; the missing half defaults to zero (or one for the
    /// piece divisor).
    pub fn components(&self) -> Vec<StockComponent> {
        let mut components = Vec::new();

        if let Some(pounds) = self.weight_in_pounds {
            components.push(StockComponent::LooseWeight { pounds });
        }

        if self.trays.is_some() || self.tray_weight.is_some() {
            components.push(StockComponent::Trays {
                count: self.trays.unwrap_or(0.0),
                tray_weight: self.tray_weight.unwrap_or(0.0),
            });
        }

        if self.boxes.is_some() || self.box_weight.is_some() {
            components.push(StockComponent::Boxes {
                count: self.boxes.unwrap_or(0.0),
                box_weight: self.box_weight.unwrap_or(0.0),
            });
        }

        if self.pieces.is_some() || self.pieces_per_box.is_some() {
            components.push(StockComponent::Pieces {
                count: self.pieces.unwrap_or(0.0),
                pieces_per_box: effective_pieces_per_box(self.pieces_per_box),
            });
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_has_no_components() {
        let snapshot = CurrentStockSnapshot::empty();
        assert!(snapshot.is_empty());
        assert!(snapshot.components().is_empty());
    }

    #[test]
    fn test_tray_component_without_weight() {
        let snapshot = CurrentStockSnapshot {
            trays: Some(4.0),
            ..Default::default()
        };
        let components = snapshot.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].pounds(), 0.0);
    }

    #[test]
    fn test_pieces_divisor_guard() {
        assert_eq!(effective_pieces_per_box(None), 1.0);
        assert_eq!(effective_pieces_per_box(Some(0.0)), 1.0);
        assert_eq!(effective_pieces_per_box(Some(4.0)), 4.0);

        let pieces = StockComponent::Pieces {
            count: 10.0,
            pieces_per_box: 0.0,
        };
        assert_eq!(pieces.pounds(), 10.0);
    }

    #[test]
    fn test_camel_case_json() {
        let json = r#"{"weightInPounds": 10, "trays": 3, "trayWeight": 14}"#;
        let snapshot: CurrentStockSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.weight_in_pounds, Some(10.0));
        assert_eq!(snapshot.trays, Some(3.0));
        assert_eq!(snapshot.tray_weight, Some(14.0));
        assert_eq!(snapshot.boxes, None);

        let out = serde_json::to_string(&snapshot).unwrap();
        assert!(out.contains("\"trayWeight\":14.0"));
        assert!(!out.contains("boxWeight"));
    }
}
