//! Boundary wall rectangles with their per-side physical types.

use crate::types::{Bounds, Vec2, WallType};

use super::model::WallSegment;

/// Four segments flush against the bounds, ordered top, bottom, right, left.
///
/// Each spans the full side plus one thickness, so neighbours overlap at the
/// corners.
pub(super) fn build_wall_segments(bounds: &Bounds, thickness: f32) -> Vec<WallSegment> {
    let half_w = bounds.extents.x;
    let half_h = bounds.extents.y;
    let horizontal = Vec2::new(half_w * 2.0 + thickness, thickness);
    let vertical = Vec2::new(thickness, half_h * 2.0 + thickness);

    vec![
        WallSegment {
            wall_type: WallType::Normal,
            center: Vec2::new(0.0, half_h + thickness / 2.0),
            size: horizontal,
        },
        WallSegment {
            wall_type: WallType::Normal,
            center: Vec2::new(0.0, -half_h - thickness / 2.0),
            size: horizontal,
        },
        WallSegment {
            wall_type: WallType::Bouncy,
            center: Vec2::new(half_w + thickness / 2.0, 0.0),
            size: vertical,
        },
        WallSegment {
            wall_type: WallType::Dampen,
            center: Vec2::new(-half_w - thickness / 2.0, 0.0),
            size: vertical,
        },
    ]
}
