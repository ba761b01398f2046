//! Launcher attachment points sampled just outside the four boundary edges.

use crate::types::{Bounds, Edge, Vec2};

use super::model::LauncherNode;

/// Samples nodes every `spacing` world units, starting half a spacing in from
/// each corner, offset outward by `offset`.
///
/// Emission order is top (increasing x), right (decreasing y), bottom
/// (decreasing x), left (increasing y). Consumers identify edges by this order.
pub(super) fn generate_launcher_nodes(
    bounds: &Bounds,
    spacing: f32,
    offset: f32,
) -> Vec<LauncherNode> {
    let half_w = bounds.extents.x;
    let half_h = bounds.extents.y;
    let mut nodes = Vec::new();

    for x in edge_samples(half_w, spacing) {
        nodes.push(node(Edge::Top, Vec2::new(x, half_h + offset)));
    }
    for y in edge_samples(half_h, spacing) {
        nodes.push(node(Edge::Right, Vec2::new(half_w + offset, -y)));
    }
    for x in edge_samples(half_w, spacing) {
        nodes.push(node(Edge::Bottom, Vec2::new(-x, -half_h - offset)));
    }
    for y in edge_samples(half_h, spacing) {
        nodes.push(node(Edge::Left, Vec2::new(-half_w - offset, y)));
    }

    nodes
}

fn node(edge: Edge, position: Vec2) -> LauncherNode {
    LauncherNode { edge, position, inward_normal: edge.inward_normal() }
}

/// Ascending positions `-half + spacing/2 + i*spacing` strictly below `half`.
fn edge_samples(half: f32, spacing: f32) -> impl Iterator<Item = f32> {
    let start = -half + spacing / 2.0;
    (0_u32..)
        .map(move |step| start + step as f32 * spacing)
        .take_while(move |&value| value < half)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medium_bounds() -> Bounds {
        Bounds::from_size(Vec2::ZERO, Vec2::new(20.0, 12.0))
    }

    #[test]
    fn medium_battlefield_has_ten_nodes_on_long_edges_and_six_on_short() {
        let nodes = generate_launcher_nodes(&medium_bounds(), 2.0, 1.5);
        let count = |edge| nodes.iter().filter(|node| node.edge == edge).count();
        assert_eq!(count(Edge::Top), 10);
        assert_eq!(count(Edge::Bottom), 10);
        assert_eq!(count(Edge::Right), 6);
        assert_eq!(count(Edge::Left), 6);
        assert_eq!(nodes.len(), 32);
    }

    #[test]
    fn nodes_are_emitted_clockwise_from_top_left() {
        let nodes = generate_launcher_nodes(&medium_bounds(), 2.0, 1.5);
        let edges: Vec<Edge> = nodes.iter().map(|node| node.edge).collect();
        let mut expected = vec![Edge::Top; 10];
        expected.extend([Edge::Right; 6]);
        expected.extend([Edge::Bottom; 10]);
        expected.extend([Edge::Left; 6]);
        assert_eq!(edges, expected);

        assert_eq!(nodes[0].position, Vec2::new(-9.0, 7.5));
        assert_eq!(nodes[10].position, Vec2::new(11.5, 5.0));
        assert_eq!(nodes[16].position, Vec2::new(9.0, -7.5));
        assert_eq!(nodes[26].position, Vec2::new(-11.5, -5.0));
    }

    #[test]
    fn every_node_lies_outside_bounds_with_unit_inward_normal() {
        let bounds = medium_bounds();
        for node in generate_launcher_nodes(&bounds, 3.0, 0.25) {
            assert!(!bounds.contains(node.position), "{node:?} should be outside");
            assert!((node.inward_normal.length() - 1.0).abs() < f32::EPSILON);
            assert_eq!(node.inward_normal, node.edge.inward_normal());
        }
    }
}
