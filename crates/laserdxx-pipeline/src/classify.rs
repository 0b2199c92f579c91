//! Containment-tree classification
//!
//! Closed chains are arranged in a forest where a node's children lie
//! inside it. Even depths are cut lines, odd depths are internal
//! geometry (holes, boards). Open chains follow the closed chain they
//! start in.
//!
//! Containment only samples a chain's first vertex, which is enough
//! for the non-crossing contours a pattern marker contains.

use laserdxx_core::geometry::point_in_polygon;
use laserdxx_core::{ContourId, Layer, Point, Polyline};
use tracing::debug;

/// Forest node referring back into the input slice
#[derive(Debug)]
struct Node {
    index: usize,
    children: Vec<usize>,
}

/// Assign a layer to every chain
///
/// Output order matches input order. The frame, when given, goes to
/// BOARDS and takes no part in the forest. Nesting deeper than
/// `max_depth` attaches at the cap.
pub fn classify(
    mut polylines: Vec<Polyline>,
    frame: Option<ContourId>,
    max_depth: usize,
) -> Vec<Polyline> {
    let mut order: Vec<usize> = polylines
        .iter()
        .enumerate()
        .filter(|(_, p)| p.closed && Some(p.id) != frame)
        .map(|(i, _)| i)
        .collect();
    order.sort_by(|&a, &b| {
        let area = |i: usize| polylines[i].area.unwrap_or(0.0);
        area(b).total_cmp(&area(a))
    });

    let mut nodes: Vec<Node> = Vec::with_capacity(order.len());
    let mut roots: Vec<usize> = Vec::new();
    for &index in &order {
        let node = nodes.len();
        nodes.push(Node {
            index,
            children: Vec::new(),
        });
        match find_parent(&polylines, &nodes, &roots, index, max_depth) {
            Some(parent) => nodes[parent].children.push(node),
            None => roots.push(node),
        }
    }

    let mut max_seen = 0usize;
    let mut stack: Vec<(usize, usize)> = roots.iter().map(|&r| (r, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        max_seen = max_seen.max(depth);
        polylines[nodes[node].index].layer = Some(Layer::for_depth(depth));
        stack.extend(nodes[node].children.iter().map(|&c| (c, depth + 1)));
    }

    let cut_closed: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| polylines[i].layer == Some(Layer::Cut))
        .collect();
    let open_layers: Vec<(usize, Layer)> = polylines
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.closed && Some(p.id) != frame)
        .map(|(i, p)| {
            let inside = p
                .start()
                .is_some_and(|start| starts_in_any(&polylines, &cut_closed, start));
            (i, if inside { Layer::Boards } else { Layer::Cut })
        })
        .collect();
    for (i, layer) in open_layers {
        polylines[i].layer = Some(layer);
    }

    if let Some(frame_id) = frame {
        if let Some(p) = polylines.iter_mut().find(|p| p.id == frame_id) {
            p.layer = Some(Layer::Boards);
        }
    }

    debug!(
        closed = order.len(),
        roots = roots.len(),
        max_depth = max_seen,
        "classified contours"
    );
    polylines
}

/// Deepest node containing `candidate`, descending with an explicit loop
fn find_parent(
    polylines: &[Polyline],
    nodes: &[Node],
    roots: &[usize],
    candidate: usize,
    max_depth: usize,
) -> Option<usize> {
    let child = &polylines[candidate];
    let start = child.start()?;
    let contains = |node: usize| {
        let parent = &polylines[nodes[node].index];
        parent.bbox.contains(&child.bbox) && point_in_polygon(&start, &parent.points)
    };

    let mut parent = roots.iter().copied().find(|&r| contains(r))?;
    let mut depth = 0usize;
    while depth + 1 < max_depth {
        match nodes[parent].children.iter().copied().find(|&c| contains(c)) {
            Some(next) => {
                parent = next;
                depth += 1;
            }
            None => break,
        }
    }
    Some(parent)
}

fn starts_in_any(polylines: &[Polyline], candidates: &[usize], start: Point) -> bool {
    candidates.iter().any(|&i| {
        let closed = &polylines[i];
        start.x >= closed.bbox.min_x
            && start.x <= closed.bbox.max_x
            && start.y >= closed.bbox.min_y
            && start.y <= closed.bbox.max_y
            && point_in_polygon(&start, &closed.points)
    })
}
