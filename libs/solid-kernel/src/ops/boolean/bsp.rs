//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Stack Safety
//!
//! Tree depth grows with the number of distinct planes, which is large for
//! finely tessellated cylinders. Every recursive step goes through
//! `stacker::maybe_grow`, which moves onto a fresh heap-allocated stack
//! segment before the current one runs out.

use super::plane::Plane;
use super::polygon::{Polygon, SplitResult};
use config::constants::{STACK_GROW_BYTES, STACK_RED_ZONE_BYTES};

/// A node in the BSP tree.
#[derive(Debug, Default)]
pub struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a BSP tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Adds polygons to the tree, splitting them by existing planes.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        stacker::maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROW_BYTES, || {
            let plane = *self.plane.get_or_insert(*polygons[0].plane());

            let mut split = SplitResult::default();
            for poly in polygons {
                poly.split(&plane, &mut split);
            }
            self.polygons.append(&mut split.coplanar_front);
            self.polygons.append(&mut split.coplanar_back);

            if !split.front.is_empty() {
                self.front
                    .get_or_insert_with(Box::default)
                    .build(split.front);
            }
            if !split.back.is_empty() {
                self.back.get_or_insert_with(Box::default).build(split.back);
            }
        })
    }

    /// Converts solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        stacker::maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROW_BYTES, || {
            for poly in &mut self.polygons {
                poly.flip();
            }
            if let Some(plane) = &mut self.plane {
                plane.flip();
            }
            if let Some(front) = &mut self.front {
                front.invert();
            }
            if let Some(back) = &mut self.back {
                back.invert();
            }
            std::mem::swap(&mut self.front, &mut self.back);
        })
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };
        stacker::maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROW_BYTES, || {
            let mut split = SplitResult::default();
            for poly in polygons {
                poly.split(&plane, &mut split);
            }
            let mut front = split.front;
            front.append(&mut split.coplanar_front);
            let mut back = split.back;
            back.append(&mut split.coplanar_back);

            let mut result = match &self.front {
                Some(node) => node.clip_polygons(front),
                None => front,
            };
            // Without a back subtree, everything behind is inside the solid.
            if let Some(node) = &self.back {
                result.extend(node.clip_polygons(back));
            }
            result
        })
    }

    /// Removes the parts of this tree's polygons inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        stacker::maybe_grow(STACK_RED_ZONE_BYTES, STACK_GROW_BYTES, || {
            self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
            if let Some(front) = &mut self.front {
                front.clip_to(other);
            }
            if let Some(back) = &mut self.back {
                back.clip_to(other);
            }
        })
    }

    /// Collects all polygons from this tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());
            if let Some(back) = &node.back {
                stack.push(back);
            }
            if let Some(front) = &node.front {
                stack.push(front);
            }
        }

        result
    }

    /// Number of polygons stored in the tree.
    #[cfg(test)]
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            count += node.polygons.len();
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }

        count
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        // Iterative drop; the default recursive one can overflow on deep trees
        let mut stack = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_bsp_new_empty() {
        let tree = BspNode::new(vec![]);
        assert_eq!(tree.polygon_count(), 0);
        assert!(tree.all_polygons().is_empty());
    }

    #[test]
    fn test_bsp_keeps_all_polygons() {
        let tree = BspNode::new(vec![triangle_at(0.0), triangle_at(1.0), triangle_at(-1.0)]);
        assert_eq!(tree.polygon_count(), 3);
        assert_eq!(tree.all_polygons().len(), 3);
    }

    #[test]
    fn test_bsp_invert_flips_normals() {
        let mut tree = BspNode::new(vec![triangle_at(0.0)]);
        tree.invert();
        assert_eq!(tree.all_polygons()[0].plane().normal(), -DVec3::Z);
    }

    #[test]
    fn test_bsp_clip_keeps_front() {
        let tree = BspNode::new(vec![triangle_at(0.0)]);
        assert_eq!(tree.clip_polygons(vec![triangle_at(1.0)]).len(), 1);
    }

    #[test]
    fn test_bsp_clip_removes_back() {
        let tree = BspNode::new(vec![triangle_at(0.0)]);
        assert!(tree.clip_polygons(vec![triangle_at(-1.0)]).is_empty());
    }

    #[test]
    fn test_deep_tree_builds_and_drops() {
        // Parallel planes produce a degenerate, list-shaped tree
        let polys: Vec<Polygon> = (0..3_000).map(|i| triangle_at(i as f64)).collect();
        let tree = BspNode::new(polys);
        assert_eq!(tree.polygon_count(), 3_000);
    }
}
