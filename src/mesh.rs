//! Mesh construction from load and support locations
//!
//! Every concentrated load and every support must sit on a node, since the
//! element stiffness formulation assumes no loads inside an element.

use serde::{Deserialize, Serialize};

use crate::elements::{Element, Node};
use crate::error::ValidationError;

/// Ordered nodes and elements spanning `[0, length]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mesh {
    length: f64,
    nodes: Vec<Node>,
    elements: Vec<Element>,
    tolerance: f64,
}

impl Mesh {
    /// Build a mesh for a beam of `length` with nodes at every location in
    /// `locations`, plus both ends of the beam.
    ///
    /// Locations closer together than `merge_tolerance * length` collapse to
    /// a single node.
    pub fn build<I>(
        length: f64,
        e: f64,
        ixx: f64,
        locations: I,
        merge_tolerance: f64,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut positions = vec![0.0, length];
        for location in locations {
            if !location.is_finite() || location < 0.0 || location > length {
                return Err(ValidationError::LocationOutOfRange { location, length });
            }
            positions.push(location);
        }

        positions.sort_by(f64::total_cmp);

        let tolerance = merge_tolerance * length;
        let mut merged: Vec<f64> = Vec::with_capacity(positions.len());
        for x in positions {
            match merged.last() {
                Some(&last) if x - last <= tolerance => {}
                _ => merged.push(x),
            }
        }
        // Keep the right end exact even if a location just below it was kept
        if let Some(last) = merged.last_mut() {
            *last = length;
        }

        let nodes: Vec<Node> = merged
            .iter()
            .enumerate()
            .map(|(index, &x)| Node::new(x, index))
            .collect();

        let elements = nodes
            .windows(2)
            .map(|pair| Element::new(pair[0].index, pair[0].x, pair[1].x - pair[0].x, e, ixx))
            .collect();

        log::debug!(
            "meshed beam of length {} into {} nodes at {:?}",
            length,
            nodes.len(),
            merged
        );

        Ok(Self {
            length,
            nodes,
            elements,
            tolerance,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Node positions, left to right
    pub fn positions(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.x).collect()
    }

    /// Element lengths, left to right
    pub fn lengths(&self) -> Vec<f64> {
        self.elements.iter().map(|e| e.length).collect()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Total degrees of freedom of the beam
    pub fn dof(&self) -> usize {
        self.nodes.len() * 2
    }

    /// Index of the node at `location`, if there is one
    pub fn node_index(&self, location: f64) -> Option<usize> {
        let idx = self.nodes.partition_point(|n| n.x < location - self.tolerance);
        self.nodes
            .get(idx)
            .filter(|n| (n.x - location).abs() <= self.tolerance)
            .map(|n| n.index)
    }

    /// Index of the element containing `x`.
    ///
    /// A position exactly on an interior node belongs to the element on its
    /// left; `x = 0` belongs to the first element.
    pub fn element_index(&self, x: f64) -> Option<usize> {
        if self.elements.is_empty() || x < 0.0 || x > self.length {
            return None;
        }
        let idx = self.elements.partition_point(|e| e.x_end() < x);
        Some(idx.min(self.elements.len() - 1))
    }
}
