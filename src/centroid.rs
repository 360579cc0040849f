use ndarray::{Array1, ArrayView1};
use std::collections::BTreeSet;

/// A named cluster center and the observations currently assigned to it.
///
/// Members are stored as positions in the run's observation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    index: usize,
    name: String,
    coordinates: Array1<f64>,
    members: BTreeSet<usize>,
}

impl Centroid {
    /// Create an empty centroid named `cluster {index}`
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the centroid in the run
    /// * `coordinates` - Initial position
    pub fn new(index: usize, coordinates: Array1<f64>) -> Self {
        Self {
            index,
            name: format!("cluster {}", index),
            coordinates,
            members: BTreeSet::new(),
        }
    }

    /// Position of this centroid in the run
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display name, e.g. `cluster 0`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only view of the current position
    pub fn coordinates(&self) -> ArrayView1<'_, f64> {
        self.coordinates.view()
    }

    /// Indices of the observations assigned in the latest assignment step
    pub fn members(&self) -> &BTreeSet<usize> {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no observation is assigned
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn update(&mut self, coordinates: Array1<f64>) {
        self.coordinates = coordinates;
    }

    pub(crate) fn clear_members(&mut self) {
        self.members.clear();
    }

    pub(crate) fn insert_member(&mut self, observation: usize) {
        self.members.insert(observation);
    }

    /// Hand out the current members, leaving the set empty
    pub(crate) fn take_members(&mut self) -> BTreeSet<usize> {
        std::mem::take(&mut self.members)
    }
}
