use ndarray::{Array1, ArrayView1};

/// A single input vector with an optional ground-truth label.
///
/// Coordinates and label are fixed at construction. The assigned cluster is
/// written by the assignment step and is `None` until the first iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    coordinates: Array1<f64>,
    label: Option<String>,
    cluster: Option<usize>,
}

impl Observation {
    /// Create an unlabelled observation
    ///
    /// # Arguments
    ///
    /// * `coordinates` - Position in D-dimensional space
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self {
            coordinates: Array1::from(coordinates),
            label: None,
            cluster: None,
        }
    }

    /// Create an observation carrying a ground-truth label
    ///
    /// # Arguments
    ///
    /// * `coordinates` - Position in D-dimensional space
    /// * `label` - Ground-truth class used for purity scoring
    pub fn labelled(coordinates: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            coordinates: Array1::from(coordinates),
            label: Some(label.into()),
            cluster: None,
        }
    }

    /// Read-only view of the coordinates
    pub fn coordinates(&self) -> ArrayView1<'_, f64> {
        self.coordinates.view()
    }

    /// Ground-truth label, if the observation has one
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Index of the centroid this observation is currently assigned to
    pub fn cluster(&self) -> Option<usize> {
        self.cluster
    }

    /// Number of coordinates
    pub fn dimensions(&self) -> usize {
        self.coordinates.len()
    }

    pub(crate) fn assign(&mut self, cluster: usize) {
        self.cluster = Some(cluster);
    }
}

impl From<Vec<f64>> for Observation {
    fn from(coordinates: Vec<f64>) -> Self {
        Observation::new(coordinates)
    }
}

/// Distinct labels in order of first appearance
pub fn label_vocabulary(observations: &[Observation]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for label in observations.iter().filter_map(|o| o.label()) {
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_observation_is_unassigned() {
        let obs = Observation::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(obs.dimensions(), 3);
        assert_eq!(obs.cluster(), None);
        assert_eq!(obs.label(), None);
    }

    #[test]
    fn test_assign() {
        let mut obs = Observation::labelled(vec![0.5], "setosa");
        obs.assign(2);
        assert_eq!(obs.cluster(), Some(2));
        assert_eq!(obs.label(), Some("setosa"));
    }

    #[test]
    fn test_label_vocabulary_first_seen_order() {
        let observations = vec![
            Observation::labelled(vec![0.0], "b"),
            Observation::labelled(vec![1.0], "a"),
            Observation::new(vec![2.0]),
            Observation::labelled(vec![3.0], "b"),
        ];
        assert_eq!(label_vocabulary(&observations), vec!["b", "a"]);
    }
}
