use crate::centroid::Centroid;
use crate::observation::Observation;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Label composition of a single centroid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Purity {
    /// The centroid currently owns no observations
    NoObservations,
    /// Percentage (0-100) of the centroid's members carrying each known label
    Breakdown(IndexMap<String, f64>),
}

impl Purity {
    /// Percentage for `label`, or `None` if the label is unknown or the centroid is empty
    pub fn percentage(&self, label: &str) -> Option<f64> {
        match self {
            Purity::NoObservations => None,
            Purity::Breakdown(map) => map.get(label).copied(),
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Purity::NoObservations => write!(f, "no observations assigned"),
            Purity::Breakdown(map) => {
                for (i, (label, pct)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:.2}%", label, pct)?;
                }
                Ok(())
            }
        }
    }
}

/// Score the label purity of `centroid` against the known label vocabulary.
///
/// Members without a label still count toward the total.
pub fn purity(centroid: &Centroid, observations: &[Observation], labels: &[String]) -> Purity {
    let total = centroid.len();
    if total == 0 {
        return Purity::NoObservations;
    }

    let mut counts: IndexMap<String, usize> = labels.iter().map(|l| (l.clone(), 0)).collect();
    for label in centroid
        .members()
        .iter()
        .filter_map(|&idx| observations.get(idx).and_then(|o| o.label()))
    {
        if let Some(count) = counts.get_mut(label) {
            *count += 1;
        }
    }

    Purity::Breakdown(
        counts
            .into_iter()
            .map(|(label, count)| (label, count as f64 * 100.0 / total as f64))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn vocabulary() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_purity_breakdown() {
        let observations = vec![
            Observation::labelled(vec![0.0], "a"),
            Observation::labelled(vec![1.0], "a"),
            Observation::labelled(vec![2.0], "b"),
        ];
        let mut centroid = Centroid::new(0, array![1.0]);
        for i in 0..3 {
            centroid.insert_member(i);
        }

        let purity = purity(&centroid, &observations, &vocabulary());

        assert_relative_eq!(purity.percentage("a").unwrap(), 200.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(purity.percentage("b").unwrap(), 100.0 / 3.0, epsilon = 1e-9);
        assert_eq!(purity.to_string(), "a: 66.67%, b: 33.33%");
    }

    #[test]
    fn test_purity_empty_centroid() {
        let centroid = Centroid::new(1, array![4.0]);

        let purity = purity(&centroid, &[], &vocabulary());

        assert_eq!(purity, Purity::NoObservations);
        assert_eq!(purity.to_string(), "no observations assigned");
        assert_eq!(purity.percentage("a"), None);
    }

    #[test]
    fn test_purity_reports_absent_labels_as_zero() {
        let observations = vec![Observation::labelled(vec![0.0], "b")];
        let mut centroid = Centroid::new(0, array![0.0]);
        centroid.insert_member(0);

        let purity = purity(&centroid, &observations, &vocabulary());

        assert_relative_eq!(purity.percentage("a").unwrap(), 0.0);
        assert_relative_eq!(purity.percentage("b").unwrap(), 100.0);
    }
}
