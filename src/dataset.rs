//! Loading observations from comma-delimited text.
//!
//! Every non-blank record is one observation. When the data is labelled, the
//! last field is the label and the remaining fields are coordinates.

use crate::error::KMeansError;
use crate::observation::Observation;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Observations read from a delimited file
#[derive(Debug, Clone)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    /// Distinct labels in order of first appearance (empty for unlabelled data)
    pub labels: Vec<String>,
    /// Shared number of coordinates
    pub dimensions: usize,
}

impl Dataset {
    /// Read a dataset from a file on disk
    pub fn from_path<P: AsRef<Path>>(path: P, labelled: bool) -> Result<Self, KMeansError> {
        let file = File::open(path)?;
        Self::from_reader(file, labelled)
    }

    /// Read a dataset from any reader
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A coordinate is not a finite number (`Parse`)
    /// - Records have different numbers of coordinates (`DimensionMismatch`)
    /// - There are no records (`EmptyInput`)
    pub fn from_reader<R: Read>(reader: R, labelled: bool) -> Result<Self, KMeansError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut observations = Vec::new();
        let mut labels: Vec<String> = Vec::new();
        let mut dimensions: Option<usize> = None;

        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            let line_no = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            let (coordinates, label) = parse_record(&record, labelled, line_no)?;

            match dimensions {
                None => dimensions = Some(coordinates.len()),
                Some(d) if d != coordinates.len() => {
                    return Err(KMeansError::DimensionMismatch {
                        expected: d,
                        found: coordinates.len(),
                    })
                }
                Some(_) => {}
            }

            let observation = match label {
                Some(label) => {
                    if !labels.contains(&label) {
                        labels.push(label.clone());
                    }
                    Observation::labelled(coordinates, label)
                }
                None => Observation::new(coordinates),
            };
            observations.push(observation);
        }

        let dimensions = dimensions.ok_or(KMeansError::EmptyInput)?;

        Ok(Self {
            observations,
            labels,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

fn parse_record(
    record: &StringRecord,
    labelled: bool,
    line_no: usize,
) -> Result<(Vec<f64>, Option<String>), KMeansError> {
    let n_coordinates = if labelled {
        if record.len() < 2 {
            return Err(KMeansError::Parse {
                line: line_no,
                message: "expected at least one coordinate followed by a label".to_string(),
            });
        }
        record.len() - 1
    } else {
        record.len()
    };

    let coordinates = record
        .iter()
        .take(n_coordinates)
        .map(|field| parse_coordinate(field, line_no))
        .collect::<Result<Vec<f64>, KMeansError>>()?;
    let label = if labelled {
        record.get(n_coordinates).map(str::to_string)
    } else {
        None
    };

    Ok((coordinates, label))
}

fn parse_coordinate(field: &str, line_no: usize) -> Result<f64, KMeansError> {
    let value = field.parse::<f64>().map_err(|e| KMeansError::Parse {
        line: line_no,
        message: format!("invalid coordinate '{}': {}", field, e),
    })?;
    if !value.is_finite() {
        return Err(KMeansError::Parse {
            line: line_no,
            message: format!("coordinate '{}' is not finite", field),
        });
    }
    Ok(value)
}
