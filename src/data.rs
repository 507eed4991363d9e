use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DataError;

/// Recorded facilitation, one column per stimulation frequency.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceData {
    /// Label used in plot titles, usually the file stem ("CA1").
    pub label: String,
    pub columns: BTreeMap<u32, Vec<f64>>,
}

impl ReferenceData {
    pub fn frequencies(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns.keys().copied()
    }

    pub fn get(&self, frequency: u32) -> Option<&[f64]> {
        self.columns.get(&frequency).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

pub fn load_reference_data(path: impl AsRef<Path>) -> Result<ReferenceData, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let label = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let data = parse_reference_data(file, label)?;
    log::info!(
        "Loaded {} frequencies from {}: {:?}",
        data.len(),
        path.display(),
        data.frequencies().collect::<Vec<_>>()
    );
    Ok(data)
}

/// Parses a table whose header row holds integer frequencies (Hz) and whose
/// remaining rows hold one measurement per pulse for each frequency.
pub fn parse_reference_data<R: Read>(reader: R, label: String) -> Result<ReferenceData, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let frequencies = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(column, label)| parse_frequency(label).ok_or_else(|| DataError::BadHeader {
            column,
            label: label.to_string(),
        }))
        .collect::<Result<Vec<u32>, _>>()?;
    if frequencies.is_empty() {
        return Err(DataError::Empty);
    }

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); frequencies.len()];
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2; // 1-based line number, after the header
        if record.len() != frequencies.len() {
            return Err(DataError::Ragged {
                row,
                expected: frequencies.len(),
                actual: record.len(),
            });
        }
        for (column, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| DataError::BadValue {
                row,
                column,
                value: field.to_string(),
            })?;
            values[column].push(value);
        }
    }
    if values[0].is_empty() {
        return Err(DataError::Empty);
    }

    let mut columns = BTreeMap::new();
    for (frequency, column) in frequencies.into_iter().zip(values) {
        if columns.insert(frequency, column).is_some() {
            return Err(DataError::DuplicateFrequency(frequency));
        }
    }
    Ok(ReferenceData { label, columns })
}

fn parse_frequency(label: &str) -> Option<u32> {
    if let Ok(f) = label.parse::<u32>() {
        return (f > 0).then_some(f);
    }
    let f = label.parse::<f64>().ok()?;
    (f.fract() == 0.0 && f > 0.0 && f <= u32::MAX as f64).then_some(f as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "5,20, 50\n100,100,100\n110,140.5,120\n105,160,90\n";

    #[test]
    fn columns_keyed_by_frequency() {
        let data = parse_reference_data(TABLE.as_bytes(), "CA1".into()).unwrap();
        assert_eq!(data.label, "CA1");
        assert_eq!(data.frequencies().collect::<Vec<_>>(), vec![5, 20, 50]);
        assert_eq!(data.get(20), Some(&[100.0, 140.5, 160.0][..]));
        assert_eq!(data.get(50), Some(&[100.0, 120.0, 90.0][..]));
        assert_eq!(data.get(10), None);
    }

    #[test]
    fn integral_float_headers_are_accepted() {
        let data = parse_reference_data("20.0,40\n1,2\n".as_bytes(), String::new()).unwrap();
        assert_eq!(data.frequencies().collect::<Vec<_>>(), vec![20, 40]);
    }

    #[test]
    fn bad_header() {
        let err = parse_reference_data("20,fast\n1,2\n".as_bytes(), String::new()).unwrap_err();
        assert!(matches!(err, DataError::BadHeader { column: 1, .. }));
        let err = parse_reference_data("20.5\n1\n".as_bytes(), String::new()).unwrap_err();
        assert!(matches!(err, DataError::BadHeader { column: 0, .. }));
        for zero in ["0", "0.0"] {
            let table = format!("20,{}\n1,2\n", zero);
            let err = parse_reference_data(table.as_bytes(), String::new()).unwrap_err();
            assert!(matches!(err, DataError::BadHeader { column: 1, .. }));
        }
    }

    #[test]
    fn ragged_rows() {
        let err = parse_reference_data("20,40\n1,2\n3\n".as_bytes(), String::new()).unwrap_err();
        assert!(matches!(
            err,
            DataError::Ragged {
                row: 3,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn bad_value() {
        let err = parse_reference_data("20\n1\nabc\n".as_bytes(), String::new()).unwrap_err();
        assert!(matches!(err, DataError::BadValue { row: 3, column: 0, .. }));
    }

    #[test]
    fn empty_and_duplicate() {
        assert!(matches!(
            parse_reference_data("20,40\n".as_bytes(), String::new()),
            Err(DataError::Empty)
        ));
        assert!(matches!(
            parse_reference_data("20,20\n1,2\n".as_bytes(), String::new()),
            Err(DataError::DuplicateFrequency(20))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_reference_data("/definitely/not/here.csv"),
            Err(DataError::Io { .. })
        ));
    }
}
