use std::io::Write;

use driftwatch_domain::{ColumnType, ColumnValues};
use driftwatch_ports::{BatchSourcePort, ReferenceLoaderPort};
use tempfile::NamedTempFile;

use crate::csv::{CsvBatchSource, CsvReferenceLoader};

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const READMISSIONS: &str = "\
age,bmi,ward,admitted,readmitted
54,27.5,cardio,2024-01-03,true
61,31.2,ortho,2024-01-04,false
47,,cardio,2024-01-05,false
70,29.9,neuro,2024-01-07,true
";

#[test]
fn test_reference_types_are_inferred() {
    let file = write_csv(READMISSIONS);
    let reference = CsvReferenceLoader.load_reference(file.path()).unwrap();

    assert_eq!(reference.row_count(), 4);
    assert_eq!(reference.column_type("age"), Some(ColumnType::Numeric));
    assert_eq!(reference.column_type("bmi"), Some(ColumnType::Numeric));
    assert_eq!(reference.column_type("ward"), Some(ColumnType::Categorical));
    assert_eq!(reference.column_type("admitted"), Some(ColumnType::Temporal));
    assert_eq!(reference.column_type("readmitted"), Some(ColumnType::Categorical));
    assert_eq!(
        reference.numeric_columns(),
        ["age".to_string(), "bmi".to_string()]
    );
    assert_eq!(reference.stats("age").map(|s| s.mean), Some(58.0));
    assert_eq!(reference.stats("bmi").map(|s| s.count), Some(3));
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CsvReferenceLoader.load_reference(&dir.path().join("absent.csv"));
    assert!(result.is_err());
}

#[test]
fn test_batch_source_keeps_latest_rows() {
    let file = write_csv(READMISSIONS);
    let source = CsvBatchSource::new(file.path()).with_sample_rows(Some(2));

    let batch = source.fetch_current_batch().unwrap();

    assert_eq!(batch.row_count(), 2);
    match &batch.column("age").unwrap().values {
        ColumnValues::Numeric(values) => assert_eq!(values, &vec![Some(47.0), Some(70.0)]),
        other => panic!("unexpected column values: {other:?}"),
    }
}
