use sales_forecast::error::ForecastError;
use series_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    match ForecastError::from(io_error) {
        ForecastError::IoError(_) => {}
        other => panic!("Expected IoError variant, got {:?}", other),
    }

    let math_error = MathError::InsufficientData {
        required: 7,
        available: 3,
    };
    match ForecastError::from(math_error) {
        ForecastError::InsufficientHistory {
            required,
            available,
        } => {
            assert_eq!(required, 7);
            assert_eq!(available, 3);
        }
        other => panic!("Expected InsufficientHistory variant, got {:?}", other),
    }

    let math_error = MathError::InvalidInput("lag must be positive".to_string());
    match ForecastError::from(math_error) {
        ForecastError::InvalidParameter(msg) => assert!(msg.contains("lag must be positive")),
        other => panic!("Expected InvalidParameter variant, got {:?}", other),
    }
}

#[test]
fn test_csv_error_conversion() {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader("1,2\n3\n".as_bytes());
    let err = reader
        .records()
        .find_map(|r| r.err())
        .expect("ragged rows should fail");

    assert!(matches!(ForecastError::from(err), ForecastError::CsvError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("horizon must be positive".to_string());
    assert!(error.to_string().contains("horizon must be positive"));

    let error = ForecastError::InsufficientHistory {
        required: 8,
        available: 5,
    };
    let text = error.to_string();
    assert!(text.contains('8'));
    assert!(text.contains('5'));

    assert!(ForecastError::EmptySeries.to_string().contains("Empty series"));

    let error = ForecastError::from(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
    let text = error.to_string();
    assert!(text.contains("IO error"));
    assert!(text.contains("permission denied"));
}
