//! Error taxonomy tests
//!
//! Only a missing plan is a client error; everything else is a 500.

use axum::http::StatusCode;
use inventario_sala::error::InventoryError;

#[test]
fn test_missing_input_is_bad_request() {
    let err = InventoryError::MissingInput("Arquivo 'planejamento.xlsx' não encontrado".into());
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Arquivo 'planejamento.xlsx' não encontrado");
}

#[test]
fn test_processing_errors_are_server_errors() {
    let errors = vec![
        InventoryError::Config("bad".into()),
        InventoryError::Spreadsheet("zip".into()),
        InventoryError::InvalidPlan("column 'dia' not found".into()),
        InventoryError::Detector("exit 1".into()),
        InventoryError::Upload("stream closed".into()),
        InventoryError::FolderNotFound("/fotos".into()),
    ];

    for err in errors {
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR, "{:?}", err);
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: InventoryError = io_err.into();

    assert!(matches!(err, InventoryError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: InventoryError = json_err.into();

    assert!(matches!(err, InventoryError::JsonParse(_)));
}

#[test]
fn test_common_error_is_transparent() {
    let common_err = inventario_common::Error::InvalidCount {
        column: "lousa".into(),
        value: "um".into(),
    };
    let err: InventoryError = common_err.into();

    assert!(matches!(err, InventoryError::Common(_)));
    assert_eq!(err.to_string(), "Invalid count in column 'lousa': um");
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
