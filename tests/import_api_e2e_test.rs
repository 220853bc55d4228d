// ==========================================
// 酒店后台 - ImportApi 端到端测试
// ==========================================
// 覆盖: API 响应字段 / 错误分类 / 配置表覆写别名 / 查询接口
// ==========================================


use hotel_backoffice::api::{ApiError, ImportApi};
use hotel_backoffice::config::{AliasTable, ConfigManager};
use hotel_backoffice::domain::CanonicalField;
use test_helpers::{english_csv, write_temp_file, TestEnv};

#[tokio::test]
async fn test_response_carries_diagnostics() {
    let env = TestEnv::new();
    let api = ImportApi::new(env.config.clone());
    let file = english_csv(&[
        "Alice,2025-03-01,2025-03-03,101,500,EGP",
        ",,,,,",
        "Broken,2025-03-01,2025-03-03,101,500,EGP,extra",
    ]);

    let response = api
        .import_reservations(file.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(response.total_rows, 2);
    assert_eq!(response.imported, 1);
    assert_eq!(response.failed, 1);
    assert_eq!(response.encoding.as_deref(), Some("UTF-8"));
    assert_eq!(
        response.detected_headers,
        vec!["Guest Name", "Check In", "Check Out", "Room", "Your Revenue", "Currency"]
    );
    assert!(!response.message.is_empty());

    let failures = api.get_row_failures(&response.batch_id).await.unwrap();
    assert_eq!(failures.len(), 1);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["imported"], 1);
}

#[tokio::test]
async fn test_upload_through_api() {
    let env = TestEnv::new();
    let api = ImportApi::new(env.config.clone());

    let response = api
        .import_upload("March Bookings.CSV", "Guest Name,Check In\nAlice,2025-03-01\n".as_bytes())
        .await
        .unwrap();

    assert_eq!(response.imported, 1);
    assert_eq!(response.file_name.as_deref(), Some("March Bookings.CSV"));
    assert_eq!(env.staged_file_count(), 0);
}

#[tokio::test]
async fn test_error_categories() {
    let env = TestEnv::new();
    let api = ImportApi::new(env.config.clone());

    let pdf = write_temp_file(".pdf", b"%PDF-1.4");
    let err = api
        .import_reservations(pdf.path().to_str().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UnsupportedFormat(_)));
    assert!(!err.localized_message().is_empty());

    let err = api.import_reservations("/no/such/file.csv").await.unwrap_err();
    assert!(matches!(err, ApiError::ReadFailure(_)));

    let err = api.get_row_failures("").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_upload_size_limit() {
    let env = TestEnv::new();
    let api = ImportApi::new(env.config.clone().with_max_file_bytes(16));

    let err = api
        .import_upload("big.csv", "Guest Name,Check In\nAlice,2025-03-01\n".as_bytes())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ReadFailure(_)));
    assert_eq!(api.count_reservations().await.unwrap(), 0);
}

#[tokio::test]
async fn test_stored_alias_override_is_applied() {
    let env = TestEnv::new();
    let manager = ConfigManager::new(&env.config.db_path).unwrap();
    let mut overrides = AliasTable::empty();
    overrides.set(CanonicalField::GuestName, ["Traveler"]);
    manager.save_alias_table(&overrides).unwrap();

    let aliases = manager.load_alias_table().unwrap();
    assert_eq!(aliases.aliases(CanonicalField::GuestName), &["Traveler"]);
    assert_eq!(aliases.aliases(CanonicalField::CheckIn), &["تسجيل الوصول", "Check In"]);

    let api = ImportApi::new(env.config.clone().with_aliases(aliases));
    let file = write_temp_file(".csv", "Traveler,Guest Name\nEve,Ignored\n".as_bytes());
    api.import_reservations(file.path().to_str().unwrap())
        .await
        .unwrap();

    let listed = api.list_reservations(Some(1)).await.unwrap();
    assert_eq!(listed[0].record.guest_name, "Eve");
}

#[tokio::test]
async fn test_list_batches_after_imports() {
    let env = TestEnv::new();
    let api = ImportApi::new(env.config.clone());
    let file = english_csv(&["Alice,2025-03-01,2025-03-03,101,500,EGP"]);

    api.import_reservations(file.path().to_str().unwrap())
        .await
        .unwrap();
    let batches = api.list_batches(5).await.unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].imported_rows, 1);
    assert_eq!(batches[0].total_rows, 1);
}
