//! Opening a session over a finished query.

use editdata_tests::prelude::*;
use pretty_assertions::assert_eq;

fn people_ref() -> TableRef {
    TableRef::new("People").with_schema("dbo")
}

#[test]
fn test_initialize_reconciles_metadata_with_the_result() {
    let provider = StaticMetadataProvider::new().with_table(people_table());

    let session = EditSession::initialize(
        MemoryQuery::finished(people_result_set()),
        &provider,
        &people_ref(),
        SessionConfig::default(),
    )
    .unwrap();

    assert_eq!(session.table().escaped_multipart_name(), "[dbo].[People]");
    assert_eq!(session.table().column_count(), 4);
    assert_eq!(session.row_count(), 5);
    assert_eq!(session.pending_edit_count(), 0);
}

#[test]
fn test_query_still_running_is_rejected() {
    let provider = StaticMetadataProvider::new().with_table(people_table());

    let error = EditSession::initialize(
        MemoryQuery::running(),
        &provider,
        &people_ref(),
        SessionConfig::default(),
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotExecuted);
}

#[test]
fn test_more_than_one_result_set_is_rejected() {
    let provider = StaticMetadataProvider::new().with_table(people_table());
    let query = MemoryQuery::with_result_sets(vec![people_result_set(), people_result_set()]);

    let error = EditSession::initialize(query, &provider, &people_ref(), SessionConfig::default())
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::InvalidResultSetCount);
}

#[test]
fn test_unknown_table_is_rejected() {
    let provider = StaticMetadataProvider::new();

    let error = EditSession::initialize(
        MemoryQuery::finished(people_result_set()),
        &provider,
        &people_ref(),
        SessionConfig::default(),
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_initialized_session_commits_end_to_end() {
    // GIVEN
    let provider = StaticMetadataProvider::new().with_table(people_table());
    let mut session = EditSession::initialize(
        MemoryQuery::finished(people_result_set()),
        &provider,
        &people_ref(),
        SessionConfig::from_json(r#"{ "capture_inserted_values": false }"#).unwrap(),
    )
    .unwrap();
    session.update_cell(4, 1, "Don").unwrap();
    let connection = Arc::new(ScriptedConnection::new());

    // WHEN
    let summary = commit_and_wait(&session, connection.clone()).await.unwrap();

    // THEN
    assert_eq!(summary.updated, 1);
    assert_eq!(
        connection.executed_sql(),
        vec!["UPDATE [dbo].[People] SET [name] = @Value4_1 WHERE [id] = @Param4_0".to_string()]
    );
    session.dispose();
}
