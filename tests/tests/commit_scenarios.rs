//! Commit scenarios: ordering, reconciliation and partial failure.

use editdata_tests::prelude::*;
use pretty_assertions::assert_eq;
use tokio::sync::Semaphore;

fn row_value(session: &EditSession, row_id: i64, ordinal: usize) -> Value {
    session
        .get_rows(0, usize::MAX)
        .into_iter()
        .find(|row| row.id == RowId(row_id as u64))
        .map(|row| row.cells[ordinal].value.raw.clone())
        .unwrap_or(Value::Null)
}

#[tokio::test]
async fn test_mixed_edits_commit_in_order_and_reconcile() {
    // GIVEN a five-row result with two creates, a delete and an update
    let mut session = people_session(SessionConfig::default());
    assert_eq!(session.create_row().unwrap().new_row_id, RowId(5));
    assert_eq!(session.create_row().unwrap().new_row_id, RowId(6));
    session.delete_row(2).unwrap();
    session.update_cell(0, 0, "5").unwrap();
    let connection = Arc::new(ScriptedConnection::new());

    // WHEN
    let summary = commit_and_wait(&session, connection.clone()).await.unwrap();

    // THEN
    assert_eq!(
        (summary.created, summary.updated, summary.deleted),
        (2, 1, 1)
    );
    assert_eq!(session.pending_edit_count(), 0);
    assert_eq!(session.row_count(), 6);
    assert_eq!(row_value(&session, 0, 0), Value::Int(5));

    let insert = "INSERT INTO [dbo].[People] OUTPUT inserted.[id], inserted.[name], \
                  inserted.[bio], inserted.[joined] DEFAULT VALUES";
    assert_eq!(
        connection.executed_sql(),
        vec![
            insert.to_string(),
            insert.to_string(),
            "UPDATE [dbo].[People] SET [id] = @Value0_0 WHERE [id] = @Param0_0".to_string(),
            "DELETE FROM [dbo].[People] WHERE [id] = @Param2_0".to_string(),
        ]
    );
    let update = &connection.executed()[2];
    assert_eq!(update.parameter("@Value0_0").unwrap().value, Value::Int(5));
    assert_eq!(update.parameter("@Param0_0").unwrap().value, Value::Int(100));
}

#[tokio::test]
async fn test_deletes_run_from_highest_row_down() {
    let mut session = people_session(SessionConfig::default());
    for row_id in [1, 4, 0, 3] {
        session.delete_row(row_id).unwrap();
    }
    let connection = Arc::new(ScriptedConnection::new());

    commit_and_wait(&session, connection.clone()).await.unwrap();

    let targets: Vec<String> = connection
        .executed()
        .iter()
        .map(|s| s.parameters[0].name.clone())
        .collect();
    assert_eq!(targets, vec!["@Param4_0", "@Param3_0", "@Param1_0", "@Param0_0"]);
    assert_eq!(session.row_count(), 1);
}

#[tokio::test]
async fn test_failure_keeps_failing_and_later_edits_pending() {
    // GIVEN the database rejects every DELETE
    let mut session = people_session(SessionConfig::default());
    session.create_row().unwrap();
    session.update_cell(0, 1, "Ada L.").unwrap();
    session.delete_row(3).unwrap();
    session.delete_row(1).unwrap();
    let connection = Arc::new(
        ScriptedConnection::new().fail_when(|s| s.sql.starts_with("DELETE")),
    );

    // WHEN
    let error = commit_and_wait(&session, connection.clone())
        .await
        .unwrap_err();

    // THEN the create and update stay applied; both deletes stay pending
    assert_eq!(error.kind(), ErrorKind::Execution);
    assert_eq!(connection.executed().len(), 3);
    assert_eq!(session.pending_edit_count(), 2);
    assert!(session.has_pending_edit(3));
    assert!(session.has_pending_edit(1));
    assert!(!session.has_pending_edit(5));
    assert_eq!(session.row_count(), 6);
    assert_eq!(row_value(&session, 0, 1), Value::from("Ada L."));

    // AND a later commit may retry what is left
    session.revert_row(3).unwrap();
    let retry = Arc::new(ScriptedConnection::new());
    let summary = commit_and_wait(&session, retry).await.unwrap();
    assert_eq!(summary.deleted, 1);
    assert_eq!(session.pending_edit_count(), 0);
}

#[tokio::test]
async fn test_missing_value_fails_commit_before_anything_executes() {
    // GIVEN a new account without its required owner, ordered first
    let mut session = accounts_session();
    session.create_row().unwrap();
    session.update_cell(0, 1, "admin").unwrap();
    session.delete_row(1).unwrap();
    let connection = Arc::new(ScriptedConnection::new());

    // WHEN
    let error = commit_and_wait(&session, connection.clone())
        .await
        .unwrap_err();

    // THEN
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert!(connection.executed().is_empty());
    assert_eq!(session.pending_edit_count(), 3);
}

#[tokio::test]
async fn test_key_less_table_fails_at_commit_not_at_edit() {
    let mut session = heap_session();

    // Accepted optimistically.
    session.update_cell(0, 0, "restarted").unwrap();

    let error = commit_and_wait(&session, Arc::new(ScriptedConnection::new()))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert!(session.has_pending_edit(0));
}

#[tokio::test]
async fn test_captured_values_replace_supplied_values() {
    // GIVEN the server assigns the id and join date
    let mut session = people_session(SessionConfig::default());
    let row_id = session.create_row().unwrap().new_row_id;
    session.update_cell(row_id.raw() as i64, 1, "Zed").unwrap();
    let connection = Arc::new(ScriptedConnection::new().returning_row(vec![
        Value::Int(900),
        Value::from("Zed"),
        Value::Null,
        Value::from("2024-05-01 09:30:00"),
    ]));

    // WHEN
    commit_and_wait(&session, connection.clone()).await.unwrap();

    // THEN
    assert_eq!(row_value(&session, 5, 0), Value::Int(900));
    assert_eq!(row_value(&session, 5, 1), Value::from("Zed"));
    let insert = &connection.executed()[0];
    assert!(insert.captures_output);
    assert_eq!(insert.parameter("@Value5_1").unwrap().value, Value::from("Zed"));
}

#[tokio::test]
async fn test_capture_can_be_switched_off() {
    let mut session = people_session(SessionConfig::new().with_capture_inserted_values(false));
    session.create_row().unwrap();
    let connection = Arc::new(ScriptedConnection::new());

    commit_and_wait(&session, connection.clone()).await.unwrap();

    assert_eq!(
        connection.executed_sql(),
        vec!["INSERT INTO [dbo].[People] DEFAULT VALUES".to_string()]
    );
    assert!(row_value(&session, 5, 0).is_null());
}

#[tokio::test]
async fn test_empty_commit_succeeds() {
    let session = people_session(SessionConfig::default());

    let summary = commit_and_wait(&session, Arc::new(ScriptedConnection::new()))
        .await
        .unwrap();

    assert_eq!(summary.total(), 0);
}

/// Holds every statement until a permit is released.
struct GatedConnection {
    gate: Semaphore,
}

#[async_trait::async_trait]
impl EditConnection for GatedConnection {
    async fn execute(
        &self,
        _statement: &EditStatement,
    ) -> Result<editdata_edit::ExecutionOutcome, editdata_commit::DriverError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| editdata_commit::DriverError::new(e.to_string()))?;
        permit.forget();
        Ok(editdata_edit::ExecutionOutcome::affected(1))
    }
}

#[tokio::test]
async fn test_second_commit_while_one_is_running_is_rejected() {
    // GIVEN a commit blocked inside the connection
    let mut session = people_session(SessionConfig::default());
    session.delete_row(0).unwrap();
    let gated = Arc::new(GatedConnection {
        gate: Semaphore::new(0),
    });
    let first = session
        .commit_edits(gated.clone(), |_| {}, |e| panic!("first commit failed: {}", e))
        .unwrap();
    assert!(session.is_committing());

    // WHEN
    let second = session.commit_edits(Arc::new(ScriptedConnection::new()), |_| {}, |_| {});

    // THEN the first is unaffected
    assert_eq!(second.unwrap_err().kind(), ErrorKind::IllegalState);
    gated.gate.add_permits(1);
    first.wait().await.unwrap();
    assert!(!session.is_committing());
    assert_eq!(session.pending_edit_count(), 0);
}

#[tokio::test]
async fn test_edits_are_rejected_while_a_commit_is_running() {
    // GIVEN a commit of row 0 blocked inside the connection
    let mut session = people_session(SessionConfig::default());
    session.update_cell(0, 1, "first").unwrap();
    let gated = Arc::new(GatedConnection {
        gate: Semaphore::new(0),
    });
    let commit = session
        .commit_edits(gated.clone(), |_| {}, |e| panic!("commit failed: {}", e))
        .unwrap();

    // WHEN
    let later = session.update_cell(0, 2, "later bio");

    // THEN nothing is accepted that the commit would then drop
    assert_eq!(later.unwrap_err().kind(), ErrorKind::IllegalState);
    assert_eq!(session.create_row().unwrap_err().kind(), ErrorKind::IllegalState);
    assert_eq!(session.delete_row(1).unwrap_err().kind(), ErrorKind::IllegalState);
    assert_eq!(session.revert_row(0).unwrap_err().kind(), ErrorKind::IllegalState);
    assert_eq!(
        session.revert_cell(0, 1).unwrap_err().kind(),
        ErrorKind::IllegalState
    );

    gated.gate.add_permits(1);
    commit.wait().await.unwrap();
    assert_eq!(session.pending_edit_count(), 0);
    assert_eq!(row_value(&session, 0, 1), Value::from("first"));

    // AND editing resumes once it is done
    session.update_cell(0, 2, "later bio").unwrap();
    assert!(session.has_pending_edit(0));
}

#[tokio::test]
async fn test_committed_create_keeps_its_allocated_id() {
    // GIVEN the first of two creates is discarded
    let mut session = people_session(SessionConfig::new().with_capture_inserted_values(false));
    let discarded = session.create_row().unwrap().new_row_id;
    let kept = session.create_row().unwrap().new_row_id;
    session.revert_row(discarded.raw() as i64).unwrap();
    session.update_cell(kept.raw() as i64, 1, "Zed").unwrap();

    // WHEN
    let summary = commit_and_wait(&session, Arc::new(ScriptedConnection::new()))
        .await
        .unwrap();

    // THEN the row is stored under the id the client was given
    assert_eq!(kept, RowId(6));
    assert_eq!(summary.changes[0].row_id(), kept);
    assert_eq!(row_value(&session, 6, 1), Value::from("Zed"));
    let ids: Vec<RowId> = session.get_rows(0, usize::MAX).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RowId(0), RowId(1), RowId(2), RowId(3), RowId(4), RowId(6)]);

    // AND the id keeps addressing that row
    session.update_cell(6, 1, "Zoe").unwrap();
    assert!(session.has_pending_edit(6));
    assert_eq!(session.get_rows(5, 1)[0].cells[1].value.display, "Zoe");
}

#[tokio::test]
async fn test_created_ids_stay_stable_across_failed_and_reverted_creates() {
    // GIVEN a first commit whose INSERT is rejected
    let mut session = people_session(SessionConfig::new().with_capture_inserted_values(false));
    let failed = session.create_row().unwrap().new_row_id;
    session.update_cell(0, 1, "Ada L.").unwrap();
    let rejecting = Arc::new(ScriptedConnection::new().fail_when(|s| s.sql.starts_with("INSERT")));
    let error = commit_and_wait(&session, rejecting).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Execution);
    assert_eq!(session.pending_edit_count(), 2);

    // WHEN the failed create is reverted, another takes its place, and both
    // that and a later create are committed separately
    session.revert_row(failed.raw() as i64).unwrap();
    let frances = session.create_row().unwrap().new_row_id;
    session.update_cell(frances.raw() as i64, 1, "Frances").unwrap();
    commit_and_wait(&session, Arc::new(ScriptedConnection::new()))
        .await
        .unwrap();
    let john = session.create_row().unwrap().new_row_id;
    session.update_cell(john.raw() as i64, 1, "John").unwrap();
    commit_and_wait(&session, Arc::new(ScriptedConnection::new()))
        .await
        .unwrap();

    // THEN ids were allocated contiguously and address the committed rows
    assert_eq!((failed, frances, john), (RowId(5), RowId(6), RowId(7)));
    assert_eq!(session.row_count(), 7);
    assert_eq!(row_value(&session, 0, 1), Value::from("Ada L."));
    assert_eq!(row_value(&session, 6, 1), Value::from("Frances"));
    assert_eq!(row_value(&session, 7, 1), Value::from("John"));

    // AND edits by those ids reach the right rows
    session.update_cell(6, 1, "Frances A.").unwrap();
    session.delete_row(7).unwrap();
    let connection = Arc::new(ScriptedConnection::new());
    commit_and_wait(&session, connection.clone()).await.unwrap();
    assert_eq!(row_value(&session, 6, 1), Value::from("Frances A."));
    assert_eq!(session.row_count(), 6);
    assert!(session.get_rows(0, usize::MAX).iter().all(|r| r.id != RowId(7)));
    assert_eq!(
        connection.executed_sql(),
        vec![
            "UPDATE [dbo].[People] SET [name] = @Value6_1 WHERE [id] IS NULL".to_string(),
            "DELETE FROM [dbo].[People] WHERE [id] IS NULL".to_string(),
        ]
    );
}
