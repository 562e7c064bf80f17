//! Editing scenarios: row allocation, range checks and reverting.

use editdata_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_created_rows_get_contiguous_ids_after_stored_rows() {
    let mut session = people_session(SessionConfig::default());

    let ids: Vec<RowId> = (0..3)
        .map(|_| session.create_row().unwrap().new_row_id)
        .collect();

    assert_eq!(ids, vec![RowId(5), RowId(6), RowId(7)]);
    assert_eq!(session.pending_edit_count(), 3);
    // Nothing reaches the result set before a commit.
    assert_eq!(session.row_count(), 5);
}

#[test]
fn test_create_reports_default_display_values() {
    let mut session = people_session(SessionConfig::new().with_null_text("(null)"));

    let created = session.create_row().unwrap();

    assert_eq!(
        created.default_values,
        vec![
            Some("NEXT VALUE FOR [dbo].[PeopleIds]".to_string()),
            Some("(null)".to_string()),
            Some("(null)".to_string()),
            Some("getdate()".to_string()),
        ]
    );
}

#[test]
fn test_row_ids_outside_the_result_set_are_rejected() {
    let mut session = people_session(SessionConfig::default());

    for row_id in [-1, 5] {
        let error = session.delete_row(row_id).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::OutOfRange, "delete_row({row_id})");
    }
    assert_eq!(
        session.update_cell(-1, 1, "x").unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
    assert_eq!(
        session.update_cell(5, 1, "x").unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
    assert_eq!(session.pending_edit_count(), 0);
}

#[test]
fn test_a_row_holds_at_most_one_pending_edit() {
    // GIVEN row 1 already has a pending update
    let mut session = people_session(SessionConfig::default());
    session.update_cell(1, 1, "Grace H.").unwrap();

    // WHEN
    let error = session.delete_row(1).unwrap_err();

    // THEN
    assert_eq!(error.kind(), ErrorKind::IllegalState);
    assert_eq!(session.pending_edit_count(), 1);
}

#[test]
fn test_deleted_row_rejects_cell_edits() {
    let mut session = people_session(SessionConfig::default());
    session.delete_row(3).unwrap();

    let error = session.update_cell(3, 1, "Barb").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
    let rows = session.get_rows(3, 1);
    assert_eq!(rows[0].state, EditRowState::DirtyDelete);
}

#[test]
fn test_invalid_cell_text_is_an_argument_error() {
    let mut session = people_session(SessionConfig::default());

    let error = session.update_cell(0, 0, "forty-two").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Argument);
    assert!(!session.has_pending_edit(0));
}

#[test]
fn test_unknown_column_is_out_of_range() {
    let mut session = people_session(SessionConfig::default());

    let error = session.update_cell(0, 9, "x").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::OutOfRange);
}

#[test]
fn test_setting_a_cell_back_to_its_original_value_drops_the_edit() {
    let mut session = people_session(SessionConfig::default());
    session.update_cell(2, 1, "Dijkstra").unwrap();
    assert!(session.has_pending_edit(2));

    let result = session.update_cell(2, 1, "Edsger").unwrap();

    assert!(!result.is_row_dirty);
    assert!(!session.has_pending_edit(2));
}

#[test]
fn test_revert_row_touches_only_that_row() {
    // GIVEN one edit of each kind
    let mut session = people_session(SessionConfig::default());
    let created = session.create_row().unwrap().new_row_id;
    session.update_cell(0, 1, "Ada L.").unwrap();
    session.delete_row(4).unwrap();

    // WHEN
    session.revert_row(0).unwrap();

    // THEN
    assert!(!session.has_pending_edit(0));
    assert!(session.has_pending_edit(created.raw() as i64));
    assert!(session.has_pending_edit(4));
    let row = &session.get_rows(0, 1)[0];
    assert_eq!(row.state, EditRowState::Clean);
    assert_eq!(row.cells[1].value.display, "Ada");
}

#[test]
fn test_revert_without_pending_edit_is_out_of_range() {
    let mut session = people_session(SessionConfig::default());

    assert_eq!(session.revert_row(0).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(session.revert_row(-3).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(
        session.revert_cell(0, 1).unwrap_err().kind(),
        ErrorKind::OutOfRange
    );
}

#[test]
fn test_reverting_the_last_changed_cell_drops_the_update() {
    let mut session = people_session(SessionConfig::default());
    session.update_cell(1, 1, "Grace H.").unwrap();
    session.update_cell(1, 2, "Admiral").unwrap();

    session.revert_cell(1, 1).unwrap();
    assert!(session.has_pending_edit(1));
    let result = session.revert_cell(1, 2).unwrap();

    assert!(!result.is_row_dirty);
    assert!(!session.has_pending_edit(1));
}

#[test]
fn test_reverted_create_keeps_its_id_reserved() {
    let mut session = people_session(SessionConfig::default());
    let first = session.create_row().unwrap().new_row_id;

    session.revert_row(first.raw() as i64).unwrap();
    let second = session.create_row().unwrap().new_row_id;

    assert_eq!(second, RowId(6));
}

#[test]
fn test_get_rows_merges_pending_edits_in_row_order() {
    let mut session = people_session(SessionConfig::default());
    session.update_cell(1, 1, "Grace H.").unwrap();
    session.delete_row(2).unwrap();
    let created = session.create_row().unwrap().new_row_id;
    session
        .update_cell(created.raw() as i64, 1, "Frances")
        .unwrap();

    let rows = session.get_rows(1, 10);

    let states: Vec<EditRowState> = rows.iter().map(|r| r.state).collect();
    assert_eq!(
        states,
        vec![
            EditRowState::DirtyUpdate,
            EditRowState::DirtyDelete,
            EditRowState::Clean,
            EditRowState::Clean,
            EditRowState::DirtyInsert,
        ]
    );
    assert_eq!(rows[0].cells[1].value.display, "Grace H.");
    assert!(rows[0].cells[1].is_dirty);
    assert_eq!(rows[4].id, created);
    assert_eq!(rows[4].cells[1].value.display, "Frances");
}

#[test]
fn test_read_only_column_cannot_be_edited() {
    let mut session = accounts_session();

    let error = session.update_cell(0, 0, "7").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Validation);
}
