use super::*;

fn item(id: i64, title: &str) -> WorkItem {
    WorkItem {
        id,
        kind: "DCR".into(),
        title: title.into(),
        state: "Active".into(),
        area_path: "OC".into(),
        assigned_to: None,
        description_html: "desc".into(),
    }
}

#[test]
fn new_session_has_no_current_item_or_response() {
    let session = Session::new(Settings::default());
    assert!(session.work_item().is_none());
    assert!(session.response().is_none());
}

#[test]
fn successful_fetch_replaces_current_item_wholesale() {
    let mut session = Session::new(Settings::default());
    session.record_fetch(Ok(item(1, "first"))).unwrap();
    session.record_fetch(Ok(item(2, "second"))).unwrap();

    let current = session.work_item().unwrap();
    assert_eq!(current.id, 2);
    assert_eq!(current.title, "second");
}

#[test]
fn failed_fetch_surfaces_404_and_leaves_previous_item() {
    let mut session = Session::new(Settings::default());
    session.record_fetch(Ok(item(1, "kept"))).unwrap();

    let err = session
        .record_fetch(Err(WorkItemError::Http { status: 404, status_text: "Not Found".into() }))
        .unwrap_err();
    assert!(err.to_string().contains("404"));

    let current = session.work_item().unwrap();
    assert_eq!(current.id, 1);
    assert_eq!(current.title, "kept");
}

#[test]
fn regeneration_replaces_response() {
    let mut session = Session::new(Settings::default());
    session.record_response(Ok("first draft".into())).unwrap();
    session.record_response(Ok("second draft".into())).unwrap();
    assert_eq!(session.response(), Some("second draft"));
}

#[test]
fn failed_generation_leaves_previous_response() {
    let mut session = Session::new(Settings::default());
    session.record_response(Ok("kept".into())).unwrap();

    let err = session
        .record_response(Err(LlmError::ApiResponse { status: 429, message: "HTTP 429".into() }))
        .unwrap_err();
    assert!(err.to_string().contains("429"));
    assert_eq!(session.response(), Some("kept"));
}
