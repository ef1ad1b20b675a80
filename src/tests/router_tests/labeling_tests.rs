use super::{body_string, get};
use crate::errors::ServerError;
use crate::labeling::load_records;
use crate::router::handle;
use crate::tests::utils::test_state;
use astra::Body;
use http::{Method, Request};

fn post(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::from(form.as_bytes().to_vec())).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

/// Logs in and returns the `name=value` part of the session cookie.
fn login(state: &crate::state::AppState, annotator: &str) -> String {
    let resp = handle(post("/label/login", &format!("annotator={annotator}"), None), state)
        .expect("Handler failed");
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/label");

    let set_cookie = resp
        .headers()
        .get("Set-Cookie")
        .expect("session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[test]
fn labeling_requires_a_session() {
    let state = test_state();

    let resp = handle(get("/label"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/label/login");

    let body = body_string(handle(get("/label/login"), &state).expect("Handler failed"));
    assert!(body.contains("annotator_1"));
    assert!(body.contains("annotator_3"));
}

#[test]
fn unknown_annotator_cannot_log_in() {
    let state = test_state();
    assert!(matches!(
        handle(post("/label/login", "annotator=mallory", None), &state),
        Err(ServerError::BadRequest(_))
    ));
}

#[test]
fn annotator_labels_the_next_record_and_moves_on() {
    let state = test_state();
    let cookie = login(&state, "annotator_2");

    // p2 already has two agreeing votes; p1 is the only thing left to label.
    let body = body_string(handle(get_with_cookie("/label", &cookie), &state).expect("Handler failed"));
    assert!(body.contains("Property p1"));

    let resp = handle(post("/label", "property_id=p1&label=distressed", Some(&cookie)), &state)
        .expect("Handler failed");
    assert_eq!(resp.status(), 303);

    let records = load_records(state.sheets.as_ref(), &state.cfg.label_sheet).unwrap();
    assert_eq!(records[0].vote(1), Some("distressed"));
    assert_eq!(records[0].vote(0), None);

    let body = body_string(handle(get_with_cookie("/label", &cookie), &state).expect("Handler failed"));
    assert!(body.contains("All caught up"));
    assert!(body.contains("1 labeled this session"));
}

#[test]
fn second_vote_on_the_same_record_is_rejected() {
    let state = test_state();
    let cookie = login(&state, "annotator_1");

    assert!(matches!(
        handle(post("/label", "property_id=p2&label=maintained", Some(&cookie)), &state),
        Err(ServerError::BadRequest(_))
    ));
    assert!(matches!(
        handle(post("/label", "property_id=p9&label=maintained", Some(&cookie)), &state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn logout_ends_the_session() {
    let state = test_state();
    let cookie = login(&state, "annotator_3");

    let resp = handle(post("/label/logout", "", Some(&cookie)), &state).expect("Handler failed");
    assert_eq!(resp.status(), 303);
    assert!(resp
        .headers()
        .get("Set-Cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let resp = handle(get_with_cookie("/label", &cookie), &state).expect("Handler failed");
    assert_eq!(resp.headers().get("Location").unwrap(), "/label/login");
}

#[test]
fn analytics_summarize_the_sheet() {
    let state = test_state();

    let resp = handle(get("/label/analytics"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Labeling Analytics"));
    assert!(body.contains("Labels by annotator_1"));
    assert!(body.contains("50%"));
}
