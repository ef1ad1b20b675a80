use super::{body_string, get};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{test_state, LOCATION, SNAPSHOT};

fn city_query() -> String {
    url::form_urlencoded::byte_serialize(LOCATION.as_bytes()).collect()
}

#[test]
fn home_and_city_selector_render() {
    let state = test_state();

    let resp = handle(get("/"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let resp = handle(get("/agents"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("san antonio, tx"));
    assert!(body.contains("austin, tx"));
}

#[test]
fn city_search_ranks_agents_by_listing_count() {
    let state = test_state();

    let resp = handle(get(&format!("/agents/search?city={}", city_query())), &state)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    let ann = body.find("Ann Agent").expect("Ann listed");
    let bob = body.find("Bob Broker").expect("Bob listed");
    assert!(ann < bob, "agent with more listings comes first");
    assert!(body.contains(SNAPSHOT));
}

#[test]
fn csv_export_has_header_and_one_row_per_agent() {
    let state = test_state();

    let resp = handle(get(&format!("/agents/export.csv?city={}", city_query())), &state)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"agents_San_Antonio_TX_20230928.csv\""
    );

    let body = body_string(resp);
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("agent_first_name,agent_name,agent_phone_number"));
    assert!(lines[1].contains("Ann Agent"));
    assert!(lines[1].contains("2105550101"));
    assert!(lines[2].contains("Bob Broker"));
}

#[test]
fn xlsx_export_is_a_zip_download() {
    let state = test_state();

    let resp = handle(get(&format!("/agents/export.xlsx?city={}", city_query())), &state)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let mut body = Vec::new();
    std::io::Read::read_to_end(&mut resp.into_body().reader(), &mut body).unwrap();
    assert!(body.starts_with(b"PK"));
}

#[test]
fn lookup_by_phone_lists_that_agents_properties() {
    let state = test_state();

    let uri = format!("/agents/lookup?city={}&phone=210-555-0101", city_query());
    let resp = handle(get(&uri), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Listings for 2105550101"));
    assert!(body.contains("1 Alamo Plaza"));
    assert!(body.contains("2 River Walk"));
    assert!(!body.contains("3 Pearl Pkwy"));
    assert!(body.contains("https://www.coffeeclozers.com/properties/48029/1"));
}

#[test]
fn unknown_phone_reports_no_listings() {
    let state = test_state();

    let uri = format!("/agents/lookup?city={}&phone=5550000", city_query());
    let body = body_string(handle(get(&uri), &state).expect("Handler failed"));
    assert!(body.contains("No active listings"));
}

#[test]
fn bad_city_requests_are_rejected() {
    let state = test_state();

    assert!(matches!(
        handle(get("/agents/search"), &state),
        Err(ServerError::BadRequest(_))
    ));
    assert!(matches!(
        handle(get("/agents/search?city=gotham%2C%20nj"), &state),
        Err(ServerError::BadRequest(_))
    ));
    assert!(matches!(handle(get("/nope"), &state), Err(ServerError::NotFound)));
}
