use crate::auth::sessions::{
    cleared_session_cookie, end_session, load_session, record_session_label, session_cookie,
    start_session, token_from_cookie_header,
};
use crate::auth::token::SessionToken;
use crate::errors::ServerError;
use crate::labeling::metrics::aggregate;
use crate::labeling::priority::labeling_queue;
use crate::labeling::writer::write_label;
use crate::labeling::{load_records, Annotator, SessionContext};
use crate::listings::loader::load_cities;
use crate::listings::lookup::lookup_agent;
use crate::listings::{build_agent_report, AgentReport};
use crate::responses::{csv_response, html_response, redirect, xlsx_response, ResultResp};
use crate::spreadsheets::{agents_csv, agents_xlsx};
use crate::state::AppState;
use crate::templates::pages;
use astra::{Body, Request, ResponseBuilder};
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

const MAIN_CSS: &str = include_str!("../static/main.css");

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);

    debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(pages::home_page()),
        ("GET", "/static/main.css") => ResponseBuilder::new()
            .status(200)
            .header("Content-Type", mime::TEXT_CSS_UTF_8.as_ref())
            .body(Body::from(MAIN_CSS))
            .map_err(|_| ServerError::InternalError),

        // Agent listings
        ("GET", "/agents") => {
            let locations = city_locations(state)?;
            html_response(pages::city_search_page(&locations, None, None))
        }
        ("GET", "/agents/search") => {
            let (locations, report) = agent_report(state, &query)?;
            let selected = report.city.location_name();
            html_response(pages::city_search_page(&locations, Some(selected.as_str()), Some(&report)))
        }
        ("GET", "/agents/export.csv") => {
            let (_, report) = agent_report(state, &query)?;
            csv_response(agents_csv(&report.agents)?, &export_name(&report, "csv"))
        }
        ("GET", "/agents/export.xlsx") => {
            let (_, report) = agent_report(state, &query)?;
            xlsx_response(agents_xlsx(&report.agents)?, &export_name(&report, "xlsx"))
        }
        ("GET", "/agents/lookup") => {
            let (_, report) = agent_report(state, &query)?;
            let phone = query.get("phone").map(String::as_str).unwrap_or("");
            let found = lookup_agent(&report.with_phone, phone);
            html_response(pages::agent_lookup_page(
                &report.city.location_name(),
                phone,
                found.as_ref(),
            ))
        }

        // Labeling
        ("GET", "/label/login") => html_response(pages::label_login_page(&state.cfg.annotators)),
        ("POST", "/label/login") => {
            let form = read_form(&mut req)?;
            let name = form.get("annotator").map(String::as_str).unwrap_or("");
            let annotator = Annotator::from_config(&state.cfg.annotators, name)
                .ok_or_else(|| ServerError::BadRequest(format!("unknown annotator: {name}")))?;

            let token = state
                .db
                .with_conn(|conn| start_session(conn, &annotator, now_unix()))?;
            info!(annotator = %annotator.name, "labeling session started");
            redirect("/label", Some(session_cookie(&token)))
        }
        ("POST", "/label/logout") => {
            if let Some(token) = request_token(&req) {
                state
                    .db
                    .with_conn(|conn| end_session(conn, &token, now_unix()))?;
            }
            redirect("/label/login", Some(cleared_session_cookie()))
        }
        ("GET", "/label") => {
            let Some(session) = current_session(&req, state)? else {
                return redirect("/label/login", None);
            };
            let records = load_records(state.sheets.as_ref(), &state.cfg.label_sheet)?;
            let queue = labeling_queue(&records, &session);

            html_response(pages::label_page(&pages::LabelVm {
                session: &session,
                next: queue.first().copied(),
                remaining: queue.len(),
            }))
        }
        ("POST", "/label") => {
            let Some(mut session) = current_session(&req, state)? else {
                return redirect("/label/login", None);
            };
            let form = read_form(&mut req)?;
            let property_id = required(&form, "property_id")?;
            let label = required(&form, "label")?;

            let records = load_records(state.sheets.as_ref(), &state.cfg.label_sheet)?;
            let record = records
                .iter()
                .find(|r| r.property_id == property_id)
                .ok_or(ServerError::NotFound)?;

            write_label(
                state.sheets.as_ref(),
                &state.cfg.label_sheet,
                record,
                &mut session,
                label,
            )?;
            state.db.with_conn(|conn| {
                record_session_label(conn, session.session_id, property_id, now_unix())
            })?;

            redirect("/label", None)
        }
        ("GET", "/label/analytics") => {
            let records = load_records(state.sheets.as_ref(), &state.cfg.label_sheet)?;
            html_response(pages::analytics_page(&aggregate(&records), &state.cfg.annotators))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn city_locations(state: &AppState) -> Result<Vec<String>, ServerError> {
    let cities = load_cities(
        state.store.as_ref(),
        &state.cfg.geography_bucket,
        &state.cfg.cities_key,
    )?;
    Ok(cities.iter().map(|c| c.location_name()).collect())
}

fn agent_report(
    state: &AppState,
    query: &HashMap<String, String>,
) -> Result<(Vec<String>, AgentReport), ServerError> {
    let location = required(query, "city")?;
    let cities = load_cities(
        state.store.as_ref(),
        &state.cfg.geography_bucket,
        &state.cfg.cities_key,
    )?;
    let report = build_agent_report(state.store.as_ref(), &state.cfg, &cities, location)?;
    Ok((cities.iter().map(|c| c.location_name()).collect(), report))
}

/// e.g. `agents_San_Antonio_TX_20230928.csv`
fn export_name(report: &AgentReport, ext: &str) -> String {
    let safe = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    format!(
        "agents_{}_{}_{}.{ext}",
        safe(&report.city.city),
        safe(&report.city.state),
        report.snapshot
    )
}

fn current_session(req: &Request, state: &AppState) -> Result<Option<SessionContext>, ServerError> {
    let Some(token) = request_token(req) else {
        return Ok(None);
    };
    state
        .db
        .with_conn(|conn| load_session(conn, &token, &state.cfg.annotators, now_unix()))
}

fn request_token(req: &Request) -> Option<SessionToken> {
    req.headers()
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ServerError> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("missing {key}")))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
