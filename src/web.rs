use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::availability::{date_range, tabulate_quorum, AvailabilityEntry, Status};
use crate::form::{
    export_availability, export_session_results, validate_availability, validate_scores,
    AvailabilityRequest, ScoreRequest,
};
use crate::scoring::{
    convert_scores, cumulative_ranking, sessions, PlayerScore, ScoreConfig, ScoreError,
    PLAYERS_PER_SESSION,
};
use crate::store::{ResultRow, ScheduleRow, SheetStore, RESULTS_SHEET, SCHEDULE_SHEET};

pub struct AppState {
    pub store: SheetStore,
    pub roster: Vec<String>,
    pub score_config: ScoreConfig,
    pub quorum: usize,
}

#[derive(Deserialize)]
pub struct QuorumQuery {
    from: NaiveDate,
    to: NaiveDate,
}

// Roster endpoint, so the forms can build their member selects
async fn get_members(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "members": state.roster,
        "quorum": state.quorum,
    })))
}

// Availability form endpoint
async fn submit_availability(
    req: web::Json<AvailabilityRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Err(e) = validate_availability(&req, &state.roster) {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": e})));
    }

    export_availability(&state.store, &req)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to save: {}", e)))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("Recorded {} date(s) for {}", req.days.len(), req.member.trim())
    })))
}

// Quorum endpoint: dates in [from, to] where enough members are available
async fn get_quorum(
    query: web::Query<QuorumQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let rows: Vec<ScheduleRow> = state
        .store
        .read(SCHEDULE_SHEET)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to read: {}", e)))?;

    // Rows were validated on the way in; a bad label means the sheet was
    // edited by hand, which we surface rather than guess around.
    let mut entries = Vec::with_capacity(rows.len());
    for row in &rows {
        let status: Status = row.status.parse().map_err(|e| {
            actix_web::error::ErrorInternalServerError(format!("Bad schedule row: {}", e))
        })?;
        entries.push(AvailabilityEntry {
            member: row.member.clone(),
            date: row.date,
            status,
        });
    }

    let dates = date_range(query.from, query.to);
    let days = tabulate_quorum(&state.roster, &dates, &entries, state.quorum);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "quorum": state.quorum,
        "days": days,
    })))
}

// Score form endpoint: validates, converts and appends one session
async fn submit_scores(
    req: web::Json<ScoreRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Err(e) = validate_scores(&req, &state.roster) {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": e})));
    }

    let players: Vec<PlayerScore> = req
        .entries
        .iter()
        .map(|e| PlayerScore {
            name: e.player.trim().to_string(),
            raw_points: e.raw_points,
        })
        .collect();
    let players: [PlayerScore; PLAYERS_PER_SESSION] = match players.try_into() {
        Ok(players) => players,
        Err(_) => {
            return Ok(HttpResponse::BadRequest()
                .json(serde_json::json!({"success": false, "error": "Exactly 4 players required"})))
        }
    };

    let results = match convert_scores(&players, &state.score_config) {
        Ok(results) => results,
        Err(ScoreError::InvalidTotal { actual, expected }) => {
            // Recoverable: report the sum and let the user resubmit.
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Raw points sum to {}, adjust them to {}", actual, expected),
                "actual_total": actual,
            })));
        }
    };

    let memo = req.memo.clone().unwrap_or_default();
    export_session_results(&state.store, req.date, &memo, &results)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to save: {}", e)))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "results": results,
    })))
}

// Recorded sessions, newest last
async fn get_sessions(state: web::Data<AppState>) -> Result<HttpResponse> {
    let rows: Vec<ResultRow> = state
        .store
        .read(RESULTS_SHEET)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to read: {}", e)))?;
    Ok(HttpResponse::Ok().json(sessions(&rows)))
}

// Cumulative ranking across all recorded sessions
async fn get_ranking(state: web::Data<AppState>) -> Result<HttpResponse> {
    let rows: Vec<ResultRow> = state
        .store
        .read(RESULTS_SHEET)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to read: {}", e)))?;
    Ok(HttpResponse::Ok().json(cumulative_ranking(&rows)))
}

// HTML page handlers
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn availability_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/availability.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn scores_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/scores.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

async fn ranking_page() -> Result<HttpResponse> {
    let html = include_str!("../templates/ranking.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .route("/availability", web::get().to(availability_page))
            .route("/scores", web::get().to(scores_page))
            .route("/ranking", web::get().to(ranking_page))
            .route("/api/members", web::get().to(get_members))
            .route("/api/availability", web::post().to(submit_availability))
            .route("/api/quorum", web::get().to(get_quorum))
            .route("/api/scores", web::post().to(submit_scores))
            .route("/api/sessions", web::get().to(get_sessions))
            .route("/api/ranking", web::get().to(get_ranking))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
