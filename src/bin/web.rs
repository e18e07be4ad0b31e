//! Single binary web server: JSON API over the prediction rules engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! SCORING_SCHEDULE points at a CSV or JSON schedule; SESSION_KEY signs session cookies.
//!
//! Callers post the fixtures and predictions they already hold; the server only
//! evaluates rules. The "last seen results" marker lives in the session cookie.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    get, post,
    web::{Data, Json},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tournament_predictions::{
    compute_standings, has_stale_tie_break, is_complete, is_fixture_locked, lock_instant,
    next_action_for, score, Fixture, MatchStatus, ParticipantSnapshot, Prediction, RawPrediction,
    ScheduleError, ScoringSchedule, ServerConfig, Stage, UserId,
};

/// Session key holding the newest results instant the participant has viewed.
const SEEN_RESULTS_KEY: &str = "seen_results_updated_utc";

/// Shared read-only state: the scoring schedule loaded at startup.
struct EngineState {
    schedule: ScoringSchedule,
}

type AppState = Data<EngineState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LockBody {
    kickoff_utc: DateTime<Utc>,
    #[serde(default)]
    status: MatchStatus,
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct LockResponse {
    locked: bool,
    lock_instant: DateTime<Utc>,
}

#[derive(Deserialize)]
struct FixturePredictionBody {
    fixture: Fixture,
    prediction: RawPrediction,
}

#[derive(Serialize)]
struct CompletenessResponse {
    complete: bool,
    stale_tie_break: bool,
}

#[derive(Deserialize)]
struct StandingsBody {
    fixtures: Vec<Fixture>,
    predictions: Vec<RawPrediction>,
}

#[derive(Deserialize)]
struct NextActionBody {
    fixtures: Vec<Fixture>,
    predictions: Vec<RawPrediction>,
    user_id: UserId,
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ResultsSeenBody {
    results_updated_utc: DateTime<Utc>,
}

fn canonicalize_all(raw: Vec<RawPrediction>, now: DateTime<Utc>) -> Vec<Prediction> {
    raw.into_iter().map(|p| p.canonicalize(now)).collect()
}

/// Scoring could not run: surface "points unavailable" rather than a zero.
fn points_unavailable(e: ScheduleError) -> HttpResponse {
    log::warn!("Points unavailable: {}", e);
    HttpResponse::Conflict().json(serde_json::json!({
        "error": "points unavailable",
        "detail": e.to_string(),
    }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-predictions",
    })
}

/// Current scoring schedule.
#[get("/api/schedule")]
async fn api_schedule(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(&state.schedule)
}

/// Lock state for a kickoff (and optional status).
#[post("/api/lock")]
async fn api_lock(body: Json<LockBody>) -> HttpResponse {
    let now = body.now.unwrap_or_else(Utc::now);
    let mut fixture = Fixture::new(Stage::Group, body.kickoff_utc);
    fixture.status = body.status;
    HttpResponse::Ok().json(LockResponse {
        locked: is_fixture_locked(&fixture, now),
        lock_instant: lock_instant(body.kickoff_utc),
    })
}

/// Whether a prediction is complete for its fixture.
#[post("/api/predictions/complete")]
async fn api_prediction_complete(body: Json<FixturePredictionBody>) -> HttpResponse {
    let body = body.into_inner();
    let prediction = body.prediction.canonicalize(Utc::now());
    HttpResponse::Ok().json(CompletenessResponse {
        complete: is_complete(&body.fixture, &prediction),
        stale_tie_break: has_stale_tie_break(&prediction),
    })
}

/// Points breakdown for one prediction (409 when the schedule cannot price the stage).
#[post("/api/score")]
async fn api_score(state: AppState, body: Json<FixturePredictionBody>) -> HttpResponse {
    let body = body.into_inner();
    let prediction = body.prediction.canonicalize(Utc::now());
    match score(&body.fixture, &prediction, &state.schedule) {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => points_unavailable(e),
    }
}

/// Ranked standings for every participant in the posted predictions.
#[post("/api/standings")]
async fn api_standings(state: AppState, body: Json<StandingsBody>) -> HttpResponse {
    let body = body.into_inner();
    if let Err(problems) = state.schedule.validate_for(&body.fixtures) {
        for p in &problems {
            log::warn!("Schedule does not cover posted fixtures: {}", p);
        }
    }
    let predictions = canonicalize_all(body.predictions, Utc::now());
    match compute_standings(&body.fixtures, &predictions, &state.schedule) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => points_unavailable(e),
    }
}

/// Recommended next action for a participant, using the session's seen-results marker.
#[post("/api/next-action")]
async fn api_next_action(session: Session, body: Json<NextActionBody>) -> HttpResponse {
    let body = body.into_inner();
    let now = body.now.unwrap_or_else(Utc::now);
    let seen = match session.get::<DateTime<Utc>>(SEEN_RESULTS_KEY) {
        Ok(seen) => seen,
        Err(e) => {
            log::warn!("Ignoring unreadable seen-results marker: {}", e);
            None
        }
    };
    let predictions = canonicalize_all(body.predictions, now);
    let action = next_action_for(&ParticipantSnapshot {
        fixtures: &body.fixtures,
        predictions: &predictions,
        user_id: body.user_id,
        now,
        seen_results_updated_utc: seen,
    });
    HttpResponse::Ok().json(action)
}

/// Record that the participant has viewed results up to the given instant.
/// The marker never moves back.
#[post("/api/results/seen")]
async fn api_results_seen(session: Session, body: Json<ResultsSeenBody>) -> HttpResponse {
    let previous = match session.get::<DateTime<Utc>>(SEEN_RESULTS_KEY) {
        Ok(previous) => previous,
        Err(e) => {
            log::warn!("Overwriting unreadable seen-results marker: {}", e);
            None
        }
    };
    let marker = previous.map_or(body.results_updated_utc, |p| p.max(body.results_updated_utc));
    match session.insert(SEEN_RESULTS_KEY, marker) {
        Ok(()) => {
            HttpResponse::Ok().json(serde_json::json!({ "seen_results_updated_utc": marker }))
        }
        Err(e) => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn session_key(config: &ServerConfig) -> Key {
    match config.session_key.as_deref().map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            log::warn!("SESSION_KEY is shorter than 64 bytes; using a random key");
            Key::generate()
        }
        None => Key::generate(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let schedule = config
        .schedule()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    let key = session_key(&config);

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(EngineState { schedule });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(api_health)
            .service(api_schedule)
            .service(api_lock)
            .service(api_prediction_complete)
            .service(api_score)
            .service(api_standings)
            .service(api_next_action)
            .service(api_results_seen)
    })
    .bind(bind)?
    .run()
    .await
}
