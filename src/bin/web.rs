//! Single binary web server: JSON REST API for the daily tournament backend.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//!
//! A background task stands in for the external cron trigger: it creates the
//! day's tournament when the entry window opens and closes active tournaments
//! at the close hour.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{Timelike, Utc};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;
use tournament_backend::{
    claim_reward, country_leaderboard, create_tournament, create_user, end_tournaments,
    enter_tournament, get_group_rank, group_leaderboard, update_user_level, Store,
    TournamentError, CLOSE_HOUR,
};

/// All persisted state, shared across handlers. One write guard per operation
/// is the transactional boundary for multi-step read-then-write sequences.
type AppState = Data<RwLock<Store>>;

/// How often the scheduler task checks whether to open or close tournaments.
const SCHEDULER_TICK: Duration = Duration::from_secs(60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateUserBody {
    username: Option<String>,
}

/// Path segment: user id (e.g. /users/{id})
#[derive(Deserialize)]
struct UserPath {
    id: u64,
}

/// Path segment: group id (e.g. /tournaments/group-leaderboard/{group_id})
#[derive(Deserialize)]
struct GroupPath {
    group_id: u64,
}

/// Path segment: tournament id (e.g. /tournaments/country-leaderboard/{tournament_id})
#[derive(Deserialize)]
struct TournamentPath {
    tournament_id: u64,
}

/// Map a core error to a transport response: missing entities are 404, a
/// broken active-tournament invariant is 500, every other violated
/// precondition is 400.
fn error_response(err: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        TournamentError::UserNotFound(_)
        | TournamentError::GroupNotFound(_)
        | TournamentError::TournamentNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::MultipleActiveTournaments => {
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-backend",
    })
}

/// Create a new user (level 1, starting coins, random country).
#[post("/users")]
async fn api_create_user(state: AppState, body: Option<Json<CreateUserBody>>) -> HttpResponse {
    let username = body.and_then(|b| b.into_inner().username);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let user = create_user(&mut g, username);
    HttpResponse::Created().json(user)
}

/// List all users (test endpoint).
#[get("/users")]
async fn api_list_users(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let users: Vec<_> = g.users().cloned().collect();
    HttpResponse::Ok().json(users)
}

/// Get a user by id (test endpoint).
#[get("/users/{id}")]
async fn api_get_user(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.find_user(path.id) {
        Some(user) => HttpResponse::Ok().json(user),
        None => error_response(TournamentError::UserNotFound(path.id)),
    }
}

/// Delete a user by id (test endpoint).
#[delete("/users/{id}")]
async fn api_delete_user(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if g.remove_user(path.id) {
        HttpResponse::NoContent().finish()
    } else {
        error_response(TournamentError::UserNotFound(path.id))
    }
}

/// Level-up hook: +1 level, coin grant, and a score bump when the user is
/// competing in a started group of an active tournament.
#[put("/users/{id}/level")]
async fn api_update_level(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match update_user_level(&mut g, path.id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// Enter the current tournament; returns the group's leaderboard.
#[post("/tournaments/enter/{id}")]
async fn api_enter_tournament(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match enter_tournament(&mut g, path.id, Utc::now()) {
        Ok(leaderboard) => HttpResponse::Ok().json(leaderboard),
        Err(e) => error_response(e),
    }
}

/// Claim all outstanding rewards; returns the updated user.
#[post("/tournaments/claim-reward/{id}")]
async fn api_claim_reward(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match claim_reward(&mut g, path.id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// The user's own rank entry in their active tournament group.
#[get("/tournaments/rank/{id}")]
async fn api_group_rank(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match get_group_rank(&g, path.id) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(e) => error_response(e),
    }
}

/// Full leaderboard of a group.
#[get("/tournaments/group-leaderboard/{group_id}")]
async fn api_group_leaderboard(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match group_leaderboard(&g, path.group_id) {
        Ok(leaderboard) => HttpResponse::Ok().json(leaderboard),
        Err(e) => error_response(e),
    }
}

/// Country totals for a tournament, descending.
#[get("/tournaments/country-leaderboard/{tournament_id}")]
async fn api_country_leaderboard(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match country_leaderboard(&g, path.tournament_id) {
        Ok(scores) => HttpResponse::Ok().json(scores),
        Err(e) => error_response(e),
    }
}

/// List all tournaments (test endpoint).
#[get("/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournaments: Vec<_> = g.tournaments().cloned().collect();
    HttpResponse::Ok().json(tournaments)
}

/// Get a tournament by id (test endpoint).
#[get("/tournaments/{tournament_id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.find_tournament(path.tournament_id) {
        Some(tournament) => HttpResponse::Ok().json(tournament),
        None => error_response(TournamentError::TournamentNotFound(path.tournament_id)),
    }
}

/// Start a new tournament (periodic-trigger endpoint).
#[post("/tournaments/start")]
async fn api_start_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let id = create_tournament(&mut g, Utc::now());
    match g.find_tournament(id) {
        Some(tournament) => HttpResponse::Created().json(tournament),
        None => HttpResponse::InternalServerError().body("tournament missing after create"),
    }
}

/// Close all active tournaments and distribute rewards (periodic-trigger endpoint).
#[post("/tournaments/end")]
async fn api_end_tournaments(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    end_tournaments(&mut g);
    HttpResponse::Ok().finish()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Store::new()));

    // Background scheduler: open the day's tournament inside the entry window,
    // close active ones at the close hour. Both calls are idempotent, so the
    // tick frequency only affects how promptly the transitions happen.
    let state_scheduler = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(SCHEDULER_TICK);
        loop {
            interval.tick().await;
            let now = Utc::now();
            let mut g = match state_scheduler.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            if now.hour() >= CLOSE_HOUR {
                end_tournaments(&mut g);
            } else if g.active_tournament_ids().is_empty() {
                create_tournament(&mut g, now);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_user)
            .service(api_list_users)
            .service(api_get_user)
            .service(api_delete_user)
            .service(api_update_level)
            .service(api_enter_tournament)
            .service(api_claim_reward)
            .service(api_group_rank)
            .service(api_group_leaderboard)
            .service(api_country_leaderboard)
            // Literal segments before the dynamic {tournament_id} resource.
            .service(api_start_tournament)
            .service(api_end_tournaments)
            .service(api_list_tournaments)
            .service(api_get_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
