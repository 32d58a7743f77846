use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::errors::{DatasetError, EngineError, MatchupError};
use crate::models::{ApiResponse, MatchupAnalysis};
use crate::services::{league_url, list_teams, DatasetLoader, MatchupAnalyzer, LEAGUES};

pub struct AppState {
    loader: DatasetLoader,
    analyzer: MatchupAnalyzer,
}

impl AppState {
    pub fn new(loader: DatasetLoader) -> Self {
        Self {
            loader,
            analyzer: MatchupAnalyzer::new(),
        }
    }
}

type SharedState = Arc<AppState>;
type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub async fn serve(settings: Settings, port: u16) -> anyhow::Result<()> {
    // Callers over HTTP may only name catalogue leagues.
    let loader = DatasetLoader::leagues_only(settings)?;
    let app = create_router(Arc::new(AppState::new(loader)));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Momentum API server listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/leagues", get(get_leagues_handler))
        .route("/teams", get(get_teams_handler))
        .route("/matchup", get(get_matchup_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
        )
        .with_state(state)
}

fn error_response(err: MatchupError) -> ApiError {
    let status = match &err {
        MatchupError::SameTeamSelected(_)
        | MatchupError::InvalidTeamName(_)
        | MatchupError::Dataset(DatasetError::UnsupportedSource { .. }) => StatusCode::BAD_REQUEST,
        MatchupError::UnknownTeam { .. } => StatusCode::NOT_FOUND,
        MatchupError::Engine(EngineError::TeamNotFound { .. }) => StatusCode::NOT_FOUND,
        MatchupError::Engine(EngineError::InvalidInput { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        MatchupError::Dataset(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!("Matchup request failed: {}", err);
    } else {
        tracing::warn!("Matchup request rejected: {}", err);
    }

    (status, Json(ApiResponse::error(err.to_string())))
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Momentum API is running"))
}

#[derive(Serialize)]
struct LeagueInfo {
    name: &'static str,
    code: &'static str,
    url: String,
}

// GET /leagues - League catalogue with resolved dataset URLs
async fn get_leagues_handler(State(state): State<SharedState>) -> Json<ApiResponse<Vec<LeagueInfo>>> {
    let settings = state.loader.settings();
    let leagues = LEAGUES
        .iter()
        .map(|league| LeagueInfo {
            name: league.name,
            code: league.code,
            url: league_url(settings, league),
        })
        .collect();

    Json(ApiResponse::success(leagues))
}

// GET /teams?source=<league name or code> - Every team in a dataset
#[derive(Deserialize)]
struct TeamsQuery {
    source: String,
}

async fn get_teams_handler(
    State(state): State<SharedState>,
    Query(params): Query<TeamsQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let dataset = state
        .loader
        .load(&params.source)
        .await
        .map_err(|e| error_response(e.into()))?;

    Ok(Json(ApiResponse::success(list_teams(&dataset.matches))))
}

// GET /matchup?source=<league>&team1=&team2= - Momentum comparison between two teams
#[derive(Deserialize)]
struct MatchupQuery {
    source: String,
    team1: String,
    team2: String,
}

async fn get_matchup_handler(
    State(state): State<SharedState>,
    Query(params): Query<MatchupQuery>,
) -> Result<Json<ApiResponse<MatchupAnalysis>>, ApiError> {
    let analysis = state
        .analyzer
        .analyze_from_source(&state.loader, &params.source, &params.team1, &params.team2)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(analysis)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, FullTimeResult, MatchResult};
    use crate::services::SourcePolicy;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    fn fixture(day: u32, home: &str, away: &str, result: FullTimeResult) -> MatchResult {
        let (home_goals, away_goals) = match result {
            FullTimeResult::HomeWin => (2, 0),
            FullTimeResult::AwayWin => (0, 2),
            FullTimeResult::Draw => (1, 1),
        };
        MatchResult {
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals,
            away_goals,
            result,
        }
    }

    async fn primed_state() -> SharedState {
        let loader = DatasetLoader::for_local_upstream(Settings::default(), SourcePolicy::LeaguesOnly);
        loader
            .prime(
                "Premier League",
                Dataset {
                    source: "E0".to_string(),
                    matches: vec![
                        fixture(1, "Liverpool", "Everton", FullTimeResult::HomeWin),
                        fixture(8, "Everton", "Fulham", FullTimeResult::Draw),
                        fixture(15, "Fulham", "Liverpool", FullTimeResult::AwayWin),
                    ],
                },
            )
            .await;
        Arc::new(AppState::new(loader))
    }

    async fn test_router() -> Router {
        create_router(primed_state().await)
    }

    async fn send_get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // Serves football-data style paths for season 2324 on an ephemeral port.
    async fn spawn_upstream() -> String {
        let upstream = Router::new()
            .route(
                "/2324/E0.csv",
                get(|| async { "Date,HomeTeam,AwayTeam,FTHG,FTAG,FTR\n,,,,,\n,,,,,\n" }),
            )
            .route(
                "/2324/D1.csv",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send_get(test_router().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_leagues_lists_catalogue() {
        let (status, body) = send_get(test_router().await, "/leagues").await;
        assert_eq!(status, StatusCode::OK);
        let leagues = body["data"].as_array().unwrap();
        assert_eq!(leagues.len(), LEAGUES.len());
        assert_eq!(leagues[0]["code"], "E0");
        assert_eq!(leagues[0]["url"], "https://www.football-data.co.uk/mmz4281/2324/E0.csv");
    }

    #[tokio::test]
    async fn test_teams_route() {
        let (status, body) = send_get(test_router().await, "/teams?source=E0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::json!(["Everton", "Fulham", "Liverpool"]));
    }

    #[tokio::test]
    async fn test_matchup_route() {
        let (status, body) = send_get(
            test_router().await,
            "/matchup?source=Premier%20League&team1=Liverpool&team2=Everton",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // Liverpool: W, W -> 11. Everton: D, L -> -5.
        assert_eq!(body["data"]["team1"]["score"], 11);
        assert_eq!(body["data"]["team1"]["display"], "11 (OKAY)");
        assert_eq!(body["data"]["team2"]["score"], -5);
        assert_eq!(body["data"]["team2"]["display"], "-5 (DISGUSTING)");
        assert_eq!(body["data"]["confidence"]["difference"], 16);
        assert_eq!(body["data"]["confidence"]["label"], "GOOD");
    }

    #[tokio::test]
    async fn test_league_spellings_share_one_cache_entry() {
        let state = primed_state().await;
        for source in ["E0", "e0", "premier%20league"] {
            let (status, _) = send_get(
                create_router(Arc::clone(&state)),
                &format!("/teams?source={}", source),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "source {}", source);
        }
        assert_eq!(state.loader.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_paths_and_urls_are_rejected() {
        let state = primed_state().await;
        for uri in [
            "/teams?source=/etc/passwd",
            "/teams?source=..%2FE0.csv",
            "/teams?source=Championship",
            "/matchup?source=http://169.254.169.254/latest&team1=Fulham&team2=Everton",
            "/matchup?source=file.csv&team1=Fulham&team2=Everton",
        ] {
            let (status, body) = send_get(create_router(Arc::clone(&state)), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().contains("not a known league"));
        }
        // Rejected sources never reach the cache.
        assert_eq!(state.loader.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_matchup_error_statuses() {
        let (status, body) = send_get(
            test_router().await,
            "/matchup?source=E0&team1=Fulham&team2=Fulham",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send_get(
            test_router().await,
            "/matchup?source=E0&team1=Liverpol&team2=Fulham",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Liverpool"));
    }

    #[tokio::test]
    async fn test_upstream_failures_are_bad_gateway() {
        let settings = Settings {
            data_base_url: spawn_upstream().await,
            ..Settings::default()
        };
        let loader = DatasetLoader::for_local_upstream(settings, SourcePolicy::LeaguesOnly);
        let state = Arc::new(AppState::new(loader));

        // Only blank rows.
        let (status, body) = send_get(
            create_router(Arc::clone(&state)),
            "/matchup?source=E0&team1=Fulham&team2=Everton",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("no usable match rows"));

        // Upstream answers 503.
        let (status, body) = send_get(create_router(Arc::clone(&state)), "/teams?source=Bundesliga").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("503"));

        assert_eq!(state.loader.cached_len().await, 0);
    }

    #[test]
    fn test_error_response_statuses() {
        let status_of = |err: MatchupError| error_response(err).0;

        assert_eq!(
            status_of(MatchupError::Dataset(DatasetError::HttpStatus {
                url: "https://www.football-data.co.uk/mmz4281/2324/E0.csv".to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(MatchupError::Dataset(DatasetError::EmptyDataset {
                source_id: "E0".to_string(),
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(MatchupError::Dataset(DatasetError::UnsupportedSource {
                identifier: "/tmp/x.csv".to_string(),
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MatchupError::Engine(EngineError::TeamNotFound { team: "X".to_string() })),
            StatusCode::NOT_FOUND
        );
    }
}
