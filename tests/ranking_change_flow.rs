use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use movie_rank_aggregator::api::{AppState, create_router};
use movie_rank_aggregator::config::AppConfig;
use movie_rank_aggregator::database::{self, DbPool};
use movie_rank_aggregator::services::rankings::save_ranking;
use movie_rank_aggregator::services::{Outcome, RecomputeService};

struct TestDb {
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("movie_rank_aggregator_it_{}_{}.db", name, std::process::id()));
        let _ = std::fs::remove_file(&path);

        let pool = database::create_pool(&path.to_string_lossy(), 4).unwrap();
        database::setup::ensure_schema(&mut pool.get().unwrap()).unwrap();

        Self { path, pool }
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn ranking_changes_rescore_movie_over_http() {
    let db = TestDb::new("http_flow");
    let app = create_router(Arc::new(AppState::new(db.pool.clone(), AppConfig::new())));

    let (status, _) = send(&app, Method::POST, "/api/movies", Some(json!({ "movieId": "1", "title": "Movie One" }))).await;
    assert_eq!(status, StatusCode::OK);

    let ranking = |rank: i64| Some(json!({ "rankIndex": rank, "ranked": true }));

    let (_, outcome) = send(&app, Method::PUT, "/api/users/alice/rankings/2", ranking(1)).await;
    assert_eq!(outcome["status"], "aggregateMissing");
    send(&app, Method::PUT, "/api/users/carol/rankings/3", ranking(3)).await;

    let (_, outcome) = send(&app, Method::PUT, "/api/users/alice/rankings/1", ranking(0)).await;
    assert_eq!(outcome["status"], "updated");
    assert_eq!(outcome["avgRanking"], 4.0);

    let (status, outcome) = send(&app, Method::PUT, "/api/users/bob/rankings/1", ranking(2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["status"], "updated");
    assert_eq!(outcome["avgRanking"], 3.5);
    assert_eq!(outcome["numRankings"], 2);
    assert_eq!(outcome["avgRankIndex"], 1.0);
    assert_eq!(outcome["percentile"], 50.0);

    let (status, movie) = send(&app, Method::GET, "/api/movies/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movie["avgRanking"], 3.5);
    assert_eq!(movie["numRankings"], 2);
    assert!(movie["lastUpdated"].is_string());

    let (status, outcome) = send(&app, Method::DELETE, "/api/users/bob/rankings/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["numRankings"], 1);
    assert_eq!(outcome["percentile"], 66.7);
    assert_eq!(outcome["avgRanking"], 4.0);
}

#[tokio::test]
async fn benign_noops_and_missing_resources() {
    let db = TestDb::new("http_noops");
    let app = create_router(Arc::new(AppState::new(db.pool.clone(), AppConfig::new())));

    let (status, outcome) = send(
        &app,
        Method::POST,
        "/api/events/ranking-change",
        Some(json!({ "before": null, "after": { "rankIndex": 2, "ranked": true } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome, json!({ "status": "noMovieId" }));

    let (status, outcome) = send(
        &app,
        Method::POST,
        "/api/events/ranking-change",
        Some(json!({ "before": { "movieId": 42, "rankIndex": 0, "ranked": true } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome, json!({ "status": "noQualifyingRankings", "movieId": "42" }));

    let (status, outcome) = send(
        &app,
        Method::POST,
        "/api/events/ranking-change",
        Some(json!({ "after": { "movieId": "42", "rankIndex": 0, "ranked": 1, "title": 42 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome, json!({ "status": "noQualifyingRankings", "movieId": "42" }));

    let (status, _) = send(&app, Method::GET, "/api/movies/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/users/nobody/rankings/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn concurrent_recomputations_settle_on_latest_state() {
    let db = TestDb::new("concurrent");
    {
        let mut conn = db.pool.get().unwrap();
        database::movies::ensure_movie(&mut conn, "1", None).unwrap();
        for (user, rank) in [("alice", 0), ("bob", 2), ("carol", 4), ("dave", 6)] {
            save_ranking(&mut conn, user, "1", Some(&json!(rank)), Some(true), None).unwrap();
        }
    }

    let service = Arc::new(RecomputeService::new(db.pool.clone(), AppConfig::new().ranking));
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.recompute("1").unwrap())
        })
        .collect();
    let outcomes: Vec<Outcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(outcomes.iter().all(Outcome::is_update));
    assert!(outcomes.windows(2).all(|pair| pair[0] == pair[1]));

    let stored = database::movies::find_by_movie_id(&mut db.pool.get().unwrap(), "1").unwrap().unwrap();
    assert_eq!(stored.num_rankings, Some(4));
    assert_eq!(stored.avg_rank_index, Some(3.0));
    // 4 and 6 are worse than 3.0: 2 of 4
    assert_eq!(stored.percentile, Some(50.0));
    assert_eq!(stored.avg_ranking, Some(3.5));
}
