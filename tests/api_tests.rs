use axum::http::StatusCode;
use axum_test::TestServer;

use decodex::{
    api::{create_router, AppState},
    config::Config,
    services::{IndexHandle, WeightTable},
};

const CATALOG: &str = "\
ID_film\tTitre_original\tAffiche\tNote_moyenne\tNb_votants\tAnnee_sortie\tDuree_minutes\tFilm\tCourt_metrage\tComedie\tDocumentaire\tFamille\tRomance\tDIR_Nora Ephron\tACT_Meg Ryan\tACT_Tom Hanks
858\tSleepless in Seattle\t/sleepless.jpg\t6.8\t1900\t1993\t105\t1\t0\t1\t0\t0\t1\t1\t1\t1
9489\tYou've Got Mail\t/mail.jpg\t6.7\t3300\t1998\t119\t1\t0\t1\t0\t0\t1\t1\t1\t1
639\tWhen Harry Met Sally...\t/harry.jpg\t7.4\t3900\t1989\t96\t1\t0\t1\t0\t0\t1\t0\t1\t0
13\tForrest Gump\t/gump.jpg\t8.5\t26000\t1994\t142\t1\t0\t1\t0\t0\t1\t0\t0\t1
1429\tMarch of the Penguins\t/penguins.jpg\t7.1\t900\t2005\t80\t1\t0\t0\t1\t1\t0\t0\t0\t0
";

fn ready_server() -> TestServer {
    let index = IndexHandle::from_bytes(CATALOG.as_bytes(), WeightTable::default()).unwrap();
    let state = AppState::with_index(Config::default(), index);
    TestServer::new(create_router(state)).unwrap()
}

fn loading_server() -> TestServer {
    TestServer::new(create_router(AppState::default())).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = ready_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_health_check_while_loading() {
    let server = loading_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "loading");
}

#[tokio::test]
async fn test_recommendations() {
    let server = ready_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Sleepless in Seattle")
        .add_query_param("n", 2)
        .await;

    response.assert_status_ok();
    let results: Vec<serde_json::Value> = response.json();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "You've Got Mail");
    assert_eq!(results[0]["id"], "9489");
    assert_eq!(results[0]["poster_path"], "/mail.jpg");
    assert_eq!(
        results[0]["poster_url"],
        "https://image.tmdb.org/t/p/w600_and_h900_bestv2/mail.jpg"
    );
    assert!(results
        .iter()
        .all(|r| r["title"] != "Sleepless in Seattle"));
}

#[tokio::test]
async fn test_recommendations_default_count_capped_by_catalog() {
    let server = ready_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Forrest Gump")
        .await;

    response.assert_status_ok();
    let results: Vec<serde_json::Value> = response.json();
    // default n is 5 but only 4 other movies exist
    assert_eq!(results.len(), 4);
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = ready_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "sleepless in seattle")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("sleepless in seattle"));
}

#[tokio::test]
async fn test_recommendations_missing_title() {
    let server = ready_server();
    let response = server.get("/api/v1/recommendations").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommendations_invalid_count() {
    let server = ready_server();

    for n in [0, -3, 11] {
        let response = server
            .get("/api/v1/recommendations")
            .add_query_param("title", "Forrest Gump")
            .add_query_param("n", n)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_recommendations_not_ready() {
    let server = loading_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Forrest Gump")
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_list_movies_by_genre() {
    let server = ready_server();

    let response = server
        .get("/api/v1/movies")
        .add_query_param("genres", "documentary")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["titles"][0], "March of the Penguins");

    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 5);
    assert_eq!(body["titles"][0], "Forrest Gump");
    assert_eq!(body["titles"][4], "You've Got Mail");
}

#[tokio::test]
async fn test_list_movies_unknown_genre() {
    let server = ready_server();

    let response = server
        .get("/api/v1/movies")
        .add_query_param("genres", "western")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lookup_movie() {
    let server = ready_server();

    let response = server
        .get("/api/v1/movies/lookup")
        .add_query_param("title", "March of the Penguins")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "1429");
    assert_eq!(body["genres"], serde_json::json!(["documentary", "family"]));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = ready_server();
    let id = "6f1c2b1e-9a4e-4c1d-8c55-1d0f6f0a2b3c";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), id);
}
