use chrono::{Duration, Local, TimeZone, Utc};
use libquality::api::{self, ApiClient, SearchError};
use libquality::app::{App, Screen};
use libquality::history::ChartCell;
use libquality::store::{MemoryBackend, RepositoryStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a canned HTTP response on an ephemeral port. Returns the base URL
/// and a counter of accepted connections.
async fn spawn_stub_api(status_line: &'static str, body: String) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_counter = Arc::clone(&hits);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            hits_counter.fetch_add(1, Ordering::SeqCst);
            let body = body.clone();
            tokio::spawn(async move {
                // Drain the request before answering; the payloads in these
                // tests fit a single read.
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), hits)
}

/// Canned backend bundle with one snapshot for yesterday and one for today.
fn bundle_json(full_name: &str) -> String {
    let today = Local::now().date_naive();
    let yesterday = today - Duration::days(1);

    serde_json::json!({
        "repository": {
            "fullName": full_name,
            "id": "10270250",
            "ownerAvatarUrl": "https://avatars.githubusercontent.com/u/69631?v=4",
            "language": "JavaScript",
            "htmlURL": format!("https://github.com/{}", full_name),
            "openIssuesCount": 792,
            "size": 176284,
            "stargazersCount": 160000,
            "forksCount": 32000
        },
        "issueData": [
            {
                "id": "1",
                "repositoryId": "10270250",
                "searchedDate": yesterday.to_string(),
                "createdAt": "2024-01-01T12:00:00Z",
                "issuesTotal": 780,
                "oldestIssue": "2020-05-10T09:30:00Z",
                "newestIssue": "2023-12-31T23:00:00Z",
                "meanOfIssue": 410.0,
                "deviationOfIssue": 119.2
            },
            {
                "id": "2",
                "repositoryId": "10270250",
                "searchedDate": today.to_string(),
                "createdAt": "2024-01-02T12:00:00Z",
                "issuesTotal": 792,
                "oldestIssue": "2020-05-10T09:30:00Z",
                "newestIssue": "2024-01-02T08:00:00Z",
                "meanOfIssue": 412.4,
                "deviationOfIssue": 120.7
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_search_appends_to_store() {
    let (url, hits) = spawn_stub_api("200 OK", bundle_json("facebook/react")).await;
    let client = ApiClient::new(url);
    let store = RepositoryStore::new(MemoryBackend::new());

    let summary = api::submit(&client, &store, "facebook/react").await.unwrap();
    assert_eq!(summary.full_name, "facebook/react");
    assert_eq!(summary.language, "JavaScript");

    let list = store.load();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0], summary);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_failure_leaves_store_untouched() {
    let (url, _hits) = spawn_stub_api("404 Not Found", "{}".to_string()).await;
    let client = ApiClient::new(url);
    let store = RepositoryStore::new(MemoryBackend::new());

    let result = api::submit(&client, &store, "no/such-repo").await;
    assert_eq!(result, Err(SearchError::NotFound));
    assert!(store.load().is_empty());
}

#[tokio::test]
async fn test_malformed_response_is_a_search_failure() {
    let (url, _hits) = spawn_stub_api("200 OK", "this is not json".to_string()).await;
    let client = ApiClient::new(url);
    let store = RepositoryStore::new(MemoryBackend::new());

    let result = api::submit(&client, &store, "facebook/react").await;
    assert_eq!(result, Err(SearchError::NotFound));
    assert!(store.load().is_empty());
}

#[tokio::test]
async fn test_empty_query_issues_no_request() {
    let (url, hits) = spawn_stub_api("200 OK", bundle_json("facebook/react")).await;
    let client = ApiClient::new(url);
    let store = RepositoryStore::new(MemoryBackend::new());

    let result = api::submit(&client, &store, "").await;
    assert_eq!(result, Err(SearchError::EmptyInput));
    assert!(store.load().is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_full_workflow() {
    let (url, _hits) = spawn_stub_api("200 OK", bundle_json("facebook/react")).await;
    let backend = MemoryBackend::new();
    let client = ApiClient::new(url);
    let mut app = App::new(client.clone(), RepositoryStore::new(backend.clone()));

    // Dashboard search
    app.new_repo = "facebook/react".to_string();
    let result = api::submit(&app.api, &app.store, &app.new_repo).await;
    app.apply_search(result);

    assert_eq!(app.repositories.len(), 1);
    assert_eq!(app.repositories[0].full_name, "facebook/react");
    assert!(app.new_repo.is_empty());
    assert_eq!(app.input_error, None);

    // Open the detail view and apply the fetched bundle
    app.open_repository("facebook/react".to_string());
    assert!(app.is_loading_detail);

    let bundle = app.api.lookup_repository("facebook/react").await.unwrap();
    let today = Local::now().date_naive();
    let reference = Utc::now();
    app.update_with_bundle_at("facebook/react", bundle, today, reference);

    let data = app.repository_data.as_ref().unwrap();
    assert_eq!(data.stargazers_count, 160_000);
    assert_eq!(data.open_issues_count, 792);

    let today_stats = app.issue_of_day.as_ref().unwrap();
    assert_eq!(today_stats.issues_total, 792);
    assert_eq!(today_stats.mean_of_issue, 412);
    assert_eq!(today_stats.deviation_of_issue, 121);

    let oldest = Utc.with_ymd_and_hms(2020, 5, 10, 9, 30, 0).unwrap();
    assert_eq!(
        app.oldest_issue_age,
        Some(reference.signed_duration_since(oldest).num_days())
    );

    let table = app.chart_data.as_ref().unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(
        table[0],
        [
            ChartCell::Text("Date".to_string()),
            ChartCell::Text("Issues".to_string()),
        ]
    );
    assert!(app.update_needed);
    assert!(!app.is_loading_detail);

    // Back to the dashboard, then wipe everything
    app.back_to_dashboard();
    assert_eq!(app.screen, Screen::Dashboard);

    app.clear_cache();
    assert!(app.repositories.is_empty());

    // A fresh app over the same backend starts empty
    let reopened = App::new(client, RepositoryStore::new(backend));
    assert!(reopened.repositories.is_empty());
}

#[tokio::test]
async fn test_store_survives_process_restart() {
    let (url, _hits) = spawn_stub_api("200 OK", bundle_json("vuejs/vue")).await;
    let backend = MemoryBackend::new();
    let client = ApiClient::new(url);

    {
        let store = RepositoryStore::new(backend.clone());
        api::submit(&client, &store, "vuejs/vue").await.unwrap();
    }

    // Fresh app over the same slot sees the entry as its last element
    let app = App::new(client, RepositoryStore::new(backend));
    assert_eq!(app.repositories.last().unwrap().full_name, "vuejs/vue");
}

#[tokio::test]
async fn test_stale_detail_response_is_discarded() {
    let (url, _hits) = spawn_stub_api("200 OK", bundle_json("facebook/react")).await;
    let client = ApiClient::new(url);
    let mut app = App::new(client, RepositoryStore::new(MemoryBackend::new()));

    app.open_repository("facebook/react".to_string());
    let bundle = app.api.lookup_repository("facebook/react").await.unwrap();

    // The user navigated away before the response arrived
    app.back_to_dashboard();
    app.update_with_bundle("facebook/react", bundle);

    assert!(app.repository_data.is_none());
    assert!(app.chart_data.is_none());
    assert!(!app.update_needed);
}

#[tokio::test]
async fn test_detail_fetch_failure_keeps_the_static_shell() {
    let (url, _hits) = spawn_stub_api("500 Internal Server Error", "{}".to_string()).await;
    let client = ApiClient::new(url);
    let mut app = App::new(client, RepositoryStore::new(MemoryBackend::new()));

    app.open_repository("facebook/react".to_string());
    let result = app.api.lookup_repository("facebook/react").await;

    assert!(result.is_err());
    assert!(app.repository_data.is_none());
    assert!(app.issue_of_day.is_none());
}
