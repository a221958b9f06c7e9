//! Read-only scenario fetch from the Supabase REST endpoint

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::common::{Error, Result};

pub const URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

const SELECT: &str = "id,name,role_required,priority,estimated_duration_minutes";

/// Project URL and service-role key
#[derive(Clone)]
pub struct Credentials {
    pub url: String,
    pub service_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Pull both variables out of a loaded environment file
    pub fn from_env(vars: &HashMap<String, String>, source: &Path) -> Result<Self> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        match (get(URL_VAR), get(KEY_VAR)) {
            (Some(url), Some(key)) => Ok(Self {
                url: url.trim_end_matches('/').to_string(),
                service_key: key.to_string(),
            }),
            _ => Err(Error::MissingCredentials(source.display().to_string())),
        }
    }
}

/// One row of `qa_scenarios`, as much as the guide needs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioRow {
    /// UUID or integer, depending on the table
    pub id: serde_json::Value,
    pub name: String,
    pub role_required: String,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<i64>,
}

/// Paged reader for active manual scenarios
pub struct ScenarioClient {
    http: reqwest::Client,
    credentials: Credentials,
    page_size: usize,
}

impl ScenarioClient {
    pub fn new(credentials: Credentials, page_size: usize) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            page_size: page_size.max(1),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/qa_scenarios", self.credentials.url)
    }

    /// Query string for the page starting at `offset`
    pub fn page_params(&self, offset: usize) -> Vec<(&'static str, String)> {
        vec![
            ("select", SELECT.to_string()),
            ("is_active", "eq.true".to_string()),
            ("automated_only", "eq.false".to_string()),
            ("order", "id.asc".to_string()),
            ("limit", self.page_size.to_string()),
            ("offset", offset.to_string()),
        ]
    }

    /// Build the GET for one page without sending it
    pub fn page_request(&self, offset: usize) -> Result<reqwest::Request> {
        let key = &self.credentials.service_key;
        let request = self
            .http
            .get(self.endpoint())
            .query(&self.page_params(offset))
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
            .header("Accept", "application/json")
            .build()?;
        Ok(request)
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<ScenarioRow>> {
        let response = self.http.execute(self.page_request(offset)?).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::FetchFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Every active, non-automated scenario, page by page
    ///
    /// The server may cap responses below `page_size`. A short first page
    /// lowers the expected page length instead of ending the fetch; later
    /// pages end it when they come back short or empty.
    pub async fn fetch_active_manual(&self) -> Result<Vec<ScenarioRow>> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("  {spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Fetching scenarios...");

        let mut rows = Vec::new();
        let mut expected = self.page_size;
        loop {
            let offset = rows.len();
            let page = match self.fetch_page(offset).await {
                Ok(page) => page,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            let fetched = page.len();
            tracing::info!(offset, rows = fetched, "fetched scenario page");
            rows.extend(page);
            spinner.set_message(format!("Fetching scenarios... {}", rows.len()));

            if fetched == 0 {
                break;
            }
            if fetched < expected {
                if offset > 0 {
                    break;
                }
                tracing::debug!(limit = self.page_size, served = fetched, "server caps page length");
                expected = fetched;
            }
        }

        spinner.finish_and_clear();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Local REST stand-in serving `total` rows, at most `max_rows` per response
    async fn serve(total: usize, max_rows: usize, status: u16) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let counter = counter.clone();
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&chunk[..n]),
                        }
                    }
                    counter.fetch_add(1, Ordering::SeqCst);

                    let head = String::from_utf8_lossy(&head);
                    let target = head.split_whitespace().nth(1).unwrap_or("/");
                    let url = reqwest::Url::parse(&format!("http://mock{target}")).unwrap();
                    let query: HashMap<_, _> = url.query_pairs().into_owned().collect();
                    let number = |key: &str| query.get(key).and_then(|v| v.parse::<usize>().ok());
                    let offset = number("offset").unwrap_or(0);
                    let limit = number("limit").unwrap_or(total).min(max_rows);

                    let (reason, body) = if status == 200 {
                        let end = total.min(offset + limit);
                        let rows: Vec<_> = (offset.min(end)..end)
                            .map(|i| {
                                serde_json::json!({
                                    "id": i,
                                    "name": format!("PB-{:02}: escenario", i + 1),
                                    "role_required": "docente",
                                })
                            })
                            .collect();
                        ("OK", serde_json::Value::from(rows).to_string())
                    } else {
                        ("Unauthorized", r#"{"message":"Invalid API key"}"#.to_string())
                    };
                    let response = format!(
                        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{addr}"), requests)
    }

    fn client_for(url: String, page_size: usize) -> ScenarioClient {
        let creds = Credentials {
            url,
            service_key: "service-key".to_string(),
        };
        ScenarioClient::new(creds, page_size)
    }

    fn ids(rows: &[ScenarioRow]) -> Vec<i64> {
        rows.iter().filter_map(|r| r.id.as_i64()).collect()
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn client() -> ScenarioClient {
        let creds = Credentials {
            url: "https://example.supabase.co".to_string(),
            service_key: "service-key".to_string(),
        };
        ScenarioClient::new(creds, 500)
    }

    #[test]
    fn test_credentials_from_env() {
        let creds = Credentials::from_env(
            &vars(&[(URL_VAR, "https://example.supabase.co/"), (KEY_VAR, "secret")]),
            Path::new(".env.local"),
        )
        .unwrap();
        assert_eq!(creds.url, "https://example.supabase.co");
        assert_eq!(creds.service_key, "secret");
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn test_missing_or_blank_credentials() {
        for pairs in [vec![(URL_VAR, "https://x")], vec![(URL_VAR, "https://x"), (KEY_VAR, "  ")], vec![]] {
            match Credentials::from_env(&vars(&pairs), Path::new(".env.local")) {
                Err(Error::MissingCredentials(path)) => assert_eq!(path, ".env.local"),
                other => panic!("Expected MissingCredentials, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_page_request() {
        let request = client().page_request(1000).unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        let url = request.url();
        assert_eq!(url.path(), "/rest/v1/qa_scenarios");
        let query: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(query["select"], "id,name,role_required,priority,estimated_duration_minutes");
        assert_eq!(query["is_active"], "eq.true");
        assert_eq!(query["automated_only"], "eq.false");
        assert_eq!(query["limit"], "500");
        assert_eq!(query["offset"], "1000");

        let headers = request.headers();
        assert_eq!(headers["apikey"], "service-key");
        assert_eq!(headers["authorization"], "Bearer service-key");
    }

    #[test]
    fn test_row_decodes_integer_and_null_fields() {
        let rows: Vec<ScenarioRow> = serde_json::from_str(
            r#"[{"id":7,"name":"PB-01: x","role_required":"docente","priority":null,"estimated_duration_minutes":3},
                {"id":"9f1c","name":"CA-01: y","role_required":"admin"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].priority, None);
        assert_eq!(rows[0].estimated_duration_minutes, Some(3));
        assert_eq!(rows[1].id, serde_json::Value::from("9f1c"));
    }

    #[tokio::test]
    async fn test_fetch_accumulates_pages() {
        let (url, requests) = serve(5, 1000, 200).await;
        let rows = client_for(url, 2).fetch_active_manual().await.unwrap();

        assert_eq!(ids(&rows), [0, 1, 2, 3, 4]);
        assert_eq!(rows[4].name, "PB-05: escenario");
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_exact_multiple_ends_on_empty_page() {
        let (url, requests) = serve(4, 1000, 200).await;
        let rows = client_for(url, 2).fetch_active_manual().await.unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_follows_server_row_cap() {
        let (url, requests) = serve(5, 2, 200).await;
        let rows = client_for(url, 3).fetch_active_manual().await.unwrap();

        assert_eq!(ids(&rows), [0, 1, 2, 3, 4]);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_small_catalogue() {
        let (url, _) = serve(3, 1000, 200).await;
        let rows = client_for(url, 1000).fetch_active_manual().await.unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_empty_catalogue() {
        let (url, requests) = serve(0, 1000, 200).await;
        let rows = client_for(url, 1000).fetch_active_manual().await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_unauthorized_is_fetch_failed() {
        let (url, requests) = serve(5, 1000, 401).await;
        match client_for(url, 2).fetch_active_manual().await {
            Err(Error::FetchFailed { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("Expected FetchFailed, got {other:?}"),
        }
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }
}
