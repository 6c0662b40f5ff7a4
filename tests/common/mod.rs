//! Shared helpers for integration tests: a scripted git runner and a
//! minimal HTTP responder for exercising the API clients.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use reviewdoc::vcs::CommandRunner;

/// Runner that answers from a fixed table keyed by the full command line.
pub struct ScriptedRunner {
    responses: HashMap<String, String>,
}

impl ScriptedRunner {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            responses: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// A checkout of `feature-x` tracking `origin/feature-x` in `group/repo`.
    pub fn feature_branch() -> Self {
        Self::new(&[
            (
                "git branch -vv",
                "  main      1a2b3c4 [origin/main] Initial commit\n* feature-x 5d6e7f8 [origin/feature-x] Add thing",
            ),
            ("git branch --show-current", "feature-x"),
            ("git config branch.feature-x.remote", "origin"),
            ("git remote get-url origin", "git@gitlab.com:group/repo.git"),
        ])
    }

    /// A local branch with no upstream.
    pub fn untracked_branch() -> Self {
        Self::new(&[
            ("git branch -vv", "* scratch 9a8b7c6 Local only"),
            ("git branch --show-current", "scratch"),
        ])
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> String {
        let key = format!("{program} {}", args.join(" "));
        self.responses.get(&key).cloned().unwrap_or_default()
    }
}

/// A canned response for one request path.
#[derive(Clone)]
pub struct Route {
    pub path: String,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn json(path: &str, status: u16, body: serde_json::Value) -> Self {
        Self {
            path: path.to_string(),
            status,
            body: body.to_string(),
        }
    }
}

/// In-process HTTP/1.1 server answering from a route table.
///
/// Unknown paths get a GitLab-style 404 body. Every request head is
/// recorded for assertions on query strings and headers.
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 4096];
                    loop {
                        let n = stream.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let head = String::from_utf8_lossy(&buf).to_string();
                    let target = head
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or_default()
                        .to_string();
                    let path = target.split('?').next().unwrap_or_default().to_string();
                    log.lock().unwrap().push(head);

                    let (status, body) = routes
                        .iter()
                        .find(|r| r.path == path)
                        .map(|r| (r.status, r.body.clone()))
                        .unwrap_or((404, r#"{"message":"404 Not Found"}"#.to_string()));

                    let response = format!(
                        "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Recorded request heads, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
