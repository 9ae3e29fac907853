//! Canned-reply transport for tests and the desk simulator.
//!
//! Replies are keyed by method and path. A key with a query string
//! (`/api/trips?routeId=4`) wins over the bare path (`/api/trips`); anything
//! unmatched gets a 404, like an unknown backend route would.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::Url;
use tracing::{debug, info};

use super::client::paths;
use super::error::TransportError;
use super::transport::{HttpResponse, Method, Transport};

/// What the mock does when a request matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Respond { status: u16, body: String },
    Fail(TransportError),
}

impl Reply {
    /// A 200 with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Respond {
            status: 200,
            body: body.into(),
        }
    }
}

/// A request the mock has seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// The full URL as sent.
    pub url: String,
}

#[derive(Debug)]
struct Inner {
    replies: HashMap<(Method, String), Reply>,
    requests: Vec<RecordedRequest>,
    online: bool,
}

/// Transport that answers from a reply table. Clones share state.
#[derive(Debug, Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    /// An online mock with no replies.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                replies: HashMap::new(),
                requests: Vec::new(),
                online: true,
            })),
        }
    }

    /// Load a reply table from a directory of sample responses.
    ///
    /// Recognised files: `routes.json`, `stations.json`, `status.txt` and
    /// `trips_<routeId>.json`. The user-location POST always succeeds.
    pub fn from_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        let mock = Self::new();
        let mut loaded = 0usize;

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };

            let target = match file_name {
                "routes.json" => paths::ROUTES.to_string(),
                "stations.json" => paths::STATIONS.to_string(),
                "status.txt" => paths::STATUS.to_string(),
                other => match trips_route(other) {
                    Some(route) => format!("{}?routeId={route}", paths::TRIPS),
                    None => continue,
                },
            };

            let body = std::fs::read_to_string(&path)?;
            mock.reply(Method::Get, &target, Reply::ok(body));
            loaded += 1;
        }

        if loaded == 0 {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no mock response files found in {}", dir.display()),
            ));
        }

        mock.reply(
            Method::Post,
            paths::USER_LOCATION,
            Reply::ok("User location set"),
        );
        info!(dir = %dir.display(), files = loaded, "loaded mock backend");
        Ok(mock)
    }

    /// Set the reply for `method` on `path_and_query`, replacing any earlier one.
    pub fn reply(&self, method: Method, path_and_query: &str, reply: Reply) {
        self.lock()
            .replies
            .insert((method, path_and_query.to_string()), reply);
    }

    /// Shorthand for a 200 reply with `body`.
    pub fn reply_json(&self, method: Method, path_and_query: &str, body: &str) {
        self.reply(method, path_and_query, Reply::ok(body));
    }

    /// Drop the reply for `method` on `path_and_query`.
    pub fn forget(&self, method: Method, path_and_query: &str) {
        self.lock()
            .replies
            .remove(&(method, path_and_query.to_string()));
    }

    /// Bring the simulated link up or down.
    pub fn set_online(&self, online: bool) {
        self.lock().online = online;
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Number of requests whose path is `path`.
    pub fn count_path(&self, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| {
                Url::parse(&r.url)
                    .map(|u| u.path() == path)
                    .unwrap_or(false)
            })
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn send(&self, method: Method, url: &Url) -> Result<HttpResponse, TransportError> {
        let mut inner = self.lock();
        inner.requests.push(RecordedRequest {
            method,
            url: url.to_string(),
        });

        if !inner.online {
            return Err(TransportError::Offline);
        }

        let path = url.path().to_string();
        let full = match url.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.clone(),
        };

        let reply = inner
            .replies
            .get(&(method, full))
            .or_else(|| inner.replies.get(&(method, path)))
            .cloned();

        debug!(%method, %url, matched = reply.is_some(), "mock request");
        match reply {
            Some(Reply::Respond { status, body }) => Ok(HttpResponse::new(status, body)),
            Some(Reply::Fail(err)) => Err(err),
            None => Ok(HttpResponse::new(404, "Not Found")),
        }
    }

    fn is_online(&self) -> bool {
        self.lock().online
    }
}

/// Route id from a `trips_<id>.json` file name.
fn trips_route(file_name: &str) -> Option<i32> {
    file_name
        .strip_prefix("trips_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn unmatched_request_is_404() {
        let mock = MockTransport::new();
        let response = mock.send(Method::Get, &url("http://x/api/nope")).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn query_specific_reply_wins() {
        let mock = MockTransport::new();
        mock.reply_json(Method::Get, "/api/trips", "generic");
        mock.reply_json(Method::Get, "/api/trips?routeId=7", "seven");

        let seven = mock
            .send(Method::Get, &url("http://x/api/trips?routeId=7"))
            .unwrap();
        let other = mock
            .send(Method::Get, &url("http://x/api/trips?routeId=8"))
            .unwrap();
        assert_eq!(seven.body, "seven");
        assert_eq!(other.body, "generic");
    }

    #[test]
    fn method_is_part_of_the_key() {
        let mock = MockTransport::new();
        mock.reply_json(Method::Post, "/api/user-location", "ok");
        let get = mock
            .send(Method::Get, &url("http://x/api/user-location"))
            .unwrap();
        assert_eq!(get.status, 404);
    }

    #[test]
    fn failures_and_offline() {
        let mock = MockTransport::new();
        mock.reply(
            Method::Get,
            "/api/status",
            Reply::Fail(TransportError::Connect("timeout".into())),
        );
        assert_eq!(
            mock.send(Method::Get, &url("http://x/api/status")),
            Err(TransportError::Connect("timeout".into()))
        );

        mock.set_online(false);
        assert!(!mock.is_online());
        assert_eq!(
            mock.send(Method::Get, &url("http://x/api/status")),
            Err(TransportError::Offline)
        );
    }

    #[test]
    fn clones_share_state() {
        let mock = MockTransport::new();
        let other = mock.clone();
        other.reply_json(Method::Get, "/a", "shared");
        assert_eq!(
            mock.send(Method::Get, &url("http://x/a")).unwrap().body,
            "shared"
        );
        assert_eq!(other.requests().len(), 1);
        assert_eq!(other.count_path("/a"), 1);

        other.forget(Method::Get, "/a");
        assert_eq!(mock.send(Method::Get, &url("http://x/a")).unwrap().status, 404);
    }

    #[test]
    fn parses_trip_file_names() {
        assert_eq!(trips_route("trips_41.json"), Some(41));
        assert_eq!(trips_route("trips_x.json"), None);
        assert_eq!(trips_route("routes.json"), None);
    }

    #[test]
    fn loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("routes.json"), "[]").unwrap();
        std::fs::write(dir.path().join("trips_3.json"), "[1]").unwrap();
        std::fs::write(dir.path().join("status.txt"), "All good").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let mock = MockTransport::from_dir(dir.path()).unwrap();
        let trips = mock
            .send(Method::Get, &url("http://x/api/trips?routeId=3"))
            .unwrap();
        assert_eq!(trips.body, "[1]");
        let status = mock.send(Method::Get, &url("http://x/api/status")).unwrap();
        assert_eq!(status.body, "All good");
        let post = mock
            .send(Method::Post, &url("http://x/api/user-location?lat=1"))
            .unwrap();
        assert_eq!(post.status, 200);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MockTransport::from_dir(dir.path()).is_err());
    }

    #[test]
    fn bundled_mock_data_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("mock_data");
        let mock = MockTransport::from_dir(dir).unwrap();
        let routes = mock
            .send(Method::Get, &url("http://x/api/routes-with-vehicles"))
            .unwrap();
        assert_eq!(routes.status, 200);
    }
}
