use std::io::Cursor;
use std::io::Read as _;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Copy)]
pub enum StubBehavior {
    Normal,
    /// Every single-record GET answers 500.
    FailSingleGet,
}

/// In-memory book API: the five endpoints of the collaborator contract,
/// wrapper fields included, with every received request recorded for
/// assertions.
pub struct BookApiStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl BookApiStub {
    pub fn spawn(seed: Vec<Value>) -> Self {
        Self::spawn_with(seed, StubBehavior::Normal)
    }

    pub fn spawn_with(seed: Vec<Value>, behavior: StubBehavior) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start book api stub");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}/book");

        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let books = Mutex::new(seed);

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let method = request.method().to_string();
                let path = request.url().to_string();
                let mut raw_body = String::new();
                let _ = request.as_reader().read_to_string(&mut raw_body);
                let body: Option<Value> = serde_json::from_str(&raw_body).ok();

                log.lock().unwrap().push(RecordedRequest {
                    method: method.clone(),
                    path: path.clone(),
                    body: body.clone(),
                });

                let response = route(&method, &path, body.as_ref(), &books, behavior);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method)
            .collect()
    }
}

impl Drop for BookApiStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn route(
    method: &str,
    path: &str,
    body: Option<&Value>,
    books: &Mutex<Vec<Value>>,
    behavior: StubBehavior,
) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let mut books = books.lock().unwrap();

    if path == "/book" {
        match method {
            "GET" => return json_response(200, &json!({ "books": *books })),
            "POST" => {
                let Some(record) = body else {
                    return json_response(400, &json!({ "message": "invalid body" }));
                };
                let next_id = books
                    .iter()
                    .filter_map(|book| book.get("id").and_then(Value::as_u64))
                    .max()
                    .unwrap_or(0)
                    + 1;
                let mut book = record.clone();
                book["id"] = json!(next_id);
                books.push(book.clone());
                return json_response(201, &json!({ "book": book }));
            }
            _ => return json_response(405, &json!({ "message": "method not allowed" })),
        }
    }

    let Some(id) = path
        .strip_prefix("/book/")
        .and_then(|raw| raw.parse::<u64>().ok())
    else {
        return json_response(404, &json!({ "message": "not found" }));
    };

    match method {
        "GET" => {
            if matches!(behavior, StubBehavior::FailSingleGet) {
                return json_response(500, &json!({ "message": "internal error" }));
            }
            match books.iter().find(|book| book["id"] == json!(id)) {
                Some(book) => json_response(200, &json!({ "book": book })),
                None => json_response(404, &json!({ "message": "book not found" })),
            }
        }
        "PUT" => {
            let Some(record) = body else {
                return json_response(400, &json!({ "message": "invalid body" }));
            };
            let Some(slot) = books.iter_mut().find(|book| book["id"] == json!(id)) else {
                return json_response(404, &json!({ "message": "book not found" }));
            };
            let mut updated = record.clone();
            updated["id"] = json!(id);
            *slot = updated.clone();
            json_response(200, &json!({ "book": updated }))
        }
        "DELETE" => {
            books.retain(|book| book["id"] != json!(id));
            json_response(200, &json!({ "message": "deleted" }))
        }
        _ => json_response(405, &json!({ "message": "method not allowed" })),
    }
}

fn json_response(status: u16, body: &Value) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("build header");
    tiny_http::Response::from_string(body.to_string())
        .with_status_code(status)
        .with_header(header)
}
