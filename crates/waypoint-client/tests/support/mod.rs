//! Test JSON-RPC server for the blocking client tests.
//!
//! The server runs a `hyper` HTTP/1 service on its own single-threaded tokio
//! runtime in a background thread, so tests can drive the blocking client
//! from the test thread. Every request is recorded before the reply is sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use flate2::write::GzEncoder;
use flate2::Compression;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// What the server sends back for one request.
pub struct Reply {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    /// `{"jsonrpc": "2.0", "result": <result>, "id": <id>}`
    pub fn result(request: &Value, result: Value) -> Self {
        Self::json(json!({"jsonrpc": "2.0", "result": result, "id": request["id"].clone()}))
    }

    /// `{"jsonrpc": "2.0", "error": <error>, "id": <id>}`
    pub fn error(request: &Value, error: Value) -> Self {
        Self::json(json!({"jsonrpc": "2.0", "error": error, "id": request["id"].clone()}))
    }

    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: serde_json::to_vec(&value).unwrap(),
        }
    }

    /// Same envelope, gzip-compressed, with `Content-Encoding: <encoding>`.
    pub fn gzip(value: Value, encoding: &str) -> Self {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&serde_json::to_vec(&value).unwrap()).unwrap();
        Self {
            status: StatusCode::OK,
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("Content-Encoding", encoding.to_string()),
            ],
            body: encoder.finish().unwrap(),
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: b"server error".to_vec(),
        }
    }
}

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub body: Value,
    pub headers: HashMap<String, String>,
}

impl RecordedCall {
    pub fn method(&self) -> &str {
        self.body["method"].as_str().unwrap_or_default()
    }

    pub fn id(&self) -> u64 {
        self.body["id"].as_u64().unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

pub struct TestServer {
    addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    connections: Arc<AtomicUsize>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Starts a server on a random port that answers every request with
    /// `handler(request_body)`.
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Value) -> Reply + Send + Sync + 'static,
    {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        std_listener.set_nonblocking(true).unwrap();
        let addr = std_listener.local_addr().unwrap();

        let calls = Arc::new(Mutex::new(Vec::new()));
        let server_calls = calls.clone();
        let connections = Arc::new(AtomicUsize::new(0));
        let server_connections = connections.clone();
        let handler = Arc::new(handler);
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async move {
                let listener = TcpListener::from_std(std_listener).unwrap();

                loop {
                    tokio::select! {
                        accepted = listener.accept() => {
                            let Ok((stream, _)) = accepted else { continue };
                            server_connections.fetch_add(1, Ordering::SeqCst);
                            let handler = handler.clone();
                            let calls = server_calls.clone();

                            tokio::spawn(async move {
                                let service = service_fn(move |req: Request<Incoming>| {
                                    let handler = handler.clone();
                                    let calls = calls.clone();
                                    async move {
                                        let headers = req
                                            .headers()
                                            .iter()
                                            .map(|(name, value)| {
                                                (name.as_str().to_string(), value.to_str().unwrap_or_default().to_string())
                                            })
                                            .collect::<HashMap<_, _>>();
                                        let bytes = req.into_body().collect().await.unwrap().to_bytes();
                                        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

                                        let reply = (handler.as_ref())(&body);
                                        calls.lock().unwrap().push(RecordedCall { body, headers });

                                        let mut builder = Response::builder().status(reply.status);
                                        for (name, value) in reply.headers {
                                            builder = builder.header(name, value);
                                        }
                                        Ok::<_, Infallible>(builder.body(Full::new(Bytes::from(reply.body))).unwrap())
                                    }
                                });

                                let _ = http1::Builder::new()
                                    .serve_connection(TokioIo::new(stream), service)
                                    .await;
                            });
                        }
                        _ = &mut shutdown_rx => break,
                    }
                }
            });
        });

        Self {
            addr,
            calls,
            connections,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of TCP connections accepted so far.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A small in-memory waypoint library speaking the service's methods.
pub fn library_handler(initial: Vec<Value>) -> impl Fn(&Value) -> Reply + Send + Sync + 'static {
    let library = Mutex::new(initial);

    move |request: &Value| {
        let params = request["params"].as_array().cloned().unwrap_or_default();
        let mut library = library.lock().unwrap();

        match request["method"].as_str().unwrap_or_default() {
            "add" => {
                library.push(params[0].clone());
                Reply::result(request, json!(true))
            }
            "remove" => match position(&library, &params[0]) {
                Some(idx) => {
                    library.remove(idx);
                    Reply::result(request, json!(true))
                }
                None => Reply::result(request, json!(false)),
            },
            "get" => match position(&library, &params[0]) {
                Some(idx) => Reply::result(request, library[idx].clone()),
                None => Reply::error(request, json!({"code": -32000, "message": "no such waypoint"})),
            },
            "getNames" => {
                let names: Vec<Value> = library.iter().map(|wp| wp["name"].clone()).collect();
                Reply::result(request, Value::Array(names))
            }
            "getById" => {
                let idx = params[0].as_u64().unwrap_or(u64::MAX) as usize;
                match library.get(idx) {
                    Some(wp) => Reply::result(request, wp["name"].clone()),
                    None => Reply::error(request, json!("index out of range")),
                }
            }
            "updateWaypoint" => {
                let name = params[3].clone();
                let waypoint = json!({
                    "lat": params[0].as_str().unwrap().parse::<f64>().unwrap(),
                    "lon": params[1].as_str().unwrap().parse::<f64>().unwrap(),
                    "ele": params[2].as_str().unwrap().parse::<f64>().unwrap(),
                    "name": name,
                    "address": params[4].clone(),
                });
                if let Some(idx) = position(&library, &name) {
                    library.remove(idx);
                }
                library.push(waypoint);
                Reply::result(request, json!(true))
            }
            "saveToJsonFile" | "resetFromJsonFile" => Reply::result(request, json!(true)),
            _ => Reply::error(request, json!({"code": -32601, "message": "Method not found"})),
        }
    }
}

fn position(library: &[Value], name: &Value) -> Option<usize> {
    library.iter().position(|wp| wp["name"] == *name)
}
