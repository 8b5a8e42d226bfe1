//! Stub generation service for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use property_chat::config::GenerationSettings;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the stub sends back after reading a request
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with each entry sent as its own HTTP chunk, then a clean end
    Stream(Vec<String>),
    /// 200 with the given chunks, then the socket drops mid-body
    Abort(Vec<String>),
    /// Non-success status with a plain body
    Status(u16, String),
    /// Read the request and never answer
    Hang,
}

pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                let reply = reply.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    serve(socket, reply, seen).await;
                });
            }
        });

        Self {
            url: format!("http://{}/api/generate", addr),
            requests,
        }
    }

    /// Request bodies received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn settings(&self, timeout: Duration) -> GenerationSettings {
        GenerationSettings {
            url: self.url.clone(),
            model: "propbot".to_string(),
            timeout,
        }
    }
}

/// A URL on which nothing is listening
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    format!("http://{}/api/generate", addr)
}

pub fn ndjson(fragments: &[&str]) -> Vec<String> {
    fragments
        .iter()
        .map(|f| format!("{}\n", serde_json::json!({ "model": "propbot", "response": f, "done": false })))
        .collect()
}

async fn serve(mut socket: TcpStream, reply: Reply, seen: Arc<Mutex<Vec<String>>>) {
    let Some(body) = read_request(&mut socket).await else {
        return;
    };
    seen.lock().expect("requests lock").push(body);

    match reply {
        Reply::Stream(chunks) => {
            let _ = write_chunked_head(&mut socket).await;
            for chunk in chunks {
                if write_chunk(&mut socket, &chunk).await.is_err() {
                    return;
                }
            }
            let _ = socket.write_all(b"0\r\n\r\n").await;
            let _ = socket.shutdown().await;
        }
        Reply::Abort(chunks) => {
            let _ = write_chunked_head(&mut socket).await;
            for chunk in chunks {
                let _ = write_chunk(&mut socket, &chunk).await;
            }
            // drop without the terminating chunk
        }
        Reply::Status(code, text) => {
            let head = format!(
                "HTTP/1.1 {} Error\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                code,
                text.len()
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(text.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
    }
}

async fn write_chunked_head(socket: &mut TcpStream) -> std::io::Result<()> {
    socket
        .write_all(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/x-ndjson\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
        )
        .await
}

async fn write_chunk(socket: &mut TcpStream, data: &str) -> std::io::Result<()> {
    let frame = format!("{:x}\r\n{}\r\n", data.len(), data);
    socket.write_all(frame.as_bytes()).await?;
    socket.flush().await?;
    tokio::time::sleep(Duration::from_millis(5)).await;
    Ok(())
}

/// Read one HTTP request and return its body
async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut tmp).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut tmp).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
    }

    Some(String::from_utf8_lossy(&buf[header_end..]).to_string())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
