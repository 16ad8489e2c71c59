//! Deterministic test doubles: in-process generators and a one-shot HTTP server

use async_trait::async_trait;
use lecturelens_common::{AppError, Result};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::llm_trait::TextGenerator;

#[derive(Debug, Clone)]
enum Reply {
    /// Return the prompt unchanged
    Echo,
    /// Return a fixed string
    Fixed(String),
    /// Return `summary {n}` for the nth call
    Numbered,
    /// Always fail
    Fail(String),
}

/// Records every prompt; failures can be injected by call number
#[derive(Debug, Clone)]
pub struct StubGenerator {
    reply: Reply,
    fail_on: Vec<usize>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubGenerator {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            fail_on: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echo() -> Self {
        Self::with_reply(Reply::Echo)
    }

    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Fixed(text.to_string()))
    }

    pub fn numbered() -> Self {
        Self::with_reply(Reply::Numbered)
    }

    pub fn failing(msg: &str) -> Self {
        Self::with_reply(Reply::Fail(msg.to_string()))
    }

    /// Fail the given 1-based call numbers
    pub fn fail_calls(mut self, calls: &[usize]) -> Self {
        self.fail_on = calls.to_vec();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(prompt.to_string());
            calls.len()
        };

        if self.fail_on.contains(&n) {
            return Err(AppError::provider(format!("stub failure on call {}", n))
                .with_details(serde_json::json!({ "status": 503 })));
        }

        match &self.reply {
            Reply::Echo => Ok(prompt.to_string()),
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Numbered => Ok(format!("summary {}", n)),
            Reply::Fail(msg) => Err(AppError::provider(msg.clone())),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Local HTTP server that answers exactly one request with a canned response
pub struct StubServer {
    pub url: String,
    request: JoinHandle<String>,
}

impl StubServer {
    /// Bind to an ephemeral port and serve `body` with `status`
    pub async fn respond(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        Self { url, request }
    }

    /// Raw text of the request that was served
    pub async fn request(self) -> String {
        self.request.await.unwrap()
    }
}

/// Read headers plus a `Content-Length` body
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let content_length = String::from_utf8_lossy(&buf[..header_end])
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
