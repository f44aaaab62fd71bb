#![allow(dead_code)]

use async_trait::async_trait;
use memegen_client::{CommandHost, HostError, MemeClient, MemeCommand, Reply, Session};
use memegen_core::Endpoint;
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

/// Session that remembers everything sent to it and every executed command line.
#[derive(Default)]
pub struct RecordingSession {
    pub replies: Mutex<Vec<Reply>>,
    pub executed: Mutex<Vec<String>>,
    pub fail_sends: bool,
}

impl RecordingSession {
    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Default::default()
        }
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Session for RecordingSession {
    async fn send(&self, reply: Reply) -> Result<(), HostError> {
        self.replies.lock().unwrap().push(reply);
        if self.fail_sends {
            return Err(HostError::Send("session closed".into()));
        }
        Ok(())
    }

    async fn execute(&self, command_line: &str) -> Result<(), HostError> {
        self.executed.lock().unwrap().push(command_line.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub commands: Vec<MemeCommand>,
}

impl CommandHost for RecordingHost {
    fn register(&mut self, command: MemeCommand) -> Result<(), HostError> {
        if self.commands.iter().any(|c| c.name() == command.name()) {
            return Err(HostError::Duplicate(command.name().to_string()));
        }
        self.commands.push(command);
        Ok(())
    }
}

pub fn client_for(server: &MockServer) -> MemeClient {
    // Trailing slash exercises endpoint normalization.
    MemeClient::new(
        reqwest::Client::new(),
        Endpoint::new(format!("{}/", server.uri())),
    )
}

pub fn info_body(key: &str, min_texts: usize, max_texts: usize, default_texts: &[&str]) -> Value {
    json!({
        "key": key,
        "keywords": [key],
        "patterns": [],
        "params": {
            "min_images": 0,
            "max_images": 0,
            "min_texts": min_texts,
            "max_texts": max_texts,
            "default_texts": default_texts,
            "args": [
                {"name": "name", "type": "str", "description": "name on the meme", "default": ""},
                {"name": "circle", "type": "bool", "description": "round avatar", "default": false}
            ]
        }
    })
}

/// `(field name, value)` pairs of a multipart body, in order.
pub fn form_fields(body: &[u8]) -> Vec<(String, String)> {
    let body = String::from_utf8_lossy(body);
    let marker = "Content-Disposition: form-data; name=\"";
    body.split(marker)
        .skip(1)
        .filter_map(|part| {
            let (name, rest) = part.split_once('"')?;
            let (_, value) = rest.split_once("\r\n\r\n")?;
            let value = value.split("\r\n--").next()?;
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

/// A `tracing` writer that keeps everything in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
