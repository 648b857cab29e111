//! Asynchronous client for the external Sudoku engine process.
//!
//! The engine speaks newline-delimited JSON over stdin/stdout: requests go
//! out with a correlation id, replies come back carrying the same id, and
//! authoritative state arrives as uncorrelated push frames. Mutating
//! requests are fire-and-forget from the UI's perspective; the reply only
//! acknowledges the request, and the resulting cell/summary state is pushed
//! separately.

use std::{
    collections::HashMap,
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    process::{Child, Command},
    sync::{broadcast, oneshot},
};

use shared::{
    error::EngineError,
    protocol::{CountFlags, EngineFrame, EnginePush, EngineRequest, ReplyFrame, RequestFrame},
};

type PendingMap = Mutex<HashMap<u64, oneshot::Sender<Result<serde_json::Value, EngineError>>>>;

pub struct EngineClient {
    writer: tokio::sync::Mutex<Box<dyn AsyncWrite + Send + Unpin>>,
    pending: Arc<PendingMap>,
    next_id: AtomicU64,
    events: broadcast::Sender<EnginePush>,
    _child: Option<Child>,
}

impl EngineClient {
    /// Spawns the engine executable and attaches to its stdio. Must be
    /// called from within a tokio runtime (the reader task is spawned
    /// immediately).
    pub fn spawn(program: &Path) -> Result<Arc<Self>> {
        let mut child = Command::new(program)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to launch engine {}", program.display()))?;
        let stdin = child.stdin.take().context("engine stdin unavailable")?;
        let stdout = child.stdout.take().context("engine stdout unavailable")?;
        tracing::info!(engine = %program.display(), "engine process started");
        Ok(Self::attach(stdout, stdin, Some(child)))
    }

    /// Attaches to an already-established engine transport. Test seam; the
    /// production path is [`EngineClient::spawn`].
    pub fn from_io<R, W>(reader: R, writer: W) -> Arc<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self::attach(reader, writer, None)
    }

    fn attach<R, W>(reader: R, writer: W, child: Option<Child>) -> Arc<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let (events, _) = broadcast::channel(1024);
        let pending: Arc<PendingMap> = Arc::new(Mutex::new(HashMap::new()));
        tokio::spawn(read_loop(reader, Arc::clone(&pending), events.clone()));
        Arc::new(Self {
            writer: tokio::sync::Mutex::new(Box::new(writer)),
            pending,
            next_id: AtomicU64::new(1),
            events,
            _child: child,
        })
    }

    /// Subscribes to authoritative push events (per-cell updates and game
    /// summaries). Within one cell the pushes arrive in delivery order;
    /// across cells no ordering is guaranteed or required.
    pub fn subscribe_events(&self) -> broadcast::Receiver<EnginePush> {
        self.events.subscribe()
    }

    pub async fn set_value(
        &self,
        row: u8,
        col: u8,
        value: u8,
        counts: CountFlags,
    ) -> Result<(), EngineError> {
        self.ack(EngineRequest::SetValue {
            row,
            col,
            value,
            counts,
        })
        .await
    }

    pub async fn increment_value(
        &self,
        row: u8,
        col: u8,
        counts: CountFlags,
    ) -> Result<(), EngineError> {
        self.ack(EngineRequest::IncrementValue { row, col, counts })
            .await
    }

    pub async fn toggle_note(&self, row: u8, col: u8, value: u8) -> Result<(), EngineError> {
        self.ack(EngineRequest::ToggleNote { row, col, value })
            .await
    }

    pub async fn generate(
        &self,
        difficulty: u8,
        seed: u64,
        counts: CountFlags,
        fix_result: bool,
    ) -> Result<(), EngineError> {
        self.ack(EngineRequest::Generate {
            difficulty,
            seed,
            counts,
            fix_result,
        })
        .await
    }

    pub async fn solve(&self, counts: CountFlags) -> Result<(), EngineError> {
        self.ack(EngineRequest::Solve { counts }).await
    }

    pub async fn reset(&self, counts: CountFlags, hard: bool) -> Result<(), EngineError> {
        self.ack(EngineRequest::Reset { counts, hard }).await
    }

    pub async fn hint(&self, counts: CountFlags) -> Result<(), EngineError> {
        self.ack(EngineRequest::Hint { counts }).await
    }

    pub async fn fix_current(&self, counts: CountFlags) -> Result<(), EngineError> {
        self.ack(EngineRequest::FixCurrent { counts }).await
    }

    pub async fn trigger_update(&self, counts: CountFlags) -> Result<(), EngineError> {
        self.ack(EngineRequest::TriggerUpdate { counts }).await
    }

    pub async fn deserialize(&self, content: String, counts: CountFlags) -> Result<(), EngineError> {
        self.ack(EngineRequest::Deserialize { content, counts })
            .await
    }

    /// Returns the full puzzle content. The one operation (besides the
    /// elapsed-time poll) whose reply carries a payload.
    pub async fn serialize(&self) -> Result<String, EngineError> {
        let value = self.call(EngineRequest::Serialize).await?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| EngineError::Protocol(format!("serialize reply was not a string: {value}")))
    }

    /// Polls the engine for elapsed play time in seconds. A negative value
    /// means the timer has expired.
    pub async fn elapsed_seconds(&self) -> Result<i64, EngineError> {
        let value = self.call(EngineRequest::ElapsedSeconds).await?;
        value
            .as_i64()
            .ok_or_else(|| EngineError::Protocol(format!("elapsed reply was not a number: {value}")))
    }

    async fn ack(&self, request: EngineRequest) -> Result<(), EngineError> {
        self.call(request).await.map(|_| ())
    }

    async fn call(&self, request: EngineRequest) -> Result<serde_json::Value, EngineError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().expect("pending map poisoned");
            pending.insert(id, reply_tx);
        }

        let frame = RequestFrame { id, request };
        let mut line = serde_json::to_string(&frame)
            .map_err(|err| EngineError::Protocol(err.to_string()))?;
        line.push('\n');

        if let Err(err) = self.write_line(&line).await {
            self.pending.lock().expect("pending map poisoned").remove(&id);
            return Err(err.into());
        }

        match reply_rx.await {
            Ok(result) => result,
            Err(_) => Err(EngineError::Disconnected),
        }
    }

    async fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await
    }
}

async fn read_loop<R>(
    reader: R,
    pending: Arc<PendingMap>,
    events: broadcast::Sender<EnginePush>,
) where
    R: AsyncRead + Send + Unpin + 'static,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<EngineFrame>(line) {
                    Ok(EngineFrame::Reply(reply)) => route_reply(&pending, reply),
                    Ok(EngineFrame::Push(push)) => {
                        // No subscriber yet is fine; pushes are re-requested
                        // via trigger_update when the UI attaches.
                        let _ = events.send(push);
                    }
                    Err(err) => {
                        tracing::warn!(%err, line, "skipping malformed engine frame");
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                tracing::error!(%err, "engine stdout read failed");
                break;
            }
        }
    }
    tracing::info!("engine connection closed");
    // Dropping the senders wakes every in-flight call with Disconnected.
    pending.lock().expect("pending map poisoned").clear();
}

fn route_reply(pending: &PendingMap, reply: ReplyFrame) {
    let Some(sender) = pending.lock().expect("pending map poisoned").remove(&reply.id) else {
        tracing::warn!(id = reply.id, "reply for unknown request id");
        return;
    };
    let result = match reply.error {
        Some(message) => Err(EngineError::Rejected(message)),
        None => Ok(reply.result.unwrap_or(serde_json::Value::Null)),
    };
    let _ = sender.send(result);
}

#[cfg(test)]
mod tests;
