//! Editor bridge
//!
//! Newline-delimited JSON over a pair of byte streams (stdio in production).
//! Every line is one message; `type` selects the message kind.
//!
//! Requests:
//!
//! ```text
//! {"type":"suggest","id":1,"text":"foo.bar","offset":6,"event":"document_change"}
//! {"type":"accepted"}
//! {"type":"set_model","model":"starcoder2:3b"}
//! {"type":"stats"}
//! {"type":"reset_stats"}
//! {"type":"status"}
//! ```
//!
//! Suggest requests run concurrently, so their responses may arrive out of
//! order; each carries the id of its request. `accepted` has no response.

use std::sync::Arc;

use ghostline_common::StatusBoard;
use ghostline_completion::{CompletionEvent, CompletionOrchestrator};
use ghostline_config::ConfigManager;
use ghostline_stats::StatisticsSnapshot;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Which editor event triggered a suggest request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Typing; subject to the position gate
    #[default]
    DocumentChange,
    /// Explicit request; always served
    DirectCall,
}

/// Message from the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeRequest {
    Suggest {
        id: u64,
        text: String,
        offset: usize,
        #[serde(default)]
        event: EventKind,
    },
    Accepted,
    SetModel {
        model: String,
    },
    Stats,
    ResetStats,
    Status,
}

/// Message to the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeResponse {
    Suggestion {
        id: u64,
        text: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        skipped: bool,
    },
    Stats {
        statistics: StatisticsSnapshot,
        user_engagement_percent: u32,
        average_completion_seconds: f64,
        report: String,
    },
    Status {
        text: String,
    },
    Error {
        message: String,
    },
}

impl BridgeResponse {
    fn stats(snapshot: StatisticsSnapshot) -> Self {
        BridgeResponse::Stats {
            statistics: snapshot,
            user_engagement_percent: snapshot.user_engagement_percent(),
            average_completion_seconds: snapshot.average_completion_seconds(),
            report: ghostline_stats::StatsReport::from(snapshot).to_string(),
        }
    }
}

/// Serves one editor connection
pub struct EditorBridge {
    orchestrator: CompletionOrchestrator,
    board: Arc<StatusBoard>,
    config_manager: Option<ConfigManager>,
}

impl EditorBridge {
    /// `board` must be the status sink the orchestrator reports to
    pub fn new(orchestrator: CompletionOrchestrator, board: Arc<StatusBoard>) -> Self {
        Self {
            orchestrator,
            board,
            config_manager: None,
        }
    }

    /// Persist model switches through `manager` before applying them
    pub fn with_config_manager(mut self, manager: ConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    /// Process requests until `reader` reaches end of input
    ///
    /// Returns once every pending suggestion has been written.
    pub async fn run<R, W>(&self, reader: R, writer: W) -> CliResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_responses(rx, writer));

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<BridgeRequest>(&line) {
                Ok(request) => self.dispatch(request, &tx).await,
                Err(e) => {
                    warn!("Rejected malformed request: {}", e);
                    send(&tx, BridgeResponse::Error {
                        message: format!("Malformed request: {}", e),
                    });
                }
            }
        }

        debug!("Editor closed the input stream");
        drop(tx);
        writer_task
            .await
            .map_err(|e| CliError::Internal(format!("Response writer failed: {}", e)))?
    }

    async fn dispatch(&self, request: BridgeRequest, tx: &mpsc::UnboundedSender<BridgeResponse>) {
        match request {
            BridgeRequest::Suggest {
                id,
                text,
                offset,
                event,
            } => {
                let event = match event {
                    EventKind::DocumentChange => CompletionEvent::DocumentChange { text, offset },
                    EventKind::DirectCall => CompletionEvent::DirectCall { text, offset },
                };
                match self.orchestrator.handle_event(&event) {
                    Some(handle) => {
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let text = handle.await;
                            send(&tx, BridgeResponse::Suggestion {
                                id,
                                text,
                                skipped: false,
                            });
                        });
                    }
                    None => send(tx, BridgeResponse::Suggestion {
                        id,
                        text: String::new(),
                        skipped: true,
                    }),
                }
            }
            BridgeRequest::Accepted => self.orchestrator.on_accepted(),
            BridgeRequest::SetModel { model } => {
                let model = model.trim();
                if model.is_empty() {
                    send(tx, BridgeResponse::Error {
                        message: "Model must not be empty".to_string(),
                    });
                    return;
                }
                if let Some(manager) = &self.config_manager {
                    if let Err(e) = manager.set_model(model) {
                        warn!("Failed to save model {}: {}", model, e);
                        send(tx, BridgeResponse::Error {
                            message: format!("Failed to save model: {}", e),
                        });
                        return;
                    }
                }
                self.orchestrator.set_model(model).await;
                info!("Editor switched model to {}", model);
                send(tx, BridgeResponse::Status {
                    text: self.status_text(),
                });
            }
            BridgeRequest::Stats => {
                send(tx, BridgeResponse::stats(self.orchestrator.statistics().snapshot()));
            }
            BridgeRequest::ResetStats => {
                self.orchestrator.statistics().reset();
                self.board.reset_counters();
                send(tx, BridgeResponse::stats(self.orchestrator.statistics().snapshot()));
            }
            BridgeRequest::Status => send(tx, BridgeResponse::Status {
                text: self.status_text(),
            }),
        }
    }

    // Counts come from the statistics, which reset as a unit; the board only
    // contributes the backend status.
    fn status_text(&self) -> String {
        let stats = self.orchestrator.statistics();
        self.board
            .text_with_counts(stats.cache_misses(), stats.cache_hits())
    }
}

fn send(tx: &mpsc::UnboundedSender<BridgeResponse>, response: BridgeResponse) {
    if tx.send(response).is_err() {
        warn!("Response writer is gone; dropping response");
    }
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<BridgeResponse>,
    mut writer: W,
) -> CliResult<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
