use anyhow::{Context, Result};
use flume::{bounded, Receiver, Sender};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::types::RunRecord;
use crate::config::TracingSinkConfig;

/// Async run tracer with queue mechanism.
///
/// `record` never blocks and never fails: when the queue is full, or tracing is
/// disabled, the record is dropped.
#[derive(Clone)]
pub struct RunTracer {
    sender: Option<Sender<RunRecord>>,
    project: String,
}

impl RunTracer {
    /// Initialize tracer with background workers. Must be called inside a Tokio runtime.
    pub fn new(config: TracingSinkConfig, api_key: String) -> Result<Self> {
        if !config.enabled {
            info!("Run tracing disabled by configuration");
            return Ok(Self::disabled());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create tracing HTTP client")?;

        let (sender, receiver) = bounded(config.queue_capacity.max(1));

        info!(
            "Initializing RunTracer: endpoint={}, project={}, queue={}, batch={}, timeout={}ms, workers={}",
            config.endpoint,
            config.project,
            config.queue_capacity,
            config.batch_size,
            config.batch_timeout_ms,
            config.worker_count
        );

        for worker_id in 0..config.worker_count.max(1) {
            let client = client.clone();
            let receiver = receiver.clone();
            let config = config.clone();
            let api_key = api_key.clone();

            tokio::spawn(async move {
                Self::worker_loop(worker_id, client, api_key, receiver, config).await;
            });
        }

        Ok(Self {
            sender: Some(sender),
            project: config.project,
        })
    }

    /// Tracer that discards every record.
    pub fn disabled() -> Self {
        Self {
            sender: None,
            project: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Enqueue a run (non-blocking, fire-and-forget)
    pub fn record(&self, mut run: RunRecord) {
        let Some(sender) = &self.sender else {
            return;
        };

        run.session_name = self.project.clone();
        if let Err(e) = sender.try_send(run) {
            warn!("Dropping trace run (queue full or closed): {}", e);
        }
    }

    async fn worker_loop(
        worker_id: usize,
        client: Client,
        api_key: String,
        receiver: Receiver<RunRecord>,
        config: TracingSinkConfig,
    ) {
        debug!("Trace worker {} started", worker_id);

        let batch_size = config.batch_size.max(1);
        let batch_timeout = Duration::from_millis(config.batch_timeout_ms);
        let url = format!("{}/runs/batch", config.endpoint.trim_end_matches('/'));
        let mut batch: Vec<RunRecord> = Vec::with_capacity(batch_size);

        loop {
            // Block for the first run, then fill the batch until the deadline
            match receiver.recv_async().await {
                Ok(run) => batch.push(run),
                Err(_) => {
                    info!("Trace worker {} shutting down (channel closed)", worker_id);
                    return;
                }
            }

            let deadline = tokio::time::Instant::now() + batch_timeout;
            let mut closed = false;

            while batch.len() < batch_size {
                match tokio::time::timeout_at(deadline, receiver.recv_async()).await {
                    Ok(Ok(run)) => batch.push(run),
                    Ok(Err(_)) => {
                        closed = true;
                        break;
                    }
                    Err(_) => break,
                }
            }

            Self::flush_batch(&client, &url, &api_key, &batch, worker_id).await;
            batch.clear();

            if closed {
                info!("Trace worker {} shutting down (channel closed)", worker_id);
                return;
            }
        }
    }

    async fn flush_batch(
        client: &Client,
        url: &str,
        api_key: &str,
        batch: &[RunRecord],
        worker_id: usize,
    ) {
        debug!("Trace worker {} posting {} runs", worker_id, batch.len());

        let result = client
            .post(url)
            .header("x-api-key", api_key)
            .json(&json!({ "post": batch, "patch": [] }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("Trace worker {} posted {} runs", worker_id, batch.len());
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                error!(
                    "Trace worker {} rejected by sink ({}): {}",
                    worker_id, status, body
                );
            }
            Err(e) => {
                error!("Trace worker {} failed to reach sink: {}", worker_id, e);
            }
        }
    }
}
