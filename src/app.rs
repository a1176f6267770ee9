//! The interactive loop: read a line, classify it, run it, render the reply.
//!
//! One iteration owns at most one in-flight remote request. While the request
//! runs, the loop redraws a spinner with elapsed seconds roughly every 100 ms
//! and races it against Ctrl-C; an interrupt flips the cancellation flag
//! handed to the task and waits a bounded interval for it to unwind. The
//! snapshot is only ever touched by the foreground iteration.

use crate::api::RemoteModel;
use crate::commands::{self, LocalOutcome};
use crate::context::ContextAssembler;
use crate::error::RemoteError;
use crate::router::{ParsedCommand, RouteTable};
use crate::snapshot::DirectorySnapshot;
use crate::textutil::single_line_preview;
use crate::ui::settings;
use crate::ui::{InputReader, ReadOutcome, Renderer, Reply};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncBufRead;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Single-user interactive session over one input source.
pub struct InteractionLoop<R> {
    router: RouteTable,
    snapshot: DirectorySnapshot,
    assembler: ContextAssembler,
    client: Arc<dyn RemoteModel>,
    renderer: Renderer,
    input: InputReader<R>,
}

impl<R: AsyncBufRead + Unpin> InteractionLoop<R> {
    pub fn new(
        router: RouteTable,
        snapshot: DirectorySnapshot,
        assembler: ContextAssembler,
        client: Arc<dyn RemoteModel>,
        renderer: Renderer,
        input: InputReader<R>,
    ) -> Self {
        Self {
            router,
            snapshot,
            assembler,
            client,
            renderer,
            input,
        }
    }

    /// Run until the user exits or the input stream ends.
    pub async fn run(&mut self) {
        loop {
            self.renderer.prompt(self.snapshot.current_path());
            let line = match self.input.read_line().await {
                Ok(ReadOutcome::Line(line)) => line,
                // End of stream is an implicit exit.
                Ok(ReadOutcome::Eof) => break,
                Ok(ReadOutcome::Interrupted) => {
                    self.renderer.interrupt("Input cancelled.");
                    continue;
                }
                Err(e) => {
                    self.renderer.error(&format!("failed to read input: {e}"));
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match self.router.route(&line) {
                ParsedCommand::Local { key, arg } => {
                    // Local commands are synchronous and fast; no live timer.
                    match commands::execute(key, &arg, &mut self.snapshot) {
                        LocalOutcome::Exit => break,
                        LocalOutcome::Reply(text) => {
                            self.renderer.render_reply(&Reply::local(text))
                        }
                    }
                }
                ParsedCommand::Remote(query) => self.run_remote(query).await,
            }
        }
        self.renderer.goodbye();
    }

    /// Dispatch one remote query as a cancellable task with a live timer.
    async fn run_remote(&mut self, query: String) {
        debug!(query = %single_line_preview(&query, 72), "remote dispatch");
        let (model, context) = self.assembler.assemble(&query, &mut self.snapshot);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let client = Arc::clone(&self.client);
        let started = Instant::now();
        let mut handle = tokio::spawn(dispatch_query(client, model, context, query, cancel_rx));

        let mut ticker = tokio::time::interval(Duration::from_millis(settings::PROGRESS_TICK_MS));
        let mut frame = 0usize;
        let mut ctrl_c_armed = true;
        let joined = loop {
            tokio::select! {
                joined = &mut handle => break Some(joined),
                signal = tokio::signal::ctrl_c(), if ctrl_c_armed => {
                    if signal.is_err() {
                        // Signal registration unavailable; wait without it.
                        ctrl_c_armed = false;
                        continue;
                    }
                    let _ = cancel_tx.send(true);
                    self.renderer.clear_progress();
                    self.renderer.interrupt("Request interrupted.");
                    // Bounded unwind wait; cancellation and timeout failures
                    // from the unwind are swallowed.
                    let _ = tokio::time::timeout(
                        Duration::from_millis(settings::CANCEL_UNWIND_MS),
                        &mut handle,
                    )
                    .await;
                    break None;
                }
                _ = ticker.tick() => {
                    self.renderer.progress_frame(frame, started.elapsed());
                    frame += 1;
                }
            }
        };
        self.renderer.clear_progress();

        match joined {
            // Interrupted before completion; notice already rendered.
            None => {}
            // The task observed cancellation and unwound on its own.
            Some(Ok(None)) => debug!("remote task observed cancellation"),
            Some(Ok(Some(Ok(answer)))) => self
                .renderer
                .render_reply(&Reply::remote(answer, started.elapsed())),
            Some(Ok(Some(Err(err)))) => {
                warn!(%err, "remote query failed");
                self.renderer.render_reply(&Reply::remote_error(err.to_string()));
            }
            // Catch-all: a panicked task must not take the session down.
            Some(Err(join_err)) => self
                .renderer
                .error(&format!("request task failed unexpectedly: {join_err}")),
        }
    }
}

/// Race the remote call against its cancellation flag.
///
/// Returns `None` when cancellation won; the caller already told the user.
async fn dispatch_query(
    client: Arc<dyn RemoteModel>,
    model: String,
    context: String,
    query: String,
    mut cancel: watch::Receiver<bool>,
) -> Option<Result<String, RemoteError>> {
    tokio::select! {
        result = client.send(&model, &context, &query) => Some(result),
        _ = cancel.changed() => None,
    }
}
