//! JSON-lines IPC host: panel intents on stdin, view updates on stdout.

use std::sync::Arc;

use attire_panel::{Effect, IpcMessage, Panel, PanelIntent, PanelUpdate};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Serve `panel` until `input` reaches end of file.
///
/// Model defaults are queried before the first line is read, so an unusable
/// service disables the panel without waiting for a `ready` message.
/// Intents are applied in arrival order. Their effects (model requests,
/// session resets) run one at a time, in that same order, on a worker task
/// so the panel keeps accepting input while a request is in flight. At end
/// of input, queued effects are finished, the session is released and
/// remaining updates are flushed.
pub async fn serve<R, W>(
    panel: Arc<Panel>,
    mut updates: UnboundedReceiver<PanelUpdate>,
    input: R,
    mut output: W,
) -> attire_common::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    panel.run(Effect::Initialize).await;

    let mut lines = input.lines();
    let (effects, queue) = mpsc::unbounded_channel();
    let worker = tokio::spawn(run_effects(Arc::clone(&panel), queue));

    info!("Panel host ready");
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => handle_line(&panel, &line, &effects),
                None => break,
            },
            Some(update) = updates.recv() => write_update(&mut output, &update).await?,
        }
    }

    debug!("Input closed, finishing queued effects");
    drop(effects);
    if let Err(e) = worker.await {
        warn!(error = %e, "Panel effect worker failed");
    }
    panel.manager().reset().await;

    while let Ok(update) = updates.try_recv() {
        write_update(&mut output, &update).await?;
    }
    output.flush().await?;
    info!("Panel host stopped");
    Ok(())
}

async fn run_effects(panel: Arc<Panel>, mut queue: UnboundedReceiver<Effect>) {
    while let Some(effect) = queue.recv().await {
        panel.run(effect).await;
    }
}

fn handle_line(panel: &Panel, line: &str, effects: &UnboundedSender<Effect>) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let Some(msg) = IpcMessage::from_json(line) else {
        warn!(body_len = line.len(), "IPC message rejected: invalid JSON");
        return;
    };

    let intent = match PanelIntent::try_from(&msg) {
        Ok(intent) => intent,
        Err(e) => {
            warn!(kind = %msg.kind, error = %e, "IPC message ignored");
            return;
        }
    };

    debug!(kind = intent.kind(), "IPC intent");
    if let Some(effect) = panel.apply(intent) {
        if effects.send(effect).is_err() {
            warn!("Panel effect worker gone, dropping effect");
        }
    }
}

async fn write_update<W>(output: &mut W, update: &PanelUpdate) -> attire_common::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = update.to_json_line();
    line.push('\n');
    output.write_all(line.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
