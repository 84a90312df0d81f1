//! Prints rendered frames as JSON lines

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};
use tracing::{debug, error};

use crate::display::DisplayFrame;

/// Write every frame to `out` until the dial is dropped, then hand `out`
/// back
pub async fn frame_writer_task<W>(
    mut frames: mpsc::UnboundedReceiver<DisplayFrame>,
    mut out: W,
) -> W
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = frames.recv().await {
        let mut line = match serde_json::to_string(&frame) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize frame: {}", e);
                continue;
            }
        };
        line.push('\n');

        if let Err(e) = out.write_all(line.as_bytes()).await {
            error!("Failed to write frame: {}", e);
            break;
        }
        if let Err(e) = out.flush().await {
            error!("Failed to flush frame: {}", e);
            break;
        }
    }

    debug!("Frame stream closed");
    out
}
