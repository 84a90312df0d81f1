//! Reads the pointer script and forwards events to the dial loop

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
    time::sleep,
};
use tracing::{debug, error, info, warn};

use crate::input::{parse_line, InputLine, PointerEvent};

/// Forward every event in `reader` to `tx`, honoring `wait` lines. Malformed
/// lines are logged and skipped. Returns the number of events sent.
pub async fn pointer_reader_task<R>(reader: R, tx: mpsc::Sender<PointerEvent>) -> usize
where
    R: AsyncBufRead + Unpin,
{
    info!("Reading pointer events");
    let mut lines = reader.lines();
    let mut sent = 0;
    let mut line_number = 0;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read pointer input: {}", e);
                break;
            }
        };
        line_number += 1;

        match parse_line(&line) {
            Ok(Some(InputLine::Pointer(event))) => {
                if tx.send(event).await.is_err() {
                    debug!("Dial loop gone, stopping reader");
                    break;
                }
                sent += 1;
            }
            Ok(Some(InputLine::Wait(duration))) => sleep(duration).await,
            Ok(None) => {}
            Err(e) => warn!("Skipping line {}: {}", line_number, e),
        }
    }

    info!("Pointer input finished after {} events", sent);
    sent
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::gesture::Point;

    #[tokio::test(start_paused = true)]
    async fn forwards_events_and_waits() {
        let script = "down 140 80\n# hold it\nwait 900\nbogus\nup\n";
        let (tx, mut rx) = mpsc::channel(8);

        let start = Instant::now();
        let sent = pointer_reader_task(script.as_bytes(), tx).await;
        assert_eq!(sent, 2);
        assert_eq!(start.elapsed(), Duration::from_millis(900));

        assert_eq!(rx.recv().await, Some(PointerEvent::Down(Point::new(140.0, 80.0))));
        assert_eq!(rx.recv().await, Some(PointerEvent::Up));
        assert_eq!(rx.recv().await, None);
    }
}
