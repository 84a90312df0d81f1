//! The single loop that owns the dial timer

use std::future::Future;

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::scheduler::TimerFired;
use crate::{input::PointerEvent, state::DialTimer};

/// Apply pointer events and timer firings to `dial` one at a time until
/// `shutdown` resolves. Once pointer input closes the loop keeps serving
/// cadences and returns as soon as the dial has nothing left pending.
pub async fn run_dial_timer<S>(
    mut dial: DialTimer,
    mut pointer_rx: mpsc::Receiver<PointerEvent>,
    mut fired_rx: mpsc::UnboundedReceiver<TimerFired>,
    shutdown: S,
) -> DialTimer
where
    S: Future<Output = ()>,
{
    info!("Starting dial timer loop");
    tokio::pin!(shutdown);
    let mut pointer_open = true;

    loop {
        if !pointer_open && dial.is_idle() {
            info!("Input closed and nothing pending, stopping");
            break;
        }

        tokio::select! {
            event = pointer_rx.recv(), if pointer_open => match event {
                Some(event) => {
                    debug!("Pointer event: {:?}", event);
                    dial.handle_pointer(event);
                }
                None => {
                    info!("Pointer input closed");
                    pointer_open = false;
                    // A contact cannot end without input
                    dial.handle_pointer(PointerEvent::Cancel);
                }
            },
            Some(fired) = fired_rx.recv() => {
                dial.handle_timer(fired);
            }
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    dial
}
