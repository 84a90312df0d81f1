//! Chronos Dial - a rotary-dial countdown timer
//!
//! Reads pointer events from stdin and prints one JSON frame per change on
//! stdout. Logs go to stderr.

use tokio::{io::BufReader, sync::mpsc};
use tracing::{error, info};

use chronos_dial::{
    config::Config,
    gesture::{DialBounds, GestureRecognizer},
    services::{default_tone_factory, Haptics, LazyTone, TracingHaptics},
    state::DialTimer,
    tasks::{frame_writer_task, pointer_reader_task, run_dial_timer, Scheduler},
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!("chronos_dial={}", config.log_level()))
        .init();

    info!("Starting chronos-dial v1.0.0");
    info!(
        "Configuration: size={}px, long_press={}ms, {}s per {}° notch",
        config.size, config.long_press_ms, config.seconds_per_tick, config.degrees_per_tick
    );

    let (scheduler, fired_rx) = Scheduler::new();
    let recognizer = GestureRecognizer::new(DialBounds::square(config.size), config.gesture());
    let haptics: Option<Box<dyn Haptics>> = if config.no_haptics {
        None
    } else {
        Some(Box::new(TracingHaptics))
    };
    let mut dial = DialTimer::new(
        recognizer,
        config.cadence(),
        scheduler,
        LazyTone::new(default_tone_factory),
        haptics,
    );

    // Print every frame as it changes
    let writer = tokio::spawn(frame_writer_task(dial.frame_stream(), tokio::io::stdout()));

    // Feed pointer events from stdin
    let (pointer_tx, pointer_rx) = mpsc::channel(64);
    tokio::spawn(pointer_reader_task(BufReader::new(tokio::io::stdin()), pointer_tx));

    let dial = run_dial_timer(dial, pointer_rx, fired_rx, shutdown_signal()).await;
    info!("Final state: {:?}", dial.timer_state());

    // Dropping the dial closes the frame stream and ends the writer
    drop(dial);
    if let Err(e) = writer.await {
        error!("Frame writer failed: {}", e);
    }

    info!("Shutdown complete");
    Ok(())
}
