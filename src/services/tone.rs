//! Alarm chime output
//!
//! The controller only ever calls [`LazyTone::play`]. The underlying
//! [`ToneGenerator`] is opened on the first user interaction and kept for
//! the lifetime of the widget.

use std::{io::Write, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Sample rate of the synthesized chime
pub const CHIME_SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Error)]
pub enum ToneError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("chime playback failed: {0}")]
    Playback(String),
}

/// Something that can sound the alarm chime
pub trait ToneGenerator {
    fn play_alarm_chime(&mut self) -> Result<(), ToneError>;
}

/// One decaying note of the chime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimeNote {
    pub offset: Duration,
    pub frequency: f32,
    pub length: Duration,
}

/// Two identical notes then a fifth above
pub const ALARM_CHIME: [ChimeNote; 3] = [
    ChimeNote {
        offset: Duration::from_millis(0),
        frequency: 880.0,
        length: Duration::from_millis(300),
    },
    ChimeNote {
        offset: Duration::from_millis(200),
        frequency: 880.0,
        length: Duration::from_millis(300),
    },
    ChimeNote {
        offset: Duration::from_millis(400),
        frequency: 1320.0,
        length: Duration::from_millis(300),
    },
];

const NOTE_GAIN_START: f32 = 0.2;
const NOTE_GAIN_END: f32 = 0.01;
const GLIDE_TIME: f32 = 0.2;

/// Render the chime as mono samples in [-1, 1]. Each note is a triangle wave
/// whose pitch glides down an octave over 200 ms while its gain decays
/// exponentially; overlapping notes are summed.
pub fn render_chime(sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f32;
    let end = ALARM_CHIME
        .iter()
        .map(|note| note.offset + note.length)
        .max()
        .unwrap_or_default();
    let mut samples = vec![0.0f32; sample_count(end, sample_rate)];

    for note in &ALARM_CHIME {
        let start = sample_count(note.offset, sample_rate);
        let count = sample_count(note.length, sample_rate);
        let length = note.length.as_secs_f32();
        let mut phase = 0.0f32;

        for i in 0..count {
            let t = i as f32 / rate;
            let frequency = note.frequency * 0.5f32.powf((t / GLIDE_TIME).min(1.0));
            let gain = NOTE_GAIN_START * (NOTE_GAIN_END / NOTE_GAIN_START).powf(t / length);
            let triangle = 4.0 * (phase - 0.5).abs() - 1.0;

            if let Some(sample) = samples.get_mut(start + i) {
                *sample = (*sample + gain * triangle).clamp(-1.0, 1.0);
            }
            phase = (phase + frequency / rate).fract();
        }
    }

    samples
}

fn sample_count(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_micros() * u128::from(sample_rate) / 1_000_000) as usize
}

/// Fallback chime: rings the terminal bell once per note
#[derive(Debug, Default)]
pub struct TerminalBell;

impl ToneGenerator for TerminalBell {
    fn play_alarm_chime(&mut self) -> Result<(), ToneError> {
        let mut stderr = std::io::stderr();
        let bells = "\x07".repeat(ALARM_CHIME.len());
        stderr
            .write_all(bells.as_bytes())
            .and_then(|_| stderr.flush())
            .map_err(|e| ToneError::Playback(e.to_string()))?;
        debug!("Terminal bell rung");
        Ok(())
    }
}

/// Plays the synthesized chime on the default audio device
#[cfg(feature = "audio")]
pub struct RodioChime {
    // Dropping the stream silences all output
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
    samples: Vec<f32>,
}

#[cfg(feature = "audio")]
impl RodioChime {
    pub fn open() -> Result<Self, ToneError> {
        let (stream, handle) =
            rodio::OutputStream::try_default().map_err(|e| ToneError::Unavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            samples: render_chime(CHIME_SAMPLE_RATE),
        })
    }
}

#[cfg(feature = "audio")]
impl ToneGenerator for RodioChime {
    fn play_alarm_chime(&mut self) -> Result<(), ToneError> {
        let source = rodio::buffer::SamplesBuffer::new(1, CHIME_SAMPLE_RATE, self.samples.clone());
        self.handle
            .play_raw(source)
            .map_err(|e| ToneError::Playback(e.to_string()))
    }
}

/// Opens the best available generator for this build
pub fn default_tone_factory() -> Result<Box<dyn ToneGenerator>, ToneError> {
    #[cfg(feature = "audio")]
    {
        match RodioChime::open() {
            Ok(chime) => return Ok(Box::new(chime)),
            Err(e) => warn!("Falling back to terminal bell: {}", e),
        }
    }
    Ok(Box::new(TerminalBell))
}

type ToneFactory = Box<dyn FnMut() -> Result<Box<dyn ToneGenerator>, ToneError>>;

/// Tone generator handle opened on first interaction and reused afterwards
pub struct LazyTone {
    factory: ToneFactory,
    generator: Option<Box<dyn ToneGenerator>>,
}

impl LazyTone {
    pub fn new<F>(factory: F) -> Self
    where
        F: FnMut() -> Result<Box<dyn ToneGenerator>, ToneError> + 'static,
    {
        Self {
            factory: Box::new(factory),
            generator: None,
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.generator.is_some()
    }

    /// Open the generator if that has not succeeded yet
    pub fn acquire(&mut self) {
        if self.generator.is_some() {
            return;
        }

        match (self.factory)() {
            Ok(generator) => {
                info!("Tone generator acquired");
                self.generator = Some(generator);
            }
            Err(e) => warn!("Tone generator not acquired: {}", e),
        }
    }

    /// Sound the chime, skipping silently when no generator is available
    pub fn play(&mut self) {
        let Some(generator) = self.generator.as_mut() else {
            debug!("Skipping alarm chime, no tone generator yet");
            return;
        };

        if let Err(e) = generator.play_alarm_chime() {
            warn!("Skipping alarm chime: {}", e);
        }
    }
}

impl std::fmt::Debug for LazyTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyTone")
            .field("acquired", &self.is_acquired())
            .finish()
    }
}
