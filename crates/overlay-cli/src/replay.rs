//! Replay producer and renderer

use crate::config::OverlayConfig;
use crate::events::{ControlAction, ReplayEvent};
use detection_model::{DisplayMode, Viewport};
use frame_slot::{SlotReader, SlotWriter};
use overlay::{OverlayError, OverlayPipeline, RenderFrame};
use serde::Serialize;
use session::{
    Delegate, DetectionSession, DetectorSettings, FrameRoute, SessionUpdate, TextReadout,
    VoiceCommand,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// What the renderer shows for one processed frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    /// Published frame counter, starting at 1
    pub sequence: u64,
    /// Overlay geometry and text inputs
    pub frame: RenderFrame,
    /// OCR readout while OCR is active
    pub ocr_text: Option<String>,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// A new overlay was published
    Published,
    /// Detection is off, frame ignored
    Dropped,
    /// Frame could not be mapped; previous overlay stays up
    Skipped(OverlayError),
    /// Overlay was cleared
    Cleared,
    /// Session or settings changed
    Updated,
    /// Nothing matched (e.g. unrecognized speech)
    Ignored,
}

/// Replay counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub events: usize,
    pub frames_published: usize,
    pub frames_dropped: usize,
    pub frames_skipped: usize,
    pub malformed_lines: usize,
    pub rendered: usize,
}

/// Producer side: session state plus the overlay pipeline
pub struct Replayer {
    pipeline: OverlayPipeline,
    session: DetectionSession,
    settings: DetectorSettings,
    readout: TextReadout,
    viewport: Viewport,
    display_mode: DisplayMode,
    slot: SlotWriter<OverlaySnapshot>,
    sequence: u64,
    stats: ReplayStats,
}

impl Replayer {
    /// Create a replayer publishing into `slot`
    pub fn new(config: &OverlayConfig, slot: SlotWriter<OverlaySnapshot>) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: OverlayPipeline::new(config.camera.clone())?,
            session: DetectionSession::new(),
            settings: config.detector.clone(),
            readout: TextReadout::new(),
            viewport: config.viewport,
            display_mode: config.display_mode,
            slot,
            sequence: 0,
            stats: ReplayStats::default(),
        })
    }

    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Count a line that failed to parse
    pub fn record_malformed(&mut self) {
        self.stats.malformed_lines += 1;
    }

    /// Apply one event
    pub fn handle(&mut self, event: ReplayEvent) -> EventOutcome {
        self.stats.events += 1;
        match event {
            ReplayEvent::Frame(batch) => self.handle_frame(batch),
            ReplayEvent::Voice { transcripts } => match VoiceCommand::from_transcripts(&transcripts) {
                Some(command) => {
                    info!("Voice command: {:?}", command);
                    let update = self.session.apply(command);
                    self.apply_update(update)
                }
                None => {
                    debug!("No command in transcripts {:?}", transcripts);
                    EventOutcome::Ignored
                }
            },
            ReplayEvent::DetectorError { gpu, message } => {
                warn!("Detector error (gpu: {}): {}", gpu, message);
                if self.settings.on_detector_error(gpu) {
                    EventOutcome::Updated
                } else {
                    EventOutcome::Ignored
                }
            }
            ReplayEvent::Control { action } => self.handle_control(action),
        }
    }

    fn handle_frame(&mut self, mut batch: detection_model::DetectionBatch) -> EventOutcome {
        let route = self.session.route_frame();
        if route == FrameRoute::Drop {
            self.stats.frames_dropped += 1;
            return EventOutcome::Dropped;
        }

        batch.detections = self.settings.filter(std::mem::take(&mut batch.detections));

        let ocr_text = if route == FrameRoute::ObjectsAndText {
            self.readout.update(&batch.text_blocks);
            Some(self.readout.text().to_string())
        } else {
            None
        };

        match self
            .pipeline
            .process_batch(&batch, self.viewport, self.display_mode)
        {
            Ok(frame) => {
                self.sequence += 1;
                self.slot.publish(OverlaySnapshot {
                    sequence: self.sequence,
                    frame,
                    ocr_text,
                });
                self.stats.frames_published += 1;
                EventOutcome::Published
            }
            Err(e) => {
                warn!("Skipping frame, keeping previous overlay: {}", e);
                self.stats.frames_skipped += 1;
                EventOutcome::Skipped(e)
            }
        }
    }

    fn handle_control(&mut self, action: ControlAction) -> EventOutcome {
        let changed = match action {
            ControlAction::ThresholdUp => self.settings.threshold_up(),
            ControlAction::ThresholdDown => self.settings.threshold_down(),
            ControlAction::MaxResultsUp => self.settings.max_results_up(),
            ControlAction::MaxResultsDown => self.settings.max_results_down(),
            ControlAction::UseCpu => {
                self.settings.set_delegate(Delegate::Cpu);
                true
            }
            ControlAction::UseGpu => {
                self.settings.set_delegate(Delegate::Gpu);
                true
            }
        };

        if changed {
            info!(
                "Detector settings: threshold {}, max results {}, delegate {:?}",
                self.settings.threshold_text(),
                self.settings.max_results,
                self.settings.delegate
            );
            EventOutcome::Updated
        } else {
            EventOutcome::Ignored
        }
    }

    fn apply_update(&mut self, update: SessionUpdate) -> EventOutcome {
        if let Some(status) = update.status {
            info!("{}", status);
        }
        if update.clear_overlay {
            self.slot.clear();
            self.readout.clear();
            EventOutcome::Cleared
        } else {
            EventOutcome::Updated
        }
    }

    /// Stop producing; the renderer drains the last frame and exits
    pub fn finish(self) -> ReplayStats {
        debug!("Producer done, {} frames in slot history", self.slot.total_published());
        self.stats
    }
}

/// Renderer output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn write_snapshot<W: Write>(out: &mut W, snapshot: &OverlaySnapshot) -> std::io::Result<()> {
    match snapshot.frame.inference_time_text() {
        Some(time) => writeln!(out, "frame {} ({})", snapshot.sequence, time)?,
        None => writeln!(out, "frame {}", snapshot.sequence)?,
    }
    for instruction in &snapshot.frame.instructions {
        writeln!(out, "  {}", instruction.text_lines().join(" | "))?;
    }
    if let Some(text) = &snapshot.ocr_text {
        writeln!(out, "  OCR: {}", text)?;
    }
    Ok(())
}

/// Render every overlay change until the writer goes away
pub async fn render_loop<W: AsyncWrite + Unpin>(
    mut reader: SlotReader<OverlaySnapshot>,
    mut out: W,
    format: OutputFormat,
) -> anyhow::Result<(usize, W)> {
    let mut rendered = 0;
    let mut buf = Vec::new();
    while let Ok(latest) = reader.changed().await {
        buf.clear();
        match (latest, format) {
            (Some(snapshot), OutputFormat::Text) => write_snapshot(&mut buf, &snapshot)?,
            (Some(snapshot), OutputFormat::Json) => {
                serde_json::to_writer(&mut buf, snapshot.as_ref())?;
                buf.push(b'\n');
            }
            (None, OutputFormat::Text) => buf.extend_from_slice(b"overlay cleared\n"),
            (None, OutputFormat::Json) => buf.extend_from_slice(b"null\n"),
        }
        out.write_all(&buf).await?;
        out.flush().await?;
        rendered += 1;
    }
    debug!(
        "Renderer done after {} updates for {} published frames",
        rendered,
        reader.total_published()
    );
    Ok((rendered, out))
}

/// Replay a JSON Lines event stream and render into `output`.
///
/// Frames are paced by `frame_interval_ms`. Without pacing the renderer may
/// coalesce frames and only show the newest one, like a real display.
pub async fn run_replay<R, W>(
    config: &OverlayConfig,
    mut input: R,
    output: W,
    format: OutputFormat,
) -> anyhow::Result<(ReplayStats, W)>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (writer, reader) = frame_slot::channel();
    let renderer = tokio::spawn(render_loop(reader, output, format));

    let mut replayer = Replayer::new(config, writer)?;
    let mut pacing = match config.frame_interval_ms {
        0 => None,
        ms => Some(tokio::time::interval(Duration::from_millis(ms))),
    };

    let mut raw = Vec::new();
    let mut line_no = 0;
    loop {
        raw.clear();
        if input.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&raw) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!("Line {}: not UTF-8: {}", line_no, e);
                replayer.record_malformed();
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let event = match ReplayEvent::parse(line) {
            Ok(event) => event,
            Err(e) => {
                warn!("Line {}: malformed event: {}", line_no, e);
                replayer.record_malformed();
                continue;
            }
        };

        if event.is_frame() {
            if let Some(interval) = pacing.as_mut() {
                interval.tick().await;
            }
        }
        replayer.handle(event);
    }

    let mut stats = replayer.finish();
    let (rendered, output) = renderer.await??;
    stats.rendered = rendered;

    info!(
        "Replay finished: {} events, {} frames published, {} dropped, {} skipped, {} malformed",
        stats.events,
        stats.frames_published,
        stats.frames_dropped,
        stats.frames_skipped,
        stats.malformed_lines
    );
    Ok((stats, output))
}
