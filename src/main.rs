//! handsign — classify hand gestures from an estimator's landmark stream.
//!
//! Reads one JSON frame record per line on stdin, as emitted by the
//! external hand-pose estimator process, and writes one JSON line of
//! hand reports per frame to stdout. Video capture and overlay
//! rendering live with the estimator, not here.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{info, warn};

use handsign::{classify_frame, DetectorParams, FrameRecord};

#[derive(Parser, Debug)]
#[command(name = "handsign", about = "Hand gesture classifier (open / fist / other)")]
struct Cli {
    /// Maximum number of hands to classify per frame
    #[arg(long, default_value_t = 1)]
    max_hands: usize,

    /// Detector minimum detection confidence, forwarded to the estimator
    #[arg(long, default_value_t = 0.5)]
    min_detection_confidence: f32,

    /// Detector minimum tracking confidence, forwarded to the estimator
    #[arg(long, default_value_t = 0.5)]
    min_tracking_confidence: f32,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("handsign {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing; stdout carries the report stream
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handsign=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let params = DetectorParams {
        max_hands: cli.max_hands,
        min_detection_confidence: cli.min_detection_confidence,
        min_tracking_confidence: cli.min_tracking_confidence,
    };

    info!("handsign v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "max_hands: {}, detection confidence: {}, tracking confidence: {}",
        params.max_hands, params.min_detection_confidence, params.min_tracking_confidence,
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: FrameRecord = match serde_json::from_str(&line) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("line {}: malformed frame record: {}", line_no + 1, e);
                continue;
            }
        };
        let reports = classify_frame(&frame, &params);
        serde_json::to_writer(&mut out, &reports)?;
        out.write_all(b"\n")?;
    }

    Ok(())
}
