//! Headless deterministic run.
//!
//! Drives the per-tick update directly with a fixed delta and a
//! scripted blink sequence, capturing what would have been drawn.
//! Useful for eyeballing behavior changes without a terminal preview.

use serde::Serialize;

use iris_animation::blink::ScriptedBlinkRng;
use iris_common::config::AppConfig;
use iris_runtime::sink::{CaptureSink, RenderSink};
use iris_runtime::source::{FrameSource, SyntheticCamera};
use iris_runtime::EyeRuntime;

#[derive(Debug, Serialize)]
struct SimulationSummary {
    ticks: u64,
    frames_dropped: u64,
    blinks: u64,
    ticks_closing: u64,
    final_offset_x: f64,
    final_offset_y: f64,
    max_offset_magnitude: f64,
}

pub fn run(ticks: u64, blink_script: &str, dropout_every: u64, json: bool) -> anyhow::Result<()> {
    let script: Vec<u64> = blink_script
        .split(',')
        .map(|v| v.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|e| anyhow::anyhow!("bad --blink-script: {e}"))?;

    let config = AppConfig::load();
    let (width, height) = (config.eye.screen_width, config.eye.screen_height);
    let delta_ms = 1000.0 / config.eye.tick_rate_hz.max(1) as f64;

    let mut source = SyntheticCamera::new(width, height);
    if dropout_every > 0 {
        source = source.with_dropout_every(dropout_every);
    }
    let mut sink = CaptureSink::new();
    let mut runtime = EyeRuntime::new(
        &config,
        width,
        height,
        Box::new(ScriptedBlinkRng::new(script)),
    )?;

    let mut frames_dropped = 0u64;
    let mut blinks = 0u64;
    let mut ticks_closing = 0u64;
    let mut max_offset = 0.0f64;
    let mut was_closing = false;

    for _ in 0..ticks {
        let frame = source.read_frame()?;
        if frame.is_none() {
            frames_dropped += 1;
        }

        let params = runtime.step(frame.as_ref(), delta_ms)?;
        sink.submit(&iris_animation::compositor::draw_commands(
            &params,
            runtime.geometry(),
        ));
        sink.present()?;

        if params.closing {
            ticks_closing += 1;
            if !was_closing {
                blinks += 1;
            }
        }
        was_closing = params.closing;
        max_offset = max_offset.max(runtime.pursuit_offset().length());
    }

    let offset = runtime.pursuit_offset();
    let summary = SimulationSummary {
        ticks,
        frames_dropped,
        blinks,
        ticks_closing,
        final_offset_x: offset.x,
        final_offset_y: offset.y,
        max_offset_magnitude: max_offset,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Simulated {} ticks ({} dropped frames)", summary.ticks, summary.frames_dropped);
        println!(
            "  blinks: {} ({} ticks spent closing)",
            summary.blinks, summary.ticks_closing
        );
        println!(
            "  final gaze offset: ({:.2}, {:.2}), peak magnitude {:.2}",
            summary.final_offset_x, summary.final_offset_y, summary.max_offset_magnitude
        );
        println!("  frames captured: {}", sink.frames().len());
    }

    Ok(())
}
