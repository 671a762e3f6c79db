//! Live terminal preview fed by the synthetic camera.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use iris_animation::blink::ThreadBlinkRng;
use iris_common::config::AppConfig;
use iris_common::error::IrisError;
use iris_runtime::{AnsiTermSink, EyeRuntime, SyntheticCamera};

pub fn run(cols: u32, ticks: Option<u64>, dropout_every: u64, camera: bool) -> anyhow::Result<()> {
    if camera {
        // Fatal before the loop: no camera backend ships with the CLI
        return Err(IrisError::camera(
            "no camera device backend is available; run with the synthetic camera",
        )
        .into());
    }

    let config = AppConfig::load();
    let (width, height) = (config.eye.screen_width, config.eye.screen_height);

    let mut source = SyntheticCamera::new(width, height);
    if dropout_every > 0 {
        source = source.with_dropout_every(dropout_every);
    }
    let mut sink = AnsiTermSink::new(width, height, cols);
    let mut runtime = EyeRuntime::new(&config, width, height, Box::new(ThreadBlinkRng))?;

    let stop = Arc::new(AtomicBool::new(false));
    if let Some(ticks) = ticks {
        let stop = stop.clone();
        let budget =
            Duration::from_secs_f64(ticks as f64 / config.eye.tick_rate_hz.max(1) as f64);
        std::thread::spawn(move || {
            std::thread::sleep(budget);
            stop.store(true, Ordering::Relaxed);
        });
    }

    tracing::info!(width, height, cols, "starting live preview");
    print!("\x1b[2J"); // clear once; the sink repaints in place
    runtime.run(&mut source, &mut sink, &stop)?;
    Ok(())
}
