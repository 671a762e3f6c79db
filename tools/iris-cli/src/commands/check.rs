//! Validate and print the effective configuration.

use iris_common::config::AppConfig;

pub fn run() -> anyhow::Result<()> {
    println!("Iris Configuration Check");
    println!("{}", "=".repeat(50));

    let config = AppConfig::load();
    match config.validate() {
        Ok(()) => println!("[OK] Configuration is valid"),
        Err(e) => {
            println!("[FAIL] {e}");
            anyhow::bail!("configuration is invalid");
        }
    }

    let eye = &config.eye;
    let (cx, cy) = eye.eye_center();
    println!(
        "[OK] Surface: {}x{} @ {}Hz",
        eye.screen_width, eye.screen_height, eye.tick_rate_hz
    );
    println!("     Eye center ({cx}, {cy}), radius {}", eye.eye_radius);
    println!("     Pupil radius {}", eye.pupil_base_radius);
    println!(
        "     Blink every {}-{}ms for {}-{}ms",
        eye.blink_interval_min_ms,
        eye.blink_interval_max_ms,
        eye.blink_duration_min_ms,
        eye.blink_duration_max_ms
    );
    println!(
        "     Pursuit step {}, motion damping {}",
        eye.pursuit_step, eye.motion_damping
    );

    let vision = &config.vision;
    println!(
        "[OK] Vision: learning rate {}, {}σ foreground, {}x{} median, threshold {}, min area {}",
        vision.learning_rate,
        vision.foreground_sigma,
        vision.median_window,
        vision.median_window,
        vision.mask_threshold,
        vision.min_blob_area
    );

    Ok(())
}
