//! The per-tick update and the control loop around it.

use std::sync::atomic::{AtomicBool, Ordering};

use iris_animation::blink::{BlinkRng, BlinkState, BlinkTiming};
use iris_animation::compositor::{compose, draw_commands};
use iris_animation::pursuit::PursuitState;
use iris_common::clock::{FrameLimiter, TickClock};
use iris_common::config::AppConfig;
use iris_common::error::{IrisError, IrisResult};
use iris_model::{EyeGeometry, RenderParams, Vec2};
use iris_vision::{Frame, MotionExtractor};

use crate::sink::RenderSink;
use crate::source::FrameSource;

/// All state of the animated eye, advanced once per tick.
///
/// No globals: the background model lives in the extractor, blink and
/// pursuit are explicit fields, and `step` is the whole per-tick
/// update. `run` only wires a source, a sink, and the clock around it.
pub struct EyeRuntime {
    geometry: EyeGeometry,
    extractor: MotionExtractor,
    pursuit: PursuitState,
    blink: BlinkState,
    rng: Box<dyn BlinkRng>,
    pursuit_step: f64,
    tick_rate_hz: u32,
}

impl EyeRuntime {
    /// Build the runtime for a frame source of the given dimensions.
    ///
    /// Fails fast on invalid configuration, before any resource is
    /// touched.
    pub fn new(
        config: &AppConfig,
        frame_width: u32,
        frame_height: u32,
        mut rng: Box<dyn BlinkRng>,
    ) -> IrisResult<Self> {
        config.validate()?;

        let (cx, cy) = config.eye.eye_center();
        let center = Vec2::new(cx, cy);
        let geometry = EyeGeometry::new(
            center,
            config.eye.eye_radius,
            config.eye.pupil_base_radius,
        );
        let extractor = MotionExtractor::new(
            frame_width,
            frame_height,
            center,
            config.eye.motion_damping,
            &config.vision,
        );
        let blink = BlinkState::new(BlinkTiming::from(&config.eye), rng.as_mut());

        Ok(Self {
            geometry,
            extractor,
            pursuit: PursuitState::new(),
            blink,
            rng,
            pursuit_step: config.eye.pursuit_step,
            tick_rate_hz: config.eye.tick_rate_hz,
        })
    }

    pub fn geometry(&self) -> &EyeGeometry {
        &self.geometry
    }

    pub fn pursuit_offset(&self) -> Vec2 {
        self.pursuit.offset()
    }

    pub fn blink(&self) -> &BlinkState {
        &self.blink
    }

    /// One tick: advance the blink by elapsed wall time, run the
    /// motion stage if a frame arrived, and derive render parameters.
    ///
    /// With no frame the pursuit state is left untouched — blink and
    /// compositing still run, the gaze just holds.
    pub fn step(&mut self, frame: Option<&Frame>, delta_ms: f64) -> IrisResult<RenderParams> {
        self.blink.tick(delta_ms, self.rng.as_mut());

        if let Some(frame) = frame {
            let target = self.extractor.track(frame)?.unwrap_or(Vec2::ZERO);
            self.pursuit.advance(target, self.pursuit_step);
        }

        Ok(compose(&self.geometry, &self.blink, self.pursuit.offset()))
    }

    /// Run the loop until `stop` is raised.
    ///
    /// The frame read and the pacing sleep are the only blocking
    /// points. A tick with no frame skips the motion stage and keeps
    /// going; a failed source is fatal.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn RenderSink,
        stop: &AtomicBool,
    ) -> IrisResult<()> {
        let (fw, fh) = source.dimensions();
        let (ew, eh) = self.extractor_dimensions();
        if (fw, fh) != (ew, eh) {
            return Err(IrisError::camera(format!(
                "source frames are {fw}x{fh} but the runtime was built for {ew}x{eh}"
            )));
        }

        let mut clock = TickClock::start();
        let mut limiter = FrameLimiter::new(self.tick_rate_hz);
        tracing::info!(
            epoch_wall = %clock.epoch_wall(),
            tick_rate_hz = self.tick_rate_hz,
            "entering tick loop"
        );

        let mut ticks: u64 = 0;
        while !stop.load(Ordering::Relaxed) {
            let delta_ms = clock.tick_delta_ms();

            let frame = match source.read_frame() {
                Ok(frame) => frame,
                Err(e) if e.is_recoverable() => None,
                Err(e) => return Err(e),
            };
            if frame.is_none() {
                tracing::debug!("frame unavailable, skipping motion stage this tick");
            }

            let params = self.step(frame.as_ref(), delta_ms)?;
            sink.submit(&draw_commands(&params, &self.geometry));
            sink.present()?;

            ticks += 1;
            limiter.pace();
        }

        tracing::info!(ticks, "stop requested, leaving tick loop");
        Ok(())
    }

    fn extractor_dimensions(&self) -> (u32, u32) {
        (self.extractor.frame_width(), self.extractor.frame_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_animation::blink::ScriptedBlinkRng;

    fn runtime(w: u32, h: u32) -> EyeRuntime {
        let mut config = AppConfig::default();
        // Keep the blink out of the way unless a test drives it there
        config.eye.blink_interval_min_ms = 60_000;
        config.eye.blink_interval_max_ms = 60_000;
        EyeRuntime::new(
            &config,
            w,
            h,
            Box::new(ScriptedBlinkRng::new(vec![60_000, 200, 60_000])),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected_before_start() {
        let mut config = AppConfig::default();
        config.eye.pursuit_step = 2.0;
        let result = EyeRuntime::new(&config, 64, 48, Box::new(ScriptedBlinkRng::new(vec![3000])));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_frame_leaves_pursuit_but_advances_blink() {
        let mut rt = runtime(32, 32);
        // Prime the extractor with one static frame
        let frame = Frame::solid(32, 32, 50);
        rt.step(Some(&frame), 16.0).unwrap();
        let offset_before = rt.pursuit_offset();
        let timer_before = rt.blink().timer_ms();

        let params = rt.step(None, 16.0).unwrap();

        assert_eq!(rt.pursuit_offset(), offset_before);
        assert!(rt.blink().timer_ms() > timer_before);
        assert!(!params.closing);
        assert_eq!(params.eye_radius, rt.geometry().eye_radius);
    }

    #[test]
    fn test_static_scene_recenters_gaze() {
        let mut rt = runtime(32, 32);
        let frame = Frame::solid(32, 32, 50);
        for _ in 0..40 {
            rt.step(Some(&frame), 16.0).unwrap();
        }
        // No motion ever seen: target is always zero, offset stays home
        assert!(rt.pursuit_offset().length() < 1e-9);
    }

    #[test]
    fn test_mismatched_source_dimensions_fail_at_run() {
        let mut rt = runtime(32, 32);
        let mut source = crate::source::SyntheticCamera::new(64, 48);
        let mut sink = crate::sink::CaptureSink::new();
        let stop = AtomicBool::new(false);
        let err = rt.run(&mut source, &mut sink, &stop).unwrap_err();
        assert!(matches!(err, IrisError::Camera { .. }));
    }

    #[test]
    fn test_raised_stop_flag_exits_immediately() {
        let mut rt = runtime(64, 48);
        let mut source = crate::source::SyntheticCamera::new(64, 48);
        let mut sink = crate::sink::CaptureSink::new();
        let stop = AtomicBool::new(true);
        rt.run(&mut source, &mut sink, &stop).unwrap();
        assert!(sink.frames().is_empty());
    }
}
