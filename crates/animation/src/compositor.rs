//! Frame compositor: blink scales + pursuit offset → draw commands.
//!
//! Each tick reduces to a `RenderParams` value and a short command
//! list. While closing, the eye is drawn as a collapsed horizontal
//! band (2× wide, 1× tall at the current eye scale) instead of the
//! disc-in-disc eye — a deliberate approximation of a shut lid.

use iris_model::{Color, DrawCommand, EyeGeometry, RenderParams, Vec2};

use crate::blink::BlinkState;

/// Derive this tick's render parameters.
///
/// Outside of `Closing` the eye disc is always at full radius — even
/// on the first open tick after a blink: the eye snaps back open with
/// no reopen ramp. The pupil radius is scale-floored so it can never
/// go negative.
pub fn compose(geometry: &EyeGeometry, blink: &BlinkState, pupil_offset: Vec2) -> RenderParams {
    let closing = blink.is_closing();
    let eye_radius = if closing {
        (geometry.eye_radius * blink.eye_scale()).max(0.0)
    } else {
        geometry.eye_radius
    };
    let pupil_radius = (geometry.pupil_base_radius * blink.pupil_scale()).max(0.0);

    RenderParams {
        eye_radius,
        pupil_radius,
        pupil_offset,
        closing,
    }
}

/// Expand render parameters into the command list for the sink.
pub fn draw_commands(params: &RenderParams, geometry: &EyeGeometry) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear(Color::BLACK)];

    if params.closing {
        let r = params.eye_radius;
        commands.push(DrawCommand::Rect {
            x: geometry.center.x - r,
            y: geometry.center.y - r / 2.0,
            w: r * 2.0,
            h: r,
            color: Color::BLACK,
        });
    } else {
        commands.push(DrawCommand::Disc {
            center: geometry.center,
            radius: params.eye_radius,
            color: Color::WHITE,
        });
        commands.push(DrawCommand::Disc {
            center: geometry.center + params.pupil_offset,
            radius: params.pupil_radius,
            color: Color::BLACK,
        });
    }

    commands
}
