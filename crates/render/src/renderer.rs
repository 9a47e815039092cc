use crate::frame::FramePlan;
use std::fmt::Write;

/// Renderer-agnostic interface. Every backend executes frame plans.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Execute one frame: clear, issue the plan's draws in order, unbind.
    fn render(&mut self, plan: &FramePlan) -> Self::Output;
}

/// Renders a frame plan as readable text, one step per line.
///
/// Used for debug logging of the frame sequence and for testing consumers of
/// the [`Renderer`] interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, plan: &FramePlan) -> String {
        self.frames += 1;

        let [r, g, b, a] = plan.clear_color;
        let mut out = String::new();
        let _ = writeln!(out, "=== frame {} ===", self.frames);
        let _ = writeln!(out, "clear ({r:.2}, {g:.2}, {b:.2}, {a:.2})");
        for draw in &plan.draws {
            let t = draw.uniforms.model.w_axis;
            let _ = writeln!(
                out,
                "draw {} with {} model.t=({:.2}, {:.2}, {:.2})",
                draw.drawable.label(),
                draw.program.label(),
                t.x,
                t.y,
                t.z
            );
        }
        out.push_str("unbind\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn lists_steps_in_order() {
        let plan = FramePlan::build(Mat4::IDENTITY, Mat4::IDENTITY);
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&plan);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "=== frame 1 ===");
        assert_eq!(lines[1], "clear (0.50, 0.50, 0.50, 1.00)");
        assert!(lines[2].starts_with("draw x_axis_line with x_axis"));
        assert!(lines[3].starts_with("draw y_axis_line with y_axis"));
        assert!(lines[4].starts_with("draw z_axis_line with z_axis"));
        assert_eq!(lines[5], "draw cube with object model.t=(1.00, 0.00, 1.00)");
        assert_eq!(lines[6], "unbind");
    }

    #[test]
    fn counts_frames() {
        let plan = FramePlan::build(Mat4::IDENTITY, Mat4::IDENTITY);
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&plan);
        let second = renderer.render(&plan);
        assert_eq!(renderer.frames(), 2);
        assert!(second.starts_with("=== frame 2 ==="));
    }
}
