use imgui::Ui;

use crate::{
    animation::Direction,
    gfx::scene::SceneStatistics,
    input::{ArrowKeys, PanKey},
    performance::PerformanceMetrics,
};

/// Snapshot of everything the HUD shows, gathered once per frame.
#[derive(Debug, Clone, Default)]
pub struct HudState {
    pub metrics: PerformanceMetrics,
    pub frame_history: Vec<f32>,
    pub camera_eye: [f32; 3],
    pub camera_target: [f32; 3],
    pub camera_distance: f32,
    pub keys: ArrowKeys,
    /// Position and heading of the bouncing ball
    pub ball: Option<(f32, Direction)>,
    pub stats: SceneStatistics,
    pub pending_assets: usize,
    pub has_skybox: bool,
}

impl HudState {
    /// Labels of the held arrow keys, or "none".
    pub fn held_keys(&self) -> String {
        let held: Vec<&str> = PanKey::ALL
            .iter()
            .filter(|key| self.keys.is_pressed(**key))
            .map(|key| key.label())
            .collect();
        if held.is_empty() {
            "none".to_string()
        } else {
            held.join(" + ")
        }
    }
}

pub fn hud_panel(ui: &Ui, state: &HudState) {
    ui.window("Neighborhood")
        .size([300.0, 360.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .bg_alpha(0.6)
        .build(|| {
            let metrics = &state.metrics;
            ui.text(format!("FPS: {:.1}", metrics.fps));
            ui.same_line();
            ui.text(format!("Frame Time: {:.2}ms", metrics.frame_time_ms));
            ui.text(format!(
                "  Min {:.2}ms  Max {:.2}ms",
                metrics.min_frame_time_ms, metrics.max_frame_time_ms
            ));
            if !state.frame_history.is_empty() {
                ui.plot_lines("##frame_times", &state.frame_history)
                    .graph_size([270.0, 50.0])
                    .scale_min(0.0)
                    .scale_max(50.0)
                    .build();
            }

            if ui.collapsing_header("Camera", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                let [ex, ey, ez] = state.camera_eye;
                let [tx, ty, tz] = state.camera_target;
                ui.text(format!("Eye:    ({:.1}, {:.1}, {:.1})", ex, ey, ez));
                ui.text(format!("Target: ({:.1}, {:.1}, {:.1})", tx, ty, tz));
                ui.text(format!("Distance: {:.1}", state.camera_distance));
                ui.text(format!("Arrows: {}", state.held_keys()));
            }

            if let Some((x, direction)) = state.ball {
                let heading = match direction {
                    Direction::Advancing => "+x",
                    Direction::Retreating => "-x",
                };
                ui.text(format!("Ball: x = {:.1} heading {}", x, heading));
            }

            if ui.collapsing_header("Scene", imgui::TreeNodeFlags::empty()) {
                let stats = &state.stats;
                ui.text(format!("Objects: {}", stats.object_count));
                ui.text(format!("Templates: {}", stats.template_count));
                ui.text(format!("Materials: {}", stats.material_count));
                ui.text(format!("Textures: {}", stats.texture_count));
                ui.text(format!("Triangles: {}", stats.total_triangles));
                ui.text(format!("Vertices: {}", stats.total_vertices));
            }

            ui.separator();
            if state.pending_assets > 0 {
                ui.text_colored(
                    [1.0, 1.0, 0.0, 1.0],
                    format!("Loading {} asset(s)...", state.pending_assets),
                );
            }
            if !state.has_skybox {
                ui.text_disabled("No skybox");
            }
            ui.text_disabled("F1 hides this panel");
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::{event::ElementState, keyboard::KeyCode};

    #[test]
    fn test_held_keys_summary() {
        let mut state = HudState::default();
        assert_eq!(state.held_keys(), "none");

        state.keys.handle_key(KeyCode::ArrowLeft, ElementState::Pressed);
        state.keys.handle_key(KeyCode::ArrowUp, ElementState::Pressed);
        assert_eq!(
            state.held_keys(),
            format!("{} + {}", PanKey::Left.label(), PanKey::Up.label())
        );
    }
}
