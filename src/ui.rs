use crate::simulation::MAX_SIM_DELAY;

/// Read-only figures shown in the settings panel
pub struct PanelStats {
    pub generation: u64,
    pub live_cells: usize,
    pub rows: usize,
    pub columns: usize,
    pub running: bool,
}

/// Buttons pressed during one panel frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelRequests {
    pub toggle_running: bool,
    pub step_once: bool,
    pub clear: bool,
}

pub fn settings_panel(
    ctx: &egui::Context,
    menu_open: &mut bool,
    stats: &PanelStats,
    sim_delay: &mut u32,
) -> PanelRequests {
    let mut requests = PanelRequests::default();

    // Menu button, anchored top-left
    egui::Area::new(egui::Id::new("menu_button_area"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
        .show(ctx, |ui| {
            if ui.button("☰").clicked() {
                *menu_open = !*menu_open;
            }
        });

    if !*menu_open {
        return requests;
    }

    let panel_frame = egui::Frame {
        fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 200),
        ..egui::Frame::side_top_panel(&ctx.style())
    };

    egui::SidePanel::left("side_panel")
        .frame(panel_frame)
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Simulation");
            ui.separator();
            ui.label(format!("Generation: {}", stats.generation));
            ui.label(format!("Live Cells: {}", stats.live_cells));
            ui.label(format!("Board: {}x{}", stats.rows, stats.columns));
            ui.separator();

            ui.horizontal(|ui| {
                let label = if stats.running { "Pause" } else { "Run" };
                if ui.button(label).clicked() {
                    requests.toggle_running = true;
                }
                if ui.add_enabled(!stats.running, egui::Button::new("Step")).clicked() {
                    requests.step_once = true;
                }
                if ui.button("Clear").clicked() {
                    requests.clear = true;
                }
            });
            ui.separator();

            ui.add(egui::Slider::new(sim_delay, 0..=MAX_SIM_DELAY).text("Delay (ms)"));
            ui.separator();

            ui.label("Space: run/pause   Esc: quit");
            ui.label("1-4: stamp pattern   C: clear");
            ui.label("F11: fullscreen   Tab: this panel");
        });

    requests
}
