use crate::state::{display_name, preview_text, AppState};
use egui::{Color32, Context, RichText};

/// What the user asked for in the sidebar this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    Refresh,
    Select(String),
}

pub struct Sidebar;

impl Sidebar {
    pub fn ui(ctx: &Context, state: &mut AppState) -> Option<SidebarAction> {
        let mut action = None;

        egui::SidePanel::left("conversations")
            .resizable(true)
            .default_width(300.0)
            .min_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.heading("Conversaciones");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let refresh = ui.add_enabled(
                            !state.conversations.is_loading(),
                            egui::Button::new("Refrescar"),
                        );
                        if refresh.clicked() {
                            action = Some(SidebarAction::Refresh);
                        }
                    });
                });
                ui.add_space(6.0);

                ui.add(
                    egui::TextEdit::singleline(&mut state.search)
                        .hint_text("Buscar...")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(6.0);
                ui.separator();

                if state.conversations.is_loading() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Cargando...");
                    });
                    return;
                }

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for summary in state.conversations.filtered(&state.search) {
                            let selected = state.is_selected(&summary.session_id);
                            if Self::row(ui, display_name(summary), preview_text(summary), selected) {
                                action = Some(SidebarAction::Select(summary.session_id.clone()));
                            }
                        }
                    });
            });

        action
    }

    fn row(ui: &mut egui::Ui, name: &str, preview: &str, selected: bool) -> bool {
        let fill = if selected {
            ui.style().visuals.selection.bg_fill
        } else {
            Color32::TRANSPARENT
        };

        let response = egui::Frame::NONE
            .fill(fill)
            .corner_radius(4.0)
            .inner_margin(egui::Margin::symmetric(8, 6))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(name).strong());
                ui.add(
                    egui::Label::new(
                        RichText::new(preview)
                            .size(12.0)
                            .color(ui.style().visuals.weak_text_color()),
                    )
                    .truncate(),
                );
            })
            .response
            .interact(egui::Sense::click());

        response
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .clicked()
    }
}
