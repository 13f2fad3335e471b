use crate::state::TranscriptEntry;
use egui::{Color32, RichText, Ui};

/// Common styling for chat bubbles
pub struct MessageBubble;

impl MessageBubble {
    fn frame(bg_color: Color32) -> egui::Frame {
        egui::Frame::NONE
            .fill(bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(12))
    }

    /// Human messages on the right, everything else on the left.
    pub fn render(ui: &mut Ui, entry: &TranscriptEntry) {
        let (layout, bg_color) = if entry.is_human() {
            (
                egui::Layout::right_to_left(egui::Align::Min),
                ui.style().visuals.selection.bg_fill,
            )
        } else {
            (
                egui::Layout::left_to_right(egui::Align::Min),
                ui.style().visuals.widgets.noninteractive.bg_fill,
            )
        };
        let max_width = ui.available_width() * 0.75;

        ui.with_layout(layout, |ui| {
            Self::frame(bg_color).show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    ui.add(egui::Label::new(RichText::new(&entry.message.content).size(15.0)).wrap());
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(entry.meta_line())
                            .size(10.0)
                            .color(ui.style().visuals.weak_text_color()),
                    );
                });
            });
        });
    }
}
