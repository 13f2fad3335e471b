use crate::api_client::ApiClient;
use crate::components::{MessageBubble, Sidebar, SidebarAction};
use crate::config::ViewerConfig;
use crate::services::{ApiService, BackgroundTasks};
use crate::state::{AppState, TranscriptView};
use egui::RichText;

pub struct ViewerApp {
    state: AppState,
    api_service: ApiService,
}

impl ViewerApp {
    /// Must be called inside a tokio runtime context.
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        tracing::info!(api_base = %config.api_base, "Starting chatlog viewer");

        let api_service = ApiService::new(
            ApiClient::new(config.api_base),
            tokio::runtime::Handle::current(),
        );
        let mut state = AppState::default();

        // Initial load on mount
        api_service.refresh_conversations(&mut state, &cc.egui_ctx);

        Self { state, api_service }
    }

    fn handle_sidebar_action(&mut self, ctx: &egui::Context, action: SidebarAction) {
        match action {
            SidebarAction::Refresh => {
                self.api_service.refresh_conversations(&mut self.state, ctx);
            }
            SidebarAction::Select(session_id) => {
                self.api_service
                    .load_messages(&session_id, &mut self.state, ctx);
                self.state.select_session(session_id);
            }
        }
    }

    fn refresh_messages(&mut self, ctx: &egui::Context) {
        if let Some(session_id) = self.state.selected_session.clone() {
            self.api_service
                .load_messages(&session_id, &mut self.state, ctx);
        }
    }

    fn transcript_header(&mut self, ui: &mut egui::Ui) -> bool {
        let mut refresh = false;
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Vista de conversación");
                let selected = self
                    .state
                    .selected_session
                    .as_deref()
                    .unwrap_or("Ninguna seleccionada");
                ui.label(
                    RichText::new(selected)
                        .size(12.0)
                        .color(ui.style().visuals.weak_text_color()),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let enabled =
                    self.state.selected_session.is_some() && !self.state.transcript.is_loading();
                if ui
                    .add_enabled(enabled, egui::Button::new("Refrescar mensajes"))
                    .clicked()
                {
                    refresh = true;
                }
            });
        });
        refresh
    }

    fn transcript(&mut self, ui: &mut egui::Ui) {
        match self.state.transcript_view() {
            TranscriptView::NoSelection => {
                ui.centered_and_justified(|ui| {
                    ui.label("Selecciona una conversación a la izquierda");
                });
            }
            TranscriptView::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Cargando mensajes...");
                });
            }
            TranscriptView::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label("No hay mensajes.");
                });
            }
            TranscriptView::Messages => {
                let scroll_to_bottom = self.state.transcript.take_scroll_request();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for entry in self.state.transcript.entries() {
                            MessageBubble::render(ui, entry);
                            ui.add_space(8.0);
                        }
                        if scroll_to_bottom {
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        }
                    });
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        BackgroundTasks::handle_background_updates(&mut self.state);

        if let Some(action) = Sidebar::ui(ctx, &mut self.state) {
            self.handle_sidebar_action(ctx, action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.transcript_header(ui) {
                self.refresh_messages(ctx);
            }
            ui.separator();
            self.transcript(ui);
        });
    }
}
