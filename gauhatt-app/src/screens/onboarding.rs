use egui::RichText;
use gauhatt::onboarding::{IntroFlow, SLIDES};

use crate::app::Services;
use crate::widgets;

pub struct OnboardingScreen {
    flow: IntroFlow,
}

impl OnboardingScreen {
    pub fn new() -> Self {
        Self {
            flow: IntroFlow::new(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, services: &Services) {
        let navigator = services.navigator.as_ref();
        widgets::card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{} / {}", self.flow.index() + 1, SLIDES.len())).color(widgets::MUTED));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if widgets::link(ui, "Skip") {
                        self.flow.skip(navigator);
                    }
                });
            });
            ui.add_space(16.0);

            let slide = self.flow.slide();
            ui.label(RichText::new(slide.subtitle).color(widgets::PRIMARY).strong());
            ui.label(RichText::new(slide.title).size(28.0).strong());
            ui.add_space(8.0);
            ui.label(RichText::new(slide.description).color(widgets::MUTED));
            ui.add_space(24.0);

            ui.horizontal(|ui| {
                for i in 0..SLIDES.len() {
                    let color = if i == self.flow.index() {
                        widgets::PRIMARY
                    } else {
                        egui::Color32::LIGHT_GRAY
                    };
                    ui.label(RichText::new("●").color(color));
                }
            });
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.add_enabled(self.flow.index() > 0, egui::Button::new("Back")).clicked() {
                    self.flow.prev();
                }
            });
            let label = if self.flow.is_last() { "Get Started" } else { "Next" };
            if widgets::primary_button(ui, label, false) {
                self.flow.next(navigator);
            }
        });
    }
}
