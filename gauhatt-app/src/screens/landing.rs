use egui::RichText;
use gauhatt::{Navigator, Route};

use crate::app::Services;
use crate::widgets;

/// Steps shown under the hero.
const STEPS: [(&str, &str); 3] = [
    (
        "Browse & Order",
        "Choose from a wide variety of seasonal produce listed directly by local farmers.",
    ),
    (
        "Harvest on Demand",
        "Farmers receive your order and harvest crops only when needed to ensure peak freshness.",
    ),
    (
        "Doorstep Delivery",
        "Fresh produce arrives at your doorstep by early morning next day.",
    ),
];

pub struct LandingScreen;

impl LandingScreen {
    pub fn show(&mut self, ui: &mut egui::Ui, services: &Services) {
        ui.label(RichText::new("Nature").size(56.0).strong());
        ui.label(RichText::new("Delivered").size(56.0).strong().color(widgets::PRIMARY));
        ui.add_space(8.0);
        ui.label(
            RichText::new(
                "Powerful logistics that work so you eat healthy. Farm to Table in under 24 hours.",
            )
            .size(18.0)
            .color(widgets::MUTED),
        );
        ui.add_space(24.0);

        ui.allocate_ui(egui::vec2(widgets::CARD_WIDTH, 40.0), |ui| {
            ui.horizontal(|ui| {
                if widgets::primary_button(ui, "Get Started", false) {
                    services.navigator.navigate(Route::Login);
                }
            });
        });
        if widgets::link(ui, "Register Now") {
            services.navigator.navigate(Route::Register);
        }

        ui.add_space(48.0);
        ui.label(RichText::new("Freshness in 3 Steps").size(24.0).strong());
        ui.add_space(12.0);
        for (i, (title, body)) in STEPS.iter().enumerate() {
            widgets::card(ui, |ui| {
                ui.label(RichText::new(format!("{}. {}", i + 1, title)).strong());
                ui.label(RichText::new(*body).color(widgets::MUTED));
            });
            ui.add_space(8.0);
        }
    }
}
