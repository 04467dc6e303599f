//! Small shared widgets for the auth screens.

use egui::{Align, Button, Color32, Layout, RichText, TextEdit, Ui, Vec2};

pub const PRIMARY: Color32 = Color32::from_rgb(76, 154, 42);
pub const PRIMARY_DARK: Color32 = Color32::from_rgb(56, 118, 30);
pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
pub const MUTED: Color32 = Color32::from_rgb(107, 114, 128);

/// Width of the centered auth card.
pub const CARD_WIDTH: f32 = 380.0;

/// The leaf-and-wordmark logo. Returns true when clicked.
pub fn logo(ui: &mut Ui) -> bool {
    ui.add(
        egui::Label::new(RichText::new("🍃 GAUHATT").size(22.0).strong().color(PRIMARY_DARK))
            .sense(egui::Sense::click()),
    )
    .clicked()
}

/// Card heading with a muted subtitle.
pub fn heading(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(title).size(26.0).strong());
        ui.label(RichText::new(subtitle).color(MUTED));
    });
    ui.add_space(12.0);
}

/// Single-line input with its error message underneath. Returns true on edit.
pub fn text_field(ui: &mut Ui, hint: &str, value: &mut String, secret: bool, error: Option<&str>) -> bool {
    let changed = ui
        .add(
            TextEdit::singleline(value)
                .hint_text(hint)
                .password(secret)
                .desired_width(f32::INFINITY),
        )
        .changed();
    field_error(ui, error);
    changed
}

pub fn field_error(ui: &mut Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.label(RichText::new(message).small().color(ERROR));
    }
    ui.add_space(6.0);
}

/// Form-level error banner.
pub fn banner(ui: &mut Ui, message: Option<&str>) {
    if let Some(message) = message {
        egui::Frame::new()
            .fill(Color32::from_rgb(254, 242, 242))
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(254, 226, 226)))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    ui.label(RichText::new(message).color(ERROR));
                });
            });
        ui.add_space(8.0);
    }
}

/// Full-width filled button; shows a spinner and ignores clicks while loading.
pub fn primary_button(ui: &mut Ui, text: &str, loading: bool) -> bool {
    if loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Please wait...").color(MUTED));
        });
        return false;
    }
    ui.add_sized(
        Vec2::new(ui.available_width(), 36.0),
        Button::new(RichText::new(text).color(Color32::WHITE).strong()).fill(PRIMARY),
    )
    .clicked()
}

/// A text-only link button.
pub fn link(ui: &mut Ui, text: &str) -> bool {
    ui.add(Button::new(RichText::new(text).color(PRIMARY_DARK)).frame(false))
        .clicked()
}

/// White rounded card of [`CARD_WIDTH`] holding a screen's content.
pub fn card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::new()
        .fill(Color32::WHITE)
        .corner_radius(12.0)
        .inner_margin(24.0)
        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(229, 231, 235)))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.with_layout(Layout::top_down_justified(Align::Min), add_contents)
                .inner
        })
        .inner
}
