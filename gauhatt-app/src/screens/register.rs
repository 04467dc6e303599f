use egui::RichText;
use gauhatt::auth::{AuthResponse, AuthSink};
use gauhatt::error::AuthError;
use gauhatt::form::{Attachment, AttachmentSlot, CropType, District};
use gauhatt::prelude::*;

use crate::app::Services;
use crate::tasks::{Pending, Poll};
use crate::widgets;

pub struct RegisterScreen {
    form: RegistrationForm,
    pending: Option<Pending<Result<AuthResponse, AuthError>>>,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::new(),
            pending: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    fn poll(&mut self, services: &Services) {
        let Some(pending) = &self.pending else { return };
        let result = match pending.poll() {
            Poll::Waiting => return,
            Poll::Ready(result) => result,
            Poll::Lost => Err(AuthError::Network("registration task ended unexpectedly".into())),
        };
        self.pending = None;
        if let Ok(route) = self.form.finish_submit(result) {
            services.navigator.navigate(route);
        }
    }

    fn submit(&mut self, ui: &egui::Ui, services: &Services) {
        let request = match self.form.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                log::debug!("registration not sent: {}", e);
                return;
            }
        };
        let sink = services.sink.clone();
        self.pending = Some(Pending::spawn(&services.runtime, ui.ctx(), async move {
            sink.register(&request).await
        }));
    }

    fn role_toggle(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for role in [Role::User, Role::Farmer] {
                let selected = self.form.role() == role;
                if ui.selectable_label(selected, role.to_string()).clicked() && !selected {
                    if let Err(e) = self.form.select_role(role) {
                        log::debug!("role change ignored: {}", e);
                    }
                }
            }
        });
        ui.add_space(8.0);
    }

    fn stepper(&self, ui: &mut egui::Ui) {
        if self.form.role() != Role::Farmer {
            return;
        }
        ui.horizontal(|ui| {
            for (step, name) in [(1, "Account"), (2, "Farm Info")] {
                let color = if self.form.step() >= step {
                    widgets::PRIMARY
                } else {
                    widgets::MUTED
                };
                ui.label(RichText::new(format!("{} {}", step, name)).color(color).strong());
            }
        });
        ui.add_space(8.0);
    }

    fn text_fields(&mut self, ui: &mut egui::Ui) {
        for &field in self.form.state().fields() {
            if field == Field::Location {
                self.district(ui);
                continue;
            }
            let mut value = self.form.value(field).to_owned();
            let error = self.form.error(field);
            if widgets::text_field(ui, field.label(), &mut value, field.is_secret(), error) {
                self.form.set_field(field, value);
            }
        }
    }

    fn district(&mut self, ui: &mut egui::Ui) {
        let current = District::from_name(self.form.value(Field::Location));
        egui::ComboBox::from_id_salt("district")
            .width(ui.available_width())
            .selected_text(current.map_or(Field::Location.label(), |d| d.name()))
            .show_ui(ui, |ui| {
                for district in District::ALL {
                    if ui.selectable_label(current == Some(district), district.name()).clicked() {
                        self.form.set_field(Field::Location, district.name());
                    }
                }
            });
        widgets::field_error(ui, self.form.error(Field::Location));
    }

    fn farm_extras(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Crop Type").strong());
        ui.horizontal_wrapped(|ui| {
            for crop in CropType::ALL {
                let mut checked = self.form.has_crop(crop);
                if ui.checkbox(&mut checked, crop.label()).changed() {
                    self.form.toggle_crop(crop);
                }
            }
        });
        ui.add_space(8.0);

        for slot in AttachmentSlot::ALL {
            ui.horizontal(|ui| {
                ui.label(slot.label());
                let name = self.form.attachment(slot).map(|a| a.file_name.clone());
                if ui.button(name.as_deref().unwrap_or("Choose file...")).clicked() {
                    if let Some(path) = pick_file(slot) {
                        self.form.attach(slot, Some(Attachment::from_path(path)));
                    }
                }
                if name.is_some() && widgets::link(ui, "Remove") {
                    self.form.attach(slot, None);
                }
            });
        }
        ui.add_space(8.0);
    }

    fn actions(&mut self, ui: &mut egui::Ui, services: &Services) {
        let busy = self.form.is_in_flight();
        match self.form.state() {
            FormState::UserStep1 => {
                if widgets::primary_button(ui, "Create Account", busy) {
                    self.submit(ui, services);
                }
            }
            FormState::FarmerStep1 => {
                if widgets::primary_button(ui, "Next Step", busy) {
                    if let Err(e) = self.form.advance() {
                        log::debug!("advance blocked: {}", e);
                    }
                }
            }
            FormState::FarmerStep2 => {
                if !busy && ui.button("Back").clicked() {
                    if let Err(e) = self.form.retreat() {
                        log::debug!("retreat blocked: {}", e);
                    }
                }
                if widgets::primary_button(ui, "Register", busy) {
                    self.submit(ui, services);
                }
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, services: &Services) {
        self.poll(services);

        widgets::card(ui, |ui| {
            widgets::heading(ui, "Create an Account", "Join our community of sustainable food.");
            widgets::banner(ui, self.form.errors().form());

            ui.add_enabled_ui(!self.form.is_in_flight(), |ui| {
                self.role_toggle(ui);
                self.stepper(ui);
                self.text_fields(ui);
                if self.form.state() == FormState::FarmerStep2 {
                    self.farm_extras(ui);
                }
            });
            self.actions(ui, services);

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Already have an account?").color(widgets::MUTED));
                if widgets::link(ui, "sign in") {
                    services.navigator.navigate(Route::Login);
                }
            });
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn pick_file(slot: AttachmentSlot) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(slot.label())
        .add_filter("Images and documents", &["png", "jpg", "jpeg", "pdf"])
        .pick_file()
}

#[cfg(target_arch = "wasm32")]
fn pick_file(_slot: AttachmentSlot) -> Option<std::path::PathBuf> {
    None
}
