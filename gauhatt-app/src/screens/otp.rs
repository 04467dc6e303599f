use egui::{Key, RichText, TextEdit};
use gauhatt::auth::AuthSink;
use gauhatt::error::AuthError;
use gauhatt::form::OTP_LEN;
use gauhatt::{Navigator, OtpForm, Route};

use crate::app::Services;
use crate::tasks::{Pending, Poll};
use crate::widgets;

pub struct OtpScreen {
    form: OtpForm,
    pending: Option<Pending<Result<bool, AuthError>>>,
    /// Cell that last received keyboard focus from us.
    focused: Option<usize>,
}

impl OtpScreen {
    pub fn new(email: Option<String>) -> Self {
        Self {
            form: OtpForm::new(email),
            pending: None,
            focused: None,
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
            Poll::Lost => Err(AuthError::Network("verification task ended unexpectedly".into())),
        };
        self.pending = None;
        if let Ok(route) = self.form.finish_verify(result) {
            services.navigator.navigate(route);
        }
    }

    fn verify(&mut self, ui: &egui::Ui, services: &Services) {
        let Ok(code) = self.form.begin_verify() else { return };
        let sink = services.sink.clone();
        self.pending = Some(Pending::spawn(&services.runtime, ui.ctx(), async move {
            sink.verify_otp(&code).await
        }));
    }

    fn cells(&mut self, ui: &mut egui::Ui) {
        let mut responses = Vec::with_capacity(OTP_LEN);
        ui.horizontal(|ui| {
            for i in 0..OTP_LEN {
                let was_empty = self.form.cells()[i].is_none();
                let mut text = self.form.cells()[i].map(String::from).unwrap_or_default();
                let response = ui.add(
                    TextEdit::singleline(&mut text)
                        .char_limit(1)
                        .desired_width(28.0)
                        .horizontal_align(egui::Align::Center)
                        .font(egui::TextStyle::Heading),
                );

                if response.changed() {
                    match text.chars().last() {
                        Some(ch) => self.form.input(i, ch),
                        None => self.form.backspace(i),
                    }
                } else if was_empty
                    && response.has_focus()
                    && ui.input(|input| input.key_pressed(Key::Backspace))
                {
                    self.form.backspace(i);
                }
                if response.gained_focus() {
                    self.form.set_focus(i);
                    self.focused = Some(i);
                }
                responses.push(response);
            }
        });

        let focus = self.form.focus();
        if self.focused != Some(focus) {
            if let Some(response) = responses.get(focus) {
                response.request_focus();
            }
            self.focused = Some(focus);
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, services: &Services) {
        self.poll(services);

        widgets::card(ui, |ui| {
            widgets::heading(ui, "Verify Your Email Address", "We've sent a 6 digit code to");
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(self.form.email()).strong());
            });
            ui.add_space(12.0);
            widgets::banner(ui, self.form.error());

            let busy = self.form.is_in_flight();
            ui.add_enabled_ui(!busy, |ui| self.cells(ui));
            ui.add_space(12.0);

            if widgets::primary_button(ui, "Verify", busy) {
                self.verify(ui, services);
            }
            ui.horizontal(|ui| {
                ui.label(RichText::new("Didn't get a code?").color(widgets::MUTED));
                if widgets::link(ui, "Resend") {
                    self.form.resend();
                    self.focused = None;
                }
            });
            if widgets::link(ui, "Back to registration") {
                services.navigator.navigate(Route::Register);
            }
        });
    }
}
