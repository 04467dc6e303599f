use egui::RichText;
use gauhatt::auth::{AuthResponse, AuthSink};
use gauhatt::error::AuthError;
use gauhatt::{LoginForm, Navigator, Route};

use crate::app::Services;
use crate::tasks::{Pending, Poll};
use crate::widgets;

pub struct LoginScreen {
    form: LoginForm,
    pending: Option<Pending<Result<AuthResponse, AuthError>>>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            form: LoginForm::new(),
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
            Poll::Lost => Err(AuthError::Network("sign-in task ended unexpectedly".into())),
        };
        self.pending = None;
        if let Ok(route) = self.form.finish_submit(result, services.session.as_ref()) {
            services.navigator.navigate(route);
        }
    }

    fn submit(&mut self, ui: &egui::Ui, services: &Services) {
        let Ok(credentials) = self.form.begin_submit() else { return };
        let sink = services.sink.clone();
        self.pending = Some(Pending::spawn(&services.runtime, ui.ctx(), async move {
            sink.login(&credentials.email, &credentials.password).await
        }));
    }

    pub fn show(&mut self, ui: &mut egui::Ui, services: &Services) {
        self.poll(services);

        widgets::card(ui, |ui| {
            widgets::heading(ui, "Welcome Back!", "Enter your credentials to access your account.");
            widgets::banner(ui, self.form.error());

            let busy = self.form.is_in_flight();
            ui.add_enabled_ui(!busy, |ui| {
                widgets::text_field(ui, "Email address", &mut self.form.email, false, None);
                widgets::text_field(ui, "Password", &mut self.form.password, true, None);
            });

            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if widgets::primary_button(ui, "Sign In", busy) || (enter && !busy) {
                self.submit(ui, services);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("New to GAUHATT?").color(widgets::MUTED));
                if widgets::link(ui, "Create an account") {
                    services.navigator.navigate(Route::Register);
                }
            });
        });
    }
}
