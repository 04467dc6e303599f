//! Main application state and the per-frame layout.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use eframe::egui;
use gauhatt::auth::{MemorySession, MockAuthService, SessionStore, TOKEN_KEY};
use gauhatt::host::FrameInfo;
use gauhatt::surface::PainterSurface;
use gauhatt::{Config, FieldConfig, Host, Navigator, ParticleBackground, Route, Vec2};

use crate::screens::{LandingScreen, LoginScreen, OnboardingScreen, OtpScreen, RegisterScreen};
use crate::widgets;

const STATUS_TIMEOUT: Duration = Duration::from_secs(3);
const PAGE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(249, 250, 251);

/// Collects navigation requests made while a screen is drawing; the app
/// applies the last one at the start of the next frame.
#[derive(Default)]
pub struct AppNavigator {
    pending: Mutex<Option<Route>>,
}

impl AppNavigator {
    fn take(&self) -> Option<Route> {
        self.pending.lock().unwrap_or_else(|p| p.into_inner()).take()
    }
}

impl Navigator for AppNavigator {
    fn navigate(&self, route: Route) {
        *self.pending.lock().unwrap_or_else(|p| p.into_inner()) = Some(route);
    }
}

/// Handles shared by every screen.
pub struct Services {
    pub runtime: tokio::runtime::Handle,
    pub sink: Arc<MockAuthService>,
    pub session: Arc<MemorySession>,
    pub navigator: Arc<AppNavigator>,
}

enum Screen {
    Landing(LandingScreen),
    Onboarding(OnboardingScreen),
    Login(LoginScreen),
    Register(RegisterScreen),
    Otp(OtpScreen),
}

impl Screen {
    fn for_route(route: &Route) -> Self {
        match route {
            Route::Landing => Screen::Landing(LandingScreen),
            Route::GetStarted => Screen::Onboarding(OnboardingScreen::new()),
            Route::Login => Screen::Login(LoginScreen::new()),
            Route::Register => Screen::Register(RegisterScreen::new()),
            Route::OtpVerify { email } => Screen::Otp(OtpScreen::new(email.clone())),
        }
    }

    fn show(&mut self, ui: &mut egui::Ui, services: &Services) {
        match self {
            Screen::Landing(screen) => screen.show(ui, services),
            Screen::Onboarding(screen) => screen.show(ui, services),
            Screen::Login(screen) => screen.show(ui, services),
            Screen::Register(screen) => screen.show(ui, services),
            Screen::Otp(screen) => screen.show(ui, services),
        }
    }

    fn is_busy(&self) -> bool {
        match self {
            Screen::Login(screen) => screen.is_busy(),
            Screen::Register(screen) => screen.is_busy(),
            Screen::Otp(screen) => screen.is_busy(),
            Screen::Landing(_) | Screen::Onboarding(_) => false,
        }
    }
}

pub struct GauhattApp {
    field_config: FieldConfig,
    services: Services,
    route: Route,
    screen: Screen,
    host: Host,
    background: Option<ParticleBackground>,
    last_frame: Option<FrameInfo>,
    status_message: Option<(String, Instant)>,
}

impl GauhattApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, runtime: tokio::runtime::Handle) -> Self {
        let services = Services {
            runtime,
            sink: Arc::new(MockAuthService::from_config(&config.auth)),
            session: Arc::new(MemorySession::new()),
            navigator: Arc::new(AppNavigator::default()),
        };
        let route = Route::Landing;
        let mut app = Self {
            field_config: config.field,
            services,
            screen: Screen::for_route(&route),
            route,
            host: Host::new(0, 0),
            background: None,
            last_frame: None,
            status_message: None,
        };
        app.background = Some(ParticleBackground::mount(&mut app.host, app.field_config.clone()));
        app
    }

    /// Switch screens, giving the new page a fresh background.
    fn go_to(&mut self, route: Route) {
        log::info!("navigate {} -> {}", self.route, route);
        if let Some(background) = self.background.take() {
            background.unmount(&mut self.host);
        }
        self.background = Some(ParticleBackground::mount(&mut self.host, self.field_config.clone()));
        self.screen = Screen::for_route(&route);
        self.route = route;
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if widgets::logo(ui) {
                    self.services.navigator.navigate(Route::Landing);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.services.session.token().is_some() {
                        if ui.button("Sign out").clicked() {
                            self.services.session.remove(TOKEN_KEY);
                            self.set_status("Signed out");
                            self.services.navigator.navigate(Route::Landing);
                        }
                    } else {
                        if ui.button("Register").clicked() {
                            self.services.navigator.navigate(Route::Register);
                        }
                        if ui.button("Sign in").clicked() {
                            self.services.navigator.navigate(Route::Login);
                        }
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(self.route.path());
                if self.screen.is_busy() {
                    ui.spinner();
                }
                if let Some((message, _)) = &self.status_message {
                    ui.separator();
                    ui.label(message);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(frame) = &self.last_frame {
                        ui.label(format!("{:.0} fps", frame.fps));
                    }
                    if let Some(background) = &self.background {
                        ui.label(format!("{} leaves", background.field().particles().len()));
                    }
                });
            });
        });
    }

    /// Feed the host this frame's size and pointer, then draw the field.
    fn paint_background(&mut self, ui: &egui::Ui, rect: egui::Rect) {
        let (width, height) = (rect.width().max(0.0) as u32, rect.height().max(0.0) as u32);
        if self.host.size() != (width, height) {
            self.host.resize(width, height);
        }

        if let Some(pos) = ui.ctx().pointer_hover_pos() {
            if rect.contains(pos) {
                let local = pos - rect.min;
                self.host.pointer_moved(Vec2::new(local.x, local.y));
            }
        }

        let painter = ui.painter_at(rect);
        let mut surface = PainterSurface::new(&painter);
        self.last_frame = Some(self.host.frame(&mut surface));
    }
}

impl eframe::App for GauhattApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(route) = self.services.navigator.take() {
            if route == Route::Landing && self.route == Route::GetStarted {
                self.set_status("Welcome aboard");
            }
            self.go_to(route);
        }

        self.top_bar(ctx);
        self.status_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(PAGE_BACKGROUND))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.paint_background(ui, rect);

                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(48.0);
                        self.screen.show(ui, &self.services);
                        ui.add_space(48.0);
                    });
                });
            });

        // The field animates continuously
        ctx.request_repaint();
    }
}
