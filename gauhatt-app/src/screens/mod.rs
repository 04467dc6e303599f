//! One module per route.

mod landing;
mod login;
mod onboarding;
mod otp;
mod register;

pub use landing::LandingScreen;
pub use login::LoginScreen;
pub use onboarding::OnboardingScreen;
pub use otp::OtpScreen;
pub use register::RegisterScreen;
