mod controller;
mod hooks;
mod ticker;

pub use controller::{SendOutcome, SessionController, SessionStatus};
pub use hooks::{AlwaysConfirm, ConfirmationGate, NeverConfirm, NoopHook, UiHook, UiUpdate};
pub use ticker::run_ticker;
