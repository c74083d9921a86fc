//! # Lunchline Core Library
//!
//! This library provides the core logic for the Lunchline lunch-order workflow.
//! It follows a CLI-first philosophy: every operation is available through the
//! `lunchline` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Clock**: samples the wall clock and classifies the minute of day
//! - **Schedule**: time bands with base scores, and dispatch slots
//! - **Rules**: pure evaluator turning a sample and a session context into an
//!   executability verdict, a dispatch time and points
//! - **Message**: deterministic, transport-safe order message
//! - **Session**: the one stateful controller, plus the periodic ticker
//!
//! ## Key Components
//!
//! - [`evaluate`]: the rule evaluator
//! - [`compose`]: the message composer
//! - [`SessionController`]: order/context owner driving the cycle
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod clock;
pub mod error;
pub mod events;
pub mod message;
pub mod order;
pub mod rules;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod transport;

pub use catalog::{Catalog, Extra, MenuItem};
pub use clock::{sample, Clock, ClockReader, FixedClock, SystemClock, TimeSnapshot};
pub use error::{CatalogError, ConfigError, CoreError, TransportError, ValidationError};
pub use events::Event;
pub use message::{compose, normalize};
pub use order::{Order, OrderLine};
pub use rules::{
    evaluate, Evaluation, Executability, MarketState, ReasonCode, SessionContext, SessionMode,
};
pub use schedule::{Band, BandId, Classification, Schedule};
pub use session::{
    run_ticker, AlwaysConfirm, ConfirmationGate, NeverConfirm, NoopHook, SendOutcome,
    SessionController, SessionStatus, UiHook, UiUpdate,
};
pub use storage::Config;
pub use transport::{ChatLinkTransport, Delivery, Transport};
