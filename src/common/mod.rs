//! Common utilities and shared functionality
//!
//! Wall-clock access lives behind the `Clock` trait so the energy economy can
//! be driven by a manual clock in tests.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
