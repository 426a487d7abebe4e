//! Remote-driver contract for the Helmsman test driver.
//!
//! The facade and the wait engine never speak a wire protocol themselves; they
//! talk to the browser exclusively through the traits in this crate. A concrete
//! binding (WebDriver, CDP, or an in-memory fake for tests) implements
//! [`PageDriver`] and [`ElementHandle`] and is injected into the session.

pub mod driver;
pub mod error;
pub mod types;

pub use driver::{ElementHandle, ElementRef, PageDriver};
pub use error::{DriverError, DriverErrorKind};
pub use types::{Cookie, LogEntry, LogKind, WindowSize};
