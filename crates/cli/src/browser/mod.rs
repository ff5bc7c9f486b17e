//! Browser access: the driver capability, its Chromium-backed session, and condition waits.

pub mod driver;
mod js;
pub mod session;
pub mod wait;

pub use driver::{Locator, PageDriver, SessionLauncher};
pub use session::{BrowserSession, ChromiumLauncher, SessionConfig, with_session};
pub use wait::{PageCondition, WaitOutcome, WaitSettings, wait_until};
