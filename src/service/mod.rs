pub mod clock;
pub mod display;
pub mod poller;

pub use clock::{Clock, SystemClock};
pub use display::DisplayBinding;
pub use poller::{BookPoller, PollSettings, PollSnapshot};
