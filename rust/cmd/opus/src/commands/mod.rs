//! CLI commands module.

mod info;
mod roundtrip;
mod toc;
mod util;

pub use info::InfoCommand;
pub use roundtrip::RoundtripCommand;
pub use toc::TocCommand;

pub(crate) use util::*;
