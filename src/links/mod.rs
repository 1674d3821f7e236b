//! Link handling: classification, resolution, and liveness verification
//!
//! Classification splits the raw hrefs into internal/external counts;
//! verification resolves a bounded subset and probes them over HTTP. The two
//! apply different filters on purpose (see [`classify`]).

pub mod classify;
pub mod verify;

pub use classify::{classify_href, resolve_href, should_probe, LinkScope};
pub use verify::{verify_links, BrokenLinkHit, UNREACHABLE_STATUS};
