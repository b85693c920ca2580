//! Request dispatch: tick planning, the shared client and per-attempt fetch tasks.
mod rate;
mod sender;
mod target;

#[cfg(test)]
mod tests;

pub use rate::TickPlan;
pub(crate) use rate::build_in_flight_limiter;
pub use sender::{ClientSettings, build_client, dispatch};
pub use target::{Target, parse_targets};

#[cfg(test)]
pub(crate) use sender::fetch_once;
#[cfg(any(test, feature = "fuzzing"))]
pub(crate) use sender::parse_reqid;
