#![warn(missing_docs)]
//! Decide whether a cloud is a good candidate for seeding, and which platform should deliver
//! the seeding agent.
//!
//! The heart of the crate is [`evaluate`], a pure function mapping an [`Observation`] to a
//! [`Decision`]: one of five [`Verdict`]s along with a human readable reason. Everything else
//! gets observations into and decisions out of that function, from text fields ([`parse`]) or
//! whole CSV files ([`batch`]).
//!
//! # Examples
//!
//! ```rust
//! use cloud_seeding::{evaluate, Observation, Verdict};
//! use metfor::{Mm, MetersPSec};
//!
//! let obs = Observation::new()
//!     .with_reflectivity(12.0)
//!     .with_precip_rate(Mm(15.0))
//!     .with_rel_humidity(30.0)
//!     .with_wind_speed(MetersPSec(3.0));
//!
//! let decision = evaluate(&obs);
//! assert_eq!(decision.verdict(), Verdict::Conditional);
//! assert_eq!(decision.reason(), "Moderate precipitation. | Marginal reflectivity.");
//! ```

//
// API
//
pub use crate::{
    engine::{aircraft_ok, conditional_notes, drone_ok, evaluate, evaluate_with, hard_gate},
    error::{Result, SeedingError},
    observation::{Observation, ObservationField},
    parse::{observation_from_fields, observation_from_record, parse_flag, parse_value},
    thresholds::Thresholds,
    verdict::{Decision, Verdict},
};

pub mod batch;
pub mod engine;
pub mod parse;

//
// Internal use only
//

// Modules
mod error;
mod observation;
mod thresholds;
mod verdict;
