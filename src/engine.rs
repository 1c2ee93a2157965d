//! The decision engine, mapping an observation to a seeding verdict.
//!
//! The checks run in a fixed priority order and the order is part of the contract:
//!
//!  1. Hard denial gates. The first gate that fires denies seeding.
//!  2. Platform suitability. Drone and aircraft ranges are checked, either or both may approve.
//!  3. Conditional notes. Every note that applies is collected, if there are any the verdict is
//!     conditional.
//!  4. Anything left is denied as outside operational ranges.
//!
//! Absent values never satisfy a range check, so the engine always reaches a verdict.

use crate::{
    observation::Observation,
    thresholds::Thresholds,
    verdict::{Decision, Verdict},
};
use itertools::Itertools;
use metfor::Quantity;

/// Reason given when both platforms are suitable.
pub const BOTH_PLATFORMS: &str = "Both platforms adequate.";
/// Reason given when only drones are suitable.
pub const DRONE_RANGE: &str = "Ideal range for drones.";
/// Reason given when only aircraft are suitable.
pub const AIRCRAFT_RANGE: &str = "Cold cloud ideal for AgI (silver iodide seeding).";
/// Reason given when nothing applies.
pub const OUTSIDE_RANGES: &str = "Parameters outside operational ranges.";

/// Separator between conditional notes.
pub const NOTE_SEPARATOR: &str = " | ";

/// Evaluate an observation against the standard operational ranges.
///
/// # Examples
///
/// ```rust
/// use cloud_seeding::{evaluate, Observation, Verdict};
/// use metfor::{Meters, MetersPSec, Mm};
///
/// let obs = Observation::new()
///     .with_cloud_base(Meters(1000.0))
///     .with_cloud_top(Meters(3000.0))
///     .with_rel_humidity(70.0)
///     .with_reflectivity(15.0)
///     .with_precip_rate(Mm(5.0))
///     .with_wind_speed(MetersPSec(3.0));
///
/// let decision = evaluate(&obs);
/// assert_eq!(decision.verdict(), Verdict::ApprovedDrone);
/// assert_eq!(decision.reason(), "Ideal range for drones.");
/// ```
#[inline]
pub fn evaluate(obs: &Observation) -> Decision {
    evaluate_with(obs, &Thresholds::default())
}

/// Evaluate an observation against custom thresholds.
pub fn evaluate_with(obs: &Observation, thresholds: &Thresholds) -> Decision {
    if let Some(reason) = hard_gate(obs, thresholds) {
        return Decision::new(Verdict::Denied, reason);
    }

    match (drone_ok(obs, thresholds), aircraft_ok(obs, thresholds)) {
        (true, true) => return Decision::new(Verdict::ApprovedMixed, BOTH_PLATFORMS),
        (true, false) => return Decision::new(Verdict::ApprovedDrone, DRONE_RANGE),
        (false, true) => return Decision::new(Verdict::ApprovedAircraft, AIRCRAFT_RANGE),
        (false, false) => {}
    }

    let notes = conditional_notes(obs, thresholds);
    if notes.is_empty() {
        tracing::trace!("no rule applies");
        Decision::new(Verdict::Denied, OUTSIDE_RANGES)
    } else {
        tracing::trace!(count = notes.len(), "conditional notes apply");
        Decision::new(Verdict::Conditional, notes.iter().join(NOTE_SEPARATOR))
    }
}

/// A rule that denies seeding outright.
struct Gate {
    name: &'static str,
    fires: fn(&Observation, &Thresholds) -> bool,
    reason: fn(&Thresholds) -> String,
}

// Priority order, highest first.
const HARD_GATES: [Gate; 4] = [
    Gate {
        name: "lightning",
        fires: lightning_fires,
        reason: lightning_reason,
    },
    Gate {
        name: "precipitation",
        fires: precipitation_fires,
        reason: precipitation_reason,
    },
    Gate {
        name: "wind",
        fires: wind_fires,
        reason: wind_reason,
    },
    Gate {
        name: "reflectivity",
        fires: reflectivity_fires,
        reason: reflectivity_reason,
    },
];

fn lightning_fires(obs: &Observation, _: &Thresholds) -> bool {
    obs.lightning()
}

fn lightning_reason(_: &Thresholds) -> String {
    "Electrical activity detected.".to_owned()
}

fn precipitation_fires(obs: &Observation, thresholds: &Thresholds) -> bool {
    obs.precip_rate().unpack() > thresholds.max_precip_rate_mm_h
}

fn precipitation_reason(thresholds: &Thresholds) -> String {
    format!(
        "Precipitation too high (>{} mm/h).",
        thresholds.max_precip_rate_mm_h
    )
}

fn wind_fires(obs: &Observation, thresholds: &Thresholds) -> bool {
    obs.wind_speed().unpack() > thresholds.max_wind_speed_m_s
}

fn wind_reason(thresholds: &Thresholds) -> String {
    format!("Strong wind (>{} m/s).", thresholds.max_wind_speed_m_s)
}

// Unknown reflectivity fails the gate.
fn reflectivity_fires(obs: &Observation, thresholds: &Thresholds) -> bool {
    obs.reflectivity()
        .into_option()
        .map_or(true, |dbz| dbz < thresholds.min_reflectivity_dbz)
}

fn reflectivity_reason(thresholds: &Thresholds) -> String {
    format!(
        "Reflectivity too low (<{} dBZ).",
        thresholds.min_reflectivity_dbz
    )
}

/// Check the hard denial gates in priority order, returning the reason for the first one that
/// fires.
pub fn hard_gate(obs: &Observation, thresholds: &Thresholds) -> Option<String> {
    HARD_GATES
        .iter()
        .find(|gate| (gate.fires)(obs, thresholds))
        .map(|gate| {
            tracing::trace!(gate = gate.name, "hard gate fired");
            (gate.reason)(thresholds)
        })
}

/// Are the cloud base, cloud top, and humidity in the range drones can work?
///
/// Requires both the cloud base and cloud top.
pub fn drone_ok(obs: &Observation, thresholds: &Thresholds) -> bool {
    let (base, top) = match (
        obs.cloud_base().into_option(),
        obs.cloud_top().into_option(),
    ) {
        (Some(base), Some(top)) => (base.unpack(), top.unpack()),
        _ => return false,
    };

    base >= thresholds.drone_min_cloud_base_m
        && base <= thresholds.drone_max_cloud_base_m
        && top <= thresholds.drone_max_cloud_top_m
        && obs.rel_humidity() >= thresholds.drone_min_rel_humidity_pct
}

/// Is the cloud top high and cold enough for aircraft seeding with AgI?
///
/// Requires both the cloud top and the cloud top temperature.
pub fn aircraft_ok(obs: &Observation, thresholds: &Thresholds) -> bool {
    let (top, top_t) = match (
        obs.cloud_top().into_option(),
        obs.cloud_top_temperature().into_option(),
    ) {
        (Some(top), Some(top_t)) => (top.unpack(), top_t.unpack()),
        _ => return false,
    };

    top >= thresholds.aircraft_min_cloud_top_m
        && top <= thresholds.aircraft_max_cloud_top_m
        && top_t <= thresholds.aircraft_max_cloud_top_temp_c
        && obs.rel_humidity() >= thresholds.aircraft_min_rel_humidity_pct
}

/// A note that makes a verdict conditional.
struct Note {
    applies: fn(&Observation, &Thresholds) -> bool,
    text: &'static str,
}

// Report order.
const CONDITIONAL_NOTES: [Note; 3] = [
    Note {
        applies: moderate_precipitation,
        text: "Moderate precipitation.",
    },
    Note {
        applies: marginal_reflectivity,
        text: "Marginal reflectivity.",
    },
    Note {
        applies: low_precipitable_water,
        text: "Low water-vapor column (PW).",
    },
];

fn moderate_precipitation(obs: &Observation, thresholds: &Thresholds) -> bool {
    let rate = obs.precip_rate().unpack();
    rate >= thresholds.moderate_precip_rate_mm_h && rate <= thresholds.max_precip_rate_mm_h
}

fn marginal_reflectivity(obs: &Observation, thresholds: &Thresholds) -> bool {
    obs.reflectivity().into_option().map_or(false, |dbz| {
        dbz >= thresholds.min_reflectivity_dbz && dbz <= thresholds.marginal_reflectivity_dbz
    })
}

fn low_precipitable_water(obs: &Observation, thresholds: &Thresholds) -> bool {
    obs.precipitable_water()
        .into_option()
        .map_or(false, |pw| pw.unpack() < thresholds.low_precipitable_water_mm)
}

/// Collect the conditional notes that apply to this observation, in report order.
///
/// This does not look at the hard gates or platform ranges, it only lists the notes.
pub fn conditional_notes(obs: &Observation, thresholds: &Thresholds) -> Vec<&'static str> {
    CONDITIONAL_NOTES
        .iter()
        .filter(|note| (note.applies)(obs, thresholds))
        .map(|note| note.text)
        .collect()
}
