#[macro_use]
mod utils;

use cloud_seeding::Verdict::*;

test_row!(drone, "drone", ApprovedDrone, "Ideal range for drones.");
test_row!(
    aircraft,
    "aircraft",
    ApprovedAircraft,
    "Cold cloud ideal for AgI (silver iodide seeding)."
);
test_row!(mixed, "mixed", ApprovedMixed, "Both platforms adequate.");
test_row!(
    conditional,
    "conditional",
    Conditional,
    "Moderate precipitation. | Marginal reflectivity."
);
test_row!(dry_column, "dry_column", Conditional, "Low water-vapor column (PW).");
test_row!(neutral, "neutral", Denied, "Parameters outside operational ranges.");
test_row!(storm, "storm", Denied, "Electrical activity detected.");
test_row!(downpour, "downpour", Denied, "Precipitation too high (>20 mm/h).");
test_row!(gale, "gale", Denied, "Strong wind (>15 m/s).");
test_row!(thin, "thin", Denied, "Reflectivity too low (<10 dBZ).");
test_row!(no_radar, "no_radar", Denied, "Reflectivity too low (<10 dBZ).");

#[test]
fn garbled_row_fails_to_parse() {
    let rows = utils::load_test_file("observations.csv");
    match rows.get("garbled") {
        Some(Err(cloud_seeding::SeedingError::InvalidNumber { field, value })) => {
            assert_eq!(*field, "cloud_top_m");
            assert_eq!(value, "three thousand");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
