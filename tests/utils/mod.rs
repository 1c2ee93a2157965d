use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use cloud_seeding::{observation_from_record, Observation};

#[allow(unused_macros)] // False alarm
macro_rules! test_row {
    ($test_name:ident, $id:literal, $verdict:expr, $reason:expr) => {
        #[test]
        fn $test_name() {
            let rows = utils::load_test_file("observations.csv");
            let obs = rows
                .get($id)
                .expect(concat!("missing test row: ", $id))
                .as_ref()
                .expect(concat!("test row failed to parse: ", $id));

            let decision = cloud_seeding::evaluate(obs);
            assert_eq!(decision.verdict(), $verdict);
            assert_eq!(decision.reason(), $reason);
        }
    };
}

#[allow(dead_code)] // Not every test crate uses it.
/// Load a test file into a map from row id to the parsed observation, or the parse error for
/// rows that failed.
pub fn load_test_file(
    fname: &str,
) -> HashMap<String, cloud_seeding::Result<Observation>> {
    let test_path = test_file_path(fname);

    let f = File::open(&test_path).expect(&format!("Error opening file: {:#?}", test_path));
    let mut reader = csv::Reader::from_reader(f);
    let headers = reader.headers().expect("Error reading headers").clone();

    reader
        .records()
        .map(|record| record.expect("Error reading record"))
        .map(|record| {
            let id = record.get(0).expect("Missing id column").to_owned();
            (id, observation_from_record(&headers, &record))
        })
        .collect()
}

pub fn test_file_path(fname: &str) -> PathBuf {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    test_path
}
