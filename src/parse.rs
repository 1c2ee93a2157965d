//! Build observations from raw text, as typed into a form or read from a delimited file.
//!
//! This is the only place a record can fail. An observation that fails to parse is never
//! evaluated.

use crate::{
    error::{Result, SeedingError},
    observation::{Observation, ObservationField},
};

/// Parse the text of a numeric field.
///
/// Surrounding white space is ignored. Empty text and `NaN` mean the value is absent.
///
/// # Examples
///
/// ```rust
/// use cloud_seeding::{parse_value, ObservationField};
///
/// assert_eq!(parse_value(ObservationField::CloudTop, " 3500 ").unwrap(), Some(3500.0));
/// assert_eq!(parse_value(ObservationField::CloudTop, "").unwrap(), None);
/// assert!(parse_value(ObservationField::CloudTop, "high").is_err());
/// ```
pub fn parse_value(field: ObservationField, text: &str) -> Result<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    text.parse::<f64>()
        .map(|val| if val.is_nan() { None } else { Some(val) })
        .map_err(|_| SeedingError::InvalidNumber {
            field: field.name(),
            value: text.to_owned(),
        })
}

/// Parse the lightning flag.
///
/// Empty text, `0`, `false`, and `no` are false. `true`, `yes`, and any non-zero number are true.
/// Case is ignored.
pub fn parse_flag(text: &str) -> Result<bool> {
    let text = text.trim();

    match text.to_ascii_lowercase().as_str() {
        "" | "false" | "no" => return Ok(false),
        "true" | "yes" => return Ok(true),
        _ => {}
    }

    match text.parse::<f64>() {
        Ok(val) if !val.is_nan() => Ok(val != 0.0),
        _ => Err(SeedingError::InvalidFlag(text.to_owned())),
    }
}

/// Apply one named text value to an observation.
fn apply_field(obs: Observation, field: ObservationField, text: &str) -> Result<Observation> {
    if field == ObservationField::Lightning {
        Ok(obs.with_lightning(parse_flag(text)?))
    } else {
        Ok(obs.with_value(field, parse_value(field, text)?))
    }
}

/// Build an observation from pairs of field names and text values, such as the entries of a
/// form.
///
/// Fields that are not given keep their defaults. An unknown field name is an error.
///
/// # Examples
///
/// ```rust
/// use cloud_seeding::observation_from_fields;
/// use metfor::Meters;
///
/// let obs = observation_from_fields(vec![
///     ("cloud_base_m", "1000"),
///     ("cloud_top_m", "3000"),
///     ("precipitable_water_mm", ""),
///     ("lightning", "0"),
/// ])
/// .unwrap();
///
/// assert_eq!(obs.cloud_top().unwrap(), Meters(3000.0));
/// assert!(obs.precipitable_water().is_none());
///
/// assert!(observation_from_fields(vec![("cloud_bottom", "1000")]).is_err());
/// ```
pub fn observation_from_fields<'a, I>(fields: I) -> Result<Observation>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields
        .into_iter()
        .try_fold(Observation::new(), |obs, (name, text)| {
            let field: ObservationField = name
                .trim()
                .parse()
                .map_err(|_| SeedingError::UnknownField(name.to_owned()))?;

            apply_field(obs, field, text)
        })
}

/// Build an observation from a row of a delimited file.
///
/// Columns are matched to fields by header name. Columns that do not name a field are ignored,
/// and fields without a column keep their defaults.
pub fn observation_from_record(
    headers: &csv::StringRecord,
    record: &csv::StringRecord,
) -> Result<Observation> {
    headers
        .iter()
        .zip(record.iter())
        .filter_map(|(name, text)| {
            name.trim()
                .parse::<ObservationField>()
                .ok()
                .map(|field| (field, text))
        })
        .try_fold(Observation::new(), |obs, (field, text)| {
            apply_field(obs, field, text)
        })
}
