//! Data type and methods to store a single cloud observation.

use metfor::{Celsius, Meters, MetersPSec, Mm};
use optional::{none, Optioned};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The names of the values that make up an observation.
///
/// These are the column names used in batch files and the field names accepted by
/// [`observation_from_fields`](crate::observation_from_fields).
///
/// # Examples
///
/// ```rust
/// use cloud_seeding::ObservationField;
///
/// let field: ObservationField = "cloud_top_temp_c".parse().unwrap();
/// assert_eq!(field, ObservationField::CloudTopTemperature);
/// assert_eq!(field.name(), "cloud_top_temp_c");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Display,
)]
pub enum ObservationField {
    /// Cloud base altitude (m)
    #[strum(serialize = "cloud_base_m")]
    CloudBase,
    /// Cloud top altitude (m)
    #[strum(serialize = "cloud_top_m")]
    CloudTop,
    /// Cloud top temperature (C)
    #[strum(serialize = "cloud_top_temp_c")]
    CloudTopTemperature,
    /// Radar reflectivity (dBZ)
    #[strum(serialize = "radar_reflectivity_dbz")]
    Reflectivity,
    /// Precipitation rate (mm/h)
    #[strum(serialize = "precip_rate_mm_h")]
    PrecipRate,
    /// Relative humidity (%)
    #[strum(serialize = "rel_humidity_pct")]
    RelHumidity,
    /// Wind speed (m/s)
    #[strum(serialize = "wind_speed_m_s")]
    WindSpeed,
    /// Electrical activity flag
    #[strum(serialize = "lightning")]
    Lightning,
    /// Precipitable water (mm)
    #[strum(serialize = "precipitable_water_mm")]
    PrecipitableWater,
    /// Target latitude, not used in the decision.
    #[strum(serialize = "lat")]
    Latitude,
    /// Target longitude, not used in the decision.
    #[strum(serialize = "lon")]
    Longitude,
}

impl ObservationField {
    /// The field name as it appears in forms and file headers.
    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The measurements describing a cloud that is a candidate for seeding.
///
/// Values that may be missing are stored as `Optioned`, a missing value is never the same as a
/// zero. Precipitation rate, relative humidity, wind speed, and lightning always have a value and
/// fall back to a default when not supplied:
///
/// | value             | default   |
/// |-------------------|-----------|
/// | precipitation     | 0 mm/h    |
/// | relative humidity | 80 %      |
/// | wind speed        | 5 m/s     |
/// | lightning         | false     |
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    // Cloud geometry
    cloud_base: Optioned<Meters>,
    cloud_top: Optioned<Meters>,
    cloud_top_temperature: Optioned<Celsius>,

    // Radar, dBZ
    reflectivity: Optioned<f64>,

    // Environment
    precip_rate: Mm,
    rel_humidity: f64,
    wind_speed: MetersPSec,
    lightning: bool,
    precipitable_water: Optioned<Mm>,

    // Target location, carried along for the caller.
    target_lat: Optioned<f64>,
    target_lon: Optioned<f64>,
}

/// Default precipitation rate, mm/h.
const DEFAULT_PRECIP_RATE: Mm = Mm(0.0);
/// Default relative humidity, percent.
const DEFAULT_REL_HUMIDITY: f64 = 80.0;
/// Default wind speed, m/s.
const DEFAULT_WIND_SPEED: MetersPSec = MetersPSec(5.0);

impl Default for Observation {
    fn default() -> Self {
        Observation {
            cloud_base: none(),
            cloud_top: none(),
            cloud_top_temperature: none(),
            reflectivity: none(),
            precip_rate: DEFAULT_PRECIP_RATE,
            rel_humidity: DEFAULT_REL_HUMIDITY,
            wind_speed: DEFAULT_WIND_SPEED,
            lightning: false,
            precipitable_water: none(),
            target_lat: none(),
            target_lon: none(),
        }
    }
}

impl Observation {
    /// Create a new observation with default values. This is a proxy for default with a clearer
    /// name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::Observation;
    ///
    /// let obs = Observation::new();
    /// assert!(obs.cloud_base().is_none());
    /// assert!(obs.reflectivity().is_none());
    /// assert_eq!(obs.rel_humidity(), 80.0);
    /// assert!(!obs.lightning());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Observation::default()
    }

    /// Builder method for the cloud base altitude.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::Observation;
    /// use metfor::{Feet, Meters};
    /// use optional::{none, some};
    ///
    /// let _obs = Observation::new().with_cloud_base(Meters(1000.0));
    /// let _obs = Observation::new().with_cloud_base(Feet(3000.0));
    /// let _obs = Observation::new().with_cloud_base(some(Meters(1000.0)));
    /// let obs = Observation::new().with_cloud_base(none::<Meters>());
    /// assert!(obs.cloud_base().is_none());
    /// ```
    #[inline]
    pub fn with_cloud_base<T, U>(mut self, base: T) -> Self
    where
        Optioned<U>: From<T>,
        U: optional::Noned + metfor::Length,
        Meters: From<U>,
    {
        let base: Optioned<U> = Optioned::from(base);
        self.cloud_base = base.map_t(Meters::from);
        self
    }

    /// Builder method for the cloud top altitude.
    ///
    /// See `with_cloud_base` for an example of usage.
    #[inline]
    pub fn with_cloud_top<T, U>(mut self, top: T) -> Self
    where
        Optioned<U>: From<T>,
        U: optional::Noned + metfor::Length,
        Meters: From<U>,
    {
        let top: Optioned<U> = Optioned::from(top);
        self.cloud_top = top.map_t(Meters::from);
        self
    }

    /// Builder method for the cloud top temperature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::Observation;
    /// use metfor::Celsius;
    /// use optional::none;
    ///
    /// let obs = Observation::new().with_cloud_top_temperature(Celsius(-10.0));
    /// assert_eq!(obs.cloud_top_temperature().unwrap(), Celsius(-10.0));
    ///
    /// let obs = obs.with_cloud_top_temperature(none::<Celsius>());
    /// assert!(obs.cloud_top_temperature().is_none());
    /// ```
    #[inline]
    pub fn with_cloud_top_temperature<T, U>(mut self, temperature: T) -> Self
    where
        Optioned<U>: From<T>,
        U: optional::Noned + metfor::Temperature,
        Celsius: From<U>,
    {
        let temperature: Optioned<U> = Optioned::from(temperature);
        self.cloud_top_temperature = temperature.map_t(Celsius::from);
        self
    }

    /// Builder method for the radar reflectivity in dBZ.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::Observation;
    ///
    /// assert_eq!(Observation::new().with_reflectivity(15.0).reflectivity().unwrap(), 15.0);
    /// assert!(Observation::new().with_reflectivity(None).reflectivity().is_none());
    /// ```
    #[inline]
    pub fn with_reflectivity<T>(mut self, dbz: T) -> Self
    where
        Optioned<f64>: From<T>,
    {
        self.reflectivity = Optioned::from(dbz);
        self
    }

    /// Builder method for the precipitation rate, given as the accumulation over one hour.
    #[inline]
    pub fn with_precip_rate<T>(mut self, hourly_precipitation: T) -> Self
    where
        T: Into<Mm>,
    {
        self.precip_rate = hourly_precipitation.into();
        self
    }

    /// Builder method for the relative humidity in percent.
    #[inline]
    pub fn with_rel_humidity(mut self, rh: f64) -> Self {
        self.rel_humidity = rh;
        self
    }

    /// Builder method for the wind speed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::Observation;
    /// use metfor::{Knots, MetersPSec};
    ///
    /// let obs = Observation::new().with_wind_speed(MetersPSec(3.0));
    /// assert_eq!(obs.wind_speed(), MetersPSec(3.0));
    ///
    /// let obs = Observation::new().with_wind_speed(Knots(20.0));
    /// assert!(obs.wind_speed() > MetersPSec(10.0));
    /// ```
    #[inline]
    pub fn with_wind_speed<T>(mut self, speed: T) -> Self
    where
        T: Into<MetersPSec>,
    {
        self.wind_speed = speed.into();
        self
    }

    /// Builder method for the electrical activity flag.
    #[inline]
    pub fn with_lightning(mut self, lightning: bool) -> Self {
        self.lightning = lightning;
        self
    }

    /// Builder method for the precipitable water.
    #[inline]
    pub fn with_precipitable_water<T>(mut self, pw: T) -> Self
    where
        Optioned<Mm>: From<T>,
    {
        self.precipitable_water = Optioned::from(pw);
        self
    }

    /// Builder method for the target latitude and longitude.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::Observation;
    ///
    /// let obs = Observation::new().with_target((-23.5, -46.6));
    /// assert_eq!(obs.target().unwrap(), (-23.5, -46.6));
    ///
    /// let obs = obs.with_target(None);
    /// assert!(obs.target().is_none());
    /// ```
    #[inline]
    pub fn with_target<T>(mut self, coords: T) -> Self
    where
        Option<(f64, f64)>: From<T>,
    {
        let coords: Option<(f64, f64)> = Option::from(coords);
        self.target_lat = coords.map(|(lat, _)| lat).into();
        self.target_lon = coords.map(|(_, lon)| lon).into();
        self
    }

    /// Set a value by its field name, using the units in the field name.
    ///
    /// A `None` value clears optional fields and restores the default for fields that have one.
    /// Lightning is set for any non-zero value. Latitude and longitude are stored independently,
    /// see [`target`](Observation::target) for how a single half is reported.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cloud_seeding::{Observation, ObservationField};
    /// use metfor::Meters;
    ///
    /// let obs = Observation::new()
    ///     .with_value(ObservationField::CloudBase, Some(1200.0))
    ///     .with_value(ObservationField::Lightning, Some(1.0))
    ///     .with_value(ObservationField::RelHumidity, None);
    ///
    /// assert_eq!(obs.cloud_base().unwrap(), Meters(1200.0));
    /// assert!(obs.lightning());
    /// assert_eq!(obs.rel_humidity(), 80.0);
    /// ```
    pub fn with_value(mut self, field: ObservationField, value: Option<f64>) -> Self {
        use ObservationField::*;

        match field {
            CloudBase => self.cloud_base = value.map(Meters).into(),
            CloudTop => self.cloud_top = value.map(Meters).into(),
            CloudTopTemperature => self.cloud_top_temperature = value.map(Celsius).into(),
            Reflectivity => self.reflectivity = value.into(),
            PrecipRate => self.precip_rate = value.map(Mm).unwrap_or(DEFAULT_PRECIP_RATE),
            RelHumidity => self.rel_humidity = value.unwrap_or(DEFAULT_REL_HUMIDITY),
            WindSpeed => self.wind_speed = value.map(MetersPSec).unwrap_or(DEFAULT_WIND_SPEED),
            Lightning => self.lightning = value.map(|v| v != 0.0).unwrap_or(false),
            PrecipitableWater => self.precipitable_water = value.map(Mm).into(),
            Latitude => self.target_lat = value.into(),
            Longitude => self.target_lon = value.into(),
        }

        self
    }

    /// Cloud base altitude.
    #[inline]
    pub fn cloud_base(&self) -> Optioned<Meters> {
        self.cloud_base
    }

    /// Cloud top altitude.
    #[inline]
    pub fn cloud_top(&self) -> Optioned<Meters> {
        self.cloud_top
    }

    /// Cloud top temperature.
    #[inline]
    pub fn cloud_top_temperature(&self) -> Optioned<Celsius> {
        self.cloud_top_temperature
    }

    /// Radar reflectivity in dBZ.
    #[inline]
    pub fn reflectivity(&self) -> Optioned<f64> {
        self.reflectivity
    }

    /// Precipitation over the last hour.
    #[inline]
    pub fn precip_rate(&self) -> Mm {
        self.precip_rate
    }

    /// Relative humidity in percent.
    #[inline]
    pub fn rel_humidity(&self) -> f64 {
        self.rel_humidity
    }

    /// Wind speed.
    #[inline]
    pub fn wind_speed(&self) -> MetersPSec {
        self.wind_speed
    }

    /// Electrical activity flag.
    #[inline]
    pub fn lightning(&self) -> bool {
        self.lightning
    }

    /// Precipitable water.
    #[inline]
    pub fn precipitable_water(&self) -> Optioned<Mm> {
        self.precipitable_water
    }

    /// Target latitude and longitude. A half that was never supplied is `NaN`.
    #[inline]
    pub fn target(&self) -> Option<(f64, f64)> {
        if self.target_lat.is_none() && self.target_lon.is_none() {
            None
        } else {
            Some((self.target_lat.unpack(), self.target_lon.unpack()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_field_names_round_trip() {
        for field in ObservationField::iter() {
            assert_eq!(field, field.name().parse::<ObservationField>().unwrap());
            assert_eq!(field.to_string(), field.name());
        }
        assert!("cloud_base".parse::<ObservationField>().is_err());
    }

    #[test]
    fn test_absent_is_not_zero() {
        let obs = Observation::new().with_value(ObservationField::CloudBase, Some(0.0));
        assert_eq!(obs.cloud_base().into_option(), Some(Meters(0.0)));

        let obs = obs.with_value(ObservationField::CloudBase, None);
        assert!(obs.cloud_base().is_none());
    }

    #[test]
    fn test_defaults_restored() {
        let obs = Observation::new()
            .with_value(ObservationField::PrecipRate, Some(12.0))
            .with_value(ObservationField::WindSpeed, Some(9.0))
            .with_value(ObservationField::RelHumidity, Some(35.0));
        assert_eq!(obs.precip_rate(), Mm(12.0));
        assert_eq!(obs.wind_speed(), MetersPSec(9.0));
        assert_eq!(obs.rel_humidity(), 35.0);

        let obs = obs
            .with_value(ObservationField::PrecipRate, None)
            .with_value(ObservationField::WindSpeed, None)
            .with_value(ObservationField::RelHumidity, None);
        assert_eq!(obs, Observation::new());
    }

    #[test]
    fn test_lightning_from_number() {
        let obs = Observation::new();
        assert!(obs.with_value(ObservationField::Lightning, Some(1.0)).lightning());
        assert!(obs.with_value(ObservationField::Lightning, Some(-2.0)).lightning());
        assert!(!obs.with_value(ObservationField::Lightning, Some(0.0)).lightning());
        assert!(!obs.with_value(ObservationField::Lightning, None).lightning());
    }

    #[test]
    fn test_target_from_halves() {
        let obs = Observation::new().with_value(ObservationField::Latitude, Some(-23.5));
        let (lat, lon) = obs.target().unwrap();
        assert_eq!(lat, -23.5);
        assert!(lon.is_nan());

        let obs = obs.with_value(ObservationField::Longitude, Some(-46.6));
        assert_eq!(obs.target().unwrap(), (-23.5, -46.6));

        let obs = obs
            .with_value(ObservationField::Latitude, None)
            .with_value(ObservationField::Longitude, None);
        assert!(obs.target().is_none());
    }

    #[test]
    fn test_half_target_equals_itself() {
        let obs = Observation::new().with_value(ObservationField::Latitude, Some(-23.5));
        assert_eq!(obs, obs);

        let other = Observation::new().with_value(ObservationField::Latitude, Some(-23.5));
        assert_eq!(obs, other);
        assert_ne!(
            obs,
            other.with_value(ObservationField::Longitude, Some(-46.6))
        );
    }
}
