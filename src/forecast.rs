//! Reshapes a CWA payload into a flat list of forecast periods.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ForecastError;
use crate::parser::{ForecastPayload, TimeEntry};

/// Master timeline: its length decides how many periods are produced.
pub const WEATHER_PHENOMENON: &str = "天氣現象";
pub const RAIN_PROBABILITY: &str = "3小時降雨機率";
pub const TEMPERATURE: &str = "溫度";
pub const APPARENT_TEMPERATURE: &str = "體感溫度";
pub const DEW_POINT: &str = "露點溫度";
pub const COMFORT_INDEX: &str = "舒適度指數";
pub const WIND_DIRECTION: &str = "風向";
pub const WIND_SPEED: &str = "風速";
pub const RELATIVE_HUMIDITY: &str = "相對濕度";
pub const WEATHER_DESCRIPTION: &str = "天氣預報綜合描述";

const CELSIUS: &str = "°C";
const PERCENT: &str = "%";
const METERS_PER_SECOND: &str = " m/s";

/// One forecast time window. Attributes the upstream omitted are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub start_time: String,
    pub end_time: String,
    pub weather: String,
    pub weather_code: String,
    pub rain_probability: String,
    pub temperature: String,
    pub apparent_temperature: String,
    pub dew_point: String,
    pub comfort_index: String,
    pub wind_direction: String,
    pub wind_speed: String,
    pub humidity: String,
    pub description: String,
}

/// Simplified forecast for the first district of one region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub city: String,
    pub district: String,
    pub description: String,
    pub forecasts: Vec<ForecastPeriod>,
}

/// A possibly missing element series, read by position.
#[derive(Clone, Copy, Default)]
struct Series<'a>(&'a [TimeEntry]);

impl Series<'_> {
    fn len(&self) -> usize {
        self.0.len()
    }

    /// `field` of entry `i`, or empty when the series is shorter than `i`.
    fn text(&self, i: usize, field: &str) -> String {
        match self.0.get(i) {
            Some(entry) => entry.value(field),
            None => String::new(),
        }
    }

    /// Like [`Series::text`] but with `unit` appended to non-empty values.
    fn measure(&self, i: usize, field: &str, unit: &str) -> String {
        let raw = self.text(i, field);
        if raw.is_empty() {
            raw
        } else {
            format!("{raw}{unit}")
        }
    }
}

impl ForecastResult {
    /// Builds the result for `city` from the first region and first district
    /// of `payload`.
    ///
    /// Every element series is aligned to the `天氣現象` series by index, not by
    /// timestamp. Shorter or missing series yield empty attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::NotFound`] if the payload has no region or the
    /// region has no district.
    pub fn from_payload(payload: &ForecastPayload, city: &str) -> Result<Self, ForecastError> {
        let not_found = || ForecastError::NotFound(city.to_string());
        let region = payload.records.regions.first().ok_or_else(not_found)?;
        let district = region.districts.first().ok_or_else(not_found)?;

        let elements: HashMap<&str, Series> = district
            .weather_element
            .iter()
            .map(|e| (e.element_name.as_str(), Series(&e.time)))
            .collect();
        let series = |name: &str| elements.get(name).copied().unwrap_or_default();

        let weather = series(WEATHER_PHENOMENON);
        let rain = series(RAIN_PROBABILITY);
        let temperature = series(TEMPERATURE);
        let apparent = series(APPARENT_TEMPERATURE);
        let dew_point = series(DEW_POINT);
        let comfort = series(COMFORT_INDEX);
        let wind_direction = series(WIND_DIRECTION);
        let wind_speed = series(WIND_SPEED);
        let humidity = series(RELATIVE_HUMIDITY);
        let description = series(WEATHER_DESCRIPTION);

        let forecasts = weather
            .0
            .iter()
            .enumerate()
            .map(|(i, entry)| ForecastPeriod {
                start_time: entry
                    .start_time
                    .clone()
                    .or_else(|| entry.data_time.clone())
                    .unwrap_or_default(),
                end_time: entry.end_time.clone().unwrap_or_default(),
                weather: weather.text(i, "Weather"),
                weather_code: weather.text(i, "WeatherCode"),
                rain_probability: rain.measure(i, "ProbabilityOfPrecipitation", PERCENT),
                temperature: temperature.measure(i, "Temperature", CELSIUS),
                apparent_temperature: apparent.measure(i, "ApparentTemperature", CELSIUS),
                dew_point: dew_point.measure(i, "DewPoint", CELSIUS),
                comfort_index: comfort.text(i, "ComfortIndexDescription"),
                wind_direction: wind_direction.text(i, "WindDirection"),
                wind_speed: wind_speed.measure(i, "WindSpeed", METERS_PER_SECOND),
                humidity: humidity.measure(i, "RelativeHumidity", PERCENT),
                description: description.text(i, "WeatherDescription"),
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(forecasts.len(), weather.len());

        Ok(Self {
            city: city.to_string(),
            district: district.location_name.clone(),
            description: region.dataset_description.clone(),
            forecasts,
        })
    }
}
