//! Serde model of the CWA township-forecast payload.
//!
//! Only the parts the transformer reads are modelled. Containers that are
//! missing or `null` deserialize as empty so structural gaps surface as
//! "not found" rather than as parse errors.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Top-level response body of `/api/v1/rest/datastore/{dataset_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Records,
}

#[derive(Debug, Default, Deserialize)]
pub struct Records {
    #[serde(rename = "Locations", default, deserialize_with = "null_as_default")]
    pub regions: Vec<Region>,
}

/// One administrative region (city or county).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Region {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dataset_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations_name: String,
    #[serde(rename = "Location", default, deserialize_with = "null_as_default")]
    pub districts: Vec<District>,
}

/// One sub-location (township or district) inside a region.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct District {
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weather_element: Vec<WeatherElement>,
}

/// A named series such as `溫度` or `風速`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherElement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub element_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: Vec<TimeEntry>,
}

/// One entry of a series. Interval elements carry `StartTime`/`EndTime`,
/// point elements carry `DataTime`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeEntry {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub data_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub element_value: Vec<Map<String, Value>>,
}

impl TimeEntry {
    /// Reads `field` from the first `ElementValue` object.
    ///
    /// Strings are returned as-is and numbers in their JSON form; anything
    /// else, including a missing wrapper or field, reads as an empty string.
    pub fn value(&self, field: &str) -> String {
        match self.element_value.first().and_then(|v| v.get(field)) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a JSON-encoded [`ForecastPayload`] from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON or a field has the wrong shape.
pub fn parse_payload(bytes: &[u8]) -> Result<ForecastPayload, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_payload() {
        let body = r#"{
            "success": "true",
            "records": {
                "Locations": [{
                    "DatasetDescription": "臺灣各縣市鄉鎮未來3天天氣預報",
                    "LocationsName": "臺北市",
                    "Location": [{
                        "LocationName": "中正區",
                        "WeatherElement": [{
                            "ElementName": "溫度",
                            "Time": [{
                                "DataTime": "2025-01-01T06:00:00+08:00",
                                "ElementValue": [{ "Temperature": "18" }]
                            }]
                        }]
                    }]
                }]
            }
        }"#;

        let payload = parse_payload(body.as_bytes()).unwrap();
        let region = &payload.records.regions[0];
        assert_eq!(region.locations_name, "臺北市");
        assert_eq!(region.districts[0].location_name, "中正區");

        let element = &region.districts[0].weather_element[0];
        assert_eq!(element.element_name, "溫度");
        assert_eq!(element.time[0].value("Temperature"), "18");
        assert_eq!(element.time[0].start_time, None);
    }

    #[test]
    fn test_parse_empty_object_returns_default() {
        let payload = parse_payload(b"{}").unwrap();
        assert!(payload.records.regions.is_empty());
    }

    #[test]
    fn test_parse_null_containers() {
        let payload = parse_payload(br#"{"records": {"Locations": null}}"#).unwrap();
        assert!(payload.records.regions.is_empty());

        let payload = parse_payload(br#"{"records": null}"#).unwrap();
        assert!(payload.records.regions.is_empty());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        assert!(parse_payload(b"<html>").is_err());
    }

    #[test]
    fn test_value_reads_numbers_and_ignores_other_types() {
        let entry: TimeEntry = serde_json::from_str(
            r#"{"ElementValue": [{"WindSpeed": 3, "Flag": true}, {"WindSpeed": "9"}]}"#,
        )
        .unwrap();

        assert_eq!(entry.value("WindSpeed"), "3");
        assert_eq!(entry.value("Flag"), "");
        assert_eq!(entry.value("Missing"), "");
    }

    #[test]
    fn test_value_without_wrapper_is_empty() {
        let entry = TimeEntry::default();
        assert_eq!(entry.value("Temperature"), "");
    }
}
