//! Rendering of forecasts and location tables for the CLI.

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use crate::forecast::ForecastResult;
use crate::locations::Location;

/// Logs a forecast using Rust's debug pretty-print format.
pub fn print_pretty(result: &ForecastResult) {
    debug!("{:#?}", result);
}

/// Writes a forecast as JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, result: &ForecastResult, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, result)?;
    } else {
        serde_json::to_writer(&mut writer, result)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Writes one `name<TAB>dataset_id` line per location, marking `default`.
pub fn write_locations<W: Write>(mut writer: W, default: Location) -> Result<()> {
    for location in Location::all() {
        let marker = if location == default { "\t(default)" } else { "" };
        writeln!(writer, "{}\t{}{}", location.name(), location.dataset_id(), marker)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastPeriod;

    fn sample() -> ForecastResult {
        ForecastResult {
            city: "臺北市".into(),
            district: "中正區".into(),
            description: "desc".into(),
            forecasts: vec![ForecastPeriod {
                temperature: "20°C".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample());
    }

    #[test]
    fn test_write_json_compact_is_one_line() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample(), false).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);

        let parsed: ForecastResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_write_json_pretty_spans_lines() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample(), true).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().count() > 1);
        assert!(text.contains("\"temperature\": \"20°C\""));
    }

    #[test]
    fn test_write_locations_marks_default() {
        let mut buf = Vec::new();
        write_locations(&mut buf, Location::default()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 22);

        let marked: Vec<_> = text.lines().filter(|l| l.ends_with("(default)")).collect();
        assert_eq!(marked, ["臺北市\tF-D0047-061\t(default)"]);
    }
}
