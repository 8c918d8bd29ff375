use super::{
    announce, parse_items, split_item, BatchReport, BatchSummary, DataStream, PriorityKind,
    PriorityRules, StreamIdentity, StreamSettings,
};
use crate::error::NexusResult;

/// Environmental sensor readings in `type:value` form
///
/// Averages the readings whose type starts with `temp`; the average is `0.0`
/// when the batch holds no temperature reading.
pub struct SensorStream {
    identity: StreamIdentity,
    settings: StreamSettings,
}

impl SensorStream {
    pub const STREAM_TYPE: &'static str = "Environmental Data";

    pub fn new(stream_id: impl Into<String>) -> Self {
        Self::with_settings(stream_id, StreamSettings::default())
    }

    pub fn with_settings(stream_id: impl Into<String>, settings: StreamSettings) -> Self {
        let identity = StreamIdentity::new(stream_id, Self::STREAM_TYPE);
        announce("Sensor", &identity, &settings);
        Self { identity, settings }
    }
}

fn parse_reading(item: &str) -> Option<(String, f64)> {
    let (kind, value) = split_item(item)?;
    let value = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((kind.to_string(), value))
}

impl DataStream for SensorStream {
    fn identity(&self) -> &StreamIdentity {
        &self.identity
    }

    fn process_batch(&self, items: &[String]) -> NexusResult<BatchSummary> {
        let notifier = self.settings.notifier();
        notifier.notice(&format!("Processing sensor batch: [{}]", items.join(", ")));

        let (readings, skipped) =
            parse_items(&self.identity, self.settings.malformed_items, items, parse_reading)?;

        let temps: Vec<f64> = readings
            .iter()
            .filter(|(kind, _)| kind.starts_with("temp"))
            .map(|(_, value)| *value)
            .collect();
        let avg_temp = if temps.is_empty() {
            0.0
        } else {
            temps.iter().sum::<f64>() / temps.len() as f64
        };

        let summary = BatchSummary::new(
            &self.identity,
            items.len(),
            skipped,
            BatchReport::Sensor {
                avg_temp,
                temp_readings: temps.len(),
            },
        );
        notifier.notice(&summary.to_string());
        Ok(summary)
    }

    fn priority_kind(&self) -> PriorityKind {
        PriorityKind::SensorAlert
    }

    /// Temperature readings outside the normal band
    fn is_priority(&self, item: &str, rules: &PriorityRules) -> bool {
        parse_reading(item)
            .map(|(kind, value)| kind.starts_with("temp") && rules.is_abnormal_temp(value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{to_batch, MalformedItemPolicy};

    fn stream() -> SensorStream {
        SensorStream::with_settings("SENSOR_001", StreamSettings::silent())
    }

    #[test]
    fn test_average_temperature() {
        let summary = stream()
            .process_batch(&to_batch(&["temp:22.5", "humidity:65", "pressure:1013"]))
            .unwrap();

        assert_eq!(summary.items, 3);
        assert_eq!(
            summary.report,
            BatchReport::Sensor {
                avg_temp: 22.5,
                temp_readings: 1
            }
        );
        assert_eq!(
            summary.to_string(),
            "Sensor analysis: 3 readings processed, avg temp: 22.5°C"
        );
    }

    #[test]
    fn test_averages_several_temperatures() {
        let summary = stream()
            .process_batch(&to_batch(&["temp:20", "temperature:30", "humidity:40"]))
            .unwrap();
        assert_eq!(
            summary.report,
            BatchReport::Sensor {
                avg_temp: 25.0,
                temp_readings: 2
            }
        );
    }

    #[test]
    fn test_no_temperature_reads_zero() {
        let summary = stream()
            .process_batch(&to_batch(&["humidity:65", "pressure:1013"]))
            .unwrap();
        assert_eq!(
            summary.to_string(),
            "Sensor analysis: 2 readings processed, avg temp: 0.0°C"
        );
    }

    #[test]
    fn test_empty_batch() {
        let summary = stream().process_batch(&[]).unwrap();
        assert_eq!(summary.items, 0);
        assert_eq!(
            summary.report,
            BatchReport::Sensor {
                avg_temp: 0.0,
                temp_readings: 0
            }
        );
    }

    #[test]
    fn test_malformed_reading_is_skipped_but_counted() {
        let summary = stream()
            .process_batch(&to_batch(&["temp:abc", "temp:30", "noise"]))
            .unwrap();

        assert_eq!(summary.items, 3);
        assert_eq!(summary.skipped, 2);
        assert_eq!(
            summary.report,
            BatchReport::Sensor {
                avg_temp: 30.0,
                temp_readings: 1
            }
        );
    }

    #[test]
    fn test_fail_fast_rejects_batch() {
        let stream = SensorStream::with_settings(
            "SENSOR_002",
            StreamSettings::silent().with_policy(MalformedItemPolicy::FailFast),
        );
        assert!(stream.process_batch(&to_batch(&["temp:20", "broken"])).is_err());
    }

    #[test]
    fn test_identity() {
        let stream = stream();
        assert_eq!(stream.stream_id(), "SENSOR_001");
        assert_eq!(stream.stream_type(), "Environmental Data");
    }

    #[test]
    fn test_filter_keeps_abnormal_temperatures() {
        let kept = stream().filter_batch(
            &to_batch(&["temp:35", "temp:22.5", "humidity:95", "temp:5", "temp:bad"]),
            &PriorityRules::default(),
        );
        assert_eq!(kept.kind, PriorityKind::SensorAlert);
        assert_eq!(kept.items, vec!["temp:35", "temp:5"]);
        assert_eq!(kept.describe(), "2 critical sensor alerts");
    }
}
