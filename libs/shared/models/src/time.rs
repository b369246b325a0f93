//! Wire format helpers for wall-clock slot times (`"HH:MM"`).

pub mod hh_mm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    /// Slots are whole minutes; seconds from "HH:MM:SS" input are dropped.
    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map(truncate)
    }

    pub fn truncate(time: NaiveTime) -> NaiveTime {
        time.with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time)
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "super::hh_mm")]
        at: NaiveTime,
    }

    #[test]
    fn reads_minutes_and_seconds_forms() {
        let short: Slot = serde_json::from_str(r#"{"at":"10:00"}"#).unwrap();
        let long: Slot = serde_json::from_str(r#"{"at":"10:00:00"}"#).unwrap();
        assert_eq!(short.at, long.at);
        assert_eq!(serde_json::to_string(&short).unwrap(), r#"{"at":"10:00"}"#);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Slot>(r#"{"at":"ten"}"#).is_err());
    }

    #[test]
    fn drops_seconds_so_slots_compare_by_minute() {
        let with_seconds: Slot = serde_json::from_str(r#"{"at":"10:00:30"}"#).unwrap();
        assert_eq!(with_seconds.at, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(super::hh_mm::parse("09:15:59").unwrap(), NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }
}
