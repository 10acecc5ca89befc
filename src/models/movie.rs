use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie record, as exchanged over HTTP and persisted in the store
///
/// `movie_id` may be omitted from request bodies: create rejects an empty id,
/// update overwrites it with the id from the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Movie {
    #[serde(default)]
    pub movie_id: String,
    pub title: String,
    pub budget: i64,
    #[serde(with = "release_date")]
    pub release_date: NaiveDate,
    pub revenue: i64,
    pub runtime: i64,
    pub vote_average: f64,
    pub vote_count: i64,
}

/// Calendar dates travel as `YYYY-MM-DD`. RFC 3339 timestamps are accepted on
/// input and reduced to their UTC date.
pub mod release_date {
    use chrono::{DateTime, Datelike, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Result<NaiveDate, String> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc).date_naive())
            .map_err(|_| {
                format!(
                    "invalid release-date {:?}: expected YYYY-MM-DD or an RFC 3339 timestamp",
                    raw
                )
            })
    }

    /// 0001-01-01, the zero timestamp some clients send for "no date"
    pub fn is_zero(date: &NaiveDate) -> bool {
        date.year() == 1 && date.ordinal() == 1
    }

    pub fn format(date: &NaiveDate) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}
