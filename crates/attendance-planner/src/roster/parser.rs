use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One CSV row as exported by the attendance tracker, before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterRow {
    #[serde(rename = "Subject ID")]
    pub(crate) subject_id: String,
    #[serde(rename = "Subject")]
    pub(crate) subject: String,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    pub(crate) category: Option<String>,
    #[serde(rename = "Weekly Classes", default)]
    pub(crate) weekly_classes: Option<u32>,
    #[serde(rename = "Total")]
    pub(crate) total: u32,
    #[serde(rename = "Attended")]
    pub(crate) attended: u32,
    #[serde(rename = "Remaining", default)]
    pub(crate) remaining: Option<u32>,
    #[serde(
        rename = "Preference",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) preference: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RosterRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        rows.push(record?);
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
