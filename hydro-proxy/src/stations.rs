//! Normalizing raw upstream station objects for display.
//!
//! The JSON API hands upstream data through untouched; only the HTML
//! listing goes through `project_station`. Missing (or null) fields get
//! fixed defaults so rendering never has to care what upstream left out.

use serde_derive::Serialize;
use serde_json::{Map, Value};

/// Label used when a station has none.
pub const NO_NAME: &str = "No Name";

/// The subset of a station that the listing page shows.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub label: String,
    pub station_reference: String,
    pub town: String,
    pub river_name: String,
    pub date_opened: String,
    pub status: String,
    #[serde(rename = "RLOIid")]
    pub rloi_id: String,
    pub notation: String,
    #[serde(rename = "wiskiID")]
    pub wiski_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easting: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub northing: Option<Value>,
    pub catchment_name: String,
    pub measures: Vec<Value>,
    pub stage_scale: Value,
    pub downstage_scale: Value,
    pub status_reason: String,
    pub status_date: String
}

/// Look up `key`, treating JSON null the same as absence.
fn field<'a>(item: &'a Value, key: &str) -> Option<&'a Value> {
    item.get(key).filter(|v| !v.is_null())
}

fn text(item: &Value, key: &str, default: &str) -> String {
    field(item, key)
        .map(display_value)
        .unwrap_or_else(|| default.to_owned())
}

fn measures(item: &Value) -> Vec<Value> {
    match field(item, "measures") {
        Some(Value::Array(ms)) => ms.clone(),
        // Stations with a single measure sometimes get an object, not a list.
        Some(m @ Value::Object(_)) => vec![m.clone()],
        _ => vec![]
    }
}

fn scale(item: &Value, key: &str) -> Value {
    field(item, key)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Render a JSON value as display text: strings verbatim, null as nothing,
/// anything else as JSON.
pub fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        v => v.to_string()
    }
}

/// Project one raw station object; `None` if it has no station reference.
pub fn project_station(item: &Value) -> Option<StationRecord> {
    let station_reference = text(item, "stationReference", "");
    if station_reference.is_empty() {
        return None;
    }
    Some(StationRecord {
        label: text(item, "label", NO_NAME),
        station_reference,
        town: text(item, "town", ""),
        river_name: text(item, "riverName", ""),
        date_opened: text(item, "dateOpened", ""),
        status: text(item, "status", ""),
        rloi_id: text(item, "RLOIid", ""),
        notation: text(item, "notation", ""),
        wiski_id: text(item, "wiskiID", ""),
        lat: field(item, "lat").cloned(),
        long: field(item, "long").cloned(),
        easting: field(item, "easting").cloned(),
        northing: field(item, "northing").cloned(),
        catchment_name: text(item, "catchmentName", ""),
        measures: measures(item),
        stage_scale: scale(item, "stageScale"),
        downstage_scale: scale(item, "downstageScale"),
        status_reason: text(item, "statusReason", ""),
        status_date: text(item, "statusDate", "")
    })
}

/// Project a list of raw stations, keeping upstream order and dropping
/// those without a reference.
pub fn project_stations(items: &[Value]) -> Vec<StationRecord> {
    items.iter()
        .filter_map(project_station)
        .collect()
}
