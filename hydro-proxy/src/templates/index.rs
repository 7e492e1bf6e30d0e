use serde_derive::Serialize;
use serde_json::Value;

use crate::stations::{display_value, StationRecord};

#[derive(Serialize)]
pub struct IndexView {
    /// Banner text; empty when the station list loaded fine.
    pub error: String,
    pub stations: Vec<StationView>
}

#[derive(Serialize, Debug)]
pub struct MeasureView {
    pub parameter_name: String,
    pub parameter: String,
    pub period: String,
    pub qualifier: String,
    pub unit_name: String
}
impl<'a> From<&'a Value> for MeasureView {
    fn from(m: &'a Value) -> Self {
        let get = |key: &str| m.get(key).map(display_value).unwrap_or_default();
        MeasureView {
            parameter_name: get("parameterName"),
            parameter: get("parameter"),
            period: get("period"),
            qualifier: get("qualifier"),
            unit_name: get("unitName")
        }
    }
}

#[derive(Serialize, Debug)]
pub struct StationView {
    pub label: String,
    pub station_reference: String,
    pub town: String,
    pub river_name: String,
    pub date_opened: String,
    pub status: String,
    pub rloi_id: String,
    pub notation: String,
    pub wiski_id: String,
    pub lat: String,
    pub long: String,
    pub easting: String,
    pub northing: String,
    pub catchment_name: String,
    pub measures: Vec<MeasureView>,
    pub stage_scale: String,
    pub downstage_scale: String,
    pub status_reason: String,
    pub status_date: String
}
impl From<StationRecord> for StationView {
    fn from(rec: StationRecord) -> Self {
        let opt = |v: &Option<Value>| v.as_ref().map(display_value).unwrap_or_default();
        StationView {
            lat: opt(&rec.lat),
            long: opt(&rec.long),
            easting: opt(&rec.easting),
            northing: opt(&rec.northing),
            measures: rec.measures.iter().map(MeasureView::from).collect(),
            stage_scale: display_value(&rec.stage_scale),
            downstage_scale: display_value(&rec.downstage_scale),
            label: rec.label,
            station_reference: rec.station_reference,
            town: rec.town,
            river_name: rec.river_name,
            date_opened: rec.date_opened,
            status: rec.status,
            rloi_id: rec.rloi_id,
            notation: rec.notation,
            wiski_id: rec.wiski_id,
            catchment_name: rec.catchment_name,
            status_reason: rec.status_reason,
            status_date: rec.status_date
        }
    }
}
