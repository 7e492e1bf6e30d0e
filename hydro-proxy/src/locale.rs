//! Display labels for the station listing, in each supported language.

use serde_derive::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Zh
}
impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}
impl Locale {
    /// Parse a language code, as used in `?lang=` and the `locale` setting;
    /// `None` if unsupported.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None
        }
    }
    /// The `lang` attribute for the rendered page.
    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh-CN"
        }
    }
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Labels {
    pub title: &'static str,
    pub heading: &'static str,
    pub fetch_failed: &'static str,
    pub name: &'static str,
    pub station_reference: &'static str,
    pub town: &'static str,
    pub river: &'static str,
    pub date_opened: &'static str,
    pub status: &'static str,
    pub rloi_id: &'static str,
    pub notation: &'static str,
    pub wiski_id: &'static str,
    pub coordinates: &'static str,
    pub grid_coordinates: &'static str,
    pub easting: &'static str,
    pub northing: &'static str,
    pub catchment: &'static str,
    pub measures: &'static str,
    pub period: &'static str,
    pub seconds: &'static str,
    pub qualifier: &'static str,
    pub unit: &'static str,
    pub stage_scale: &'static str,
    pub downstage_scale: &'static str,
    pub status_reason: &'static str,
    pub status_date: &'static str,
    pub not_found: &'static str
}

static EN: Labels = Labels {
    title: "Station List - Backend Test",
    heading: "Station List",
    fetch_failed: "Failed to retrieve station list",
    name: "Name",
    station_reference: "Station Reference",
    town: "City",
    river: "River",
    date_opened: "Date Opened",
    status: "Status",
    rloi_id: "RLOIid",
    notation: "Notation",
    wiski_id: "wiskiID",
    coordinates: "Coordinates",
    grid_coordinates: "Grid Coordinates",
    easting: "Easting",
    northing: "Northing",
    catchment: "Catchment",
    measures: "Measurement Indicators",
    period: "Period",
    seconds: "seconds",
    qualifier: "Qualifier",
    unit: "Unit",
    stage_scale: "Stage Scale",
    downstage_scale: "Downstage Scale",
    status_reason: "Status Reason",
    status_date: "Status Update",
    not_found: "Not found"
};

static ZH: Labels = Labels {
    title: "站点列表 - 后端测试",
    heading: "站点列表",
    fetch_failed: "获取站点列表失败",
    name: "名称",
    station_reference: "站点编号",
    town: "城市",
    river: "河流",
    date_opened: "开放日期",
    status: "状态",
    rloi_id: "RLOIid",
    notation: "标识",
    wiski_id: "wiskiID",
    coordinates: "坐标",
    grid_coordinates: "网格坐标",
    easting: "东距",
    northing: "北距",
    catchment: "流域",
    measures: "测量指标",
    period: "周期",
    seconds: "秒",
    qualifier: "限定符",
    unit: "单位",
    stage_scale: "水位标尺",
    downstage_scale: "下游水位标尺",
    status_reason: "状态原因",
    status_date: "状态更新",
    not_found: "未找到"
};
