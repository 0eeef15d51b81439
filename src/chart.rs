//! Builds a Plotly figure description from a historical and a forecast series.
//!
//! The figure has two stacked panels on a shared date axis: temperature on top,
//! rain and sunshine bars below. Forecast data is dotted or translucent.

use crate::types::daily_record::DailyRecord;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};

const TEMPERATURE_COLOR: &str = "#d9534f";
const RAIN_COLOR: &str = "#0275d8";
const SUN_COLOR: &str = "#f0ad4e";
const GRID_COLOR: &str = "#e5e5e5";
const FORECAST_OPACITY: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// One Plotly trace. `None` in `y` renders as a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
    pub xaxis: &'static str,
    pub yaxis: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<&'static str>,
}

impl Trace {
    fn new(kind: TraceKind, panel: Panel, x: Vec<NaiveDate>, y: Vec<Option<f64>>) -> Self {
        let (xaxis, yaxis) = panel.axes();
        Self {
            kind,
            name: None,
            x,
            y,
            xaxis,
            yaxis,
            mode: None,
            line: None,
            marker: None,
            opacity: None,
            showlegend: None,
            hoverinfo: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Panel {
    Temperature,
    RainAndSun,
}

impl Panel {
    fn axes(self) -> (&'static str, &'static str) {
        match self {
            Panel::Temperature => ("x", "y"),
            Panel::RainAndSun => ("x2", "y2"),
        }
    }
}

/// A complete figure, ready to hand to Plotly on the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Value,
}

impl ChartSpec {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

struct Columns {
    dates: Vec<NaiveDate>,
    temperatures: Vec<Option<f64>>,
    rain: Vec<Option<f64>>,
    sun: Vec<Option<f64>>,
}

impl Columns {
    /// Absent temperatures stay gaps; absent rain and sun are drawn as zero bars.
    fn from_records(records: &[DailyRecord]) -> Self {
        Self {
            dates: records.iter().map(|r| r.date).collect(),
            temperatures: records.iter().map(|r| r.mean_temperature).collect(),
            rain: records
                .iter()
                .map(|r| Some(r.precipitation.unwrap_or(0.0)))
                .collect(),
            sun: records
                .iter()
                .map(|r| Some(r.sunshine_hours.unwrap_or(0.0)))
                .collect(),
        }
    }
}

/// Builds the figure. Both inputs must be oldest first. Returns `None` when
/// there is no historical data to show.
pub fn build_chart(historical: &[DailyRecord], forecast: &[DailyRecord]) -> Option<ChartSpec> {
    if historical.is_empty() {
        return None;
    }
    let hist = Columns::from_records(historical);
    let fcst = Columns::from_records(forecast);
    let has_forecast = !fcst.dates.is_empty();

    let mut data = Vec::new();

    data.push(Trace {
        name: Some("Temp (Hist)"),
        mode: Some("lines"),
        line: Some(LineStyle {
            color: TEMPERATURE_COLOR,
            width: 3,
            dash: None,
        }),
        ..Trace::new(
            TraceKind::Scatter,
            Panel::Temperature,
            hist.dates.clone(),
            hist.temperatures.clone(),
        )
    });

    if has_forecast {
        if let Some(connector) = connector(&hist, &fcst) {
            data.push(connector);
        }
        data.push(Trace {
            name: Some("Temp (Fcst)"),
            mode: Some("lines+markers"),
            line: Some(dotted_temperature_line()),
            marker: Some(Marker {
                color: None,
                size: Some(6),
            }),
            ..Trace::new(
                TraceKind::Scatter,
                Panel::Temperature,
                fcst.dates.clone(),
                fcst.temperatures.clone(),
            )
        });
    }

    data.push(bar("Rain", RAIN_COLOR, &hist.dates, hist.rain));
    data.push(bar("Sun", SUN_COLOR, &hist.dates, hist.sun));

    if has_forecast {
        for (name, color, values) in [
            ("Rain (Fcst)", RAIN_COLOR, fcst.rain),
            ("Sun (Fcst)", SUN_COLOR, fcst.sun),
        ] {
            data.push(Trace {
                opacity: Some(FORECAST_OPACITY),
                showlegend: Some(false),
                ..bar(name, color, &fcst.dates, values)
            });
        }
    }

    Some(ChartSpec {
        data,
        layout: layout(fcst.dates.first().copied()),
    })
}

fn dotted_temperature_line() -> LineStyle {
    LineStyle {
        color: TEMPERATURE_COLOR,
        width: 2,
        dash: Some("dot"),
    }
}

/// Joins the last historical and the first forecast temperature so the line
/// has no visual gap. Only drawn when both ends are present.
fn connector(hist: &Columns, fcst: &Columns) -> Option<Trace> {
    let last_date = *hist.dates.last()?;
    let last_temp = (*hist.temperatures.last()?)?;
    let first_date = *fcst.dates.first()?;
    let first_temp = (*fcst.temperatures.first()?)?;

    Some(Trace {
        mode: Some("lines"),
        line: Some(dotted_temperature_line()),
        showlegend: Some(false),
        hoverinfo: Some("skip"),
        ..Trace::new(
            TraceKind::Scatter,
            Panel::Temperature,
            vec![last_date, first_date],
            vec![Some(last_temp), Some(first_temp)],
        )
    })
}

fn bar(
    name: &'static str,
    color: &'static str,
    dates: &[NaiveDate],
    values: Vec<Option<f64>>,
) -> Trace {
    Trace {
        name: Some(name),
        marker: Some(Marker {
            color: Some(color),
            size: None,
        }),
        ..Trace::new(TraceKind::Bar, Panel::RainAndSun, dates.to_vec(), values)
    }
}

fn layout(forecast_start: Option<NaiveDate>) -> Value {
    let grid = json!({"showgrid": true, "gridwidth": 1, "gridcolor": GRID_COLOR});
    let axis = |extra: Value| {
        let mut merged = grid.clone();
        if let (Some(target), Some(source)) = (merged.as_object_mut(), extra.as_object()) {
            target.extend(source.clone());
        }
        merged
    };

    let mut annotations = vec![
        subplot_title("Temperature Trend (°C)", 1.0),
        subplot_title("Rain (mm) & Sun (h)", 0.45),
    ];
    let mut shapes = Vec::new();
    if let Some(start) = forecast_start {
        shapes.push(json!({
            "type": "line",
            "xref": "x",
            "yref": "paper",
            "x0": start,
            "x1": start,
            "y0": 0,
            "y1": 1,
            "line": {"color": "gray", "width": 1, "dash": "dash"}
        }));
        annotations.push(json!({
            "text": "Forecast Start",
            "showarrow": false,
            "xref": "x",
            "yref": "paper",
            "x": start,
            "y": 1,
            "xanchor": "right",
            "yanchor": "bottom"
        }));
    }

    json!({
        "height": 700,
        "barmode": "group",
        "showlegend": true,
        "margin": {"l": 50, "r": 50, "t": 60, "b": 50},
        "plot_bgcolor": "rgba(0,0,0,0)",
        "paper_bgcolor": "rgba(0,0,0,0)",
        "hovermode": "x unified",
        "xaxis": axis(json!({"anchor": "y", "matches": "x2", "showticklabels": false})),
        "xaxis2": axis(json!({"anchor": "y2"})),
        "yaxis": axis(json!({"anchor": "x", "domain": [0.55, 1.0]})),
        "yaxis2": axis(json!({"anchor": "x2", "domain": [0.0, 0.45]})),
        "annotations": annotations,
        "shapes": shapes
    })
}

fn subplot_title(text: &str, y: f64) -> Value {
    json!({
        "text": text,
        "showarrow": false,
        "xref": "paper",
        "yref": "paper",
        "x": 0.5,
        "y": y,
        "xanchor": "center",
        "yanchor": "bottom",
        "font": {"size": 16}
    })
}
