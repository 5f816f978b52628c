//! Unit conversion and display tiers for weather metrics.

use shared::models::WeatherSample;

const MS_TO_KMH: f64 = 3.6;

pub fn ms_to_kmh(ms: f64) -> f64 {
    ms * MS_TO_KMH
}

/// Display severity of a metric. Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Green,
    Yellow,
    Orange,
    Red,
    Neutral,
}

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::Green => "green",
            Tier::Yellow => "yellow",
            Tier::Orange => "orange",
            Tier::Red => "red",
            Tier::Neutral => "neutral",
        }
    }
}

/// Green within 14..=28 °C, widening bands outward, red above 35 °C.
pub fn temperature_tier(celsius: Option<f64>) -> Tier {
    match celsius {
        None => Tier::Neutral,
        Some(t) if t > 35.0 => Tier::Red,
        Some(t) if t < 12.0 || t > 30.0 => Tier::Orange,
        Some(t) if t < 14.0 || t > 28.0 => Tier::Yellow,
        Some(_) => Tier::Green,
    }
}

pub fn precipitation_tier(mm: Option<f64>) -> Tier {
    match mm {
        None => Tier::Neutral,
        Some(p) if p > 3.5 => Tier::Red,
        Some(p) if p > 1.0 => Tier::Orange,
        Some(p) if p > 0.1 => Tier::Yellow,
        Some(_) => Tier::Green,
    }
}

pub fn humidity_tier(pct: Option<f64>) -> Tier {
    match pct {
        None => Tier::Neutral,
        Some(h) if h > 90.0 => Tier::Red,
        Some(h) if h > 80.0 => Tier::Orange,
        Some(h) if h > 65.0 => Tier::Yellow,
        Some(_) => Tier::Green,
    }
}

/// Formatted metric value with its tier, as shown on an event card.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    pub tier: Tier,
}

pub fn metrics(sample: &WeatherSample) -> Vec<Metric> {
    vec![
        Metric {
            label: "Temp",
            value: format_value(sample.temperature, |t| format!("{:.1} °C", t)),
            tier: temperature_tier(sample.temperature),
        },
        Metric {
            label: "Precip",
            value: format_value(sample.precipitation_mm, |p| format!("{:.1} mm", p)),
            tier: precipitation_tier(sample.precipitation_mm),
        },
        Metric {
            label: "Wind",
            value: format_value(sample.wind_kmh, |w| format!("{:.1} km/h", w)),
            tier: Tier::Neutral,
        },
        Metric {
            label: "Humidity",
            value: format_value(sample.humidity_pct, |h| format!("{} %", h.round())),
            tier: humidity_tier(sample.humidity_pct),
        },
    ]
}

fn format_value(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| "N/A".to_string())
}
