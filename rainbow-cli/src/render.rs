use chrono::Local;
use rainbow_core::{
    Dashboard, STABLE_CONDITIONS_MESSAGE, Severity, ThemePreference,
    format::{AqiLevel, Backdrop, UvLevel, capitalize_words, format_hour, format_time, wind_direction},
};
use std::fmt::Write;

/// Plain-text report of one search.
pub fn dashboard(dash: &Dashboard, theme: ThemePreference) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_dashboard(&mut out, dash, theme);
    out
}

fn write_dashboard(out: &mut String, dash: &Dashboard, theme: ThemePreference) -> std::fmt::Result {
    let c = &dash.current;
    let t = dash.units.temperature_symbol();
    let s = dash.units.speed_symbol();

    writeln!(out, "{}, {}", c.name, c.country)?;
    writeln!(
        out,
        "  {}{t} (feels like {}{t}), {}",
        c.temp,
        c.feels_like,
        capitalize_words(&c.description)
    )?;
    writeln!(out, "  Humidity {}%   Pressure {} hPa   Visibility {} km", c.humidity, c.pressure, c.visibility)?;
    writeln!(
        out,
        "  Wind {} {s} {}   Clouds {}%",
        c.wind_speed,
        wind_direction(f64::from(c.wind_direction)),
        c.cloud_cover.unwrap_or(0)
    )?;
    if let Some(uv) = c.uv_index {
        writeln!(out, "  UV index {uv:.1} ({})", UvLevel::from_index(uv).label())?;
    }
    if let Some(dew) = c.dew_point {
        writeln!(out, "  Dew point {dew}{t}")?;
    }
    writeln!(
        out,
        "  Sunrise {}   Sunset {}{}",
        format_time(c.sunrise, &Local),
        format_time(c.sunset, &Local),
        if c.is_night { "   (night)" } else { "" }
    )?;

    for alert in c.alerts.iter().flatten() {
        let severity = match alert.severity {
            Severity::Minor => "MINOR",
            Severity::Moderate => "MODERATE",
            Severity::Severe => "SEVERE",
            Severity::Extreme => "EXTREME",
        };
        writeln!(out, "\n  [{severity}] {}: {}", alert.event, alert.description)?;
    }

    writeln!(out, "\nForecast")?;
    for day in &dash.forecast {
        writeln!(
            out,
            "  {}  {:>3}{t} / {:>3}{t}  {:>3}% rain  {}",
            day.date.format("%a %b %d"),
            day.temp.min,
            day.temp.max,
            day.pop,
            capitalize_words(&day.description)
        )?;
    }

    writeln!(out, "\nNext hours")?;
    for hour in dash.hourly.iter().take(8) {
        writeln!(
            out,
            "  {:>5}  {:>3}{t}  {:>3}%  {}",
            format_hour(&hour.time, &Local),
            hour.temp,
            hour.pop,
            hour.description
        )?;
    }

    let aq = &dash.air_quality;
    writeln!(out, "\nAir quality: {} (AQI {})", AqiLevel::from_aqi(aq.aqi).label(), aq.aqi)?;
    writeln!(
        out,
        "  PM2.5 {:.1}  PM10 {:.1}  O3 {:.1}  NO2 {:.1}  SO2 {:.1}  CO {:.1}  µg/m³",
        aq.pm2_5, aq.pm10, aq.o3, aq.no2, aq.so2, aq.co
    )?;

    writeln!(out, "\nInsights")?;
    let insights = dash.insights();
    if insights.is_empty() {
        writeln!(out, "  {STABLE_CONDITIONS_MESSAGE}")?;
    }
    for insight in insights {
        writeln!(out, "  - {insight}")?;
    }

    let backdrop = Backdrop::select(&c.main, c.is_night, theme);
    writeln!(out, "\nBackdrop: {}", backdrop.gradient().join(" -> "))?;

    Ok(())
}
