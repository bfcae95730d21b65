use std::fmt::Write as _;
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::analysis::Forecast;
use crate::error::PlannerError;
use crate::models::Presentation;

/// One chart of the dashboard: a named series aligned to the time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    /// Palette token, resolved to a colour by the renderer
    pub color_token: String,
    pub values: Vec<f64>,
    /// Month indices to annotate, already clamped to the series
    pub checkpoints: Vec<usize>,
}

impl ChartSpec {
    /// `(month, value)` at every checkpoint.
    pub fn checkpoint_values(&self) -> Vec<(usize, f64)> {
        self.checkpoints
            .iter()
            .filter_map(|&i| self.values.get(i).map(|v| (i, *v)))
            .collect()
    }
}

/// Where the brand mark comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Branding {
    Logo(PathBuf),
    /// Logo missing or not configured
    Label(String),
}

impl Branding {
    /// Use the configured logo when the file exists, else fall back to the label.
    pub fn resolve(presentation: &Presentation) -> Self {
        match &presentation.logo_path {
            Some(path) if path.is_file() => Branding::Logo(path.clone()),
            Some(path) => {
                tracing::warn!(
                    logo = %path.display(),
                    "logo not found, drawing brand label instead"
                );
                Branding::Label(presentation.brand_label.clone())
            }
            None => Branding::Label(presentation.brand_label.clone()),
        }
    }
}

/// Title block shared by every renderer.
#[derive(Debug, Clone)]
pub struct DashboardHeader {
    pub title: String,
    pub subtitle: String,
    pub footer: String,
    pub branding: Branding,
}

impl DashboardHeader {
    pub fn new(forecast: &Forecast, presentation: &Presentation) -> Self {
        let labels = forecast.axis.labels();
        let span = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => format!("{first} to {last}"),
            _ => String::new(),
        };
        Self {
            title: presentation.title.clone(),
            subtitle: format!("{} · {span}", forecast.scenario_name),
            footer: presentation.footer.clone(),
            branding: Branding::resolve(presentation),
        }
    }
}

/// Receives a dashboard one chart at a time.
///
/// Renderers own layout, styling and output; nothing in the forecast depends
/// on them succeeding.
pub trait DashboardRenderer {
    fn begin(&mut self, header: &DashboardHeader, chart_count: usize) -> Result<(), PlannerError>;

    fn render_chart(&mut self, chart: &ChartSpec) -> Result<(), PlannerError>;

    /// Finish the figure and return its text.
    fn finish(&mut self) -> Result<String, PlannerError>;
}

/// Charts of the monthly dashboard, in display order.
///
/// Documents are shown in thousands and storage in TB; charts of inactive
/// units are left out.
pub fn dashboard_charts(forecast: &Forecast, presentation: &Presentation) -> Vec<ChartSpec> {
    let checkpoints: Vec<usize> = presentation
        .checkpoints
        .iter()
        .map(|&m| forecast.axis.clamp_index(m))
        .collect();
    let chart = |title: &str, y_label: &str, token: &str, values: Vec<f64>| ChartSpec {
        title: title.to_string(),
        y_label: y_label.to_string(),
        color_token: token.to_string(),
        values,
        checkpoints: checkpoints.clone(),
    };
    let units = &forecast.units;
    let resources = &forecast.resources;

    let mut charts = vec![
        chart("Monitored sources", "Count", "sources", units.sources.clone()),
        chart(
            "Documents per month (thousands)",
            "Thousands",
            "documents",
            units.documents_per_month.iter().map(|d| d / 1000.0).collect(),
        ),
        chart(
            "Technology categories",
            "Categories",
            "technology",
            units.technology.clone(),
        ),
    ];
    if let Some(initiatives) = &units.initiatives {
        charts.push(chart(
            "Competitor initiatives",
            "Initiatives",
            "initiatives",
            initiatives.clone(),
        ));
    }
    if let Some(sessions) = &units.sessions {
        charts.push(chart(
            "Concurrent sessions",
            "Sessions",
            "sessions",
            sessions.clone(),
        ));
    }
    charts.push(chart(
        "Compute total (h/month)",
        "Hours",
        "compute",
        resources.compute_hours.clone(),
    ));
    charts.push(chart(
        "Storage (TB)",
        "TB",
        "storage",
        resources.storage_gb.iter().map(|g| g / 1000.0).collect(),
    ));
    charts.push(chart(
        "Bandwidth (GB/month)",
        "GB",
        "network",
        resources.network_gb.clone(),
    ));
    charts.push(chart(
        "Peak memory (GB)",
        "GB",
        "memory",
        resources.memory_gb.clone(),
    ));
    if let Some(accelerator) = &resources.accelerator_hours {
        charts.push(chart(
            "Accelerator analytics (h/month)",
            "Hours",
            "accelerator",
            accelerator.clone(),
        ));
    }
    charts
}

/// Feed every chart of the forecast through a renderer.
pub fn render_dashboard<R: DashboardRenderer + ?Sized>(
    renderer: &mut R,
    forecast: &Forecast,
    presentation: &Presentation,
) -> Result<String, PlannerError> {
    let header = DashboardHeader::new(forecast, presentation);
    let charts = dashboard_charts(forecast, presentation);
    renderer.begin(&header, charts.len())?;
    for chart in &charts {
        renderer.render_chart(chart)?;
    }
    renderer.finish()
}

/// Compact annotation format: thousands get a `K` suffix.
pub fn format_value(value: f64, precision: usize) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.*}K", precision, value / 1000.0)
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Format checkpoint values, adding decimals (1 to 3) until neighbours differ.
pub fn format_with_auto_precision(values: &[f64]) -> Vec<String> {
    for precision in 1..=3 {
        let formatted: Vec<String> = values.iter().map(|v| format_value(*v, precision)).collect();
        if formatted.windows(2).all(|w| w[0] != w[1]) {
            return formatted;
        }
    }
    values.iter().map(|v| format_value(*v, 3)).collect()
}

/// `12m: 1.2K` lines for the checkpoint card of a chart.
pub fn checkpoint_card(chart: &ChartSpec) -> Vec<String> {
    let points = chart.checkpoint_values();
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    points
        .iter()
        .zip(format_with_auto_precision(&values))
        .map(|((month, _), text)| format!("{month}m: {text}"))
        .collect()
}

/// `#rrggbb` to RGB.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

// ---------------------------------------------------------------------------
// Terminal renderer
// ---------------------------------------------------------------------------

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Unicode sparkline, one glyph per month.
pub fn sparkline(values: &[f64]) -> String {
    let (lo, hi) = min_max(values);
    let span = hi - lo;
    values
        .iter()
        .map(|v| {
            let level = if span > 0.0 {
                (((v - lo) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            } else {
                SPARK_LEVELS.len() / 2
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Renders the dashboard as coloured terminal text.
pub struct TextDashboard {
    presentation: Presentation,
    footer: String,
    output: String,
}

impl TextDashboard {
    pub fn new(presentation: &Presentation) -> Self {
        Self {
            presentation: presentation.clone(),
            footer: String::new(),
            output: String::new(),
        }
    }

    fn paint(&self, text: &str, token: &str) -> String {
        match parse_hex_color(self.presentation.color(token)) {
            Some((r, g, b)) => text.truecolor(r, g, b).to_string(),
            None => text.to_string(),
        }
    }
}

impl DashboardRenderer for TextDashboard {
    fn begin(&mut self, header: &DashboardHeader, chart_count: usize) -> Result<(), PlannerError> {
        let brand = match &header.branding {
            Branding::Logo(path) => format!("[logo: {}]", path.display()),
            Branding::Label(label) => self.paint(label, "brand").bold().to_string(),
        };
        writeln!(self.output, "\n{}  {}", header.title.bold(), brand)?;
        writeln!(
            self.output,
            "{}",
            format!("{} · {chart_count} charts", header.subtitle).dimmed()
        )?;
        writeln!(self.output, "{}", "=".repeat(72))?;
        self.footer = header.footer.clone();
        Ok(())
    }

    fn render_chart(&mut self, chart: &ChartSpec) -> Result<(), PlannerError> {
        let (lo, hi) = min_max(&chart.values);
        let line = self.paint(&sparkline(&chart.values), &chart.color_token);
        writeln!(
            self.output,
            "\n  {} {}",
            chart.title.bold(),
            format!("({})", chart.y_label).dimmed()
        )?;
        writeln!(self.output, "  {line}")?;
        writeln!(
            self.output,
            "  min {}  max {}  |  {}",
            format_value(lo, 1),
            format_value(hi, 1),
            checkpoint_card(chart).join("  ")
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<String, PlannerError> {
        writeln!(self.output, "\n{}", "=".repeat(72))?;
        writeln!(self.output, "{}", self.footer.dimmed())?;
        Ok(std::mem::take(&mut self.output))
    }
}

// ---------------------------------------------------------------------------
// SVG renderer
// ---------------------------------------------------------------------------

const PANEL_WIDTH: f64 = 360.0;
const PANEL_HEIGHT: f64 = 250.0;
const HEADER_HEIGHT: f64 = 110.0;
const FOOTER_HEIGHT: f64 = 50.0;
const MAX_COLUMNS: usize = 5;

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the dashboard as a standalone SVG figure: a grid of line charts
/// with filled areas and a checkpoint card on each panel.
pub struct SvgDashboard {
    presentation: Presentation,
    columns: usize,
    rows: usize,
    charts_drawn: usize,
    footer: String,
    body: String,
    header: String,
}

impl SvgDashboard {
    pub fn new(presentation: &Presentation) -> Self {
        Self {
            presentation: presentation.clone(),
            columns: 1,
            rows: 1,
            charts_drawn: 0,
            footer: String::new(),
            body: String::new(),
            header: String::new(),
        }
    }

    fn width(&self) -> f64 {
        self.columns as f64 * PANEL_WIDTH
    }

    fn height(&self) -> f64 {
        HEADER_HEIGHT + self.rows as f64 * PANEL_HEIGHT + FOOTER_HEIGHT
    }
}

impl DashboardRenderer for SvgDashboard {
    fn begin(&mut self, header: &DashboardHeader, chart_count: usize) -> Result<(), PlannerError> {
        self.rows = if chart_count > MAX_COLUMNS { 2 } else { 1 };
        self.columns = chart_count.div_ceil(self.rows).clamp(1, MAX_COLUMNS);
        self.rows = chart_count.div_ceil(self.columns).max(1);
        self.footer = header.footer.clone();

        let accent = self.presentation.color("accent").to_string();
        let width = self.width();
        let mut out = String::new();
        writeln!(
            out,
            r#"<text x="30" y="48" font-family="DejaVu Sans, sans-serif" font-size="24" font-weight="bold" fill="{accent}">{}</text>"#,
            escape_xml(&header.title)
        )?;
        writeln!(
            out,
            r##"<text x="30" y="76" font-family="DejaVu Sans, sans-serif" font-size="13" fill="#6c6c6c">{}</text>"##,
            escape_xml(&header.subtitle)
        )?;
        match &header.branding {
            Branding::Logo(path) => {
                writeln!(
                    out,
                    r#"<image x="{}" y="14" width="120" height="60" href="{}" preserveAspectRatio="xMaxYMin meet"/>"#,
                    width - 140.0,
                    escape_xml(&path.display().to_string())
                )?;
            }
            Branding::Label(label) => {
                writeln!(
                    out,
                    r#"<text x="{}" y="48" text-anchor="end" font-family="DejaVu Sans, sans-serif" font-size="22" font-weight="bold" fill="{}">{}</text>"#,
                    width - 20.0,
                    self.presentation.color("brand"),
                    escape_xml(label)
                )?;
            }
        }
        self.header = out;
        Ok(())
    }

    fn render_chart(&mut self, chart: &ChartSpec) -> Result<(), PlannerError> {
        let col = self.charts_drawn % self.columns;
        let row = self.charts_drawn / self.columns;
        self.charts_drawn += 1;

        let x0 = col as f64 * PANEL_WIDTH;
        let y0 = HEADER_HEIGHT + row as f64 * PANEL_HEIGHT;
        let plot_left = x0 + 60.0;
        let plot_right = x0 + PANEL_WIDTH - 20.0;
        let plot_top = y0 + 50.0;
        let plot_bottom = y0 + PANEL_HEIGHT - 30.0;

        let (lo, hi) = min_max(&chart.values);
        let span = if hi > lo { hi - lo } else { 1.0 };
        let steps = chart.values.len().saturating_sub(1).max(1) as f64;
        let point = |i: usize, v: f64| {
            let x = plot_left + (plot_right - plot_left) * i as f64 / steps;
            let y = plot_bottom - (plot_bottom - plot_top) * (v - lo) / span;
            (x, y)
        };
        let points: Vec<(f64, f64)> = chart
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| point(i, *v))
            .collect();
        let polyline = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");

        let color = self.presentation.color(&chart.color_token).to_string();
        let out = &mut self.body;
        writeln!(out, r#"<g class="chart">"#)?;
        writeln!(
            out,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#ffffff" stroke="#e6e6e6"/>"##,
            x0 + 10.0,
            y0 + 10.0,
            PANEL_WIDTH - 20.0,
            PANEL_HEIGHT - 20.0
        )?;
        writeln!(
            out,
            r##"<text x="{:.1}" y="{:.1}" font-family="DejaVu Sans, sans-serif" font-size="13" font-weight="bold" fill="#4d4d4d">{}</text>"##,
            x0 + 20.0,
            y0 + 32.0,
            escape_xml(&chart.title)
        )?;
        writeln!(
            out,
            r##"<text transform="translate({:.1},{:.1}) rotate(-90)" text-anchor="middle" font-family="DejaVu Sans, sans-serif" font-size="11" fill="#4d4d4d">{}</text>"##,
            x0 + 28.0,
            (plot_top + plot_bottom) / 2.0,
            escape_xml(&chart.y_label)
        )?;
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            writeln!(
                out,
                r#"<polygon points="{:.1},{:.1} {polyline} {:.1},{:.1}" fill="{color}" fill-opacity="0.12" stroke="none"/>"#,
                first.0, plot_bottom, last.0, plot_bottom
            )?;
        }
        writeln!(
            out,
            r#"<polyline points="{polyline}" fill="none" stroke="{color}" stroke-width="2.4"/>"#
        )?;
        for (x, y) in &points {
            writeln!(
                out,
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="2" fill="{color}"/>"#
            )?;
        }
        for (i, line) in checkpoint_card(chart).iter().enumerate() {
            writeln!(
                out,
                r##"<text x="{:.1}" y="{:.1}" font-family="DejaVu Sans, sans-serif" font-size="10" fill="#4d4d4d">{}</text>"##,
                plot_left + 6.0,
                plot_top + 12.0 + 13.0 * i as f64,
                escape_xml(line)
            )?;
        }
        writeln!(out, "</g>")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<String, PlannerError> {
        let (width, height) = (self.width(), self.height());
        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
        )?;
        writeln!(
            svg,
            r##"<rect width="100%" height="100%" fill="#fdfdfd"/>"##
        )?;
        svg.push_str(&self.header);
        svg.push_str(&self.body);
        writeln!(
            svg,
            r##"<text x="30" y="{:.0}" font-family="DejaVu Sans, sans-serif" font-size="11" fill="#6c6c6c">{}</text>"##,
            height - 20.0,
            escape_xml(&self.footer)
        )?;
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}
