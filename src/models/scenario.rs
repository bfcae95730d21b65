use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

use super::MAX_HORIZON_MONTHS;

/// Which planning units a scenario tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// All five planning units plus accelerator time.
    Extended,
    /// Sources, documents and technology categories only.
    Reduced,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Extended => write!(f, "extended"),
            Variant::Reduced => write!(f, "reduced"),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extended" | "ext" | "full" => Ok(Variant::Extended),
            "reduced" | "red" | "basic" => Ok(Variant::Reduced),
            _ => Err(PlannerError::ParseError(format!(
                "Unknown scenario variant: '{s}'"
            ))),
        }
    }
}

/// Optional planning units and resources switched on for a run.
///
/// Sources, documents and technology categories are always projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUnits {
    pub initiatives: bool,
    pub sessions: bool,
    pub accelerator: bool,
}

impl ActiveUnits {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Extended => Self {
                initiatives: true,
                sessions: true,
                accelerator: true,
            },
            Variant::Reduced => Self {
                initiatives: false,
                sessions: false,
                accelerator: false,
            },
        }
    }

    /// Count of planning units tracked (documents counted once).
    pub fn unit_count(&self) -> usize {
        3 + usize::from(self.initiatives) + usize::from(self.sessions)
    }
}

impl Default for ActiveUnits {
    fn default() -> Self {
        Self::for_variant(Variant::Extended)
    }
}

/// Planning horizon: first month and number of months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horizon {
    /// First month, `YYYY-MM` (a `YYYY-MM-DD` date is accepted and snapped to day 1)
    pub anchor: String,
    /// Number of monthly periods, anchor month included, at most [`MAX_HORIZON_MONTHS`]
    pub months: i64,
}

impl Horizon {
    /// Parse the anchor into the first day of its month.
    pub fn anchor_date(&self) -> Result<NaiveDate, PlannerError> {
        let raw = self.anchor.trim();
        let parsed = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .map_err(|_| {
                PlannerError::InvalidHorizon(format!("unparsable anchor month '{}'", self.anchor))
            })?;
        parsed.with_day0(0).ok_or_else(|| {
            PlannerError::InvalidHorizon(format!("unparsable anchor month '{}'", self.anchor))
        })
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            anchor: "2025-12".to_string(),
            months: 25,
        }
    }
}

/// Starting values of every planning unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Baselines {
    /// Monitored sources (sites, APIs, repositories)
    pub sources: f64,
    /// Documents collected in the anchor month
    pub documents_per_month: f64,
    /// Documents already stored before the anchor month
    pub documents_historical: f64,
    /// Classified technology categories
    pub technology: f64,
    /// Monitored competitor initiatives
    pub initiatives: f64,
    /// Peak concurrent user sessions
    pub sessions: f64,
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            sources: 300.0,
            documents_per_month: 18_000.0,
            documents_historical: 50_000.0,
            technology: 100.0,
            initiatives: 80.0,
            sessions: 40.0,
        }
    }
}

/// One-time level increase applied from `month` onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Zero-based month index at which the increase lands
    pub month: i64,
    pub delta: f64,
}

impl StepEvent {
    pub fn new(month: i64, delta: f64) -> Self {
        Self { month, delta }
    }
}

/// Compounding rate plus onboarding waves for a stepped planning unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthAssumption {
    pub monthly_rate: f64,
    #[serde(default)]
    pub steps: Vec<StepEvent>,
}

impl GrowthAssumption {
    pub fn new(monthly_rate: f64, steps: &[(i64, f64)]) -> Self {
        Self {
            monthly_rate,
            steps: steps.iter().map(|&(m, d)| StepEvent::new(m, d)).collect(),
        }
    }

    pub fn default_sources() -> Self {
        Self::new(0.012, &[(3, 40.0), (9, 50.0), (15, 60.0), (21, 60.0)])
    }

    pub fn default_technology() -> Self {
        Self::new(0.01, &[(12, 15.0), (18, 20.0), (22, 15.0)])
    }

    pub fn default_initiatives() -> Self {
        Self::new(0.02, &[(6, 18.0), (14, 22.0), (20, 28.0)])
    }
}

/// Documents per month: solved growth towards a terminal target, coupled to sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentModel {
    /// Documents per month reached at the last month without source coupling
    pub target_monthly: f64,
    /// Exponent applied to the source growth ratio
    pub coupling_exponent: f64,
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self {
            target_monthly: 42_000.0,
            coupling_exponent: 0.25,
        }
    }
}

/// Concurrent sessions: compounding trend with sinusoidal seasonality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionModel {
    pub monthly_rate: f64,
    pub seasonal_period_months: f64,
    /// Amplitude of the k-th harmonic, k starting at 1
    pub harmonics: Vec<f64>,
    /// Lower clip as a fraction of the session baseline
    pub floor_fraction: f64,
}

impl Default for SessionModel {
    fn default() -> Self {
        Self {
            monthly_rate: 0.03,
            seasonal_period_months: 12.0,
            harmonics: vec![0.18, 0.05],
            floor_fraction: 0.6,
        }
    }
}

/// `weight * (value / reference)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadTerm {
    pub weight: f64,
    pub reference: f64,
}

impl LoadTerm {
    pub const fn new(weight: f64, reference: f64) -> Self {
        Self { weight, reference }
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.weight * (value / self.reference)
    }
}

/// Target utilisation range for the saturation mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationBand {
    pub low: f64,
    pub high: f64,
}

impl SaturationBand {
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

impl Default for SaturationBand {
    fn default() -> Self {
        Self {
            low: 0.10,
            high: 0.70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeModel {
    /// Cluster hours available per month
    pub capacity_hours: f64,
    pub saturation: SaturationBand,
    pub scraping: LoadTerm,
    pub indexing: LoadTerm,
    pub analytics_technology: LoadTerm,
    pub analytics_initiatives: LoadTerm,
    pub sessions: LoadTerm,
}

impl Default for ComputeModel {
    fn default() -> Self {
        Self {
            capacity_hours: 5200.0,
            saturation: SaturationBand::default(),
            scraping: LoadTerm::new(0.9, 100.0),
            indexing: LoadTerm::new(0.0015, 1.0),
            analytics_technology: LoadTerm::new(0.08, 50.0),
            analytics_initiatives: LoadTerm::new(0.05, 50.0),
            sessions: LoadTerm::new(0.12, 50.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageModel {
    pub base_gb: f64,
    pub technology_index: LoadTerm,
    pub initiatives_index: LoadTerm,
}

impl Default for StorageModel {
    fn default() -> Self {
        Self {
            base_gb: 5.0,
            technology_index: LoadTerm::new(0.0009, 1.0),
            initiatives_index: LoadTerm::new(0.0004, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkModel {
    pub polling: LoadTerm,
    pub sessions: LoadTerm,
}

impl Default for NetworkModel {
    fn default() -> Self {
        Self {
            polling: LoadTerm::new(0.015, 50.0),
            sessions: LoadTerm::new(0.02, 40.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryModel {
    pub base_gb: f64,
    /// Added on top of the base as cumulative documents go from their min to max
    pub range_gb: f64,
    /// Weight of sessions relative to the session baseline
    pub sessions_weight: f64,
}

impl Default for MemoryModel {
    fn default() -> Self {
        Self {
            base_gb: 16.0,
            range_gb: 10.0,
            sessions_weight: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceleratorModel {
    pub dashboards: LoadTerm,
    pub modeling: LoadTerm,
}

impl Default for AcceleratorModel {
    fn default() -> Self {
        Self {
            dashboards: LoadTerm::new(0.02, 50.0),
            modeling: LoadTerm::new(0.015, 50.0),
        }
    }
}

/// Coefficients mapping planning units to resource consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceModel {
    /// Average stored document size in GB
    pub document_size_gb: f64,
    pub compute: ComputeModel,
    pub storage: StorageModel,
    pub network: NetworkModel,
    pub memory: MemoryModel,
    pub accelerator: AcceleratorModel,
}

impl Default for ResourceModel {
    fn default() -> Self {
        Self {
            document_size_gb: 0.00045,
            compute: ComputeModel::default(),
            storage: StorageModel::default(),
            network: NetworkModel::default(),
            memory: MemoryModel::default(),
            accelerator: AcceleratorModel::default(),
        }
    }
}

/// `clip(intercept + slope * (saturation - low) / (high - low), floor, ceiling)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiModel {
    pub intercept: f64,
    pub slope: f64,
    pub floor: f64,
    pub ceiling: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiModels {
    /// Query latency in seconds
    pub latency: KpiModel,
    /// Alert delivery delay in seconds
    pub alerts: KpiModel,
}

impl Default for KpiModels {
    fn default() -> Self {
        Self {
            latency: KpiModel {
                intercept: 1.7,
                slope: 3.2,
                floor: 1.5,
                ceiling: 4.8,
            },
            alerts: KpiModel {
                intercept: 18.0,
                slope: 32.0,
                floor: 12.0,
                ceiling: 55.0,
            },
        }
    }
}

/// Dashboard and report settings. Never read by the forecasting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presentation {
    pub title: String,
    pub footer: String,
    /// Drawn in place of the logo when no logo file is available
    pub brand_label: String,
    pub logo_path: Option<PathBuf>,
    /// Month indices annotated on every chart, clamped to the horizon
    pub checkpoints: Vec<usize>,
    /// Colour token name to `#rrggbb`
    pub palette: BTreeMap<String, String>,
}

impl Presentation {
    /// Hex colour for a token, falling back to the neutral accent.
    pub fn color(&self, token: &str) -> &str {
        self.palette
            .get(token)
            .or_else(|| self.palette.get("accent"))
            .map(String::as_str)
            .unwrap_or("#4d4d4d")
    }
}

impl Default for Presentation {
    fn default() -> Self {
        let palette = [
            ("brand", "#ed1c24"),
            ("accent", "#4d4d4d"),
            ("sources", "#ed1c24"),
            ("documents", "#4caf50"),
            ("technology", "#7a3eb1"),
            ("initiatives", "#f2a900"),
            ("sessions", "#005f92"),
            ("compute", "#ff7043"),
            ("storage", "#6d4c41"),
            ("network", "#26a69a"),
            ("memory", "#8e24aa"),
            ("accelerator", "#546e7a"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            title: "Monthly dashboard - CI + Monitoring platform".to_string(),
            footer: "Monthly values · Source: capacity planning scenario".to_string(),
            brand_label: "CAPACITY".to_string(),
            logo_path: None,
            checkpoints: vec![12, 24],
            palette,
        }
    }
}

/// A complete, immutable planning scenario.
///
/// Defaults reproduce the reference five-unit scenario: 25 months from
/// December 2025, 300 sources, 18k documents per month growing to 42k.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub horizon: Horizon,
    pub units: ActiveUnits,
    pub baselines: Baselines,
    pub sources: GrowthAssumption,
    pub documents: DocumentModel,
    pub technology: GrowthAssumption,
    pub initiatives: GrowthAssumption,
    pub sessions: SessionModel,
    pub resources: ResourceModel,
    pub kpis: KpiModels,
    pub presentation: Presentation,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "CI + Monitoring platform".to_string(),
            horizon: Horizon::default(),
            units: ActiveUnits::default(),
            baselines: Baselines::default(),
            sources: GrowthAssumption::default_sources(),
            documents: DocumentModel::default(),
            technology: GrowthAssumption::default_technology(),
            initiatives: GrowthAssumption::default_initiatives(),
            sessions: SessionModel::default(),
            resources: ResourceModel::default(),
            kpis: KpiModels::default(),
            presentation: Presentation::default(),
        }
    }
}

impl Scenario {
    /// Default scenario with the planning units of the given variant.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            units: ActiveUnits::for_variant(variant),
            ..Self::default()
        }
    }

    pub fn variant(&self) -> Option<Variant> {
        [Variant::Extended, Variant::Reduced]
            .into_iter()
            .find(|v| ActiveUnits::for_variant(*v) == self.units)
    }

    /// Check every constant the engine depends on.
    ///
    /// Horizon and step-event problems get their own error kinds; everything
    /// else is a [`PlannerError::ValidationError`].
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.horizon.months <= 0 {
            return Err(PlannerError::InvalidHorizon(format!(
                "horizon must be at least one month, got {}",
                self.horizon.months
            )));
        }
        if self.horizon.months > MAX_HORIZON_MONTHS {
            return Err(PlannerError::InvalidHorizon(format!(
                "horizon must be at most {MAX_HORIZON_MONTHS} months, got {}",
                self.horizon.months
            )));
        }
        self.horizon.anchor_date()?;

        let mut growth = vec![("sources", &self.sources), ("technology", &self.technology)];
        if self.units.initiatives {
            growth.push(("initiatives", &self.initiatives));
        }
        for (unit, assumption) in growth {
            require_finite(&format!("{unit}.monthly_rate"), assumption.monthly_rate)?;
            if assumption.monthly_rate <= -1.0 {
                return Err(PlannerError::ValidationError(format!(
                    "{unit}.monthly_rate must be greater than -1, got {}",
                    assumption.monthly_rate
                )));
            }
            for step in &assumption.steps {
                if step.month < 0 {
                    return Err(PlannerError::InvalidStepEvent(format!(
                        "{unit}: month offset must not be negative, got {}",
                        step.month
                    )));
                }
                require_finite(&format!("{unit}.steps.delta"), step.delta)?;
            }
        }

        let b = &self.baselines;
        require_positive("baselines.sources", b.sources)?;
        require_positive("baselines.documents_per_month", b.documents_per_month)?;
        require_positive("baselines.technology", b.technology)?;
        require_finite("baselines.documents_historical", b.documents_historical)?;
        if b.documents_historical < 0.0 {
            return Err(PlannerError::ValidationError(format!(
                "baselines.documents_historical must not be negative, got {}",
                b.documents_historical
            )));
        }
        if self.units.initiatives {
            require_positive("baselines.initiatives", b.initiatives)?;
        }
        if self.units.sessions {
            require_positive("baselines.sessions", b.sessions)?;
            let s = &self.sessions;
            require_finite("sessions.monthly_rate", s.monthly_rate)?;
            require_positive("sessions.seasonal_period_months", s.seasonal_period_months)?;
            for h in &s.harmonics {
                require_finite("sessions.harmonics", *h)?;
            }
            if !(0.0..=1.0).contains(&s.floor_fraction) {
                return Err(PlannerError::ValidationError(format!(
                    "sessions.floor_fraction must be in 0.0..=1.0, got {}",
                    s.floor_fraction
                )));
            }
        }

        require_positive("documents.target_monthly", self.documents.target_monthly)?;
        require_finite("documents.coupling_exponent", self.documents.coupling_exponent)?;

        let r = &self.resources;
        require_positive("resources.document_size_gb", r.document_size_gb)?;
        require_positive("resources.compute.capacity_hours", r.compute.capacity_hours)?;
        let band = r.compute.saturation;
        if !(0.0 <= band.low && band.low < band.high && band.high <= 1.0) {
            return Err(PlannerError::ValidationError(format!(
                "saturation band must satisfy 0 <= low < high <= 1, got [{}, {}]",
                band.low, band.high
            )));
        }
        let terms = [
            ("compute.scraping", r.compute.scraping),
            ("compute.indexing", r.compute.indexing),
            ("compute.analytics_technology", r.compute.analytics_technology),
            ("compute.analytics_initiatives", r.compute.analytics_initiatives),
            ("compute.sessions", r.compute.sessions),
            ("storage.technology_index", r.storage.technology_index),
            ("storage.initiatives_index", r.storage.initiatives_index),
            ("network.polling", r.network.polling),
            ("network.sessions", r.network.sessions),
            ("accelerator.dashboards", r.accelerator.dashboards),
            ("accelerator.modeling", r.accelerator.modeling),
        ];
        for (name, term) in terms {
            require_finite(&format!("{name}.weight"), term.weight)?;
            require_positive(&format!("{name}.reference"), term.reference)?;
        }
        require_finite("storage.base_gb", r.storage.base_gb)?;
        require_finite("memory.base_gb", r.memory.base_gb)?;
        require_finite("memory.range_gb", r.memory.range_gb)?;
        require_finite("memory.sessions_weight", r.memory.sessions_weight)?;

        for (name, kpi) in [("latency", self.kpis.latency), ("alerts", self.kpis.alerts)] {
            require_finite(&format!("kpis.{name}.intercept"), kpi.intercept)?;
            require_finite(&format!("kpis.{name}.slope"), kpi.slope)?;
            if !(kpi.floor <= kpi.ceiling) {
                return Err(PlannerError::ValidationError(format!(
                    "kpis.{name}: floor {} is above ceiling {}",
                    kpi.floor, kpi.ceiling
                )));
            }
        }

        Ok(())
    }
}

fn require_finite(name: &str, value: f64) -> Result<(), PlannerError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlannerError::ValidationError(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), PlannerError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(PlannerError::ValidationError(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
