mod scenario;
mod time_axis;

pub use scenario::{
    AcceleratorModel, ActiveUnits, Baselines, ComputeModel, DocumentModel, GrowthAssumption,
    Horizon, KpiModel, KpiModels, LoadTerm, MemoryModel, NetworkModel, Presentation,
    ResourceModel, SaturationBand, Scenario, SessionModel, StepEvent, StorageModel, Variant,
};
pub use time_axis::{days_in_month, month_label, TimeAxis, MAX_HORIZON_MONTHS};
