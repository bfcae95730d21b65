mod dashboard;
mod tables;

pub use dashboard::{
    checkpoint_card, dashboard_charts, format_value, format_with_auto_precision, parse_hex_color,
    render_dashboard, sparkline, Branding, ChartSpec, DashboardHeader, DashboardRenderer,
    SvgDashboard, TextDashboard,
};
pub use tables::{
    format_checkpoint_table, format_daily_rates_table, format_forecast_table,
    format_scenario_summary, print_checkpoint_table, print_daily_rates_table,
    print_forecast_table, print_scenario_summary,
};
