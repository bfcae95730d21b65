use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use capacity_planner::{
    analysis::{build_stepped_series, compounding_series, kpi_from_saturation, saturation},
    models::{KpiModel, SaturationBand, StepEvent, TimeAxis},
};

proptest! {
    #[test]
    fn zero_rate_without_steps_is_constant(len in 1usize..60, base in 1.0f64..1e6) {
        let s = build_stepped_series(len, base, 0.0, &[]).unwrap();
        prop_assert_eq!(s.len(), len);
        prop_assert!(s.iter().all(|v| *v == base));
    }

    #[test]
    fn single_step_splits_series(
        len in 1usize..48,
        base in 1.0f64..1e4,
        rate in -0.05f64..0.1,
        offset in 0i64..60,
        delta in -500.0f64..500.0,
    ) {
        let pure = compounding_series(len, base, rate);
        let stepped = build_stepped_series(len, base, rate, &[StepEvent::new(offset, delta)]).unwrap();
        for i in 0..len {
            let expected = if (i as i64) < offset { pure[i] } else { pure[i] + delta };
            prop_assert_eq!(stepped[i], expected);
        }
    }

    #[test]
    fn step_order_does_not_matter(
        steps in prop::collection::vec((0i64..30, 0.0f64..100.0), 0..6),
    ) {
        let events: Vec<StepEvent> = steps.iter().map(|(m, d)| StepEvent::new(*m, *d)).collect();
        let mut reversed = events.clone();
        reversed.reverse();
        let a = build_stepped_series(30, 100.0, 0.01, &events).unwrap();
        let b = build_stepped_series(30, 100.0, 0.01, &reversed).unwrap();
        for (x, y) in a.iter().zip(&b) {
            prop_assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn saturation_stays_in_band(
        raw in prop::collection::vec(0.0f64..1e5, 2..40),
        low in 0.0f64..0.5,
        width in 0.05f64..0.5,
    ) {
        let band = SaturationBand { low, high: low + width };
        prop_assume!(raw.iter().any(|v| (v - raw[0]).abs() > 1e-6));
        let sat = saturation(&raw, band, "raw").unwrap();
        prop_assert_eq!(sat.len(), raw.len());
        prop_assert!(sat.iter().all(|s| *s >= band.low && *s <= band.high));
    }

    #[test]
    fn kpis_stay_within_floor_and_ceiling(sat in -1.0f64..2.0) {
        let band = SaturationBand { low: 0.1, high: 0.7 };
        let model = KpiModel { intercept: 1.7, slope: 3.2, floor: 1.5, ceiling: 4.8 };
        let kpi = kpi_from_saturation(sat, band, &model);
        prop_assert!((1.5..=4.8).contains(&kpi));
    }

    #[test]
    fn time_axis_months_are_consecutive(
        year in 1990i32..2100,
        month in 1u32..=12,
        count in 1i64..120,
    ) {
        let anchor = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let axis = TimeAxis::generate(anchor, count).unwrap();
        prop_assert_eq!(axis.len(), count as usize);
        for pair in axis.months().windows(2) {
            let months_apart = (pair[1].year() - pair[0].year()) * 12
                + pair[1].month() as i32
                - pair[0].month() as i32;
            prop_assert_eq!(months_apart, 1);
            prop_assert_eq!(pair[1].day(), 1);
        }
    }
}
