use chart2d_rs::core::{
    CoordinateMapper, PREFERRED_SCALE_STEPS, PlotRect, TickScaleTuning, select_tick_scale,
};
use proptest::prelude::*;

/// A table step, or one of the table's top-decade steps scaled by a power of ten.
fn is_preferred_step(step: f64) -> bool {
    let mut scale = 1.0;
    while scale <= step {
        let mantissa = step / scale;
        if PREFERRED_SCALE_STEPS
            .iter()
            .any(|preferred| (preferred - mantissa).abs() <= preferred * 1e-12)
        {
            return true;
        }
        scale *= 10.0;
    }
    PREFERRED_SCALE_STEPS.contains(&step)
}

proptest! {
    #[test]
    fn selected_bounds_never_clip_data(
        min in -1.0e5f64..1.0e5,
        span in 0.0f64..1.0e5,
    ) {
        let max = min + span;
        let tuning = TickScaleTuning::default();
        let scale = select_tick_scale(min, max, &tuning).expect("finite input");

        prop_assert!(scale.min <= min);
        prop_assert!(scale.max >= max);
        prop_assert!(scale.max > scale.min);
        prop_assert!(is_preferred_step(scale.step));
        prop_assert!(scale.tick_count() < chart2d_rs::core::MAX_TICK_COUNT);

        let again = select_tick_scale(min, max, &tuning).expect("finite input");
        prop_assert_eq!(scale, again);
    }

    #[test]
    fn bounds_are_step_multiples(
        min in -1.0e4f64..1.0e4,
        span in 0.01f64..1.0e4,
    ) {
        let scale = select_tick_scale(min, min + span, &TickScaleTuning::default())
            .expect("finite input");
        let lower_steps = scale.min / scale.step;
        let upper_steps = scale.max / scale.step;
        prop_assert!((lower_steps - lower_steps.round()).abs() <= 1e-6);
        prop_assert!((upper_steps - upper_steps.round()).abs() <= 1e-6);
    }

    #[test]
    fn mapper_hits_plot_edges_exactly(
        x_min in -1.0e6f64..1.0e6,
        x_span in 1.0e-3f64..1.0e6,
        left in 0.0f64..500.0,
        width in 1.0f64..4000.0,
    ) {
        let plot = PlotRect::new(left, 0.0, width, 100.0);
        let x_max = x_min + x_span;
        prop_assume!(x_max > x_min);
        let mapper = CoordinateMapper::new(plot, (x_min, x_max), (0.0, 1.0)).expect("mapper");

        prop_assert_eq!(mapper.map_x(x_min), plot.left());
        prop_assert_eq!(mapper.map_x(x_max), plot.right());
    }
}
