// File: crates/benchplot-core/tests/scale.rs
// Purpose: Linear mapping, degenerate domains, nice ticks and label formatting.

use approx::assert_relative_eq;
use benchplot_core::scale::{format_value, group_thousands, nice_step, tick_count};
use benchplot_core::{LinearScale, Point, Projection};

#[test]
fn maps_domain_onto_pixels() {
    let s = LinearScale::new(4.0, 0.0, 400.0);
    assert_relative_eq!(s.apply(0.0), 0.0);
    assert_relative_eq!(s.apply(1.0), 100.0);
    assert_relative_eq!(s.apply(4.0), 400.0);
    assert_relative_eq!(s.invert(100.0), 1.0);
    assert_relative_eq!(s.invert(s.apply(2.5)), 2.5);
}

#[test]
fn honours_pixel_offset() {
    let s = LinearScale::new(10.0, 50.0, 150.0);
    assert_relative_eq!(s.apply(5.0), 100.0);
    assert_relative_eq!(s.invert(150.0), 10.0);
}

#[test]
fn zero_domain_collapses_to_origin() {
    let s = LinearScale::new(0.0, 12.0, 300.0);
    for v in [0.0, 1.0, -3.0, 1e9] {
        assert_eq!(s.apply(v), 12.0);
    }
    assert_eq!(s.invert(200.0), 0.0);
    let ticks = s.ticks(80.0);
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].value, 0.0);
    assert_eq!(ticks[0].px, 12.0);
    assert_eq!(ticks[0].label, "0");
}

#[test]
fn tick_count_has_a_floor_of_two() {
    assert_eq!(tick_count(800.0, 80.0), 10);
    assert_eq!(tick_count(100.0, 80.0), 2);
    assert_eq!(tick_count(0.0, 50.0), 2);
    assert_eq!(tick_count(799.0, 80.0), 9);
}

#[test]
fn nice_steps() {
    assert_relative_eq!(nice_step(0.7), 1.0);
    assert_relative_eq!(nice_step(1.0), 1.0);
    assert_relative_eq!(nice_step(1.3), 2.0);
    assert_relative_eq!(nice_step(3.0), 5.0);
    assert_relative_eq!(nice_step(7.0), 10.0);
    assert_relative_eq!(nice_step(2300.0), 5000.0);
    assert_relative_eq!(nice_step(0.03), 0.05);
}

#[test]
fn ticks_start_at_zero_and_stay_in_domain() {
    let s = LinearScale::new(4.2, 0.0, 664.0);
    let ticks = s.ticks(80.0);
    // 8 ticks wanted -> raw step 0.525 -> nice step 1
    let values = ticks.iter().map(|t| t.value).collect::<Vec<_>>();
    assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    for t in &ticks {
        assert!(t.px >= 0.0 && t.px <= 664.0);
        assert_relative_eq!(t.px, s.apply(t.value));
    }
    assert_eq!(ticks[4].label, "4");
}

#[test]
fn large_values_get_thousands_separators() {
    let s = LinearScale::new(110_000.0, 0.0, 368.0);
    let ticks = s.ticks(50.0);
    assert_eq!(ticks[1].label, "20,000");
    assert!(ticks.last().is_some_and(|t| t.value <= 110_000.0));
}

#[test]
fn fractional_steps_keep_their_precision() {
    let s = LinearScale::new(1.1, 0.0, 800.0);
    let labels = s.ticks(80.0).into_iter().map(|t| t.label).collect::<Vec<_>>();
    assert_eq!(labels, vec!["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
}

#[test]
fn label_formatting() {
    assert_eq!(group_thousands(0.0), "0");
    assert_eq!(group_thousands(999.0), "999");
    assert_eq!(group_thousands(1000.0), "1,000");
    assert_eq!(group_thousands(1234567.0), "1,234,567");
    assert_eq!(group_thousands(-4500.0), "-4,500");
    assert_eq!(format_value(0.05, 0.05), "0.05");
    assert_eq!(format_value(2048.0, 500.0), "2,048");
}

#[test]
fn projection_flips_y() {
    let p = Projection::new(4.0, 20.0, 400.0, 200.0);
    let px = p.to_pixel(Point::new(2.0, 20.0));
    assert_relative_eq!(px.x, 200.0);
    assert_relative_eq!(px.y, 0.0);
    let origin = p.to_pixel(Point::new(0.0, 0.0));
    assert_relative_eq!(origin.y, 200.0);

    let back = p.to_domain(px);
    assert_relative_eq!(back.x, 2.0);
    assert_relative_eq!(back.y, 20.0);
}

#[test]
fn ticks_terminate_at_the_largest_finite_ceiling() {
    let s = LinearScale::new(f64::MAX, 0.0, 664.0);
    let ticks = s.ticks(80.0);
    assert!(ticks.len() >= 2 && ticks.len() <= 11);
    assert!(ticks.iter().all(|t| t.value.is_finite() && t.value <= f64::MAX));
    assert!(ticks.windows(2).all(|w| w[0].value < w[1].value));
}

#[test]
fn non_finite_ceiling_yields_only_the_origin_tick() {
    for domain in [f64::INFINITY, f64::NAN] {
        let ticks = LinearScale::new(domain, 0.0, 664.0).ticks(80.0);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].value, 0.0);
    }
}
