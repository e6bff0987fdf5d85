use polarplot::chart::{HostChart, Plot, PolarChart};
use polarplot::color::RgbColor;
use polarplot::config::Config;
use polarplot::data::Series;
use polarplot::polar::{PolarPoint, Projection};
use polarplot::renderer::{render_chart, Canvas};
use polarplot::surface::{DrawOp, Recorder};

const RED: RgbColor = RgbColor::new(255, 0, 0);

fn quarter_series() -> Series {
    Series::new(
        vec![PolarPoint::new(1.0, 0.0), PolarPoint::new(1.0, 90.0)],
        RED,
        2.0,
    )
}

fn plot_with(series: Vec<Series>) -> Plot {
    Plot::new(400.0, 300.0, Config::default(), series)
}

fn is_arc(op: &DrawOp) -> bool {
    matches!(op, DrawOp::Arc { .. })
}

#[test]
fn empty_plot_draws_nothing() {
    let plot = plot_with(Vec::new());
    let mut chart = PolarChart::new(&plot.config.polar);
    let mut rec = Recorder::new();

    chart.draw(&plot, &mut rec);

    assert!(rec.ops.is_empty());
    assert!(chart.context().is_none());
}

#[test]
fn hidden_chart_draws_nothing() {
    let mut plot = plot_with(vec![quarter_series()]);
    plot.config.polar.show = false;
    let mut chart = PolarChart::new(&plot.config.polar);
    let mut rec = Recorder::new();

    chart.draw(&plot, &mut rec);

    assert!(rec.ops.is_empty());
}

#[test]
fn redraw_draws_disc_rings_spokes_and_series() {
    let plot = plot_with(vec![quarter_series()]);
    let mut chart = PolarChart::new(&plot.config.polar);
    let mut rec = Recorder::new();

    chart.draw(&plot, &mut rec);
    let ctx = chart.context().expect("context after draw").clone();

    assert_eq!(ctx.angle_steps, 8);
    assert!(ctx.radial_steps >= 1);
    // background disc plus one arc per ring
    assert_eq!(rec.count(is_arc), 1 + ctx.radial_steps);
    // one segment per spoke, 18 chords for the quarter turn
    assert_eq!(rec.count(|op| matches!(op, DrawOp::LineTo(..))), 8 + 18);

    let texts = rec.filled_texts();
    for label in ["0", "45", "90", "135", "180", "225", "270", "315"] {
        assert!(texts.contains(&label), "missing spoke label {label}");
    }
    assert_eq!(texts.len(), 8 + ctx.radial_steps);
    // every label is outlined before it is filled
    assert_eq!(
        rec.count(|op| matches!(op, DrawOp::StrokeText(..))),
        texts.len()
    );
}

#[test]
fn spokes_stay_put_when_rotated() {
    let mut plot = plot_with(vec![quarter_series()]);
    plot.config.polar.rotational_offset = 30.0;
    let mut chart = PolarChart::new(&plot.config.polar);
    let mut rec = Recorder::new();

    chart.draw(&plot, &mut rec);

    // spokes are labelled with the data angle now found at each screen position
    let texts = rec.filled_texts();
    assert!(texts.contains(&"330"));
    assert!(texts.contains(&"15"));
    assert!(!texts.contains(&"45"));
}

#[test]
fn series_are_handed_to_the_host_in_order() {
    struct Counting {
        plot: Plot,
        strokes: std::cell::RefCell<Vec<(RgbColor, usize)>>,
    }

    impl HostChart for Counting {
        fn plot_size(&self) -> (f64, f64) {
            self.plot.plot_size()
        }
        fn options(&self) -> &polarplot::config::PolarOptions {
            self.plot.options()
        }
        fn grid(&self) -> &polarplot::config::GridConfig {
            self.plot.grid()
        }
        fn series(&self) -> &[Series] {
            self.plot.series()
        }
        fn stroke_polyline(
            &self,
            _surface: &mut dyn polarplot::surface::Surface,
            points: &[polarplot::polar::CartesianPoint],
            color: RgbColor,
            _line_width: f64,
        ) {
            self.strokes.borrow_mut().push((color, points.len()));
        }
    }

    let blue = RgbColor::new(0, 0, 255);
    let host = Counting {
        plot: plot_with(vec![
            quarter_series(),
            Series::new(
                vec![PolarPoint::new(2.0, 10.0), PolarPoint::new(2.0, 12.0)],
                blue,
                1.0,
            ),
        ]),
        strokes: Default::default(),
    };
    let mut chart = PolarChart::new(host.options());

    chart.draw(&host, &mut Recorder::new());

    assert_eq!(*host.strokes.borrow(), vec![(RED, 19), (blue, 2)]);
}

#[test]
fn cursor_position_needs_a_redraw() {
    let plot = plot_with(vec![quarter_series()]);
    let mut chart = PolarChart::new(&plot.config.polar);
    assert!(chart.cursor_polar(10.0, 10.0).is_none());

    chart.draw(&plot, &mut Recorder::new());
    let ctx = chart.context().expect("context after draw").clone();

    let pos = chart
        .cursor_polar(ctx.center_left + 50.0, ctx.center_top)
        .expect("cursor position");
    assert!((pos.radius - 50.0 / ctx.scale).abs() < 1e-9);
    assert!(pos.angle.abs() < 1e-9);

    let up = chart
        .cursor_polar(ctx.center_left, ctx.center_top - 20.0)
        .expect("cursor position");
    assert!((up.angle - 90.0).abs() < 1e-9);
}

#[test]
fn cursor_outside_the_disc_draws_nothing() {
    let plot = plot_with(vec![quarter_series()]);
    let mut chart = PolarChart::new(&plot.config.polar);
    chart.draw(&plot, &mut Recorder::new());
    let ctx = chart.context().expect("context after draw").clone();

    let mut rec = Recorder::new();
    chart.draw_cursor(&plot, &mut rec, ctx.center_left + ctx.max_radius + 5.0, ctx.center_top);
    assert!(rec.ops.is_empty());
}

#[test]
fn cursor_inside_the_disc_highlights_ring_and_spoke() {
    let plot = plot_with(vec![quarter_series()]);
    let mut chart = PolarChart::new(&plot.config.polar);
    chart.draw(&plot, &mut Recorder::new());
    let ctx = chart.context().expect("context after draw").clone();

    let mut rec = Recorder::new();
    chart.draw_cursor(&plot, &mut rec, ctx.center_left + 50.0, ctx.center_top);

    assert_eq!(rec.count(is_arc), 1);
    assert!(rec.ops.contains(&DrawOp::StrokeColor(plot.config.grid.cursor_color)));
    let texts = rec.filled_texts();
    assert!(texts.contains(&"0.00"));
    // highlighted labels get a plate
    assert_eq!(rec.count(|op| matches!(op, DrawOp::Rect(..))), 2);
}

#[test]
fn resizing_recomputes_the_context() {
    let mut plot = plot_with(vec![quarter_series()]);
    let mut chart = PolarChart::new(&plot.config.polar);

    chart.draw(&plot, &mut Recorder::new());
    let small = chart.context().expect("context").max_radius;

    plot.resize(800.0, 600.0);
    chart.draw(&plot, &mut Recorder::new());
    let large = chart.context().expect("context").max_radius;

    assert!(large > small);
}

#[test]
fn canvas_render_paints_page_disc_and_series() {
    let series = Series::new(
        vec![PolarPoint::new(0.5, 250.0), PolarPoint::new(0.5, 290.0)],
        RED,
        2.0,
    );
    let plot = Plot::new(400.0, 400.0, Config::default(), vec![series]);
    let mut chart = PolarChart::new(&plot.config.polar);
    let mut canvas = Canvas::new(400, 400);

    render_chart(&mut canvas, &mut chart, &plot, None);
    let ctx = chart.context().expect("context after render").clone();
    assert!(ctx.radial_step > 15.0);

    // page outside the disc
    assert_eq!(canvas.get_pixel(0, 0), (255, 255, 255, 255));

    // disc background between two spokes, inside the first ring
    let projection = Projection::new(0.0);
    let p = projection.to_cartesian(PolarPoint::new(ctx.radial_step * 0.5, 112.5), 1.0);
    let (x, y) = (
        (ctx.center_left + p.x) as usize,
        (ctx.center_top + p.y) as usize,
    );
    let bg = plot.config.grid.background_color;
    assert_eq!(canvas.get_pixel(x, y), (bg.r, bg.g, bg.b, 255));

    // the series crosses straight below the center at half the extent
    let p = projection.to_cartesian(PolarPoint::new(0.5, 270.0), ctx.scale);
    let (x, y) = (
        (ctx.center_left + p.x) as usize,
        (ctx.center_top + p.y) as usize,
    );
    assert_eq!(canvas.get_pixel(x, y), (255, 0, 0, 255));
}

#[test]
fn highlighted_series_is_redrawn_against_the_cached_center() {
    let plot = plot_with(vec![quarter_series()]);
    let mut chart = PolarChart::new(&plot.config.polar);
    let blue = RgbColor::new(0, 0, 255);

    let mut rec = Recorder::new();
    chart.draw_series_highlight(&plot, &mut rec, &plot.series[0], blue, 5.0);
    assert!(rec.ops.is_empty());

    chart.draw(&plot, &mut Recorder::new());
    let ctx = chart.context().expect("context after draw").clone();

    chart.draw_series_highlight(&plot, &mut rec, &plot.series[0], blue, 5.0);
    assert!(rec.ops.contains(&DrawOp::Translate(ctx.center_left, ctx.center_top)));
    assert!(rec.ops.contains(&DrawOp::StrokeColor(blue)));
    assert!(rec.ops.contains(&DrawOp::LineWidth(5.0)));
    assert!(!rec.ops.contains(&DrawOp::StrokeColor(RED)));
    assert_eq!(rec.count(|op| matches!(op, DrawOp::LineTo(..))), 18);
    assert_eq!(rec.count(is_arc), 0);
    assert_eq!(
        rec.count(|op| matches!(op, DrawOp::Save)),
        rec.count(|op| matches!(op, DrawOp::Restore))
    );
}

#[test]
fn offset_is_fixed_when_the_chart_is_built() {
    let mut plot = plot_with(vec![quarter_series()]);
    let mut chart = PolarChart::new(&plot.config.polar);
    chart.draw(&plot, &mut Recorder::new());
    let before = chart.context().expect("context").clone();

    plot.config.polar.rotational_offset = 30.0;
    let mut rec = Recorder::new();
    chart.draw(&plot, &mut rec);

    assert_eq!(chart.projection().rotational_offset(), 0.0);
    assert_eq!(chart.context().expect("context"), &before);
    let texts = rec.filled_texts();
    assert!(texts.contains(&"45"));
    assert!(!texts.contains(&"330"));
}
