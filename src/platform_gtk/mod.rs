//! GTK4 embedding: paints a shared [`Chart`] into a `DrawingArea`.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::Chart;
use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, CairoRenderer, RenderFrame, Renderer};

pub type SharedChart = Rc<RefCell<Chart>>;

/// Wires a chart to a drawing area.
///
/// The draw callback renders the current frame; a frame-clock tick drains
/// the chart's pending tasks and series events and queues a redraw only
/// while the chart is dirty.
pub struct GtkChartAdapter {
    chart: SharedChart,
    drawing_area: gtk::DrawingArea,
}

impl GtkChartAdapter {
    pub fn new(chart: SharedChart) -> ChartResult<Self> {
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        let renderer = Rc::new(RefCell::new(CairoRenderer::new(1, 1)?));

        let draw_chart = Rc::clone(&chart);
        drawing_area.set_draw_func(move |_, context, width, height| {
            let viewport = Viewport::new(
                u32::try_from(width).unwrap_or_default(),
                u32::try_from(height).unwrap_or_default(),
            );
            let Ok(mut chart) = draw_chart.try_borrow_mut() else {
                warn!("chart busy during draw callback");
                return;
            };
            let mut renderer = renderer.borrow_mut();
            let mut target = ContextTarget {
                renderer: &mut *renderer,
                context,
            };
            if let Err(err) = chart.draw(&mut target, viewport) {
                warn!(error = %err, "chart draw failed");
            }
        });

        let tick_chart = Rc::clone(&chart);
        drawing_area.add_tick_callback(move |area, _clock| {
            if let Ok(mut chart) = tick_chart.try_borrow_mut() {
                chart.process_pending();
                if chart.is_dirty() {
                    area.queue_draw();
                }
            }
            gtk::glib::ControlFlow::Continue
        });

        Ok(Self {
            chart,
            drawing_area,
        })
    }

    #[must_use]
    pub fn chart(&self) -> SharedChart {
        Rc::clone(&self.chart)
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }
}

/// Routes `Renderer::render` to the context handed out by the draw callback.
struct ContextTarget<'a> {
    renderer: &'a mut CairoRenderer,
    context: &'a cairo::Context,
}

impl Renderer for ContextTarget<'_> {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        self.renderer.render_on_cairo_context(self.context, frame)
    }
}
