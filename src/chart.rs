//! Stock chart geometry.
//!
//! Series become labelled polylines on a shared time/quantity frame. The
//! quantity axis always includes zero. Rendering is left to the UI; this
//! module only produces coordinates and labels.

use stockroom_shared::protocol::SeriesKind;
use stockroom_shared::{SeriesPoint, Timestamp};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: SeriesKind,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    /// `None` for an empty series, which is left off the chart.
    pub fn new(kind: SeriesKind, mut points: Vec<SeriesPoint>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        points.sort_by_key(|p| p.timestamp);
        Some(Self { kind, points })
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            SeriesKind::Historical => "Actual Quantity On Hand",
            SeriesKind::Forecast => "Forecasted Demand (Units/Day)",
            SeriesKind::Scheduled => "Scheduled Quantity",
        }
    }

    pub fn color(&self) -> &'static str {
        match self.kind {
            SeriesKind::Historical => "rgb(75, 192, 192)",
            SeriesKind::Forecast => "rgb(255, 99, 132)",
            SeriesKind::Scheduled => "rgb(156, 39, 176)",
        }
    }

    /// SVG `stroke-dasharray`; solid when `None`
    pub fn dash(&self) -> Option<&'static str> {
        match self.kind {
            SeriesKind::Historical => None,
            SeriesKind::Forecast => Some("5,5"),
            SeriesKind::Scheduled => Some("10,5"),
        }
    }

    /// `points` attribute of an SVG polyline
    pub fn polyline(&self, frame: &ChartFrame, viewport: &Viewport) -> String {
        self.points
            .iter()
            .map(|p| {
                let (x, y) = frame.project(p, viewport);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Drawing area in SVG user units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: 48.0,
        }
    }
}

impl Viewport {
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(1.0)
    }

    pub fn left(&self) -> f64 {
        self.padding
    }

    pub fn right(&self) -> f64 {
        self.width - self.padding
    }

    pub fn top(&self) -> f64 {
        self.padding
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.padding
    }
}

/// Data bounds shared by every series on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartFrame {
    pub t_min: i64,
    pub t_max: i64,
    pub q_min: i64,
    pub q_max: i64,
}

impl ChartFrame {
    /// Fit all points. A single instant is widened by a day either side and a
    /// flat zero series still gets a unit-high axis.
    pub fn fit(series: &[ChartSeries]) -> Option<Self> {
        let mut points = series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let start = first.timestamp.as_millis();
        let mut frame = Self {
            t_min: start,
            t_max: start,
            q_min: first.quantity.min(0),
            q_max: first.quantity.max(0),
        };
        for p in points {
            let t = p.timestamp.as_millis();
            frame.t_min = frame.t_min.min(t);
            frame.t_max = frame.t_max.max(t);
            frame.q_min = frame.q_min.min(p.quantity);
            frame.q_max = frame.q_max.max(p.quantity);
        }
        if frame.t_min == frame.t_max {
            frame.t_min -= DAY_MS;
            frame.t_max += DAY_MS;
        }
        if frame.q_min == frame.q_max {
            frame.q_max += 1;
        }
        Some(frame)
    }

    pub fn project(&self, point: &SeriesPoint, viewport: &Viewport) -> (f64, f64) {
        let t_span = (self.t_max - self.t_min) as f64;
        let q_span = (self.q_max - self.q_min) as f64;
        let tx = (point.timestamp.as_millis() - self.t_min) as f64 / t_span;
        let qy = (point.quantity - self.q_min) as f64 / q_span;
        (
            viewport.left() + tx * viewport.plot_width(),
            viewport.bottom() - qy * viewport.plot_height(),
        )
    }

    /// Vertical position of a quantity, for gridlines and tick labels
    pub fn y_for(&self, quantity: i64, viewport: &Viewport) -> f64 {
        let q_span = (self.q_max - self.q_min) as f64;
        viewport.bottom() - (quantity - self.q_min) as f64 / q_span * viewport.plot_height()
    }

    pub fn x_for(&self, millis: i64, viewport: &Viewport) -> f64 {
        let t_span = (self.t_max - self.t_min) as f64;
        viewport.left() + (millis - self.t_min) as f64 / t_span * viewport.plot_width()
    }

    /// `count` evenly spaced instants from `t_min` to `t_max`, both included
    pub fn x_ticks(&self, count: usize) -> Vec<Timestamp> {
        let count = count.max(2) as i64;
        let span = self.t_max - self.t_min;
        (0..count)
            .filter_map(|i| Timestamp::from_millis(self.t_min + span * i / (count - 1)))
            .collect()
    }

    /// Up to `count` evenly spaced integer ticks from `q_min` to `q_max`
    pub fn y_ticks(&self, count: usize) -> Vec<i64> {
        let count = count.max(2) as i64;
        let span = self.q_max - self.q_min;
        let step = ((span + count - 2) / (count - 1)).max(1);
        let mut ticks: Vec<i64> = (0..count)
            .map(|i| self.q_min + i * step)
            .take_while(|q| *q < self.q_max)
            .collect();
        ticks.push(self.q_max);
        ticks
    }
}
