use leptos::prelude::*;
use stockroom::chart::{ChartFrame, ChartSeries, Viewport};

const Y_TICKS: usize = 5;
const X_TICKS: usize = 5;

fn n(v: f64) -> String {
    format!("{v:.1}")
}

/// Overlaid stock / forecast / scheduled lines on one SVG.
#[component]
pub fn StockChart(series: Vec<ChartSeries>) -> impl IntoView {
    let vp = Viewport::default();
    let Some(frame) = ChartFrame::fit(&series) else {
        return ().into_any();
    };

    let grid = frame
        .y_ticks(Y_TICKS)
        .into_iter()
        .map(|q| {
            let y = frame.y_for(q, &vp);
            view! {
                <line
                    x1={n(vp.left())}
                    x2={n(vp.right())}
                    y1={n(y)}
                    y2={n(y)}
                    stroke="currentColor"
                    stroke-opacity="0.1"
                />
                <text x={n(vp.left() - 8.0)} y={n(y + 4.0)} text-anchor="end" font-size="11" fill="currentColor">
                    {q}
                </text>
            }
        })
        .collect_view();

    let dates = frame
        .x_ticks(X_TICKS)
        .into_iter()
        .map(|t| {
            let x = frame.x_for(t.as_millis(), &vp);
            view! {
                <text x={n(x)} y={n(vp.bottom() + 18.0)} text-anchor="middle" font-size="11" fill="currentColor">
                    {t.day_label()}
                </text>
            }
        })
        .collect_view();

    let lines = series
        .iter()
        .map(|s| {
            view! {
                <polyline
                    points={s.polyline(&frame, &vp)}
                    fill="none"
                    stroke={s.color()}
                    stroke-width="2"
                    stroke-dasharray={s.dash()}
                />
            }
        })
        .collect_view();

    let legend = series
        .iter()
        .map(|s| {
            let swatch = format!("background-color: {}", s.color());
            view! {
                <span class="flex items-center gap-2 text-sm">
                    <span class="inline-block w-4 h-1 rounded" style=swatch></span>
                    {s.label()}
                </span>
            }
        })
        .collect_view();

    let mid_x = (vp.left() + vp.right()) / 2.0;
    let mid_y = (vp.top() + vp.bottom()) / 2.0;

    view! {
        <div class="w-full">
            <svg viewBox={vp.view_box()} class="w-full h-auto text-base-content">
                {grid}
                // 坐标轴
                <line
                    x1={n(vp.left())}
                    x2={n(vp.right())}
                    y1={n(vp.bottom())}
                    y2={n(vp.bottom())}
                    stroke="currentColor"
                    stroke-opacity="0.4"
                />
                <line
                    x1={n(vp.left())}
                    x2={n(vp.left())}
                    y1={n(vp.top())}
                    y2={n(vp.bottom())}
                    stroke="currentColor"
                    stroke-opacity="0.4"
                />
                {dates}
                {lines}
                <text x={n(mid_x)} y={n(vp.height - 6.0)} text-anchor="middle" font-size="12" fill="currentColor">
                    "Date"
                </text>
                <text
                    x="14"
                    y={n(mid_y)}
                    text-anchor="middle"
                    font-size="12"
                    fill="currentColor"
                    transform={format!("rotate(-90 14 {})", n(mid_y))}
                >
                    "Quantity"
                </text>
            </svg>
            <div class="flex flex-wrap gap-4 justify-center mt-2">{legend}</div>
        </div>
    }
    .into_any()
}
