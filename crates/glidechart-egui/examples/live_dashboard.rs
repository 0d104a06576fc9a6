//! Live dashboard: a producer thread pushes random-walk data while the UI
//! thread blends it into bars, a scrolling line, a pie and a slider.
//!
//! Run with `cargo run -p glidechart-egui --example live_dashboard`. Set
//! `GLIDECHART_PROFILE=1` to record puffin scopes for each frame.

use std::time::Duration;

use glidechart::{
    AreaStyle, BarStyle, Chart, ChartConfig, Color, GridStyle, PieChartStyle, PieSectionStyle,
    Rect, SeriesKind, SeriesValue, SliderStyle, SnapshotFeed, TextConfig, vec2,
};
use glidechart_egui::{ChartView, install_waker};

const BARS: usize = 8;
const WINDOW: usize = 40;

struct Walk {
    state: u64,
}

impl Walk {
    fn next(&mut self) -> f64 {
        // xorshift
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        (self.state % 1000) as f64 / 1000.0
    }
}

fn produce(feed: SnapshotFeed) {
    let mut walk = Walk {
        state: 0x2545_F491_4F6C_DD1D,
    };
    let mut bars = vec![50.0; BARS];
    let mut window: Vec<f64> = (0..WINDOW).map(|_| 50.0).collect();
    let mut offset = 0.0;

    loop {
        for bar in &mut bars {
            *bar = (*bar + (walk.next() - 0.5) * 30.0).clamp(0.0, 100.0);
        }
        let last = window.last().copied().unwrap_or(50.0);
        window.remove(0);
        window.push((last + (walk.next() - 0.5) * 20.0).clamp(0.0, 100.0));
        offset += 1.0;

        let shares = vec![walk.next() + 0.2, walk.next() + 0.2, walk.next() + 0.2];
        let snapshot = vec![
            SeriesValue::Dynamic(bars.clone()),
            SeriesValue::moving(window.clone(), offset),
            SeriesValue::Static(shares),
        ];
        if feed.push(snapshot).is_err() {
            tracing::info!("chart closed, stopping producer");
            return;
        }
        std::thread::sleep(Duration::from_millis(700));
    }
}

struct Dashboard {
    chart: Chart,
}

impl Dashboard {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut chart = Chart::new(ChartConfig::new(vec![
            SeriesKind::Dynamic,
            SeriesKind::Moving,
            SeriesKind::Static,
        ]));
        install_waker(&mut chart, &cc.egui_ctx);

        let mut zoom = 100.0;
        chart.on_render(move |ui, frame| {
            let size = ui.size();
            let half = size.x * 0.5;

            ui.vertical_slider(
                &SliderStyle::default(),
                "zoom",
                &mut zoom,
                (20.0, 100.0),
                Rect::new(half - 30.0, 30.0, 20.0, size.y * 0.5 - 40.0),
            );

            let grid = GridStyle::default().with_range(0.0, zoom, zoom / 5.0);
            ui.horizontal_grid(&grid, vec2(0.0, 20.0), 40.0, half - 80.0, size.y * 0.5 - 30.0);

            let bars = Rect::new(40.0, 20.0, half - 80.0, size.y * 0.5 - 30.0);
            ui.bar_series(&BarStyle::default().with_maximum(zoom), bars, &frame[0]);

            let line = Rect::new(half + 10.0, 20.0, half - 20.0, size.y * 0.5 - 30.0);
            ui.area_series(&AreaStyle::default().with_maximum(100.0), line, &frame[1]);

            let pie = PieChartStyle {
                parts: vec![
                    PieSectionStyle::named("north", Color::from_hex(0x268bd2)),
                    PieSectionStyle::named("south", Color::from_hex(0x2aa198)),
                    PieSectionStyle::named("west", Color::from_hex(0xb58900)),
                ],
                rotation: 0.0,
            };
            let radius = (size.y * 0.25 - 20.0).max(10.0);
            ui.pie_chart(&pie, frame[2].values(), vec2(half * 0.5, size.y * 0.75), radius);

            ui.wrap_text(
                &TextConfig::default(),
                "Hover a bar or a pie section for details; drag the slider to rescale the bars.",
                vec2(half + 10.0, size.y * 0.6),
                half - 20.0,
            );
        });

        let feed = chart.feed();
        std::thread::spawn(move || produce(feed));

        Self { chart }
    }
}

impl eframe::App for Dashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        glidechart_core::profiling::new_frame();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(ChartView::new(&mut self.chart).background(Color::WHITE));
        });
    }
}

fn main() -> eframe::Result<()> {
    glidechart_core::logging::init();
    glidechart_core::profiling::set_enabled(std::env::var_os("GLIDECHART_PROFILE").is_some());

    eframe::run_native(
        "glidechart live dashboard",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(Dashboard::new(cc)))),
    )
}
