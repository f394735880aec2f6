use anyhow::anyhow;
use clap::Parser;
use quakemap::{
    compose_earthquake_map,
    constants::{SATELLITE_LAYER_ID, STREET_LAYER_ID, TOPOGRAPHIC_LAYER_ID},
    load_features,
    runtime::LoadHandle,
    ui::widget::MapWidget,
    EarthquakeFeature, EarthquakeLayer, FeedConfig, FeedMagnitude, FeedPeriod, FeedSource,
    FileFeedSource, HttpFeedSource, MapOptions,
};
use std::{path::PathBuf, sync::Arc};

/// Live map of recent earthquakes from the USGS feed
#[derive(Debug, Parser)]
#[command(name = "quakemap", version, about)]
struct Args {
    /// Time window of the feed: hour, day, week or month
    #[arg(long, default_value_t = FeedPeriod::Day)]
    period: FeedPeriod,

    /// Minimum magnitude class: significant, 4.5, 2.5, 1.0 or all
    #[arg(long, default_value_t = FeedMagnitude::All)]
    magnitude: FeedMagnitude,

    /// Full feed URL, overriding --period and --magnitude
    #[arg(long)]
    feed_url: Option<String>,

    /// Read a saved GeoJSON feed instead of fetching one
    #[arg(long, conflicts_with = "feed_url")]
    file: Option<PathBuf>,

    /// Base layer shown on start
    #[arg(
        long,
        default_value = SATELLITE_LAYER_ID,
        value_parser = [SATELLITE_LAYER_ID, STREET_LAYER_ID, TOPOGRAPHIC_LAYER_ID],
    )]
    base_layer: String,
}

impl Args {
    fn feed_source(&self) -> Arc<dyn FeedSource> {
        if let Some(path) = &self.file {
            return Arc::new(FileFeedSource::new(path));
        }
        let mut config = FeedConfig::new(self.period, self.magnitude);
        if let Some(url) = &self.feed_url {
            config = config.with_url(url);
        }
        Arc::new(HttpFeedSource::from_config(&config))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let map_options = MapOptions {
        initial_base_layer: args.base_layer.clone(),
        ..MapOptions::default()
    };
    map_options.validate()?;

    let source = args.feed_source();
    log::info!("earthquake feed: {}", source.describe());
    let runtime = tokio::runtime::Handle::current();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Earthquakes"),
        ..Default::default()
    };

    eframe::run_native(
        "quakemap-app",
        options,
        Box::new(move |cc| Box::new(QuakeApp::new(cc, runtime, source, map_options))),
    )
    .map_err(|e| anyhow!("failed to run the viewer: {e}"))?;

    Ok(())
}

type FeedLoad = LoadHandle<quakemap::Result<Vec<EarthquakeFeature>>>;

enum FeedState {
    Loading(FeedLoad),
    Ready(Box<MapWidget>),
    Failed(String),
}

struct QuakeApp {
    runtime: tokio::runtime::Handle,
    source: Arc<dyn FeedSource>,
    options: MapOptions,
    state: FeedState,
    summary: String,
}

impl QuakeApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Handle,
        source: Arc<dyn FeedSource>,
        options: MapOptions,
    ) -> Self {
        let state = FeedState::Loading(start_load(&runtime, &source, &cc.egui_ctx));
        Self {
            runtime,
            source,
            options,
            state,
            summary: String::new(),
        }
    }

    fn poll_load(&mut self, ctx: &egui::Context) {
        let FeedState::Loading(handle) = &mut self.state else {
            return;
        };

        let next = match handle.try_take() {
            Some(Ok(features)) => {
                let layer = EarthquakeLayer::from_features(&features);
                self.summary = if layer.skipped() > 0 {
                    format!("{} earthquakes ({} skipped)", layer.len(), layer.skipped())
                } else {
                    format!("{} earthquakes", layer.len())
                };
                match compose_earthquake_map(layer, &self.options) {
                    Ok(map) => FeedState::Ready(Box::new(MapWidget::new(map, ctx))),
                    Err(e) => FeedState::Failed(e.to_string()),
                }
            }
            Some(Err(e)) => FeedState::Failed(e.to_string()),
            None if handle.is_finished() => {
                FeedState::Failed("the feed request was interrupted".to_string())
            }
            None => return,
        };
        self.state = next;
    }

    fn retry(&mut self, ctx: &egui::Context) {
        log::info!("retrying feed {}", self.source.describe());
        self.summary.clear();
        self.state = FeedState::Loading(start_load(&self.runtime, &self.source, ctx));
    }
}

fn start_load(
    runtime: &tokio::runtime::Handle,
    source: &Arc<dyn FeedSource>,
    ctx: &egui::Context,
) -> FeedLoad {
    let source = Arc::clone(source);
    let repaint = ctx.clone();
    LoadHandle::spawn(
        runtime,
        async move { load_features(source.as_ref()).await },
        move || repaint.request_repaint(),
    )
}

impl eframe::App for QuakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load(ctx);

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Earthquakes");
                ui.separator();
                ui.label(self.source.describe());
                if !self.summary.is_empty() {
                    ui.separator();
                    ui.label(&self.summary);
                }
            });
        });

        let mut retry = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| match &mut self.state {
                FeedState::Loading(_) => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                }
                FeedState::Ready(widget) => {
                    widget.show(ui);
                }
                FeedState::Failed(message) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);
                        ui.heading("Could not load the earthquake feed");
                        ui.colored_label(egui::Color32::RED, message.as_str());
                        retry = ui.button("Retry").clicked();
                    });
                }
            });

        if retry {
            self.retry(ctx);
        }
    }
}
