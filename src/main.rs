mod controller;
mod engine;
mod headless;
mod model;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::controller::ConversationController;
use crate::engine::story_client::HttpStoryClient;
use crate::ui::settings::{clamp_ui_scale, AppSettings};
use crate::ui::settings_io::{default_settings_path, load_settings};

#[derive(Parser, Debug)]
#[command(name = "story-chat", about = "Chat with a story-generation service")]
struct Args {
    /// Story service generate endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Seconds before a story request is abandoned
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Window scale factor for this run (0.75 to 2.0)
    #[arg(long, allow_negative_numbers = true)]
    ui_scale: Option<f32>,

    /// Settings file to use instead of the per-user default
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Play in the terminal instead of opening a window
    #[arg(long)]
    headless: bool,
}

impl Args {
    fn apply(&self, settings: &mut AppSettings) {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            settings.request_timeout_secs = secs;
        }
        if let Some(scale) = self.ui_scale {
            settings.ui_scale = clamp_ui_scale(scale);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings_path = args.settings.clone().unwrap_or_else(default_settings_path);

    let persisted = load_settings(&settings_path).unwrap_or_else(|err| {
        tracing::warn!("using default settings: {err:#}");
        AppSettings::default()
    });
    let mut settings = persisted.clone();
    args.apply(&mut settings);

    tracing::info!(
        endpoint = %settings.endpoint,
        timeout_secs = settings.request_timeout_secs,
        "starting story chat"
    );

    let client = HttpStoryClient::new(settings.endpoint.clone(), settings.request_timeout())?;
    let controller = ConversationController::spawn(client);

    if args.headless {
        return headless::run(controller, settings.request_timeout());
    }

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Story Chat",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ui::app::StoryApp::new(
                controller,
                settings,
                persisted,
                settings_path,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
}
