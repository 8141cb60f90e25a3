use clap::{Parser, Subcommand};
use podloom_client::ColorMode;
use podloom_config::AppConfig;
use podloom_store::SourceKind;

/// Query a podloom block backend from the command line
#[derive(Parser, Debug)]
#[command(name = "podloom")]
#[command(version)]
pub struct Cli {
    /// Backend endpoint, overrides config file and PODLOOM_AJAX_URL
    #[arg(long, global = true)]
    pub ajax_url: Option<String>,

    /// Request nonce, overrides config file and PODLOOM_NONCE
    #[arg(long, global = true)]
    pub nonce: Option<String>,

    /// Print compact instead of indented JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List Transistor shows and RSS feeds
    Sources,

    /// List episodes of a source
    Episodes {
        /// `transistor` or `rss`
        kind: SourceKind,
        id: String,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Show subscribe links of a podcast
    Preview {
        source_id: String,

        #[arg(long, default_value_t = ColorMode::Brand)]
        color_mode: ColorMode,

        /// Icon color, used with `--color-mode custom`
        #[arg(long)]
        custom_color: Option<String>,
    },

    /// List podcasts offering subscribe buttons
    Podcasts,

    /// Print server-rendered markup of an RSS episode
    Render {
        feed_id: String,
        episode_id: String,

        /// Block attributes as a JSON object
        #[arg(long, default_value = "{}")]
        attributes: String,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = self.ajax_url.as_ref().filter(|u| !u.is_empty()) {
            config.ajax_url = url.clone();
        }
        if let Some(nonce) = &self.nonce {
            config.nonce = nonce.clone();
        }
        config
    }
}
