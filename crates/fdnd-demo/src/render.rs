//! Repeated render passes over one identifier context.

use std::path::PathBuf;

use clap::Args;
use fdnd_controls::ReorderApp;
use fdnd_core::{DndConfig, IdContext};
use fdnd_render::{render_to_static_markup, render_to_string};
use serde::Serialize;
use tracing::debug;

use crate::error::{DemoError, Result};

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Comma separated item ids.
    #[arg(long, default_value = "A,B,C", value_delimiter = ',')]
    pub items: Vec<String>,

    /// Number of render passes.
    #[arg(long, default_value_t = 2)]
    pub passes: usize,

    /// Reset the identifier context before every pass.
    #[arg(long)]
    pub reset: bool,

    /// Omit the hydration marker.
    #[arg(long = "static")]
    pub static_markup: bool,

    /// Include the markup of every pass in the output.
    #[arg(long)]
    pub markup: bool,

    /// TOML context configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassRecord {
    pub generation: u64,
    pub issued: u64,
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// True when every pass produced the same bytes.
    pub identical: bool,
    pub passes: Vec<PassRecord>,
}

pub fn run_render(args: &RenderArgs) -> Result<RenderReport> {
    if args.passes == 0 {
        return Err(DemoError::InvalidArgument {
            message: "--passes must be at least 1".to_string(),
        });
    }
    let config = match &args.config {
        Some(path) => DndConfig::from_toml_file(path)?,
        None => DndConfig::default(),
    };
    let app = ReorderApp::with_config(args.items.clone(), &config);
    let ids = IdContext::with_config(&config.ids);

    let mut passes = Vec::with_capacity(args.passes);
    for _ in 0..args.passes {
        if args.reset {
            ids.reset();
        }
        let markup = if args.static_markup {
            render_to_static_markup(&app, &ids)
        } else {
            render_to_string(&app, &ids)
        };
        let digest = blake3::hash(markup.as_bytes()).to_hex().to_string();
        debug!(generation = ids.generation(), %digest, "pass rendered");
        passes.push(PassRecord {
            generation: ids.generation(),
            issued: ids.issued(),
            digest,
            markup: args.markup.then_some(markup),
        });
    }
    let identical = passes.windows(2).all(|w| w[0].digest == w[1].digest);
    Ok(RenderReport { identical, passes })
}
