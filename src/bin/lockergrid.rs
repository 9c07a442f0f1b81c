use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lockergrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a locker preview as PNG (or base64 text).
    Render(RenderArgs),
    /// Print the resolved layout plan as JSON without rendering.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Asset directory; overrides settings and the environment.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Write base64-encoded PNG text instead of raw PNG bytes.
    #[arg(long)]
    base64: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    request: RequestArgs,
}

/// Request source plus per-field overrides. Flags win over the JSON file.
#[derive(Args, Debug)]
struct RequestArgs {
    /// Request JSON (camelCase fields).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Engine settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    columns: Option<i64>,

    #[arg(long)]
    tiers: Option<i64>,

    #[arg(long)]
    control_panel_column: Option<i64>,

    #[arg(long)]
    control_panel_tier_span: Option<i64>,

    /// none, full_set, top_only, side_only, top_and_side.
    #[arg(long)]
    frame_type: Option<String>,

    /// Named color, `custom`, or `#RRGGBB`.
    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    custom_color: Option<String>,

    /// Draw door handles; a bare `--handle` means true, `--handle false` turns them off.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    handle: Option<bool>,

    /// uniform, top_large, bottom_large, both_large, custom.
    #[arg(long)]
    tier_height_mode: Option<String>,

    /// Comma-separated custom tier ratios.
    #[arg(long, value_delimiter = ',')]
    tier_ratios: Option<Vec<f64>>,

    #[arg(long)]
    frame_text: Option<String>,
}

impl RequestArgs {
    fn load(&self) -> anyhow::Result<(lockergrid::LockerRequest, lockergrid::RenderSettings)> {
        let base = match &self.in_path {
            Some(p) => lockergrid::LockerRequest::from_path(p)?,
            None => lockergrid::LockerRequest::default(),
        };
        let overrides = lockergrid::LockerRequest {
            columns: self.columns,
            tiers: self.tiers,
            control_panel_column: self.control_panel_column,
            control_panel_tier_span: self.control_panel_tier_span,
            frame_type: self.frame_type.clone(),
            color: self.color.clone(),
            custom_color: self.custom_color.clone(),
            handle: self.handle,
            tier_height_mode: self.tier_height_mode.clone(),
            tier_ratios: self.tier_ratios.clone(),
            frame_text: self.frame_text.clone(),
        };

        let settings = match &self.settings {
            Some(p) => lockergrid::RenderSettings::from_path(p)?,
            None => lockergrid::RenderSettings::default(),
        };
        Ok((base.merged_with(overrides), settings.with_env_overrides()))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (req, mut settings) = args.request.load()?;
    if let Some(dir) = args.assets {
        settings.asset_dir = dir;
    }

    let assets = lockergrid::AssetStore::load(&settings);
    let img = lockergrid::render_locker_image(&req, &assets, &settings)?;
    if img.degraded {
        tracing::warn!("rendered the fallback grid; check the asset directory");
    }
    let png = lockergrid::encode_png(img.width, img.height, &img.data)?;

    let bytes = if args.base64 {
        lockergrid::encode_base64(&png).into_bytes()
    } else {
        png
    };
    write_output(&args.out, &bytes)?;

    eprintln!("wrote {} ({}x{})", args.out.display(), img.width, img.height);
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (req, settings) = args.request.load()?;
    let plan = lockergrid::plan_layout(&req, &settings)?;
    let json = serde_json::to_string_pretty(&plan).context("serialize layout plan")?;
    println!("{json}");
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
