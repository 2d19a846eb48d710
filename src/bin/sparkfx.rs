use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sparkfx", version)]
struct Cli {
    /// Optional JSON config file (attribute names, default target, toast texts).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an effect string and print the items as JSON.
    Parse(ParseArgs),
    /// Print the composed wrapper chain, outermost first.
    Tree(TreeArgs),
    /// Sample the flight path between two boxes and print the frames as JSON.
    FlyPath(FlyPathArgs),
    /// List every effect name the default composer knows.
    Effects,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Effect string, e.g. `bounce|ripple(r=120)`.
    spec: String,
}

#[derive(Parser, Debug)]
struct TreeArgs {
    spec: String,

    /// Host element type of the base element.
    #[arg(long, default_value = "view")]
    base: String,
}

#[derive(Parser, Debug)]
struct FlyPathArgs {
    /// Source box as `x,y,width,height`.
    #[arg(long, value_parser = parse_box)]
    from: sparkfx::MeasuredBox,

    /// Target box as `x,y,width,height`.
    #[arg(long, value_parser = parse_box)]
    to: sparkfx::MeasuredBox,

    /// Number of frames, endpoints included.
    #[arg(long, default_value_t = 11)]
    samples: usize,
}

fn parse_box(s: &str) -> sparkfx::FxResult<sparkfx::MeasuredBox> {
    s.parse()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    match cli.cmd {
        Command::Parse(args) => cmd_parse(args),
        Command::Tree(args) => cmd_tree(args, config),
        Command::FlyPath(args) => cmd_fly_path(args, &config),
        Command::Effects => cmd_effects(),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<sparkfx::FxConfig> {
    let Some(path) = path else {
        return Ok(sparkfx::FxConfig::default());
    };
    let raw =
        fs::read_to_string(path).with_context(|| format!("read config '{}'", path.display()))?;
    let cfg = sparkfx::FxConfig::from_json_str(&raw)
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let items = sparkfx::parse_fx_str(&args.spec);
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn cmd_tree(args: TreeArgs, config: sparkfx::FxConfig) -> anyhow::Result<()> {
    let factory = sparkfx::ElementFactory::new(sparkfx::Composer::default(), config);
    let attr = factory.config().effect_attr.clone();
    let base = factory.create_host(
        &args.base,
        sparkfx::Props::new().attr(attr, args.spec.as_str()),
        Vec::new(),
    );
    print!("{}", base.outline());
    Ok(())
}

fn cmd_fly_path(args: FlyPathArgs, config: &sparkfx::FxConfig) -> anyhow::Result<()> {
    let path = sparkfx::FlyPath::new(args.from, args.to, config.min_box_size);
    let frames = path.frames(args.samples);
    println!("{}", serde_json::to_string_pretty(&frames)?);
    Ok(())
}

fn cmd_effects() -> anyhow::Result<()> {
    for name in sparkfx::Composer::default().names() {
        println!("{name}");
    }
    Ok(())
}
