use anyhow::{Context, Result, bail};
use lorem_blocks_config::Config;
use lorem_blocks_engine::{
    FixedLengths, LengthSource, MacroRegistry, Processor, RandomLengths, register_lorem, render,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::{env, process};

const USAGE: &str = "[--html] [--seed <n>] [--lengths <l1,l2,..>] [--config <path>] [FILE]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    html: bool,
    seed: Option<u64>,
    lengths: Option<FixedLengths>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--html" => parsed.html = true,
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    parsed.seed = Some(
                        value
                            .parse()
                            .with_context(|| format!("Invalid seed '{value}'"))?,
                    );
                }
                "--lengths" => {
                    let value = args.next().context("--lengths needs a value")?;
                    let lengths = value
                        .split(',')
                        .map(|l| l.trim().parse::<f64>())
                        .collect::<Result<Vec<_>, _>>()
                        .with_context(|| format!("Invalid lengths '{value}'"))?;
                    parsed.lengths = Some(FixedLengths::new(lengths)?);
                }
                "--config" => {
                    let value = args.next().context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
                path => {
                    if parsed.input.is_some() {
                        bail!("Only one input file may be given");
                    }
                    parsed.input = Some(PathBuf::from(path));
                }
            }
        }

        Ok(parsed)
    }

    fn length_source(&self) -> Box<dyn LengthSource> {
        match (&self.lengths, self.seed) {
            (Some(lengths), _) => Box::new(lengths.clone()),
            (None, Some(seed)) => Box::new(RandomLengths::seeded(seed)),
            (None, None) => Box::new(RandomLengths::thread()),
        }
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

/// An explicit `--config` file must exist; the default location is optional.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let config = Config::load_from_path(path)?
                .with_context(|| format!("Config file '{}' not found", path.display()))?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(Config::load()?),
    }
}

fn run(args: Args, config: Config) -> Result<String> {
    let mut registry = MacroRegistry::new();
    register_lorem(&mut registry, config.default_count, args.length_source());
    let mut processor = Processor::new(registry);

    let source = read_input(args.input.as_ref())?;
    let doc = processor.process(&source)?;
    log::info!("Processed {} blocks", doc.len() - 1);

    Ok(if args.html || config.html {
        render::to_html(&doc)
    } else {
        render::to_text(&doc)
    })
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut argv = env::args();
    let program = argv.next().unwrap_or_else(|| "lorem-blocks".to_string());

    let args = match Args::parse(argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {program} {USAGE}");
            process::exit(1);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    match run(args, config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
