use anyhow::Context;
use gauge_geometry::{DefaultPalette, Gauge, GaugeSettings, GeometryOutput, RenderInput};
use rand::Rng;
use serde::Serialize;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: gauge-geometry [--settings PATH] [--size W H] [--random N] [--paths]";

struct Options {
    settings: Option<PathBuf>,
    width: f64,
    height: f64,
    random: Option<usize>,
    paths: bool,
}

/// One output line.
#[derive(Serialize)]
struct Frame<'a> {
    value: f64,
    #[serde(flatten)]
    geometry: &'a GeometryOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    paths: Option<Paths>,
}

#[derive(Serialize)]
struct Paths {
    arcs: Vec<String>,
    needle: String,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut options = Options {
        settings: None,
        width: 300.0,
        height: 150.0,
        random: None,
        paths: false,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().context("--settings needs a path")?;
                options.settings = Some(PathBuf::from(path));
            }
            "--size" => {
                let (w, h) = args
                    .next()
                    .zip(args.next())
                    .context("--size needs a width and a height")?;
                options.width = w.parse().context("invalid width")?;
                options.height = h.parse().context("invalid height")?;
            }
            "--random" => {
                let count = args.next().context("--random needs a frame count")?;
                options.random = Some(count.parse().context("invalid frame count")?);
            }
            "--paths" => options.paths = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => anyhow::bail!("unexpected argument `{other}`\n{USAGE}"),
        }
    }
    Ok(options)
}

fn emit(out: &mut impl Write, gauge: &Gauge, options: &Options, value: f64) -> anyhow::Result<()> {
    let input = RenderInput::new(value, options.width, options.height);
    let geometry = gauge.geometry(&input);
    let paths = options.paths.then(|| Paths {
        arcs: geometry.arcs.iter().map(|arc| arc.path_data()).collect(),
        needle: geometry.needle.path_data(),
    });
    let frame = Frame {
        value,
        geometry: &geometry,
        paths,
    };
    serde_json::to_writer(&mut *out, &frame)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let options = parse_args()?;

    let settings = match &options.settings {
        Some(path) => GaugeSettings::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => GaugeSettings::default(),
    };
    let spec = settings.into_spec(&DefaultPalette)?;
    let mut gauge = Gauge::new(spec);
    if let Some(column) = settings.column {
        gauge = gauge.with_column(column);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(count) = options.random {
        // Pad the domain so some frames exercise clamping.
        let (min, max) = gauge.spec().domain();
        let pad = (max - min) * 0.1;
        info!(count, min, max, "emitting random frames");
        let mut rng = rand::rng();
        for _ in 0..count {
            let value = if pad > 0.0 {
                rng.random_range((min - pad)..(max + pad))
            } else {
                min
            };
            emit(&mut out, &gauge, &options, value)?;
        }
        return Ok(());
    }

    info!("reading values from stdin");
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<f64>() {
            Ok(value) => emit(&mut out, &gauge, &options, value)?,
            Err(err) => warn!(%err, line, "skipping unparsable value"),
        }
    }
    Ok(())
}
