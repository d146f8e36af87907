#[cfg(feature = "cairo-backend")]
use galaxy_figures::export::{write_frame_json, write_png};
#[cfg(feature = "cairo-backend")]
use galaxy_figures::figure::landscape::{
    LandscapeOptions, YAxisMode, build_simulation_landscape_figure,
};
#[cfg(feature = "cairo-backend")]
use galaxy_figures::render::compose_figure;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const USAGE: &str = "usage: simulation-landscape-figure [options]

Renders simulations by resolution element mass against volume or survey area.

  --y-axis volume|area  y quantity (default: volume)
  --redshift <z>        redshift for the area conversion (default: 7)
  --delta-z <dz>        redshift slice width for the area conversion (default: 1)
  --output <path>       PNG destination (default: plots/simulation_landscape.png)
  --dump-frame <path>   also write the composed scene as JSON
  -h, --help            print this help";

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Default)]
struct CliArgs {
    options: LandscapeOptions,
    output: Option<PathBuf>,
    dump_frame: Option<PathBuf>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = galaxy_figures::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    let Some(args) = parse_args()? else {
        println!("{USAGE}");
        return Ok(());
    };

    let figure = build_simulation_landscape_figure(args.options).map_err(|err| err.to_string())?;
    if let Some(dump_path) = &args.dump_frame {
        let layered = compose_figure(&figure).map_err(|err| err.to_string())?;
        write_frame_json(&layered, dump_path).map_err(|err| err.to_string())?;
    }

    let output = args
        .output
        .unwrap_or_else(|| figure.config.output_path.clone());
    let export = write_png(&figure, &output).map_err(|err| err.to_string())?;
    println!(
        "wrote {} ({}x{})",
        export.path.display(),
        export.width,
        export.height
    );
    Ok(())
}

/// `Ok(None)` means help was requested.
#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<Option<CliArgs>, String> {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--y-axis" => {
                let mode: YAxisMode = value("--y-axis")?
                    .parse()
                    .map_err(|err: galaxy_figures::FigureError| err.to_string())?;
                parsed.options = parsed.options.with_y_axis(mode);
            }
            "--redshift" => {
                let redshift = parse_f64("--redshift", &value("--redshift")?)?;
                parsed.options = parsed.options.with_redshift(redshift);
            }
            "--delta-z" => {
                let delta_z = parse_f64("--delta-z", &value("--delta-z")?)?;
                parsed.options = parsed.options.with_delta_z(delta_z);
            }
            "--output" => parsed.output = Some(PathBuf::from(value("--output")?)),
            "--dump-frame" => parsed.dump_frame = Some(PathBuf::from(value("--dump-frame")?)),
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown argument `{other}`\n\n{USAGE}")),
        }
    }
    Ok(Some(parsed))
}

#[cfg(feature = "cairo-backend")]
fn parse_f64(flag: &str, raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("invalid value `{raw}` for {flag}: expected a finite number"))
}
