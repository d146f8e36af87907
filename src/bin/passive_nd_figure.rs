#[cfg(feature = "cairo-backend")]
use galaxy_figures::export::{write_frame_json, write_png};
#[cfg(feature = "cairo-backend")]
use galaxy_figures::figure::passive_nd::build_passive_nd_figure;
#[cfg(feature = "cairo-backend")]
use galaxy_figures::render::compose_figure;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const USAGE: &str = "usage: passive-nd-figure [--output <path>] [--dump-frame <path>]

Renders the passive galaxy number density / SHMR figure.

  --output <path>      PNG destination (default: plots/passive_nd_evolution.png)
  --dump-frame <path>  also write the composed scene as JSON
  -h, --help           print this help";

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Default)]
struct CliArgs {
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

    let figure = build_passive_nd_figure().map_err(|err| err.to_string())?;
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
        match flag.as_str() {
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                parsed.output = Some(PathBuf::from(value));
            }
            "--dump-frame" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --dump-frame".to_owned())?;
                parsed.dump_frame = Some(PathBuf::from(value));
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown argument `{other}`\n\n{USAGE}")),
        }
    }
    Ok(Some(parsed))
}
