use std::path::{Path, PathBuf};

use remora::{Diagram, DiagramConverter, LayoutMode, OutputFormat};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Remora(remora::Error),
    Failed(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Remora(err) => write!(f, "{err}"),
            CliError::Failed(n) => write!(f, "{n} input(s) failed"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<remora::Error> for CliError {
    fn from(value: remora::Error) -> Self {
        Self::Remora(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Convert,
    Import,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    inputs: Vec<String>,
    formats: Option<String>,
    layout: Option<LayoutMode>,
    out: Option<String>,
    out_dir: Option<String>,
}

fn usage() -> &'static str {
    "remora-cli\n\
\n\
USAGE:\n\
  remora-cli convert --format <f1,f2,...> [--layout structure|position] [--out <path>] [--out-dir <dir>] <input.json>...\n\
  remora-cli import [--out <path>] [--out-dir <dir>] <input.excalidraw>...\n\
\n\
FORMATS: mermaid (.mmd), graphviz (.dot), drawio (.drawio), svg (.svg)\n\
\n\
NOTES:\n\
  - Multiple inputs come from shell glob expansion (e.g. diagrams/*.json).\n\
  - --out requires exactly one input (and one format for convert); otherwise\n\
    outputs land in --out-dir (default: current directory) named after the\n\
    input file's stem.\n\
  - --layout overrides each format's default layout mode for the whole run.\n\
  - A failing input does not stop the rest of the batch; the exit status is\n\
    non-zero when any input failed.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_seen = false;

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "convert" if !command_seen => {
                args.command = Command::Convert;
                command_seen = true;
            }
            "import" if !command_seen => {
                args.command = Command::Import;
                command_seen = true;
            }
            "--format" | "-f" => {
                let Some(formats) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.formats = Some(formats.clone());
            }
            "--layout" | "-l" => {
                let Some(layout) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.layout = Some(
                    layout
                        .parse::<LayoutMode>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--out" | "-o" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--out-dir" | "-d" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(dir.clone());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => args.inputs.push(path.to_string()),
        }
    }

    if !command_seen {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn parse_formats(raw: Option<&str>) -> Result<Vec<OutputFormat>, CliError> {
    let Some(raw) = raw else {
        return Err(CliError::Usage("convert requires --format <f1,f2,...>"));
    };
    let mut formats = Vec::new();
    for part in raw.split(',') {
        if part.trim().is_empty() {
            continue;
        }
        let format = part
            .parse::<OutputFormat>()
            .map_err(|e| CliError::Remora(remora::Error::Render(e)))?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        return Err(CliError::Usage("convert requires --format <f1,f2,...>"));
    }
    Ok(formats)
}

/// Output path for one unit of work: the explicit --out when the run has a
/// single unit, else `<out_dir>/<input stem><ext>`.
fn out_path(input: &str, ext: &str, out: Option<&str>, out_dir: &Path) -> PathBuf {
    match out {
        Some(out) => PathBuf::from(out),
        None => {
            let stem = Path::new(input)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "out".to_string());
            out_dir.join(format!("{stem}{ext}"))
        }
    }
}

fn prepare_out_dir(args: &Args) -> Result<PathBuf, CliError> {
    let out_dir = PathBuf::from(args.out_dir.as_deref().unwrap_or("."));
    std::fs::create_dir_all(&out_dir)?;
    Ok(out_dir)
}

/// Converts one input to every requested format. A failed write is reported
/// and counted, not propagated: the remaining formats are still attempted.
/// Returns the number of formats that failed.
fn convert_one(
    input: &str,
    formats: &[OutputFormat],
    layout: Option<LayoutMode>,
    out: Option<&str>,
    out_dir: &Path,
) -> Result<usize, CliError> {
    let json = std::fs::read_to_string(input)?;
    let diagram = Diagram::from_json_str(&json).map_err(remora::Error::from)?;
    let converter = DiagramConverter::with_layout(&diagram, layout);

    let mut failures = 0usize;
    for format in formats {
        let rendered = converter.render(*format);
        let path = out_path(input, format.extension(), out, out_dir);
        match std::fs::write(&path, rendered) {
            Ok(()) => println!("Created: {}", path.display()),
            Err(err) => {
                eprintln!("{}: I/O error: {err}", path.display());
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn import_one(input: &str, out: Option<&str>, out_dir: &Path) -> Result<(), CliError> {
    let json = std::fs::read_to_string(input)?;
    let diagram = remora::import_excalidraw_str(&json, input)?;
    let path = out_path(input, ".json", out, out_dir);
    std::fs::write(&path, diagram.to_json_string_pretty().map_err(remora::Error::from)?)?;
    println!(
        "Created: {} ({} nodes, {} edges)",
        path.display(),
        diagram.nodes.len(),
        diagram.edges.len()
    );
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    if args.inputs.is_empty() {
        return Err(CliError::Usage("no input files given"));
    }

    match args.command {
        Command::Convert => {
            let formats = parse_formats(args.formats.as_deref())?;
            if args.out.is_some() && (args.inputs.len() > 1 || formats.len() > 1) {
                return Err(CliError::Usage(
                    "--out requires exactly one input and one format; use --out-dir for batches",
                ));
            }
            let out_dir = prepare_out_dir(&args)?;

            let mut failures = 0usize;
            let mut failed_inputs = 0usize;
            for input in &args.inputs {
                match convert_one(
                    input,
                    &formats,
                    args.layout,
                    args.out.as_deref(),
                    &out_dir,
                ) {
                    Ok(n) => failures += n,
                    Err(err) => {
                        eprintln!("{input}: {err}");
                        failures += 1;
                        failed_inputs += 1;
                    }
                }
            }
            println!("Converted {} file(s)", args.inputs.len() - failed_inputs);
            if failures > 0 {
                return Err(CliError::Failed(failures));
            }
            Ok(())
        }
        Command::Import => {
            if args.out.is_some() && args.inputs.len() > 1 {
                return Err(CliError::Usage(
                    "--out requires exactly one input; use --out-dir for batches",
                ));
            }
            let out_dir = prepare_out_dir(&args)?;

            let mut failures = 0usize;
            for input in &args.inputs {
                if let Err(err) = import_one(input, args.out.as_deref(), &out_dir) {
                    eprintln!("{input}: {err}");
                    failures += 1;
                }
            }
            if failures > 0 {
                return Err(CliError::Failed(failures));
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
