use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use yamlsplit::{Config, DuplicatePolicy};

#[derive(Parser, Debug)]
#[command(
    name = "yamlsplit",
    version,
    about = "Split multi-document YAML streams into one file per manifest",
    long_about = "Split a multi-document YAML stream into individual files, one per \
    manifest, organized as <namespace>/<apiVersion>/<kind>/<name>.yml under a target \
    directory.\n\n\
    The target directory path is the only thing printed to stdout, so the output \
    can be consumed by scripts.\n\n\
    USAGE EXAMPLES:\n  \
      # Split a file into a fresh temp directory\n  \
      yamlsplit manifests.yaml\n\n  \
      # Split stdin and cd into the result\n  \
      kubectl get all -o yaml | yamlsplit -\n  \
      cd $(yamlsplit manifests.yaml)\n\n  \
      # Split into a fixed directory, failing on path collisions\n  \
      yamlsplit --target-dir ./out --on-duplicate fail manifests.yaml"
)]
struct Cli {
    /// Input file containing the YAML stream, or "-" to read stdin
    #[arg(value_name = "FILE")]
    input: String,

    /// Target directory for placed files (allocates a temp directory when omitted)
    #[arg(short, long, env = "YAMLSPLIT_TARGET_DIR", value_name = "PATH")]
    target_dir: Option<PathBuf>,

    /// Suffix for the temp directory name (ignored with --target-dir)
    #[arg(long, env = "YAMLSPLIT_DIR_SUFFIX", default_value = "", value_name = "SUFFIX")]
    dir_suffix: String,

    /// Behavior when two documents derive the same target path
    #[arg(long, value_enum, default_value = "overwrite")]
    on_duplicate: CliDuplicate,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliDuplicate {
    /// Silently overwrite, last document wins
    Overwrite,
    /// Overwrite with a warning
    Warn,
    /// Abort the run
    Fail,
}

impl From<CliDuplicate> for DuplicatePolicy {
    fn from(p: CliDuplicate) -> Self {
        match p {
            CliDuplicate::Overwrite => Self::Overwrite,
            CliDuplicate::Warn => Self::Warn,
            CliDuplicate::Fail => Self::Fail,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let input = read_input(&cli.input)?;

    let mut builder = Config::builder()
        .dir_suffix(cli.dir_suffix)
        .on_duplicate(cli.on_duplicate.into());

    if let Some(target_dir) = cli.target_dir {
        builder = builder.target_dir(target_dir);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let report = yamlsplit::run(&input, &config).context("Split run failed")?;

    // Scripts consume stdout; everything else goes to stderr.
    println!("{}", report.root_dir.display());

    Ok(())
}

fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Error reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Error reading file '{source}'"))
    }
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("yamlsplit=warn"),
        1 => EnvFilter::new("yamlsplit=debug"),
        _ => EnvFilter::new("yamlsplit=trace"),
    };

    // stdout carries only the final directory path; logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}
