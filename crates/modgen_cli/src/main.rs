use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use modgen_cli::{run, CommandKind, CommonOptions, SkeletonChoice, PROJECT_DIR_ENV_VAR};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run_cli() -> Result<(), String> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        return Err(usage_text());
    }
    if args[0] == "-h" || args[0] == "--help" {
        print_usage();
        return Ok(());
    }

    let mut options = CommonOptions::default();
    if let Some(dir) = env::var_os(PROJECT_DIR_ENV_VAR) {
        options.project_dir = PathBuf::from(dir);
    }
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--project-dir" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --project-dir".to_string())?;
                options.project_dir = PathBuf::from(value);
                index += 2;
            }
            "--template" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --template".to_string())?;
                options.skeleton = SkeletonChoice::Template(value.clone());
                index += 2;
            }
            "--no-template" => {
                options.skeleton = SkeletonChoice::ExistingDirectory;
                index += 1;
            }
            _ => break,
        }
    }

    let command = args
        .get(index)
        .ok_or_else(|| "missing subcommand".to_string())?
        .as_str();
    let command_args = &args[(index + 1)..];

    let kind = match command {
        "compile" => match command_args {
            [manifest] => CommandKind::Compile {
                manifest: PathBuf::from(manifest),
            },
            [] => return Err("compile requires a manifest path".to_string()),
            _ => return Err("compile takes exactly one manifest path".to_string()),
        },
        "build" => {
            if !command_args.is_empty() {
                return Err("build takes no arguments".to_string());
            }
            CommandKind::Build
        }
        "run" => {
            if !command_args.is_empty() {
                return Err("run takes no arguments".to_string());
            }
            CommandKind::Run
        }
        other => return Err(format!("unknown subcommand '{other}'")),
    };

    run(kind, options, &mut io::stdout()).map_err(|error| error.to_string())
}

fn print_usage() {
    println!("{}", usage_text());
}

fn usage_text() -> String {
    [
        "modgen - compile a declarative mod manifest into a Fabric project",
        "",
        "Usage:",
        "  modgen [--project-dir <dir>] [--template <git-url> | --no-template] compile <manifest.json>",
        "  modgen [--project-dir <dir>] build",
        "  modgen [--project-dir <dir>] run",
        "",
        "Defaults:",
        "  --project-dir $MODGEN_PROJECT_DIR, else ./generated_mod",
        "  --template https://github.com/FabricMC/fabric-example-mod.git (cloned only when the project dir is missing)",
    ]
    .join("\n")
}
