//! # writetest
//!
//! `writetest [HANDLE] [IGNORED...]`
//!
//! Always exits 0; read the `Result:` line to learn whether the write worked.

use clap::Parser;
use writeprobe::{run_probe, Invocation, OsWriter, TargetHandle};
use writeprobe_config::logging::init_logging;
use writeprobe_config::{log_cli_debug, log_cli_warn, Config};

/// Write "Hi there, world." to stdout or to a numeric handle and print the result
#[derive(Parser, Debug)]
#[command(name = "writetest")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Handle to write to instead of stdout (decimal, 0x hex, or 0 octal)
    #[arg(value_name = "HANDLE", allow_hyphen_values = true)]
    handle: Option<String>,

    /// Echoed, otherwise ignored
    #[arg(
        value_name = "IGNORED",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    rest: Vec<String>,
}

fn main() {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("writetest: ignoring config: {e}");
        Config::default()
    });
    init_logging(&config.log);

    let invocation = Invocation::from_env();
    // The handle always comes from raw argv[1]; clap would swallow a leading `--`.
    let handle = TargetHandle::resolve(&invocation);
    match Cli::try_parse_from(invocation.args()) {
        Ok(cli) => log_cli_debug!(
            "arguments parsed",
            count = invocation.len(),
            clap_handle = cli.handle.as_deref().unwrap_or("<none>"),
            ignored = cli.rest.len(),
            handle = handle.to_string()
        ),
        Err(e) => log_cli_warn!("argument parsing failed", error = e.to_string()),
    }

    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    let outcome = run_probe(&invocation, handle, &mut console, &mut OsWriter);

    log_cli_debug!(
        "probe finished",
        success = outcome.success,
        bytes = outcome.bytes_written,
        os_error = outcome.os_error.unwrap_or(0)
    );
}
