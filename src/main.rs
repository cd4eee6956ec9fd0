//! FileDedupe - duplicate file finder
//!
//! Entry point for the filededupe CLI application.

use filededupe::{
    cli::{Cli, OutputFormat},
    config::Config,
    error::{ExitCode, StructuredError},
    logging,
};

fn main() {
    // Help and version requests exit here, before any scanning
    let cli = match Cli::parse_legacy(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    logging::init_logging(cli.verbose, cli.quiet);
    let config = Config::resolve(&cli);
    let json_errors = config.output == OutputFormat::Json;

    match filededupe::run_app(&cli, &config) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
