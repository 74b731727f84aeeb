//! The `mvn` binary: parse the invocation, run the selected route and exit
//! with its status.
use std::ffi::OsString;
use std::io::Write as _;

use cling_cli::commands::{Environment, ProcessEngine};
use cling_cli::launcher::Launcher;
use cling_cli::logging;

const COMMAND_NAME: &str = "mvn";

fn main() {
    logging::init_subscriber();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    let launcher = Launcher::new(
        COMMAND_NAME,
        ProcessEngine::new(COMMAND_NAME, Environment::capture()),
    );

    let code = {
        let mut out = std::io::stdout().lock();
        let mut err = std::io::stderr().lock();
        let code = launcher.run(&args, &mut out, &mut err);
        out.flush().ok();
        err.flush().ok();
        code
    };

    std::process::exit(code);
}
