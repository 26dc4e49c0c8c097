use anyhow::Context;
use argh::FromArgs;
use log::info;
use pathsh::{Interpreter, SearchPath, repl};
use std::ffi::OsStr;
use std::io::{self, IsTerminal, Write};

#[derive(FromArgs)]
/// A minimal interactive shell with builtins and PATH lookup.
struct Args {
    #[argh(option, short = 'c')]
    /// evaluate a single command line and exit with its status.
    command: Option<String>,

    #[argh(option)]
    /// directories to search for programs, separated like PATH; overrides PATH.
    path: Option<String>,

    #[argh(switch)]
    /// read plain lines from standard input, without line editing.
    plain: bool,
}

fn run(args: Args) -> anyhow::Result<i32> {
    let search_path = match &args.path {
        Some(path) => SearchPath::parse(Some(OsStr::new(path))),
        None => SearchPath::from_process_env(),
    };
    info!("search path: {:?}", search_path.dirs());
    let mut sh = Interpreter::new(search_path);

    if let Some(line) = args.command {
        let status = sh.eval(&line, &mut io::stdout(), &mut io::stderr())?;
        return Ok(sh.exit_requested().unwrap_or(status));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() && !args.plain {
        repl::run_editor(&mut sh)
    } else {
        repl::run_plain(
            &mut sh,
            &mut stdin.lock(),
            &mut io::stdout(),
            &mut io::stderr(),
        )
    }
}

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();

    let code = match run(args).context("shell terminated abnormally") {
        Ok(code) => code,
        Err(e) => {
            let _ = writeln!(io::stderr(), "pathsh: {e:#}");
            1
        }
    };
    info!("exiting with status {code}");
    let _ = io::stdout().flush();
    std::process::exit(code);
}
