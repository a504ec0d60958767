//! `hci-dissector` binary: CLI parsing, source/sink wiring, and process exit codes.
//! The core run loop lives in [`hci_dissector::app`].

use clap::Parser;
use hci_dissector::app::{self, Options};
use hci_dissector::output::text::TextSink;
use hci_dissector::source::MonitorSource;
use hci_dissector::source::file::FileSource;
#[cfg(feature = "socket")]
use hci_dissector::source::socket::SocketSource;
use std::panic::{self, PanicHookInfo};
use std::process::ExitCode;

fn build_source(options: &Options) -> Result<Box<dyn MonitorSource>, String> {
    if let Some(path) = &options.file {
        return Ok(Box::new(FileSource::new(path.clone())));
    }

    #[cfg(feature = "socket")]
    {
        Ok(Box::new(SocketSource))
    }

    #[cfg(not(feature = "socket"))]
    {
        Err("no --file given and this build has no socket support (feature \"socket\" disabled)".to_string())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    panic::set_hook(Box::new(|info: &PanicHookInfo| {
        eprintln!("panic: {info}");
    }));

    let options = Options::parse();

    let source = match build_source(&options) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(1);
        }
    };

    let sink = TextSink::new(std::io::stdout());

    match app::run_with_io(options, source.as_ref(), &sink).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        }
    }
}
