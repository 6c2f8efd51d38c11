use std::io::{ stdout, Write };
use anyhow::{ Context, Result };
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt, EnvFilter };

mod custom_panic;
mod error;
mod system;
mod ui;

// Diagnostics go to stderr so stdout only ever carries the report
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<()> {
    let config = system::Config::default();

    // Everything is collected before the first byte is printed
    let system = system::System::collect(config, &system::SystemRunner)?;

    let stdout = stdout();
    let mut stdout = stdout.lock();

    ui::Ui::new(&system).draw(&mut stdout).context("Can't write the report")?;
    stdout.flush().context("Can't write the report")?;

    Ok(())
}

// Only --help and --version, there is nothing to configure
fn cli() -> clap::Command {
    clap::Command::new("gpuload")
        .about("Shows how busy each NVIDIA GPU is and what is running on it")
        .version(env!("GPULOAD_VER"))
        .after_help("Rows are \x1b[32mgreen\x1b[0m when a GPU is free, \x1b[33myellow\x1b[0m under moderate load and \x1b[31mred\x1b[0m when busy.\nRequires nvidia-smi and ps in PATH. Set RUST_LOG=debug to trace the commands being run.")
}

// Reader went away (`gpuload | head`), same as dying on SIGPIPE
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|cause| cause.kind() == std::io::ErrorKind::BrokenPipe)
}

fn main() {
    cli().get_matches();

    init_tracing();
    custom_panic::init();

    if let Err(err) = run() {
        if is_broken_pipe(&err) {
            tracing::debug!("stdout closed early");
            return;
        }

        let code = err.downcast_ref::<error::Error>().map_or(1, error::Error::exit_code);

        tracing::debug!(code, "exiting with error");
        eprintln!("gpuload: {:#}", err);

        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{ Error as IoError, ErrorKind };

    // Accepts `limit` bytes, then behaves like a closed pipe
    struct ClosedAfter {
        limit: usize,
        written: usize,
    }

    impl Write for ClosedAfter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.written >= self.limit {
                return Err(IoError::new(ErrorKind::BrokenPipe, "Broken pipe"));
            }
            let n = buf.len().min(self.limit - self.written);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_stdout_is_not_an_error() {
        let system = system::System {
            config: system::Config::default(),
            gpus: system::gpu::Gpus::default(),
            processes: system::processes::Processes::default(),
        };
        let mut out = ClosedAfter { limit: 70, written: 0 };

        let err = ui::Ui::new(&system)
            .draw(&mut out)
            .context("Can't write the report")
            .err()
            .unwrap();

        assert!(is_broken_pipe(&err));
    }

    #[test]
    fn other_failures_still_count() {
        let io = anyhow::Error::new(IoError::new(ErrorKind::PermissionDenied, "nope")).context("Can't write the report");
        let spawn = anyhow::Error::new(error::Error::NonUtf8 { program: "ps".to_string() });

        assert!(!is_broken_pipe(&io));
        assert!(!is_broken_pipe(&spawn));
    }

    #[test]
    fn cli_takes_no_arguments() {
        cli().debug_assert();

        assert!(cli().try_get_matches_from(["gpuload"]).is_ok());
        assert!(cli().try_get_matches_from(["gpuload", "--frequency", "5"]).is_err());

        let version = cli().try_get_matches_from(["gpuload", "--version"]).err().unwrap();
        assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
