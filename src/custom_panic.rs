// Customized version of https://github.com/sfackler/rust-log-panics
use std::io::Write;
use std::backtrace::Backtrace;
use std::{ panic, thread };

pub fn init() {
    install(std::io::stderr);
}

// The report always goes to `sink`, tracing only sees it if the filter allows
fn install<W, F>(sink: F)
where
    W: Write,
    F: Fn() -> W + Send + Sync + 'static,
{
    panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::capture();

        let thread = thread::current();
        let thread = thread.name().unwrap_or("<unnamed>");

        let msg = match info.payload().downcast_ref::<&'static str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => &**s,
                None => "Box<Any>",
            },
        };

        // Don't leave the terminal stuck in a row color
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\x1b[0m");
        let _ = stdout.flush();

        let report = match info.location() {
            Some(location) => format!(
                "thread '{}' panicked at '{}': {}:{}",
                thread,
                msg,
                location.file(),
                location.line()
            ),
            None => format!("thread '{}' panicked at '{}'", thread, msg),
        };

        tracing::error!(target: "panic", "{}\n{}", report, backtrace);

        let mut out = sink();
        let _ = writeln!(out, "gpuload: {}\n{}", report, backtrace);
        let _ = out.flush();
    }));
}
