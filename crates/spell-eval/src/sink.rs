//! `Illuminate` does not write to stdout directly -- it writes through an
//! [`OutputSink`], so tests and embedders can capture output instead of
//! printing it.

/// A single-line output collector. SpellLang's only I/O facility.
pub trait OutputSink {
    fn write_line(&mut self, line: &str);
}

/// The sink the CLI front end uses: each `Illuminate` writes one line to
/// standard output.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// An in-memory sink, one entry per `Illuminate`. Used by tests that need
/// to assert on interpreter output without touching stdout.
#[derive(Default)]
pub struct VecSink(pub Vec<String>);

impl OutputSink for VecSink {
    fn write_line(&mut self, line: &str) {
        self.0.push(line.to_string());
    }
}
