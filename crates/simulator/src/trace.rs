//! Event trace output.

use queuesim_core::Event;
use queuesim_simulation::SimulationStats;
use std::io::{self, Write};

/// Writes trace lines and the final summary to any [`Write`].
///
/// Rest events are never written. With events disabled only the summary
/// line is written.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
    write_events: bool,
    lines_written: u64,
}

impl<W: Write> TraceWriter<W> {
    /// Write every traced event and the summary.
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_events: true,
            lines_written: 0,
        }
    }

    /// Write only the summary.
    pub fn summary_only(out: W) -> Self {
        Self {
            write_events: false,
            ..Self::new(out)
        }
    }

    /// Write one event line, if the event is traced.
    pub fn write_event(&mut self, event: &Event) -> io::Result<()> {
        if !self.write_events || !event.status().is_traced() {
            return Ok(());
        }
        writeln!(self.out, "{}", event)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write the `[average served left]` line and flush.
    pub fn write_summary(&mut self, stats: &SimulationStats) -> io::Result<()> {
        writeln!(self.out, "{}", stats)?;
        self.lines_written += 1;
        self.out.flush()
    }

    /// Lines written so far, summary included.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_test_helpers::fixtures::{customer, server};

    #[test]
    fn test_writes_traced_events_only() {
        let arrival = Event::arrival(customer(1, 0.0));
        let done = arrival.served_by(server(0)).done_after(2.0);

        let mut writer = TraceWriter::new(Vec::new());
        writer.write_event(&arrival).unwrap();
        writer.write_event(&done.rests_for(1.0)).unwrap();
        writer.write_event(&done).unwrap();
        writer
            .write_summary(&SimulationStats {
                customers_served: 1,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(writer.lines_written(), 3);
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "0.000 1 arrives\n2.000 1 done serving by server 1\n[0.000 1 0]\n"
        );
    }

    #[test]
    fn test_summary_only() {
        let mut writer = TraceWriter::summary_only(Vec::new());
        writer
            .write_event(&Event::arrival(customer(1, 0.0)))
            .unwrap();
        writer.write_summary(&SimulationStats::default()).unwrap();

        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), "[0.000 0 0]\n");
    }
}
