use std::io::{stdout, Write};

use crossterm::{cursor, terminal, QueueableCommand};
use otter_pdr::{config::Config, misc::log::targets, ntk::Network};

/// A line of the terminal refreshed with the count of cubes in each frame.
pub struct ProgressWindow {
    column: u16,
    row: u16,

    /// Whether a failure to draw has been logged.
    warned: bool,
}

impl ProgressWindow {
    pub fn new(config: &Config, network: &Network) -> Self {
        println!("c 🦦");
        println!(
            "c {} INPUTS, {} LATCHES, {} NODES",
            network.input_count(),
            network.latch_count(),
            network.node_count()
        );
        if let Some(limit) = config.time_limit {
            println!("c TIME LIMIT: {limit:.2?}");
        }
        if config.multi_step.enabled() {
            println!("c MULTI-STEP DEPTH {}", config.multi_step.depth.value);
        }
        println!("c FRAMES");

        // Without a cursor position the line is redrawn in place at the top of the terminal.
        let location = cursor::position().unwrap_or((0, 1));

        ProgressWindow {
            column: 10,
            row: location.1.saturating_sub(1),
            warned: false,
        }
    }

    /// Draws `sizes` to stdout.
    ///
    /// The first failure to draw is logged as a warning, and later failures are ignored.
    pub fn refresh(&mut self, sizes: &[usize]) {
        self.refresh_to(&mut stdout(), sizes)
    }

    fn refresh_to(&mut self, out: &mut impl Write, sizes: &[usize]) {
        if let Err(e) = self.draw(out, sizes) {
            if !self.warned {
                log::warn!(target: targets::CLI, "Progress window not drawn: {e}");
                self.warned = true;
            }
        }
    }

    fn draw(&self, out: &mut impl Write, sizes: &[usize]) -> std::io::Result<()> {
        out.queue(cursor::SavePosition)?;
        out.queue(cursor::MoveTo(self.column, self.row))?;
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        out.write_all(format!("{} {sizes:?}", sizes.len()).as_bytes())?;
        out.queue(cursor::RestorePosition)?;
        out.flush()
    }
}
