/// Plain text sink: each frame is printed as rows of symbols, separated
/// by a blank line, followed by a status line. Suitable for pipes and logs.

use std::io::{self, Write};

use crate::domain::cell::{Cell, TRAIL_SYMBOL};
use crate::domain::grid::Position;
use crate::sim::step::{FrameSink, Flow};
use crate::sim::world::WorldState;

pub struct PlainSink<W: Write> {
    out: W,
}

impl<W: Write> PlainSink<W> {
    pub fn new(out: W) -> Self {
        PlainSink { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_grid(&mut self, world: &WorldState, route: &[Position]) -> io::Result<()> {
        for (r, cells) in world.snapshot().row_slices().enumerate() {
            let line: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(c, &cell)| {
                    let pos = Position::new(r, c);
                    let marked = cell == Cell::Open && (route.contains(&pos) || world.is_trail(pos));
                    let ch = if marked { TRAIL_SYMBOL } else { cell.symbol() };
                    ch.to_string()
                })
                .collect();
            writeln!(self.out, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl<W: Write> FrameSink for PlainSink<W> {
    fn frame(&mut self, world: &WorldState) -> io::Result<Flow> {
        writeln!(self.out, "-- tick {} --", world.tick)?;
        self.write_grid(world, &[])?;
        for event in &world.events {
            writeln!(self.out, "{event}")?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    fn final_path(&mut self, world: &WorldState, path: &[Position]) -> io::Result<()> {
        writeln!(self.out, "-- final path --")?;
        self.write_grid(world, path)?;
        writeln!(self.out, "The safest path is marked with '{TRAIL_SYMBOL}'.")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::parse_layout;
    use crate::sim::step::run;
    use std::time::Duration;

    #[test]
    fn frames_show_agent_and_trail() {
        let mut world = WorldState::new(parse_layout("S.E\n").unwrap());
        let mut sink = PlainSink::new(Vec::new());
        run(&mut world, &mut sink, Duration::ZERO).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.contains("-- tick 0 --\nP . E\n"));
        assert!(text.contains("-- tick 1 --\nO P E\n"));
        assert!(text.contains("reached the exit at (0, 2)"));
        assert!(text.contains("-- final path --\nO O E\n"));
    }

    #[test]
    fn trapped_run_prints_no_final_path() {
        let mut world = WorldState::new(parse_layout("S#E\n").unwrap());
        let mut sink = PlainSink::new(Vec::new());
        run(&mut world, &mut sink, Duration::ZERO).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.contains("trapped: no safe path to any exit"));
        assert!(!text.contains("final path"));
    }
}
