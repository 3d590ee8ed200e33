//! Output collaborators.
//!
//! The engine never prints on its own. It hands a [`GenerationView`] to a
//! [`Reporter`] after every ranking and a [`RunSummary`] when the loop stops.

use crate::algorithms::roulette::RunSummary;
use crate::{Chromosome, SearchDirection};
use std::io::{self, Write};

/// A ranked generation as seen from outside the engine.
#[derive(Debug, Clone, Copy)]
pub struct GenerationView<'a> {
    /// 0 for the initial population, then one per reproduction cycle.
    pub generation: u64,
    pub direction: SearchDirection,
    pub population: &'a [Chromosome],
}

impl GenerationView<'_> {
    /// Chromosomes with fitness in the objective's own sign convention.
    pub fn corrected(&self) -> impl Iterator<Item = Chromosome> + '_ {
        let direction = self.direction;
        self.population.iter().map(move |c| Chromosome {
            fitness: direction.orient(c.fitness),
            ..*c
        })
    }

    /// Best chromosome, sign corrected.
    pub fn best(&self) -> Option<Chromosome> {
        self.corrected().last()
    }
}

pub trait Reporter {
    fn on_generation(&mut self, _view: &GenerationView<'_>) {}
    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Prints tab-separated `X:`/`Y:`/`Z:` rows per generation and the final
/// extremum to a writer.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    dump_generations: bool,
    summary: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(dump_generations: bool) -> Self {
        Self::new(io::stdout(), dump_generations)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, dump_generations: bool) -> Self {
        Self {
            out,
            dump_generations,
            summary: true,
        }
    }

    /// Skips the text summary on finish, e.g. when the caller emits the
    /// summary in another format.
    pub fn without_summary(mut self) -> Self {
        self.summary = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_generation(&mut self, view: &GenerationView<'_>) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Generation {}", view.generation)?;
        let rows: [(&str, fn(&Chromosome) -> f64); 3] = [
            ("X", |c: &Chromosome| c.x),
            ("Y", |c: &Chromosome| c.y),
            ("Z", |c: &Chromosome| c.fitness),
        ];
        for (label, field) in rows {
            write!(self.out, "{}:", label)?;
            for c in view.corrected() {
                write!(self.out, "\t{}", field(&c))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        let best = &summary.best;
        let goal = match summary.direction {
            SearchDirection::Minimize => "Minimization",
            SearchDirection::Maximize => "Maximization",
        };
        writeln!(self.out, "{} function", goal)?;
        writeln!(self.out, "z = x * x * x - 6 * x * y + 8 * y * y * y + 5")?;
        writeln!(self.out)?;
        writeln!(self.out, "X = {}", best.x)?;
        writeln!(self.out, "Y = {}", best.y)?;
        writeln!(self.out, "Z = {}", best.fitness)?;
        writeln!(self.out)?;
        writeln!(self.out, "Rounded:")?;
        writeln!(self.out, "X = {:.1}", best.x)?;
        writeln!(self.out, "Y = {:.1}", best.y)?;
        writeln!(self.out, "Z = {:.1}", best.fitness)?;
        writeln!(
            self.out,
            "Generations: {} ({})",
            summary.generations, summary.stop
        )?;
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_generation(&mut self, view: &GenerationView<'_>) {
        if !self.dump_generations {
            return;
        }
        if let Err(e) = self.write_generation(view) {
            tracing::warn!(error = %e, "failed to write generation dump");
        }
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        if !self.summary {
            return;
        }
        if let Err(e) = self.write_summary(summary) {
            tracing::warn!(error = %e, "failed to write run summary");
        }
    }
}
