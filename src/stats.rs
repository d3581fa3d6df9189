use std::time::{Duration, Instant};

const REPORT_EVERY: Duration = Duration::from_millis(500);

/// Generation throughput and population, reported periodically
pub struct Throughput {
    generation: u64,
    alive: usize,
    gens_in_report: u64,
    last_report: Instant,
}
impl Throughput {
    pub fn new(alive: usize) -> Self {
        Self {
            generation: 0,
            alive,
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }

    pub fn record(&mut self, generation: u64, alive: usize) {
        self.gens_in_report += generation.saturating_sub(self.generation);
        self.generation = generation;
        self.alive = alive;
    }

    pub fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_EVERY
    }

    fn gens_per_sec(&self) -> f64 {
        self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64()
    }

    pub fn report(&mut self) -> String {
        let gens_per_sec = self.gens_per_sec();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gen:{}, alive:{}",
            gens_per_sec, self.generation, self.alive
        )
    }
}
