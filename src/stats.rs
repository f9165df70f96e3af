use std::time::Instant;

pub trait Recorder {
    fn record(&mut self, population: usize);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> String;
}

/// Rolling generations-per-second line for the console footer or stdout.
pub struct RateRecord {
    gens: u64,
    population: usize,
    gens_in_report: u64,
    last_report: Instant,
}
impl RateRecord {
    pub fn new(population: usize) -> Self {
        Self {
            gens: 0,
            population,
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for RateRecord {
    fn record(&mut self, population: usize) {
        self.gens += 1;
        self.gens_in_report += 1;
        self.population = population;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed().as_millis() >= 500
    }
    fn report(&mut self) -> String {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gens:{}, alive:{}",
            gens_per_sec, self.gens, self.population
        )
    }
}

/// Per-generation timing log, saved as a CSV when the run ends.
pub struct CsvLog {
    inner: RateRecord,
    data: Vec<(u128, usize)>,
    last: Instant,
}
impl CsvLog {
    pub fn new(population: usize) -> Self {
        Self {
            inner: RateRecord::new(population),
            data: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        use std::{
            fs,
            io::{self, Write},
        };

        let file = fs::File::create(path)?;
        let mut file = io::BufWriter::new(file);

        file.write_all(b"gen,delta_us,alive\n")?;
        for (i, (delta, population)) in self.data.iter().enumerate() {
            let line = format!("{},{},{}\n", i, delta, population);
            file.write_all(line.as_bytes())?;
        }
        file.flush()
    }
}
impl Recorder for CsvLog {
    fn record(&mut self, population: usize) {
        let delta = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.data.push((delta, population));
        self.inner.record(population);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> String {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvLog),
    Rate(RateRecord),
}
impl SwitchRecorder {
    pub fn new(population: usize, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvLog::new(population))
        } else {
            Self::Rate(RateRecord::new(population))
        }
    }
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            _ => panic!("cannot save statistics if not CsvLog type"),
        }
    }
}
impl Recorder for SwitchRecorder {
    fn record(&mut self, population: usize) {
        match self {
            Self::Csv(r) => r.record(population),
            Self::Rate(r) => r.record(population),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Rate(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> String {
        match self {
            Self::Csv(r) => r.report(),
            Self::Rate(r) => r.report(),
        }
    }
}
