use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use collections::{HashTable, MatchPolicy};
use log::{info, trace, warn};

use crate::{
    PhonebookError,
    config::Config,
    loader,
    search::{SearchMethod, Searcher},
    sort::{Budget, SortOutcome, bubble_sort, quicksort},
    storage::{Directory, Record},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Linear,
    Jump,
    Binary,
    Hash,
}

/// What runs before the searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrepKind {
    BubbleSort,
    QuickSort,
    HashBuild,
}

impl PrepKind {
    /// Whether completing this step leaves the directory ordered
    pub fn is_sort(self) -> bool {
        !matches!(self, PrepKind::HashBuild)
    }

    pub fn label(self) -> &'static str {
        match self {
            PrepKind::BubbleSort | PrepKind::QuickSort => "Sorting",
            PrepKind::HashBuild => "Creating",
        }
    }
}

#[derive(Debug)]
struct StrategySpec {
    preparation: Option<PrepKind>,
    search: SearchMethod,
    label: &'static str,
}

/// Indexed by `Strategy as usize`
static STRATEGIES: [StrategySpec; 4] = [
    StrategySpec {
        preparation: None,
        search: SearchMethod::Linear,
        label: "linear search",
    },
    StrategySpec {
        preparation: Some(PrepKind::BubbleSort),
        search: SearchMethod::Jump,
        label: "bubble sort + jump search",
    },
    StrategySpec {
        preparation: Some(PrepKind::QuickSort),
        search: SearchMethod::Binary,
        label: "quick sort + binary search",
    },
    StrategySpec {
        preparation: Some(PrepKind::HashBuild),
        search: SearchMethod::Hash,
        label: "hash table",
    },
];

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Linear,
        Strategy::Jump,
        Strategy::Binary,
        Strategy::Hash,
    ];

    fn spec(self) -> &'static StrategySpec {
        &STRATEGIES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn preparation(self) -> Option<PrepKind> {
        self.spec().preparation
    }

    pub fn search(self) -> SearchMethod {
        self.spec().search
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Preparing,
    PreparedOk,
    /// A sort ran out of budget, searching falls back to linear
    PreparedAborted,
    Searching,
    Reported,
}

impl RunState {
    pub fn can_advance_to(self, next: RunState) -> bool {
        use RunState::*;

        matches!(
            (self, next),
            (Idle, Preparing)
                | (Idle, Searching)
                | (Preparing, PreparedOk)
                | (Preparing, PreparedAborted)
                | (PreparedOk, Searching)
                | (PreparedAborted, Searching)
                | (Searching, Reported)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepTiming {
    pub kind: PrepKind,
    pub elapsed: Duration,
    pub aborted: bool,
}

/// Outcome of one benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The strategy that was asked for
    pub strategy: Strategy,
    /// The search that actually ran, linear after an aborted sort
    pub searched_with: SearchMethod,
    pub found: usize,
    pub tried: usize,
    pub preparation: Option<PrepTiming>,
    pub search_elapsed: Duration,
}

impl RunReport {
    pub fn total_elapsed(&self) -> Duration {
        let prep = self.preparation.map(|p| p.elapsed).unwrap_or_default();
        prep + self.search_elapsed
    }

    pub fn sort_cancelled(&self) -> bool {
        self.preparation.is_some_and(|p| p.aborted)
    }
}

/// Sort budget derived from a baseline search time
pub fn calibrate(baseline: Duration, factor: u32) -> Duration {
    baseline.saturating_mul(factor)
}

/// Runs strategies against a directory, carrying the bubble sort budget
/// from one run to the next
#[derive(Debug)]
pub struct Benchmark {
    max_allowed: Duration,
    factor: u32,
    policy: MatchPolicy,
    snapshot: Option<PathBuf>,
    state: RunState,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Benchmark {
    pub fn new(config: &Config) -> Self {
        Self {
            max_allowed: config.initial_budget,
            factor: config.factor,
            policy: config.policy,
            snapshot: config.snapshot.clone(),
            state: RunState::Idle,
        }
    }

    /// Current bubble sort budget
    pub fn max_allowed(&self) -> Duration {
        self.max_allowed
    }

    pub fn set_max_allowed(&mut self, limit: Duration) {
        self.max_allowed = limit;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn run(
        &mut self,
        strategy: Strategy,
        directory: &mut Directory,
        queries: &[String],
    ) -> RunReport {
        self.state = RunState::Idle;
        info!(target: "benchmark", "start searching ({})", strategy.label());

        let mut table = None;
        let mut preparation = None;

        if let Some(kind) = strategy.preparation() {
            self.advance(RunState::Preparing);

            let start = Instant::now();
            let outcome = match kind {
                PrepKind::BubbleSort => bubble_sort(directory, Budget::Within(self.max_allowed)),
                PrepKind::QuickSort => quicksort(directory),
                PrepKind::HashBuild => {
                    table = Some(self.build_table(directory.entries()));
                    SortOutcome::Completed
                }
            };
            let elapsed = start.elapsed();

            let aborted = match outcome {
                SortOutcome::Completed => {
                    self.advance(RunState::PreparedOk);
                    if kind.is_sort() {
                        directory.set_ordered(true);
                        self.save_snapshot(directory);
                    }
                    false
                }
                SortOutcome::TimedOut => {
                    self.advance(RunState::PreparedAborted);
                    directory.set_ordered(false);
                    let e = PhonebookError::PreparationTimedOut {
                        budget: self.max_allowed,
                    };
                    warn!(target: "benchmark", "{e}, moved to linear search");
                    true
                }
            };

            preparation = Some(PrepTiming {
                kind,
                elapsed,
                aborted,
            });
        }

        self.advance(RunState::Searching);

        let records = directory.entries();
        let aborted = preparation.is_some_and(|p| p.aborted);
        let searcher = match (strategy.search(), table.as_ref()) {
            _ if aborted => Searcher::Linear(records),
            (SearchMethod::Linear, _) => Searcher::Linear(records),
            (SearchMethod::Jump, _) => Searcher::Jump(records),
            (SearchMethod::Binary, _) => Searcher::Binary(records),
            (SearchMethod::Hash, Some(t)) => Searcher::Hash(t),
            (SearchMethod::Hash, None) => Searcher::Linear(records),
        };

        let start = Instant::now();
        let found = queries.iter().filter(|q| searcher.is_present(q)).count();
        let search_elapsed = start.elapsed();

        if strategy == Strategy::Linear && preparation.is_none() {
            self.max_allowed = calibrate(search_elapsed, self.factor);
            info!(target: "benchmark", "sort budget calibrated to {:?}", self.max_allowed);
        }

        self.advance(RunState::Reported);

        RunReport {
            strategy,
            searched_with: searcher.method(),
            found,
            tried: queries.len(),
            preparation,
            search_elapsed,
        }
    }

    // [private]

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid transition {:?} -> {:?}",
            self.state,
            next
        );
        trace!(target: "benchmark", "{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn build_table(&self, records: &[Record]) -> HashTable<Record> {
        let entries = records.iter().map(|r| (r.name().to_string(), r.clone()));
        let (table, dropped) = HashTable::build(entries, self.policy);

        for e in &dropped {
            warn!(target: "build_table", "dropping entry: {e}");
        }
        trace!(
            target: "build_table",
            "{} of {} slots used, {} dropped",
            table.len(),
            table.capacity(),
            dropped.len()
        );

        table
    }

    fn save_snapshot(&self, directory: &Directory) {
        let Some(path) = &self.snapshot else {
            return;
        };

        match loader::write_snapshot(path, directory) {
            Ok(()) => trace!(target: "save_snapshot", "wrote {}", path.display()),
            Err(e) => warn!(target: "save_snapshot", "{e}"),
        }
    }
}

/// The full benchmark: linear, then jump on the same directory,
/// then binary and hash on a freshly loaded one
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs every strategy, handing each report to `observe` as soon as it is ready
    pub fn run<F: FnMut(&RunReport)>(&self, mut observe: F) -> Vec<RunReport> {
        let queries = loader::load_queries(&self.config.find);
        let mut bench = Benchmark::new(&self.config);
        let mut reports = Vec::with_capacity(Strategy::ALL.len());

        let mut run = |bench: &mut Benchmark, strategy: Strategy, directory: &mut Directory| {
            let report = bench.run(strategy, directory, &queries);
            observe(&report);
            reports.push(report);
        };

        let mut directory = loader::load_directory(&self.config.directory);
        run(&mut bench, Strategy::Linear, &mut directory);
        run(&mut bench, Strategy::Jump, &mut directory);

        // sort timings start from unsorted input again
        let mut directory = loader::load_directory(&self.config.directory);
        run(&mut bench, Strategy::Binary, &mut directory);
        run(&mut bench, Strategy::Hash, &mut directory);

        reports
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::{Benchmark, PrepKind, RunState, Strategy, calibrate};
    use crate::{
        config::Config,
        search::SearchMethod,
        storage::{Directory, Record},
    };

    fn directory() -> Directory {
        vec![
            Record::new("555-0102", "Carol"),
            Record::new("555-0100", "Alice"),
            Record::new("555-0101", "Bob"),
        ]
        .into_iter()
        .collect()
    }

    fn queries() -> Vec<String> {
        vec!["Bob".into(), "Dan".into()]
    }

    fn bench() -> Benchmark {
        Benchmark::new(&Config {
            snapshot: None,
            ..Config::default()
        })
    }

    #[test]
    fn strategy_table() {
        assert_eq!(Strategy::Linear.preparation(), None);
        assert_eq!(Strategy::Jump.preparation(), Some(PrepKind::BubbleSort));
        assert_eq!(Strategy::Binary.preparation(), Some(PrepKind::QuickSort));
        assert_eq!(Strategy::Hash.preparation(), Some(PrepKind::HashBuild));

        for strategy in Strategy::ALL {
            assert!(!strategy.label().is_empty());
        }
        assert_eq!(Strategy::Hash.search(), SearchMethod::Hash);
        assert_eq!(Strategy::Binary.label(), "quick sort + binary search");
    }

    #[test]
    fn calibration_is_ten_times_baseline() {
        assert_eq!(calibrate(Duration::from_millis(5), 10), Duration::from_millis(50));
        assert_eq!(calibrate(Duration::ZERO, 10), Duration::ZERO);
        assert_eq!(calibrate(Duration::MAX, 10), Duration::MAX);
    }

    #[test]
    fn linear_run_calibrates_budget() {
        let mut b = bench();
        let mut d = directory();

        let report = b.run(Strategy::Linear, &mut d, &queries());

        assert_eq!((report.found, report.tried), (1, 2));
        assert_eq!(report.preparation, None);
        assert_eq!(b.max_allowed(), calibrate(report.search_elapsed, 10));
        assert_eq!(b.state(), RunState::Reported);
        assert!(!d.is_ordered());
    }

    #[test]
    fn every_strategy_finds_the_same() {
        for strategy in Strategy::ALL {
            let mut b = bench();
            b.set_max_allowed(Duration::from_secs(60));
            let mut d = directory();

            let report = b.run(strategy, &mut d, &queries());

            assert_eq!((report.found, report.tried), (1, 2), "{strategy:?}");
            assert!(!report.sort_cancelled());
            assert_eq!(report.searched_with, strategy.search());
        }
    }

    #[test]
    fn sorts_mark_directory_ordered() {
        let mut b = bench();
        let mut d = directory();

        let report = b.run(Strategy::Binary, &mut d, &queries());

        assert!(d.is_ordered());
        let names: Vec<&str> = d.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(report.preparation.unwrap().kind, PrepKind::QuickSort);
        assert!(report.total_elapsed() >= report.search_elapsed);
    }

    #[test]
    fn hash_build_leaves_order_alone() {
        let mut b = bench();
        let mut d = directory();

        let report = b.run(Strategy::Hash, &mut d, &queries());

        assert!(!d.is_ordered());
        assert_eq!(d.entries()[0].name(), "Carol");
        assert_eq!(report.preparation.unwrap().kind.label(), "Creating");
    }

    #[test]
    fn timed_out_sort_falls_back_to_linear() {
        let mut b = bench();
        b.set_max_allowed(Duration::ZERO);
        let mut d = directory();

        let report = b.run(Strategy::Jump, &mut d, &queries());

        assert!(report.sort_cancelled());
        assert_eq!(report.searched_with, SearchMethod::Linear);
        assert_eq!((report.found, report.tried), (1, 2));
        assert!(!d.is_ordered());
        assert_eq!(d.entries()[0].name(), "Carol");
    }

    #[test]
    fn timed_out_sort_keeps_budget_and_skips_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("sorted.txt");
        let mut b = Benchmark::new(&Config {
            snapshot: Some(snapshot.clone()),
            ..Config::default()
        });
        b.set_max_allowed(Duration::ZERO);
        let mut d = directory();

        let report = b.run(Strategy::Jump, &mut d, &queries());

        assert!(report.sort_cancelled());
        assert!(!snapshot.exists());
        // the linear fallback does not recalibrate
        assert_eq!(b.max_allowed(), Duration::ZERO);

        b.set_max_allowed(Duration::from_secs(60));
        let report = b.run(Strategy::Jump, &mut d, &queries());

        assert!(!report.sort_cancelled());
        assert!(snapshot.exists());
        assert_eq!(b.max_allowed(), Duration::from_secs(60));
    }

    #[test]
    fn state_transitions() {
        use RunState::*;

        assert!(Idle.can_advance_to(Preparing));
        assert!(Idle.can_advance_to(Searching));
        assert!(Preparing.can_advance_to(PreparedAborted));
        assert!(PreparedAborted.can_advance_to(Searching));
        assert!(!Idle.can_advance_to(Reported));
        assert!(!Preparing.can_advance_to(Searching));
        assert!(!Reported.can_advance_to(Searching));
    }

    #[test]
    fn empty_inputs() {
        let mut b = bench();
        let mut d = Directory::default();

        for strategy in Strategy::ALL {
            let report = b.run(strategy, &mut d, &[]);
            assert_eq!((report.found, report.tried), (0, 0));
        }
    }
}
