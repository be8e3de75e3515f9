/*!
The context --- an analysis session over one formula.

A context owns the formula, the configuration, and the measurement state of
one analysis, and maps entry points to textual digests:

- [wl_digest](Context::wl_digest) — the decimal rendering of the
  Weisfeiler–Leman hash of the formula, with measurements appended on
  request.
- [gate_digest](Context::gate_digest) — a summary of the gate structure
  recognized over the formula.

A context is single-threaded and used once per formula; analysis of many
files is analysis with many contexts.
Dropping the context releases everything it owns.

# Example
```rust
# use cnf_ident::config::Config;
# use cnf_ident::context::Context;
# use std::io::Write;
let mut dimacs = vec![];
let _ = dimacs.write(b"
p cnf 2 2
 1 -2 0
-1  2 0
");

let mut the_context = Context::from_config(Config::default());
assert!(the_context.read_dimacs(dimacs.as_slice()).is_ok());

let digest = the_context.wl_digest();
assert!(digest.chars().all(|c| c.is_ascii_digit()));
```
*/

use std::time::{Duration, Instant};

use crate::{
    config::{Config, HashWidth},
    db::gate::GateFormula,
    formula::{Formula, ParserInfo},
    gates::analyzer::GateAnalyzer,
    hash::wl::WeisfeilerLemanHasher,
    misc::resources::resident_memory_kb,
    reports::{GateReport, Measurements},
    types::err::{self},
};

/// An analysis session over one formula.
pub struct Context {
    /// The configuration of the session.
    pub config: Config,

    /// The formula under analysis.
    pub formula: Formula,

    /// Time spent reading the formula, if it was read.
    parse_time: Option<Duration>,

    /// Resident memory at the start of the session, in KB.
    start_memory_kb: u64,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            formula: Formula::new(),
            parse_time: None,
            start_memory_kb: resident_memory_kb(),
        }
    }

    /// Reads a DIMACS file into the formula of the context, recording the
    /// parse time.
    pub fn read_dimacs(
        &mut self,
        reader: impl std::io::BufRead,
    ) -> Result<ParserInfo, err::ErrorKind> {
        let start = Instant::now();
        let info = self.formula.read_dimacs(reader)?;
        self.parse_time = Some(start.elapsed());
        Ok(info)
    }

    /// Reads the DIMACS file at the given path into the formula of the
    /// context.
    pub fn read_dimacs_path(&mut self, path: &std::path::Path) -> Result<ParserInfo, err::ErrorKind> {
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(_) => return Err(err::ErrorKind::InputNotReadable),
        };
        self.read_dimacs(std::io::BufReader::new(file))
    }

    /// The Weisfeiler–Leman digest of the formula: the decimal digits of the
    /// hash, with `,parse_ns,compute_ns,mem_kb,iterations` appended when
    /// measurements are requested.
    pub fn wl_digest(&self) -> String {
        let start = Instant::now();

        let (digits, iterations) = match self.config.wl.hash_width.value {
            HashWidth::Bits32 => {
                let mut hasher = WeisfeilerLemanHasher::<u32>::new(&self.formula, &self.config.wl);
                let hash = hasher.run();
                (hash.to_string(), hasher.effective_iterations())
            }
            HashWidth::Bits64 => {
                let mut hasher = WeisfeilerLemanHasher::<u64>::new(&self.formula, &self.config.wl);
                let hash = hasher.run();
                (hash.to_string(), hasher.effective_iterations())
            }
        };

        if !self.config.wl.return_measurements.value {
            return digits;
        }

        let measurements = Measurements {
            parse: self.parse_time.unwrap_or_default(),
            compute: start.elapsed(),
            memory_kb: resident_memory_kb().saturating_sub(self.start_memory_kb),
            iterations,
        };
        format!("{digits},{measurements}")
    }

    /// Analyzes the gate structure of the formula.
    pub fn analyze_gates(&self) -> Result<GateFormula, err::ErrorKind> {
        let mut analyzer = GateAnalyzer::from_formula(&self.formula, self.config.gates.clone())?;
        analyzer.analyze();
        Ok(analyzer.into_gate_formula())
    }

    /// A summary digest of the gate structure of the formula.
    pub fn gate_digest(&self) -> Result<String, err::ErrorKind> {
        let gate_formula = self.analyze_gates()?;
        let report = GateReport {
            gates: gate_formula.gate_count(),
            monotonic: gate_formula.monotonic_gate_count(),
            roots: gate_formula.root_count(),
            remainder: gate_formula.remainder.len(),
        };
        Ok(report.to_string())
    }
}
