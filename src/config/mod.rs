/*!
Configuration of an analysis.

The primary configuration structure is [Config], made of two groups:
- [WlConfig], the knobs of the color-refinement hasher.
- [GateConfig], the knobs of the gate analyzer.

Scalar options are [ConfigOption] records carrying a name and bounds
alongside the value, so a CLI (or any other frontend) can validate a
requested value without duplicating the limits.
*/

mod config_option;
pub use config_option::ConfigOption;

/// The width of the color hashes of the refinement hasher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HashWidth {
    /// 32-bit colors.
    Bits32,

    /// 64-bit colors.
    Bits64,
}

impl std::str::FromStr for HashWidth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "32" => Ok(Self::Bits32),
            "64" => Ok(Self::Bits64),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for HashWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bits32 => write!(f, "32"),
            Self::Bits64 => write!(f, "64"),
        }
    }
}

/// Configuration of the Weisfeiler–Leman hasher.
#[derive(Clone)]
pub struct WlConfig {
    /// Upper bound `2·⌊depth/2⌋` on refinement steps; the parity of the depth
    /// selects the final summary (even: variable hash, odd: CNF hash).
    pub depth: ConfigOption<u32>,

    /// Whether each step binds the two polarities of a variable by
    /// cross-referencing their colors.
    /// When false the scheme approximates vertex-colored refinement over
    /// literals alone.
    pub cross_reference_literals: ConfigOption<bool>,

    /// Whether a clause hash is the raw color sum (false) or that sum hashed
    /// once more (true).
    pub rehash_clauses: ConfigOption<bool>,

    /// Whether the first iteration substitutes a hash of the clause size for
    /// the clause hash — sound, as all initial colors are equal.
    pub optimize_first_iteration: ConfigOption<bool>,

    /// The earliest iteration at which convergence is tested.
    pub first_progress_check_iteration: ConfigOption<u32>,

    /// Whether to append parse time, compute time, memory use and iteration
    /// count to the digest.
    pub return_measurements: ConfigOption<bool>,

    /// The width of the color hashes.
    pub hash_width: ConfigOption<HashWidth>,

    /// Whether combining is modulo a prime near the word rather than
    /// carry-wrap addition on the word.
    pub use_prime_ring: ConfigOption<bool>,
}

impl Default for WlConfig {
    fn default() -> Self {
        WlConfig {
            depth: ConfigOption {
                name: "depth",
                min: 0,
                max: u32::MAX,
                value: 13,
            },

            cross_reference_literals: ConfigOption {
                name: "cross_reference_literals",
                min: false,
                max: true,
                value: true,
            },

            rehash_clauses: ConfigOption {
                name: "rehash_clauses",
                min: false,
                max: true,
                value: true,
            },

            optimize_first_iteration: ConfigOption {
                name: "optimize_first_iteration",
                min: false,
                max: true,
                value: true,
            },

            first_progress_check_iteration: ConfigOption {
                name: "first_progress_check",
                min: 0,
                max: u32::MAX,
                value: 3,
            },

            return_measurements: ConfigOption {
                name: "measurements",
                min: false,
                max: true,
                value: false,
            },

            hash_width: ConfigOption {
                name: "hash_width",
                min: HashWidth::Bits32,
                max: HashWidth::Bits64,
                value: HashWidth::Bits64,
            },

            use_prime_ring: ConfigOption {
                name: "prime_ring",
                min: false,
                max: true,
                value: false,
            },
        }
    }
}

/// Configuration of the gate analyzer.
#[derive(Clone)]
pub struct GateConfig {
    /// Permit recognition by clause patterns of full encodings.
    pub patterns: ConfigOption<bool>,

    /// Permit recognition by semantic checks against a SAT oracle.
    pub semantic: ConfigOption<bool>,

    /// The number of root selections to run.
    pub max_passes: ConfigOption<u32>,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            patterns: ConfigOption {
                name: "patterns",
                min: false,
                max: true,
                value: true,
            },

            semantic: ConfigOption {
                name: "semantic",
                min: false,
                max: true,
                value: false,
            },

            max_passes: ConfigOption {
                name: "max_passes",
                min: 1,
                max: u32::MAX,
                value: 1,
            },
        }
    }
}

/// The primary configuration structure.
#[derive(Clone, Default)]
pub struct Config {
    /// Configuration of the Weisfeiler–Leman hasher.
    pub wl: WlConfig,

    /// Configuration of the gate analyzer.
    pub gates: GateConfig,
}
