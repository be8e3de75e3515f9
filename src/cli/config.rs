use cnf_ident::config::{Config, HashWidth};

/// The tool to run over the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    /// The Weisfeiler–Leman fingerprint of the formula.
    #[default]
    WlHash,

    /// A summary of the gate structure of the formula.
    Gates,

    /// The sanitized DIMACS form of the formula.
    Sanitize,
}

impl std::str::FromStr for Tool {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wlhash" => Ok(Self::WlHash),
            "gates" => Ok(Self::Gates),
            "sanitize" => Ok(Self::Sanitize),
            _ => Err(()),
        }
    }
}

/// A collection of configuration options relevant only to the CLI.
#[derive(Default)]
pub struct CliConfig {
    /// The tool to run.
    pub tool: Tool,
}

pub enum ConfigError {
    NonSpecific(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            ConfigError::NonSpecific(s) => write!(f, "{s}"),
        }
    }
}

/// Parse CLI arguments to a [Config] struct or a [CliConfig] struct.
///
/// If an unrecognised argument or invalid option is found a message is sent
/// and the process is terminated.
pub(super) fn parse_args(
    args: &mut [String],
    cli_options: &mut CliConfig,
) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    'arg_examination: for arg in args.iter().skip(1).rev().skip(1) {
        let mut split = arg.split("=");
        match split.next() {
            Some("--measurements") => {
                println!("c Measurements will be appended to the digest.");
                cfg.wl.return_measurements.value = true;
            }

            Some("--tool") => {
                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<Tool>() {
                        cli_options.tool = value;
                        continue 'arg_examination;
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "tool is one of: wlhash, gates, sanitize",
                ));
            }

            // The remaining cases follow a common template.
            // If a value is present, may be parsed appropriately, and is valid, the config is updated.
            // Otherwise, a message is sent.
            //
            // Further, the cases should be in lexicographic order.
            //
            Some("--cross_reference_literals") => {
                let (min, max) = cfg.wl.cross_reference_literals.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("c cross_reference_literals set to: {value}");
                            cfg.wl.cross_reference_literals.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "cross_reference_literals requires a boolean value",
                ));
            }

            Some("--depth") => {
                let (min, max) = cfg.wl.depth.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<u32>() {
                        if min <= value && value <= max {
                            println!("c depth set to: {value}");
                            cfg.wl.depth.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "depth requires an unsigned value",
                ));
            }

            Some("--first_progress_check") => {
                let (min, max) = cfg.wl.first_progress_check_iteration.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<u32>() {
                        if min <= value && value <= max {
                            println!("c first_progress_check set to: {value}");
                            cfg.wl.first_progress_check_iteration.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "first_progress_check requires an unsigned value",
                ));
            }

            Some("--hash_width") => {
                let (min, max) = cfg.wl.hash_width.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<HashWidth>() {
                        if min <= value && value <= max {
                            println!("c hash_width set to: {value}");
                            cfg.wl.hash_width.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific("hash_width is one of: 32, 64"));
            }

            Some("--max_passes") => {
                let (min, max) = cfg.gates.max_passes.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<u32>() {
                        if min <= value && value <= max {
                            println!("c max_passes set to: {value}");
                            cfg.gates.max_passes.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "max_passes requires a value of at least 1",
                ));
            }

            Some("--optimize_first_iteration") => {
                let (min, max) = cfg.wl.optimize_first_iteration.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("c optimize_first_iteration set to: {value}");
                            cfg.wl.optimize_first_iteration.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "optimize_first_iteration requires a boolean value",
                ));
            }

            Some("--patterns") => {
                let (min, max) = cfg.gates.patterns.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("c patterns set to: {value}");
                            cfg.gates.patterns.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "patterns requires a boolean value",
                ));
            }

            Some("--prime_ring") => {
                let (min, max) = cfg.wl.use_prime_ring.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("c prime_ring set to: {value}");
                            cfg.wl.use_prime_ring.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "prime_ring requires a boolean value",
                ));
            }

            Some("--rehash_clauses") => {
                let (min, max) = cfg.wl.rehash_clauses.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("c rehash_clauses set to: {value}");
                            cfg.wl.rehash_clauses.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "rehash_clauses requires a boolean value",
                ));
            }

            Some("--semantic") => {
                let (min, max) = cfg.gates.semantic.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if min <= value && value <= max {
                            println!("c semantic set to: {value}");
                            cfg.gates.semantic.value = value;
                            continue 'arg_examination;
                        }
                    }
                }

                return Err(ConfigError::NonSpecific(
                    "semantic requires a boolean value",
                ));
            }

            Some(_) | None => {
                return Err(ConfigError::NonSpecific("Unable to parse argument"));
            }
        }
    }

    Ok(cfg)
}
