use std::{ffi::OsString, path::PathBuf};

use cnf_ident::{context::Context, formula::ParserInfo, types::err::ErrorKind};

/// Ways loading a formula can fail before any analysis runs.
pub(super) enum LoadError {
    /// The file could not be opened.
    Unreadable(PathBuf),

    /// The extension names no format this tool reads.
    UnsupportedFormat(OsString),

    /// The file was opened, and its contents were rejected.
    Malformed(ErrorKind),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(path) => write!(f, "Unable to open {path:?}."),
            Self::UnsupportedFormat(extension) => {
                write!(
                    f,
                    "No reader for {extension:?} files; expected .cnf or .cnf.xz."
                )
            }
            Self::Malformed(kind) => write!(f, "Rejected the input: {kind}."),
        }
    }
}

/// Loads the DIMACS file at `path` into `context`, decoding xz-compressed
/// files on the way, and reports what was read.
pub(super) fn load_formula(path: &str, context: &mut Context) -> Result<(), LoadError> {
    let path = PathBuf::from(path);

    let file = match std::fs::File::open(&path) {
        Ok(file) => file,
        Err(_) => return Err(LoadError::Unreadable(path)),
    };

    let parsed = match path.extension().and_then(|extension| extension.to_str()) {
        Some("cnf") => context.read_dimacs(std::io::BufReader::new(file)),

        #[cfg(feature = "xz")]
        Some("xz") => {
            context.read_dimacs(std::io::BufReader::new(xz2::read::XzDecoder::new(file)))
        }

        other => {
            return Err(LoadError::UnsupportedFormat(
                other.map(OsString::from).unwrap_or_default(),
            ))
        }
    };

    match parsed {
        Ok(info) => {
            report(&info);
            Ok(())
        }
        Err(kind) => Err(LoadError::Malformed(kind)),
    }
}

/// A comment-prefixed summary of a read, in the manner of solver front ends.
fn report(info: &ParserInfo) {
    println!(
        "c Read {} clause(s) over {} atom(s).",
        info.clause_count, info.atom_count,
    );

    match (info.header_atoms, info.header_clauses) {
        (Some(atoms), Some(clauses)) => {
            // Normalization may leave fewer clauses than the problem line announced.
            if atoms != info.atom_count || clauses != info.clause_count {
                println!("c The problem line announced {clauses} clause(s) over {atoms} atom(s).");
            }
        }
        _ => println!("c The input carried no problem line."),
    }
}
