use crate::{
    formula::Formula,
    misc::log::targets::{self},
    structures::{atom::Atom, clause::CClause, literal::CLiteral},
    types::err::{self, ParseError},
};

use std::io::BufRead;

/// Details recorded while reading a DIMACS file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    /// The atom count announced by a problem line, if one was read.
    pub header_atoms: Option<usize>,

    /// The clause count announced by a problem line, if one was read.
    pub header_clauses: Option<usize>,

    /// The count of atoms in the formula after the read.
    pub atom_count: usize,

    /// The count of clauses the read added.
    pub clause_count: usize,
}

impl Formula {
    /// Reads a DIMACS file into the formula.
    ///
    /// - Lines beginning with 'c' are comments, wherever they appear.
    /// - A problem line `p cnf <atoms> <clauses>` is recorded and extends the
    ///   atom range, but is not required.
    /// - Clauses are whitespace-separated integers terminated by `0`, and may
    ///   span lines.
    /// - A token which is not an integer is skipped to the next whitespace,
    ///   with a warning.
    /// - An empty clause is skipped, with a warning.
    ///
    /// ```rust
    /// # use cnf_ident::formula::Formula;
    /// let dimacs = "
    /// p cnf 2 2
    ///  1 -2 0
    /// -1  2 0
    /// ";
    ///
    /// let mut formula = Formula::new();
    /// let info = formula.read_dimacs(dimacs.as_bytes()).unwrap();
    /// assert_eq!(info.clause_count, 2);
    /// assert_eq!(formula.atom_max(), 2);
    /// ```
    pub fn read_dimacs(&mut self, reader: impl BufRead) -> Result<ParserInfo, err::ErrorKind> {
        let mut info = ParserInfo::default();
        let mut pending: CClause = Vec::default();

        let clauses_before = self.clause_count();
        let mut line_number = 0;

        'line_loop: for line in reader.lines() {
            line_number += 1;
            let line = match line {
                Ok(line) => line,
                Err(_) => return Err(err::ErrorKind::from(ParseError::Line(line_number))),
            };

            let content = line.trim_start();
            match content.chars().next() {
                None | Some('c') => continue 'line_loop,
                // A SATLIB-style postfix ends the formula.
                Some('%') => break 'line_loop,
                Some('p') => {
                    self.note_problem_line(content, &mut info)?;
                    continue 'line_loop;
                }
                Some(_) => {}
            }

            for token in content.split_ascii_whitespace() {
                match token.parse::<i32>() {
                    Ok(0) => {
                        let clause = std::mem::take(&mut pending);
                        if clause.is_empty() {
                            log::warn!(target: targets::PARSE, "Empty clause at line {line_number}, skipped");
                            continue;
                        }
                        self.add_clause(clause);
                    }
                    Ok(int) => pending.push(CLiteral::from(int)),
                    Err(_) => {
                        log::warn!(target: targets::PARSE, "Malformed token {token:?} at line {line_number}, skipped");
                    }
                }
            }
        }

        if !pending.is_empty() {
            return Err(err::ErrorKind::from(ParseError::MissingDelimiter));
        }

        info.atom_count = self.atom_max() as usize;
        info.clause_count = self.clause_count() - clauses_before;

        Ok(info)
    }

    /// Records a `p cnf <atoms> <clauses>` problem line.
    ///
    /// At most one problem line counts; any later one is skipped with a
    /// warning.
    fn note_problem_line(
        &mut self,
        content: &str,
        info: &mut ParserInfo,
    ) -> Result<(), err::ErrorKind> {
        if info.header_atoms.is_some() {
            log::warn!(target: targets::PARSE, "Surplus problem line skipped");
            return Ok(());
        }

        let mut fields = content.split_ascii_whitespace();
        if fields.next() != Some("p") || fields.next() != Some("cnf") {
            return Err(err::ErrorKind::from(ParseError::ProblemSpecification));
        }

        let atoms = fields.next().and_then(|field| field.parse::<usize>().ok());
        let clauses = fields.next().and_then(|field| field.parse::<usize>().ok());

        match (atoms, clauses) {
            (Some(atoms), Some(clauses)) => {
                self.ensure_atom(atoms as Atom);
                info.header_atoms = Some(atoms);
                info.header_clauses = Some(clauses);
                Ok(())
            }
            _ => Err(err::ErrorKind::from(ParseError::ProblemSpecification)),
        }
    }
}
