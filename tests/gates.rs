use cnf_ident::{
    config::GateConfig,
    db::gate::GateFormula,
    formula::Formula,
    gates::analyzer::GateAnalyzer,
    oracle::dpll::DpllOracle,
    structures::{
        clause::Clause,
        literal::{CLiteral, Literal},
    },
};

fn formula_of(clauses: &[&[i32]]) -> Formula {
    let mut formula = Formula::new();
    for clause in clauses {
        formula.add_clause(clause.iter().map(CLiteral::from).collect());
    }
    formula
}

fn literal(int: i32) -> CLiteral {
    CLiteral::from(int)
}

fn literals(ints: &[i32]) -> Vec<CLiteral> {
    ints.iter().map(CLiteral::from).collect()
}

fn analyze(formula: &Formula, config: GateConfig) -> GateFormula {
    let mut analyzer = GateAnalyzer::<DpllOracle>::from_formula(formula, config)
        .expect("analyzer construction failed");
    analyzer.analyze();
    analyzer.into_gate_formula()
}

fn pattern_config(max_passes: u32) -> GateConfig {
    let mut config = GateConfig::default();
    config.patterns.value = true;
    config.semantic.value = false;
    config.max_passes.value = max_passes;
    config
}

mod recognition {
    use super::*;

    #[test]
    fn an_and_gate() {
        // o = a and b, with o = 1, a = 2, b = 3.
        let formula = formula_of(&[&[-1, 2, 3], &[1, -2], &[1, -3]]);
        let gates = analyze(&formula, pattern_config(1));

        assert_eq!(gates.gate_count(), 1);
        assert!(gates.remainder.is_empty());

        let gate = gates.gate(literal(1)).expect("no gate for the output");
        assert_eq!(gate.out, literal(1));
        assert_eq!(gate.inp, literals(&[2, 3]));
        assert!(!gate.not_mono);
    }

    #[test]
    fn an_equivalence_like_pair() {
        let formula = formula_of(&[&[1, 2], &[-1, -2]]);
        let gates = analyze(&formula, pattern_config(1));

        // Exactly one gate, on the first output tried; the second variable
        // becomes an input.
        assert_eq!(gates.gate_count(), 1);
        assert!(gates.remainder.is_empty());

        let gate = gates.gate(literal(1)).expect("no gate for the output");
        assert_eq!(gate.inp, literals(&[-2]));
        assert!(gates.is_used_as_input(literal(-2)));
    }

    #[test]
    fn a_unit_rooted_circuit() {
        // The unit clause asserts the output of 1 = and(2, 3).
        let formula = formula_of(&[&[1], &[-1, 2], &[-1, 3], &[1, -2, -3]]);
        let gates = analyze(&formula, pattern_config(1));

        assert_eq!(gates.gate_count(), 1);
        assert_eq!(gates.monotonic_gate_count(), 1);
        assert!(gates.remainder.is_empty());

        let gate = gates.gate(literal(1)).expect("no gate for the output");
        assert_eq!(gate.inp, literals(&[2, 3]));
    }

    #[test]
    fn a_non_monotonic_xor() {
        // 1 = xor(2, 3) in full encoding, asserted from both polarities by
        // the roots.
        let formula = formula_of(&[
            &[-1, 2, 3],
            &[-1, -2, -3],
            &[1, -2, 3],
            &[1, 2, -3],
            &[1, 6],
            &[-1, 6],
        ]);
        let gates = analyze(&formula, pattern_config(1));

        let gate = gates.gate(literal(1)).expect("no gate for the output");
        assert!(gate.not_mono);
        assert_eq!(gate.inp, literals(&[2, -2, 3, -3]));
    }

    #[test]
    fn passes_peel_disconnected_structure() {
        let formula = formula_of(&[&[1, 2], &[-1, -2], &[3, 4], &[-3, -4]]);

        let one_pass = analyze(&formula, pattern_config(1));
        assert_eq!(one_pass.gate_count(), 1);
        assert_eq!(one_pass.remainder.len(), 2);

        let two_passes = analyze(&formula, pattern_config(2));
        assert_eq!(two_passes.gate_count(), 2);
        assert!(two_passes.remainder.is_empty());
    }
}

mod bookkeeping {
    use super::*;

    #[test]
    fn inputs_are_marked() {
        let formula = formula_of(&[&[-1, 2, 3], &[1, -2], &[1, -3]]);
        let gates = analyze(&formula, pattern_config(1));

        let gate = gates.gate(literal(1)).expect("no gate for the output");
        for input in &gate.inp {
            assert!(gates.is_used_as_input(*input));
        }
    }

    #[test]
    fn non_monotonic_inputs_are_marked_with_both_polarities() {
        let formula = formula_of(&[
            &[-1, 2, 3],
            &[-1, -2, -3],
            &[1, -2, 3],
            &[1, 2, -3],
            &[1, 6],
            &[-1, 6],
        ]);
        let gates = analyze(&formula, pattern_config(1));

        let gate = gates.gate(literal(1)).expect("no gate for the output");
        assert!(gate.not_mono);
        for input in &gate.inp {
            assert!(gates.is_used_as_input(*input));
            assert!(gates.is_used_as_input(input.negate()));
        }
    }

    #[test]
    fn remainder_completeness() {
        let cases: &[&[&[i32]]] = &[
            &[&[1], &[-1, 2], &[-1, 3], &[1, -2, -3]],
            &[&[1, 2], &[-1, -2], &[3, 4], &[-3, -4]],
            &[&[1, 2, 3], &[-2, 1], &[-3, 2], &[3, -1]],
        ];

        for clauses in cases {
            let formula = formula_of(clauses);
            let gates = analyze(&formula, pattern_config(1));

            // The union of roots, gate clauses and remainder is the clause set.
            let mut covered: Vec<usize> = gates.roots.clone();
            covered.extend(&gates.remainder);
            for gate in gates.gates() {
                covered.extend(&gate.fwd);
                covered.extend(&gate.bwd);
            }
            covered.sort_unstable();
            covered.dedup();

            let all: Vec<usize> = (0..formula.clause_count()).collect();
            assert_eq!(covered, all);
        }
    }

    #[test]
    fn gate_soundness_of_a_pattern_gate() {
        // For every model of the definition clauses, the output of the xor
        // gate is the function of its inputs.
        let formula = formula_of(&[&[-1, 2, 3], &[-1, -2, -3], &[1, -2, 3], &[1, 2, -3]]);

        for a in [false, true] {
            for b in [false, true] {
                let mut determined: Vec<bool> = Vec::new();
                for o in [false, true] {
                    let model = [false, o, a, b];
                    let satisfied = formula.clauses().all(|clause| {
                        clause
                            .literals()
                            .any(|l| model[l.atom() as usize] == l.polarity())
                    });
                    if satisfied {
                        determined.push(o);
                    }
                }
                assert_eq!(determined, vec![a ^ b]);
            }
        }
    }
}

mod utilities {
    use super::*;

    #[test]
    fn pruning_follows_the_model() {
        let formula = formula_of(&[&[1], &[-1, 2], &[-1, 3], &[1, -2, -3]]);
        let gates = analyze(&formula, pattern_config(1));

        // With the output satisfied the gate's forward clauses are reachable.
        let model = [false, true, true, true];
        let mut pruned = gates.pruned_problem(&model, &formula);
        pruned.sort_unstable();
        assert_eq!(pruned, vec![0, 1, 2, 3]);

        // With the output falsified the gate is a don't-care.
        let model = [false, false, true, true];
        let mut pruned = gates.pruned_problem(&model, &formula);
        pruned.sort_unstable();
        assert_eq!(pruned, gates.roots.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn non_monotonic_gates_are_never_pruned() {
        let formula = formula_of(&[
            &[-1, 2, 3],
            &[-1, -2, -3],
            &[1, -2, 3],
            &[1, 2, -3],
            &[1, 6],
            &[-1, 6],
        ]);
        let gates = analyze(&formula, pattern_config(1));
        let gate_clause_count = {
            let gate = gates.gate(literal(1)).expect("no gate for the output");
            gate.fwd.len() + gate.bwd.len()
        };

        // Both fwd and bwd of the non-monotonic gate appear, whatever the model.
        let model = [false; 7];
        let pruned = gates.pruned_problem(&model, &formula);
        assert!(pruned.len() >= gates.roots.len() + gate_clause_count);
    }

    #[test]
    fn root_normalization() {
        let formula_clauses: &[&[i32]] = &[&[-1, 2, 3], &[1, -2], &[1, -3]];
        let mut formula = formula_of(formula_clauses);
        let mut gates = analyze(&formula, pattern_config(1));

        let roots_before = gates.roots.clone();
        assert!(!gates.has_artificial_root());

        gates.normalize_roots(&mut formula);

        // A fresh variable, a single unit root, and the old roots as the
        // forward clauses of the new top gate.
        let fresh = formula.atom_max();
        assert_eq!(fresh, 4);
        assert!(gates.has_artificial_root());
        assert_eq!(gates.roots.len(), 1);
        assert!(gates.remainder.is_empty());

        let top = gates.gate(literal(fresh as i32)).expect("no top gate");
        assert_eq!(top.out, literal(fresh as i32));
        assert_eq!(top.fwd, roots_before);
        assert!(!top.not_mono);

        // The old root clauses gained the negated fresh variable.
        for clause in &top.fwd {
            assert!(formula.clause(*clause).contains(literal(-(fresh as i32))));
        }

        // And the artificial root is the unit clause of the fresh variable.
        let artificial = gates.artificial_root().expect("no artificial root");
        assert_eq!(
            formula.clause(artificial).as_slice().as_dimacs(true),
            format!("{fresh} 0"),
        );
    }
}
