use cnf_ident::{
    config::{Config, WlConfig},
    context::Context,
    hash::wl::WeisfeilerLemanHasher,
    structures::literal::CLiteral,
};

fn context_of(clauses: &[&[i32]], config: Config) -> Context {
    let mut context = Context::from_config(config);
    for clause in clauses {
        context
            .formula
            .add_clause(clause.iter().map(CLiteral::from).collect());
    }
    context
}

fn digest_of(clauses: &[&[i32]]) -> String {
    context_of(clauses, Config::default()).wl_digest()
}

mod invariance {
    use super::*;

    #[test]
    fn renamed_twin_of_a_xor_style_pair() {
        let mut config = Config::default();
        config.wl.depth.value = 4;
        config.wl.cross_reference_literals.value = true;

        let one = context_of(&[&[1, 2], &[-1, -2]], config.clone());
        let two = context_of(&[&[2, 1], &[-2, -1]], config.clone());

        assert_eq!(one.wl_digest(), two.wl_digest());
    }

    #[test]
    fn variable_renaming() {
        // σ = (1 ↦ 3, 2 ↦ 1, 3 ↦ 2), applied to every clause.
        let original = &[&[1, 2, 3][..], &[-1, 2], &[-2, -3], &[1, 3], &[-3, 1]];
        let renamed = &[&[3, 1, 2][..], &[-3, 1], &[-1, -2], &[3, 2], &[-2, 3]];

        assert_eq!(digest_of(original), digest_of(renamed));
    }

    #[test]
    fn clause_and_literal_reordering() {
        let original = &[&[1, 2, 3][..], &[-1, 2], &[-2, -3]];
        let reordered = &[&[-3, -2][..], &[2, -1], &[3, 1, 2]];

        assert_eq!(digest_of(original), digest_of(reordered));
    }

    #[test]
    fn uniform_polarity_flips() {
        // Flipping every occurrence of 1 and of 3.
        let original = &[&[1, 2, 3][..], &[-1, 2], &[-2, -3], &[1, 3]];
        let flipped = &[&[-1, 2, -3][..], &[1, 2], &[-2, 3], &[-1, -3]];

        assert_eq!(digest_of(original), digest_of(flipped));
    }

    #[test]
    fn tautology_and_duplicate_idempotence() {
        let plain = &[&[1, 2][..], &[-1, -2], &[2, 3]];
        let noisy = &[&[1, 2, 2][..], &[-1, -2], &[2, 3], &[1, -1], &[3, 2, -2, 2]];

        assert_eq!(digest_of(plain), digest_of(noisy));
    }

    #[test]
    fn flips_compose_with_renaming() {
        // σ = (1 ↔ 2) together with a flip of σ(1).
        let original = &[&[1, 2][..], &[-1, -2], &[1, -2]];
        let twisted = &[&[-2, 1][..], &[2, -1], &[-2, -1]];

        assert_eq!(digest_of(original), digest_of(twisted));
    }
}

mod discrimination {
    use super::*;

    #[test]
    fn structurally_distinct_formulas() {
        let chain = &[&[1, 2][..], &[-2, 3], &[-3, 4]];
        let fan = &[&[1, 2][..], &[-1, 3], &[-1, 4]];

        assert_ne!(digest_of(chain), digest_of(fan));
    }

    #[test]
    fn polarity_structure_is_seen() {
        // Same clause sizes and degrees, different polarity pattern — the
        // cross-reference makes the difference visible.
        let one = &[&[1, 2][..], &[-1, -2]];
        let two = &[&[1, -2][..], &[1, -2]];

        assert_ne!(digest_of(one), digest_of(two));
    }
}

mod configuration {
    use super::*;

    #[test]
    fn depth_zero_matches_the_pair_multiset() {
        // With no refinement steps every variable carries the initial pair,
        // so formulas over the same atom count coincide.
        let mut config = Config::default();
        config.wl.depth.value = 0;

        let one = context_of(&[&[1, 2], &[-1, -2]], config.clone());
        let two = context_of(&[&[1], &[-2, 1]], config.clone());
        assert_eq!(one.wl_digest(), two.wl_digest());

        let three = context_of(&[&[1, 2, 3]], config.clone());
        assert_ne!(one.wl_digest(), three.wl_digest());
    }

    #[test]
    fn measurements_are_appended_on_request() {
        let mut config = Config::default();
        config.wl.return_measurements.value = true;

        let context = context_of(&[&[1, 2], &[-1, -2]], config);
        let digest = context.wl_digest();

        let fields: Vec<&str> = digest.split(',').collect();
        assert_eq!(fields.len(), 5);
        assert!(fields[0].chars().all(|c| c.is_ascii_digit()));
        // parse_ns and compute_ns.
        assert!(fields[1].chars().all(|c| c.is_ascii_digit()));
        assert!(fields[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn prime_ring_is_a_distinct_scheme() {
        let mut ring_config = Config::default();
        ring_config.wl.use_prime_ring.value = true;

        let plain = context_of(&[&[1, 2], &[-1, -2], &[2, 3]], Config::default());
        let ring = context_of(&[&[1, 2], &[-1, -2], &[2, 3]], ring_config.clone());

        assert_ne!(plain.wl_digest(), ring.wl_digest());

        // And invariance holds within the scheme.
        let ring_renamed = context_of(&[&[2, 3], &[-2, -3], &[3, 1]], ring_config);
        assert_eq!(ring.wl_digest(), ring_renamed.wl_digest());
    }

    #[test]
    fn half_width_invariance() {
        let mut config = Config::default();
        config.wl.hash_width.value = cnf_ident::config::HashWidth::Bits32;

        let one = context_of(&[&[1, 2, 3], &[-2, -3]], config.clone());
        let two = context_of(&[&[3, 1, 2], &[-3, -2]], config);

        assert_eq!(one.wl_digest(), two.wl_digest());
    }

    #[test]
    fn without_cross_referencing_refinement_still_runs() {
        let mut config = WlConfig::default();
        config.cross_reference_literals.value = false;

        let mut formula = cnf_ident::formula::Formula::new();
        for clause in [&[1, 2][..], &[-1, -2], &[2, 3]] {
            formula.add_clause(clause.iter().map(CLiteral::from).collect());
        }

        let one = WeisfeilerLemanHasher::<u64>::new(&formula, &config).run();
        let two = WeisfeilerLemanHasher::<u64>::new(&formula, &config).run();
        assert_eq!(one, two);
    }

    #[test]
    fn progress_detection_reports_early_convergence() {
        let mut config = WlConfig::default();
        config.depth.value = 64;

        let mut formula = cnf_ident::formula::Formula::new();
        for clause in [&[1, 2][..], &[-2, 3], &[-3, 4]] {
            formula.add_clause(clause.iter().map(CLiteral::from).collect());
        }

        let mut hasher = WeisfeilerLemanHasher::<u64>::new(&formula, &config);
        let _ = hasher.run();

        assert!(hasher.effective_iterations() < 32.0);
    }
}

mod determinism {
    use super::*;

    #[test]
    fn digests_are_reproducible() {
        let clauses = &[&[1, -2][..], &[-1, 2], &[2, 3], &[-3, 1]];
        assert_eq!(digest_of(clauses), digest_of(clauses));
    }

    #[test]
    fn parsed_and_programmatic_formulas_agree() {
        use std::io::Write;

        let mut dimacs = vec![];
        let _ = dimacs.write(b"p cnf 3 3\n1 -2 0\n-1 2 0\n2 3 0\n");

        let mut parsed = Context::from_config(Config::default());
        assert!(parsed.read_dimacs(dimacs.as_slice()).is_ok());

        let programmatic = context_of(&[&[1, -2], &[-1, 2], &[2, 3]], Config::default());

        assert_eq!(parsed.wl_digest(), programmatic.wl_digest());
    }
}
