//! Tests for the solver loop, recovery dispatch and generation entry points

#[cfg(test)]
mod tests {
    use crate::{floor_catalog, hostile_catalog, permissive_catalog};
    use wavetile::algorithm::backtracking::RestartReason;
    use wavetile::algorithm::executor::{SolverConfig, StepOutcome, WaveSolver};
    use wavetile::algorithm::selection::EntropyMode;
    use wavetile::spatial::{Grid, PlacementPolicy};
    use wavetile::{AlgorithmError, generate, generate_with};

    fn unrestricted(seed: u64) -> SolverConfig {
        SolverConfig {
            seed,
            policy: PlacementPolicy::unrestricted(),
            ..SolverConfig::default()
        }
    }

    // A catalog without conflicts resolves every cell without recovery
    #[test]
    fn test_solve_permissive_catalog() {
        let catalog = permissive_catalog(3);
        let mut solver = WaveSolver::new(&catalog, 4, 3, unrestricted(11)).expect("valid solver");

        let grid = solver.solve().expect("solves");
        assert!(grid.is_complete());
        assert_eq!(grid.collapsed_count(), 12);

        let stats = solver.stats();
        assert_eq!(stats.collapses, 12);
        assert_eq!(stats.contradictions, 0);
        assert_eq!(stats.restarts, 0);
        assert!(solver.is_complete());
        assert_eq!(solver.history().len(), 12);
        assert_eq!(solver.step().expect("complete"), StepOutcome::Complete);
    }

    // The same seed reproduces the same tilemap
    #[test]
    fn test_seed_determinism() {
        let catalog = permissive_catalog(4);
        let first = generate_with(&catalog, 6, 5, unrestricted(99)).expect("generates");
        let second = generate_with(&catalog, 6, 5, unrestricted(99)).expect("generates");
        assert_eq!(first, second);

        let shannon = SolverConfig {
            entropy: EntropyMode::Shannon,
            ..unrestricted(99)
        };
        let third = generate_with(&catalog, 6, 5, shannon.clone()).expect("generates");
        let fourth = generate_with(&catalog, 6, 5, shannon).expect("generates");
        assert_eq!(third, fourth);
    }

    #[test]
    fn test_invalid_dimensions() {
        let catalog = permissive_catalog(2);
        assert!(matches!(
            generate(&catalog, 0, 4),
            Err(AlgorithmError::InvalidParameter {
                parameter: "width",
                ..
            })
        ));
        assert!(matches!(
            generate(&catalog, 4, 0),
            Err(AlgorithmError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));
    }

    // Collapse, unwind, then restart once history cannot cover the next unwind
    #[test]
    fn test_contradiction_recovery_sequence() {
        let catalog = hostile_catalog();
        let mut solver = WaveSolver::new(&catalog, 2, 1, unrestricted(5)).expect("valid solver");

        assert!(matches!(
            solver.step().expect("step"),
            StepOutcome::Collapsed(_)
        ));
        assert_eq!(
            solver.step().expect("step"),
            StepOutcome::Backtracked { unwound: 1 }
        );
        assert_eq!(solver.backtrack_attempts(), 1);
        assert_eq!(
            solver.step().expect("step"),
            StepOutcome::Restarted(RestartReason::HistoryExhausted)
        );

        let fresh = Grid::initialize(&catalog, 2, 1, &PlacementPolicy::unrestricted())
            .expect("valid grid");
        assert_eq!(solver.grid(), &fresh);
        assert!(solver.history().is_empty());
        assert_eq!(solver.backtrack_attempts(), 0);

        let stats = solver.stats();
        assert_eq!(stats.contradictions, 2);
        assert_eq!(stats.backtracks, 1);
        assert_eq!(stats.unwound_decisions, 1);
        assert_eq!(stats.restarts, 1);
    }

    // The 20th consecutive contradiction restarts even with history to spare
    #[test]
    fn test_escalation_restarts_on_twentieth_contradiction() {
        let catalog = permissive_catalog(1);
        let mut solver = WaveSolver::new(&catalog, 80, 1, unrestricted(23)).expect("valid solver");

        for _ in 0..70 {
            assert!(matches!(
                solver.step().expect("step"),
                StepOutcome::Collapsed(_)
            ));
        }
        assert_eq!(solver.history().len(), 70);

        // Every cell holds a single candidate, so each undone decision empties its cell
        let (x, y) = solver
            .grid()
            .uncollapsed()
            .next()
            .map(|cell| cell.position())
            .expect("cells remain");
        assert!(solver.exclude(x, y, 0).expect("in bounds"));

        for attempt in 1..20 {
            let expected = match attempt {
                1..=4 => 1,
                5..=9 => 2,
                _ => 5,
            };
            assert_eq!(
                solver.step().expect("step"),
                StepOutcome::Backtracked { unwound: expected },
                "contradiction {attempt}"
            );
            assert_eq!(solver.backtrack_attempts(), attempt);
        }
        assert_eq!(solver.history().len(), 6);

        assert_eq!(
            solver.step().expect("step"),
            StepOutcome::Restarted(RestartReason::Escalated)
        );
        let fresh = Grid::initialize(&catalog, 80, 1, &PlacementPolicy::unrestricted())
            .expect("valid grid");
        assert_eq!(solver.grid(), &fresh);
        assert!(
            solver
                .grid()
                .cells()
                .all(|cell| !cell.is_collapsed() && cell.entropy() == cell.max_entropy())
        );
        assert!(solver.history().is_empty());
        assert_eq!(solver.backtrack_attempts(), 0);

        let stats = solver.stats();
        assert_eq!(stats.contradictions, 20);
        assert_eq!(stats.backtracks, 19);
        assert_eq!(stats.unwound_decisions, 64);
        assert_eq!(stats.restarts, 1);
    }

    // Exclusions outside the grid are contract violations
    #[test]
    fn test_exclude_out_of_bounds() {
        let catalog = permissive_catalog(2);
        let mut solver = WaveSolver::new(&catalog, 2, 2, unrestricted(0)).expect("valid solver");
        assert!(matches!(
            solver.exclude(2, 0, 0),
            Err(AlgorithmError::ContractViolation {
                operation: "exclude",
                ..
            })
        ));
        assert!(solver.exclude(0, 0, 1).expect("in bounds"));
        assert!(!solver.exclude(0, 0, 1).expect("in bounds"));
    }

    // An unsatisfiable catalog stops at the step budget
    #[test]
    fn test_step_budget_exhausted() {
        let catalog = hostile_catalog();
        let config = SolverConfig {
            max_steps: Some(10),
            ..unrestricted(1)
        };

        let result = generate_with(&catalog, 2, 1, config);
        assert!(matches!(
            result,
            Err(AlgorithmError::StepBudgetExhausted {
                steps: 10,
                restarts: 3
            })
        ));
    }

    // A single cell never contradicts, even with a hostile catalog
    #[test]
    fn test_single_cell_grid() {
        let tilemap = generate(&hostile_catalog(), 1, 1).expect("generates");
        assert_eq!(tilemap.rows(), vec![vec![0]]);
    }

    // The default policy confines floor tiles to the bottom row
    #[test]
    fn test_default_floor_policy() {
        let catalog = floor_catalog();
        for seed in 0..8 {
            let config = SolverConfig {
                seed,
                ..SolverConfig::default()
            };
            let tilemap = generate_with(&catalog, 4, 4, config).expect("generates");
            for y in 0..3 {
                for x in 0..4 {
                    assert_eq!(tilemap.tile(x, y), Some(0));
                }
            }
        }
    }

    // Pins fix a position for the whole run
    #[test]
    fn test_pinned_position() {
        let catalog = permissive_catalog(3);
        let config = SolverConfig {
            policy: PlacementPolicy::unrestricted().pin(1, 1, 2),
            ..unrestricted(17)
        };
        let tilemap = generate_with(&catalog, 3, 3, config).expect("generates");
        assert_eq!(tilemap.tile(1, 1), Some(2));

        let outside = SolverConfig {
            policy: PlacementPolicy::unrestricted().pin(5, 0, 0),
            ..unrestricted(17)
        };
        assert!(WaveSolver::new(&catalog, 3, 3, outside).is_err());
    }

    // The observer sees every step and a history limit caps retention
    #[test]
    fn test_observer_and_history_limit() {
        let catalog = permissive_catalog(2);
        let config = SolverConfig {
            history_limit: Some(3),
            ..unrestricted(2)
        };
        let mut solver = WaveSolver::new(&catalog, 3, 3, config).expect("valid solver");

        let mut observed = 0;
        let mut max_history = 0;
        solver
            .solve_with(|_, solver| {
                observed += 1;
                max_history = max_history.max(solver.history().len());
            })
            .expect("solves");

        assert_eq!(observed, solver.stats().steps);
        assert_eq!(max_history, 3);
        assert!(solver.tilemap().is_ok());
    }

    // Projecting an unfinished grid is a contract violation
    #[test]
    fn test_tilemap_before_completion() {
        let catalog = permissive_catalog(2);
        let solver = WaveSolver::new(&catalog, 2, 2, unrestricted(0)).expect("valid solver");
        assert!(matches!(
            solver.tilemap(),
            Err(AlgorithmError::ContractViolation { .. })
        ));
        assert_eq!(solver.catalog().len(), 2);
        assert_eq!(solver.config().seed, 0);
    }
}
