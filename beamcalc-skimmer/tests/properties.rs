use approx::assert_relative_eq;
use beamcalc_skimmer::{Config, Knowns, SolveError, Variable, solve_unobserved};

/// Consistent geometries as `[s1, s2, dx, d12, l1, l2]`.
const GEOMETRIES: [[f64; 6]; 3] = [
    [1.0, 2.0, 3.0, 50.0, 100.0, 50.0],
    [2.0, 5.0, 6.0, 60.0, 80.0, 20.0],
    [0.25, 0.75, 1.5, 300.0, 750.0, 450.0],
];

fn full(geometry: &[f64; 6]) -> Vec<(Variable, f64)> {
    Variable::REPORTED
        .iter()
        .copied()
        .zip(geometry.iter().copied())
        .collect()
}

/// Every way of choosing four known values out of six.
fn four_of_six() -> Vec<[usize; 4]> {
    let mut subsets = Vec::new();
    for a in 0..6 {
        for b in a + 1..6 {
            for c in b + 1..6 {
                for d in c + 1..6 {
                    subsets.push([a, b, c, d]);
                }
            }
        }
    }
    subsets
}

/// Unknown pairs that leave a one-parameter family.
fn is_loose(unknowns: &[Variable]) -> bool {
    matches!(
        unknowns,
        [Variable::S1, Variable::S2] | [Variable::S1, Variable::Dx] | [Variable::S2, Variable::Dx]
    )
}

/// The three relations, cleared of `h`, evaluated on a complete assignment.
fn assert_consistent(values: &[(Variable, f64)]) {
    let get = |variable| {
        values
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, value)| *value)
            .unwrap()
    };
    let (s1, s2, dx) = (get(Variable::S1), get(Variable::S2), get(Variable::Dx));
    let (d12, l1, l2) = (get(Variable::D12), get(Variable::L1), get(Variable::L2));

    // The virtual source, both apertures, and the reference point are collinear.
    assert_relative_eq!((s1 - dx) * l2, (s2 - dx) * l1, max_relative = 1e-9);
    assert_relative_eq!(d12, l1 - l2, max_relative = 1e-9);
}

#[test]
fn exactly_determined_inputs_recover_the_geometry() {
    for geometry in &GEOMETRIES {
        let reference = full(geometry);

        for subset in four_of_six() {
            let knowns: Knowns = subset.iter().map(|&i| reference[i]).collect();
            let unknowns: Vec<_> = knowns.unknowns().collect();
            if is_loose(&unknowns) {
                continue;
            }

            let solution = solve_unobserved(&knowns, &Config::default())
                .unwrap_or_else(|error| panic!("{knowns:?}: {error}"));

            assert_eq!(solution.variables().collect::<Vec<_>>(), unknowns);

            let mut completed: Vec<_> = knowns.iter().collect();
            completed.extend(solution.iter());
            assert_consistent(&completed);

            for (variable, value) in solution.iter() {
                assert!(value > 0.0);
                assert_relative_eq!(
                    value,
                    reference[variable.index()].1,
                    max_relative = 1e-9
                );
            }
        }
    }
}

#[test]
fn loose_inputs_are_underdetermined() {
    let reference = full(&GEOMETRIES[0]);
    let knowns: Knowns = [2, 3, 4, 5].iter().map(|&i| reference[i]).collect();

    assert_eq!(
        solve_unobserved(&knowns, &Config::default()),
        Err(SolveError::Underdetermined {
            free: vec![Variable::S1, Variable::S2]
        })
    );
}

#[test]
fn solving_is_deterministic() {
    let knowns = Knowns::new()
        .with(Variable::S1, 1.0)
        .with(Variable::S2, 2.0)
        .with(Variable::L1, 100.0)
        .with(Variable::L2, 50.0);

    let first = solve_unobserved(&knowns, &Config::default());
    for _ in 0..10 {
        assert_eq!(solve_unobserved(&knowns, &Config::default()), first);
    }
}

#[test]
fn insertion_order_does_not_change_the_result() {
    let forward = Knowns::new()
        .with(Variable::S1, 1.0)
        .with(Variable::S2, 2.0)
        .with(Variable::D12, 50.0)
        .with(Variable::Dx, 3.0);
    let backward = Knowns::new()
        .with(Variable::Dx, 3.0)
        .with(Variable::D12, 50.0)
        .with(Variable::S2, 2.0)
        .with(Variable::S1, 1.0);

    let a = solve_unobserved(&forward, &Config::default()).unwrap();
    let b = solve_unobserved(&backward, &Config::default()).unwrap();

    assert_eq!(a, b);
    assert_eq!(
        a.variables().collect::<Vec<_>>(),
        vec![Variable::L1, Variable::L2]
    );
}

#[test]
fn inconsistent_separation_has_no_solution() {
    for (d12, l1, l2) in [(10.0, 30.0, 5.0), (50.0, 100.0, 40.0), (0.0, 1.0, 0.0)] {
        let knowns = Knowns::new()
            .with(Variable::D12, d12)
            .with(Variable::L1, l1)
            .with(Variable::L2, l2);

        assert_eq!(
            solve_unobserved(&knowns, &Config::default()),
            Err(SolveError::NoSolution)
        );
    }
}

#[test]
fn end_to_end_family_and_pinned_member() {
    let family = Knowns::new()
        .with(Variable::S1, 1.0)
        .with(Variable::S2, 2.0)
        .with(Variable::D12, 50.0);

    assert!(matches!(
        solve_unobserved(&family, &Config::default()),
        Err(SolveError::Underdetermined { .. })
    ));

    let pinned = family.with(Variable::Dx, 3.0);
    let solution = solve_unobserved(&pinned, &Config::default()).unwrap();

    assert_relative_eq!(
        solution.get(Variable::L1).unwrap(),
        100.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        solution.get(Variable::L2).unwrap(),
        50.0,
        max_relative = 1e-9
    );
}

#[test]
fn forced_negative_position_is_not_physical() {
    let knowns = Knowns::new()
        .with(Variable::Dx, 1.0)
        .with(Variable::S1, 2.0)
        .with(Variable::S2, 3.0)
        .with(Variable::D12, 50.0);

    assert!(matches!(
        solve_unobserved(&knowns, &Config::default()),
        Err(SolveError::NoPhysicalSolution { .. })
    ));
}

#[test]
fn text_keys_feed_the_solver() {
    let entries = [("s1", 1.0), ("s2", 2.0), ("l1", 100.0), ("l2", 50.0)];
    let knowns = Knowns::from_entries(entries).unwrap();

    let solution = solve_unobserved(&knowns, &Config::default()).unwrap();

    assert_relative_eq!(
        solution.get(Variable::Dx).unwrap(),
        3.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        solution.get(Variable::D12).unwrap(),
        50.0,
        max_relative = 1e-9
    );
}
