use symbios_extremum::{
    Chromosome, ConfigError, Evolver, GaConfig, GenerationMode, MutationScheme, RouletteGA,
    SearchDirection, StopReason, ranking::Wheel,
};

// ============================================================================
// Configuration misuse
// ============================================================================

#[test]
fn test_empty_population_is_rejected_before_running() {
    assert_eq!(
        GaConfig::builder().population_size(0).build().unwrap_err(),
        ConfigError::EmptyPopulation
    );
}

#[test]
fn test_rates_out_of_range_are_rejected() {
    let err = GaConfig::builder().mutation_rate(1.5).build().unwrap_err();
    assert_eq!(
        err,
        ConfigError::RateOutOfRange {
            name: "mutation_rate",
            value: 1.5
        }
    );
    assert_eq!(
        err.to_string(),
        "mutation_rate must be within [0.0, 1.0], got 1.5"
    );
    assert!(GaConfig::builder().crossover_rate(-0.2).build().is_err());
}

#[test]
fn test_seeded_population_must_match_configured_size() {
    let config = GaConfig::builder().population_size(5).build().unwrap();
    let result = RouletteGA::with_population(config, vec![Chromosome::new(0.0, 0.0); 4]);
    assert!(matches!(
        result,
        Err(ConfigError::PopulationSizeMismatch {
            expected: 5,
            actual: 4
        })
    ));
}

// ============================================================================
// Degenerate but valid configurations
// ============================================================================

#[test]
fn test_odd_population_with_two_children_is_capped() {
    for size in [1, 3, 9, 101] {
        let config = GaConfig::builder()
            .population_size(size)
            .two_child(true)
            .seed(12)
            .build()
            .unwrap();
        let mut ga = RouletteGA::new(config);
        for _ in 0..10 {
            ga.step();
            assert_eq!(ga.population().len(), size);
            assert_eq!(ga.cumulative_fitness().len(), size);
        }
    }
}

#[test]
fn test_zero_rand_limit_runs() {
    let config = GaConfig::builder()
        .rand_limit(0)
        .population_size(20)
        .generations_count(20)
        .seed(13)
        .build()
        .unwrap();
    let mut ga = RouletteGA::new(config);
    for c in ga.population() {
        assert!((0.0..1.0).contains(&c.x) && (0.0..1.0).contains(&c.y));
    }
    let summary = ga.run();
    assert_eq!(summary.generations, 20);
    assert!(summary.best.fitness.is_finite());
}

#[test]
fn test_single_individual_population() {
    let config = GaConfig::builder()
        .population_size(1)
        .generations_count(5)
        .seed(14)
        .build()
        .unwrap();
    let mut ga = RouletteGA::new(config);
    let summary = ga.run();
    assert_eq!(ga.population().len(), 1);
    assert_eq!(summary.generations, 5);
}

#[test]
fn test_zero_generations_reports_initial_best() {
    let config = GaConfig::builder()
        .population_size(10)
        .generations_count(0)
        .seed(15)
        .build()
        .unwrap();
    let mut ga = RouletteGA::new(config);
    let before = ga.result();
    let summary = ga.run();
    assert_eq!(summary.generations, 0);
    assert_eq!(summary.best, before);
}

// ============================================================================
// Negative and non-finite fitness
// ============================================================================

#[test]
fn test_negative_fitness_uses_fallback_wheel_and_keeps_running() {
    // Around (-5, -5) the objective is about -1270, so every fitness is negative
    let config = GaConfig::builder()
        .direction(SearchDirection::Maximize)
        .population_size(8)
        .mutation_rate(0.0)
        .crossover_rate(1.0)
        .seed(16)
        .build()
        .unwrap();
    let initial = (0..8)
        .map(|i| Chromosome::new(-5.0 - i as f64 * 0.1, -5.0))
        .collect();
    let mut ga = RouletteGA::with_population(config, initial).unwrap();
    assert!(matches!(ga.ranking().wheel(), Wheel::Shifted { .. }));
    assert!(ga.total_fitness() < 0.0);

    for _ in 0..10 {
        ga.step();
        assert_eq!(ga.population().len(), 8);
    }
}

#[test]
fn test_overflowing_coordinates_do_not_panic() {
    let config = GaConfig::builder()
        .population_size(4)
        .generations_count(5)
        .seed(17)
        .build()
        .unwrap();
    let initial = vec![
        Chromosome::new(1e200, 1e200),
        Chromosome::new(-1e200, 1e200),
        Chromosome::new(1.0, 0.5),
        Chromosome::new(0.0, 0.0),
    ];
    let mut ga = RouletteGA::with_population(config, initial).unwrap();
    let summary = ga.run();
    assert_eq!(ga.population().len(), 4);
    assert_eq!(summary.generations, 5);
}

// ============================================================================
// Adaptive mode
// ============================================================================

#[test]
fn test_adaptive_safety_bound_stops_the_loop() {
    let config = GaConfig::builder()
        .mode(GenerationMode::Adaptive)
        .population_size(50)
        .mutation_rate(1.0)
        .max_generations(Some(3))
        .seed(18)
        .build()
        .unwrap();
    let mut ga = RouletteGA::new(config);
    let summary = ga.run();

    assert!(summary.generations <= 3);
    if summary.stop == StopReason::SafetyBound {
        assert_eq!(summary.generations, 3);
    } else {
        assert_eq!(summary.stop, StopReason::Converged);
    }
    assert_eq!(ga.generations_count(), summary.generations);
}

#[test]
fn test_adaptive_counter_resets_between_runs() {
    let config = GaConfig::builder()
        .mode(GenerationMode::Adaptive)
        .population_size(4)
        .mutation_rate(0.0)
        .seed(19)
        .build()
        .unwrap();
    let mut ga = RouletteGA::with_population(config, vec![Chromosome::new(2.0, 1.0); 4]).unwrap();
    assert_eq!(ga.run().generations, 1);
    assert_eq!(ga.run().generations, 1);
    assert_eq!(ga.generation(), 2);
}

// ============================================================================
// Legacy mutation scheme
// ============================================================================

// Legacy behavior: mutating Y starts from X. Only reachable through
// MutationScheme::LegacyCoupled.
#[test]
fn test_legacy_coupled_mutation_is_opt_in() {
    let base = GaConfig::builder()
        .population_size(1)
        .mutation_rate(1.0)
        .crossover_rate(0.0)
        .seed(20);
    let start = vec![Chromosome::new(100.0, -100.0)];

    let mut independent =
        RouletteGA::with_population(base.clone().build().unwrap(), start.clone()).unwrap();
    independent.step();
    let y = independent.population()[0].y;
    assert!((-50.0..-49.5).contains(&y), "y = {}", y);

    let mut legacy = RouletteGA::with_population(
        base.mutation_scheme(MutationScheme::LegacyCoupled)
            .build()
            .unwrap(),
        start,
    )
    .unwrap();
    legacy.step();
    let c = legacy.population()[0];
    // x: 100 -> [50, 50.5), y: (x + u) / 2 -> [25, 25.75)
    assert!((25.0..25.75).contains(&c.y), "y = {}", c.y);
}
