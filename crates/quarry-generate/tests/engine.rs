use quarry_generate::errors::GenerationError;
use quarry_generate::{
    GenerateOptions, SampleEngine, any, array, constant, filter, int, maybe, recurse, symbol,
};

fn tree() -> quarry_generate::Gen {
    recurse(3, |node| any([symbol(1..=4)?, array(0..=3, node)?])).expect("valid grammar")
}

#[test]
fn runs_are_reproducible_for_a_seed() {
    let engine = SampleEngine::new(GenerateOptions::default().with_seed(42));
    let generator = tree();

    let first = engine.run(&generator, 50).expect("first run");
    let second = engine.run(&generator, 50).expect("second run");

    assert_eq!(engine.options().seed, 42);
    assert_eq!(first.values, second.values);
    assert_ne!(first.report.run_id, second.report.run_id);
}

#[test]
fn different_seeds_diverge() {
    let generator = int(0..=1_000_000).expect("valid range");
    let a = SampleEngine::new(GenerateOptions::default().with_seed(1))
        .run(&generator, 20)
        .expect("run a");
    let b = SampleEngine::new(GenerateOptions::default().with_seed(2))
        .run(&generator, 20)
        .expect("run b");
    assert_ne!(a.values, b.values);
}

#[test]
fn replay_matches_the_original_sample() {
    let engine = SampleEngine::new(GenerateOptions::default().with_seed(7));
    let generator = tree();
    let result = engine.run(&generator, 30).expect("run");
    for index in [0_u64, 9, 29] {
        let replayed = engine.replay(&generator, index).expect("replay");
        assert_eq!(replayed, result.values[index as usize]);
    }
}

#[test]
fn report_counts_samples_and_stats() {
    let engine = SampleEngine::new(GenerateOptions::default().with_seed(3));
    let generator = filter(int(0..=9).expect("valid range"), |value| {
        value.as_i64().is_some_and(|n| n % 2 == 0)
    });
    let result = engine.run(&generator, 100).expect("run");

    assert_eq!(result.values.len(), 100);
    assert_eq!(result.report.samples_requested, 100);
    assert_eq!(result.report.samples_generated, 100);
    assert_eq!(result.report.seed, 3);
    assert_eq!(result.report.generator_id, "filter");
    assert!(result.report.stats.filter_rejections > 0);
}

#[test]
fn report_counts_lazily_built_levels() {
    let engine = SampleEngine::new(GenerateOptions::default().with_seed(11));
    let generator = recurse(2, |node| any([constant(0), array(1, node)?])).expect("valid");
    let result = engine.run(&generator, 200).expect("run");
    // Levels 1 and 0 are built on first use, once for the whole run.
    assert_eq!(result.report.stats.levels_built, 2);
}

#[test]
fn top_level_omission_fails_the_run() {
    let engine = SampleEngine::new(GenerateOptions::default().with_seed(5));
    let result = engine.run(&maybe(1), 200);
    assert!(matches!(result, Err(GenerationError::NoValue)));
}

#[test]
fn options_load_from_toml_with_defaults() {
    let options = GenerateOptions::from_toml_str("seed = 99\n").expect("parse options");
    assert_eq!(options.seed, 99);
    assert_eq!(options.max_attempts, 10_000);

    let empty = GenerateOptions::from_toml_str("").expect("parse empty");
    assert_eq!(empty, GenerateOptions::default());
}

#[test]
fn options_round_trip_through_toml() {
    let options = GenerateOptions::default()
        .with_seed(1234)
        .with_max_attempts(25);
    let encoded = options.to_toml_string().expect("encode");
    let decoded = GenerateOptions::from_toml_str(&encoded).expect("decode");
    assert_eq!(decoded, options);
}

#[test]
fn options_reject_zero_attempts_and_bad_toml() {
    assert!(matches!(
        GenerateOptions::from_toml_str("max_attempts = 0"),
        Err(GenerationError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GenerateOptions::from_toml_str("seed = \"abc\""),
        Err(GenerationError::Config(_))
    ));
}
