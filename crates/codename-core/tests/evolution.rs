use codename_core::{
    environment::{Environment, EnvironmentConfig},
    phrase::Phrase,
    population::Population,
    seed::EvolutionSeed,
};

const FRUITS: [&str; 5] = ["apple", "banana", "cherry", "cheese", "chalk"];

const CORPUS: &str = "
    alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima mike
    november oscar papa quebec romeo sierra tango uniform victor whiskey xray yankee
    zulu amber basalt cobalt dune ember falcon glacier harbor iris jasper kestrel
    lantern meadow nebula onyx prairie quartz raven summit thistle umber vortex
    willow zephyr 42nd -dash x y
";

fn config(pop_size: usize) -> EnvironmentConfig {
    EnvironmentConfig {
        gene_len: 2,
        word_min: 3,
        word_max: 9,
        phrase_len: 2,
        pop_size,
        ..EnvironmentConfig::default()
    }
}

fn population(pop_size: usize, seed: u128) -> Population {
    let env = Environment::new(config(pop_size)).unwrap();
    Population::with_seed(env, CORPUS.split_whitespace(), EvolutionSeed::from(seed))
}

#[test]
fn test_fruit_corpus_end_to_end() {
    let env = Environment::new(EnvironmentConfig {
        word_min: 3,
        phrase_len: 2,
        pop_size: 1,
        ..EnvironmentConfig::default()
    })
    .unwrap();
    let mut population = Population::with_seed(env, FRUITS, EvolutionSeed::from(0));

    // five tokens survive, the fifth is left over
    assert_eq!(population.len(), 2);

    let best = population
        .phrases()
        .iter()
        .max_by(|a, b| a.score().total_cmp(&b.score()))
        .unwrap()
        .clone();
    population.reduce_population();
    assert_eq!(population.len(), 1);
    assert_eq!(population.phrases()[0].score(), best.score());
}

#[test]
fn test_reduce_keeps_highest_scores() {
    let mut population = population(8, 11);
    population.breed().unwrap();
    let candidates = population.phrases().to_vec();
    assert!(candidates.len() > 8);

    population.reduce_population();
    assert_eq!(population.len(), 8);

    let kept = population.phrases();
    let worst_kept = kept
        .iter()
        .map(Phrase::score)
        .fold(f64::INFINITY, f64::min);
    let best_dropped = candidates
        .iter()
        .filter(|p| !kept.contains(p))
        .map(Phrase::score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(worst_kept >= best_dropped);

    for pair in kept.windows(2) {
        assert!(pair[0].score() >= pair[1].score());
    }
}

#[test]
fn test_breed_reaches_target() {
    for pop_size in [1, 3, 8, 13] {
        let mut population = population(pop_size, 21);
        population.breed().unwrap();
        let target = pop_size + pop_size.div_ceil(2);
        assert!(
            population.len() >= target,
            "pop_size {pop_size}: {} < {target}",
            population.len()
        );
    }
}

#[test]
fn test_many_generations_stay_bounded() {
    let mut population = population(10, 3);
    let initial_best = population.best().unwrap().score();
    for _ in 0..50 {
        population.step().unwrap();
        assert!(population.len() <= 10);
        assert!(!population.is_empty());
        for phrase in population.phrases() {
            let sum = phrase.words().iter().map(|w| w.score()).sum::<f64>();
            assert_eq!(phrase.score(), sum);
            assert_eq!(phrase.len(), 2);
        }
    }
    assert_eq!(population.generation(), 50);
    // elitism: the best score never decreases
    assert!(population.best().unwrap().score() >= initial_best);
}

#[test]
fn test_same_seed_same_run() {
    let mut a = population(12, 77);
    let mut b = population(12, 77);
    assert_eq!(a.snapshot(), b.snapshot());
    for _ in 0..20 {
        a.step().unwrap();
        b.step().unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_snapshot_views() {
    let population = population(12, 5);
    let snapshot = population.snapshot();
    assert_eq!(snapshot.generation, 0);
    assert_eq!(snapshot.phrases.len(), population.len());

    let compact = snapshot.compact();
    for (words, phrase) in compact.iter().zip(population.phrases()) {
        assert_eq!(words.join(" "), phrase.text());
    }

    let json = serde_json::to_value(&snapshot).unwrap();
    let word = &json["phrases"][0]["words"][0];
    for key in ["text", "letter", "gene", "variety", "shortfall", "excess", "total"] {
        assert!(word.get(key).is_some(), "missing {key}");
    }
}
