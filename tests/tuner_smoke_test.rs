use canteen_forecast::models::{
    DayRecord, MenuOptionRecord, OptionRecord, OrderRecord, StudentRecord,
};
use canteen_forecast::state::Dataset;
use canteen_forecast::tuner::{HillClimbConfig, KnobRanges, TunerConfig, run_tuner};

const DAY: i64 = 86_400;

/// Three weeks of two options where students pick the salad on warm days
/// and the stew on cold ones.
fn seasonal_dataset() -> Dataset {
    let students: Vec<StudentRecord> = (1..=6)
        .map(|student_id| StudentRecord { student_id })
        .collect();
    let options = vec![
        OptionRecord {
            option_id: 1,
            name: Some("Stew".to_string()),
        },
        OptionRecord {
            option_id: 2,
            name: Some("Salad".to_string()),
        },
    ];

    let mut days = Vec::new();
    let mut menu_options = Vec::new();
    let mut orders = Vec::new();

    for d in 0..21 {
        let day_id = d as u32 + 1;
        let temperature = if (d / 3) % 2 == 0 {
            6.0 + d as f64 % 3.0
        } else {
            22.0 + d as f64 % 3.0
        };
        days.push(DayRecord {
            day_id,
            timestamp: d * DAY,
            temperature: Some(temperature),
        });
        menu_options.push(MenuOptionRecord { day_id, option_id: 1 });
        menu_options.push(MenuOptionRecord { day_id, option_id: 2 });

        let choice = if temperature < 15.0 { 1 } else { 2 };
        for student in students.iter().filter(|s| (s.student_id + d as u32) % 3 != 0) {
            orders.push(OrderRecord {
                order_id: orders.len() as u32 + 1,
                option_id: choice,
                student_id: student.student_id,
                timestamp: d * DAY,
            });
        }
    }

    Dataset {
        students,
        orders,
        options,
        days,
        menu_options,
    }
}

#[test]
fn test_tuner_finds_no_worse_than_baseline() {
    let data = seasonal_dataset();
    assert!(data.validate().is_ok());

    let config = TunerConfig {
        iterations: 15,
        seed: 7,
        holdout: 6,
        ranges: KnobRanges::default(),
        hill_climb: Some(HillClimbConfig {
            factors: vec![0.5, 2.0],
            max_rounds: 2,
        }),
    };

    let results = run_tuner(&config, &data).unwrap();

    assert!(results.results.len() >= 16);
    assert!(results.best().mae <= results.baseline.mae + 1e-12);
    assert_eq!(results.baseline.per_day.len(), 6);

    for window in results.results.windows(2) {
        assert_ne!(
            window[0].cmp_score(&window[1]),
            std::cmp::Ordering::Less,
            "results should be sorted best first"
        );
    }
}

#[test]
fn test_tuner_is_deterministic_for_seed() {
    let data = seasonal_dataset();
    let config = TunerConfig {
        iterations: 5,
        seed: 99,
        holdout: 4,
        ranges: KnobRanges::default(),
        hill_climb: None,
    };

    let first = run_tuner(&config, &data).unwrap();
    let second = run_tuner(&config, &data).unwrap();

    assert_eq!(first.best().config, second.best().config);
    assert_eq!(first.best().mae, second.best().mae);
}
