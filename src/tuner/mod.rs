pub mod evaluation;
pub mod knobs;
pub mod output;
pub mod search;

pub use evaluation::{
    DayResult, EvaluationResult, HillClimbConfig, evaluate_config, evaluate_day, hill_climb,
    holdout_days,
};
pub use knobs::{KnobRanges, perturb, random_config};
pub use output::{print_topk, write_best_json, write_csv};
pub use search::{TunerConfig, TunerResults, run_tuner};
