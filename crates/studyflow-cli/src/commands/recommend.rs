use clap::Subcommand;
use studyflow_core::storage::{Config, SqliteStore};
use studyflow_core::{Recommendation, RecommendationEngine, SystemClock};

use crate::common::{fmt_time_of_day, CliResult};

#[derive(Subcommand)]
pub enum RecommendAction {
    /// Compute and print the current recommendation
    Show {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Recompute on a fixed cadence and print each change
    Watch,
}

fn print_state(state: &Recommendation) {
    if state.is_study_time {
        let session = state.active_session.as_ref();
        println!(
            "It's study time (session until {})",
            session.map_or_else(|| "?".into(), |s| fmt_time_of_day(s.end_ms)),
        );
    } else if let Some(next) = &state.next_session {
        println!("Not study time; next session at {}", fmt_time_of_day(next.start_ms));
    } else {
        println!("Not study time; no more sessions today");
    }

    match &state.recommended_task {
        Some(task) => println!(
            "Recommended: #{} {} (p{}, due {})",
            task.id,
            task.title,
            task.priority,
            task.deadline.format("%Y-%m-%d %H:%M"),
        ),
        None => println!("Recommended: nothing left to do"),
    }
}

pub fn run(action: RecommendAction) -> CliResult {
    let store = SqliteStore::open()?;
    let clock = SystemClock;
    let mut engine = RecommendationEngine::new();

    match action {
        RecommendAction::Show { json } => {
            let state = engine.refresh(&store, &clock)?;
            if json {
                println!("{}", serde_json::to_string_pretty(state)?);
            } else {
                print_state(state);
            }
        }
        RecommendAction::Watch => {
            // tokio::time::interval panics on a zero period; a hand-edited
            // config file may still carry one.
            let refresh_secs = Config::load()?.recommendation.refresh_secs.max(1);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let mut interval =
                    tokio::time::interval(std::time::Duration::from_secs(refresh_secs));
                loop {
                    interval.tick().await;
                    match engine.refresh(&store, &clock) {
                        Ok(state) => print_state(state),
                        Err(e) => eprintln!("refresh failed: {e}"),
                    }
                }
            })
        }
    }
    Ok(())
}
