//! When steps for agent execution BDD scenarios.

use std::sync::{Arc, PoisonError};
use std::time::Duration;

use super::world::{ExecutionWorld, run_async};
use lectern::agent::{
    domain::BatchPolicy,
    ports::{BatchProgress, ProgressResult},
    services::BatchOrchestrator,
};
use rstest_bdd_macros::when;
use serde_json::json;

const INTER_BATCH_DELAY: Duration = Duration::from_millis(250);

fn execute_titled(world: &mut ExecutionWorld, title: &str) {
    let executor = world.executor();
    let input = json!({ "title": title });
    world.last_result = Some(run_async(executor.execute(&input, None)));
}

#[when(r#"the agent is executed with title "{title}""#)]
fn execute_with_title(world: &mut ExecutionWorld, title: String) {
    execute_titled(world, &title);
}

#[when("the agent is executed with a blank title")]
fn execute_with_blank_title(world: &mut ExecutionWorld) {
    execute_titled(world, "   ");
}

#[when("the batch is executed in chunks of {size:usize}")]
fn execute_batch(world: &mut ExecutionWorld, size: usize) -> Result<(), eyre::Report> {
    let policy = BatchPolicy::new(size, INTER_BATCH_DELAY)
        .map_err(|err| eyre::eyre!("invalid batch policy: {err}"))?;
    let orchestrator = BatchOrchestrator::new(
        Arc::new(world.executor()),
        Arc::clone(&world.batch_delay),
        policy,
    );
    let progress = Arc::clone(&world.progress);
    let reporter = move |update: BatchProgress| -> ProgressResult {
        progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(update);
        Ok(())
    };

    let outcome = run_async(orchestrator.execute_batch(&world.batch_items, None, Some(&reporter)));
    world.batch_outcome = Some(outcome);
    Ok(())
}

#[when(r#"agent "{name}" is resolved without a version"#)]
fn resolve_latest(world: &mut ExecutionWorld, name: String) {
    world.resolved = world
        .registry
        .resolve(&name, None)
        .map(|agent| agent.descriptor().clone());
}
