//! Then steps for agent execution BDD scenarios.

use std::sync::PoisonError;
use std::time::Duration;

use super::world::ExecutionWorld;
use lectern::agent::domain::ExecutionResult;
use rstest_bdd_macros::then;

fn last_result(world: &ExecutionWorld) -> Result<&ExecutionResult<String>, eyre::Report> {
    world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no execution result in scenario world"))
}

#[then(r#"the execution fails with "{message}""#)]
fn execution_fails_with(world: &ExecutionWorld, message: String) -> Result<(), eyre::Report> {
    let result = last_result(world)?;
    if result.error() != Some(message.as_str()) {
        return Err(eyre::eyre!("expected failure '{message}', got {result:?}"));
    }
    Ok(())
}

#[then(r#"the execution succeeds with "{output}""#)]
fn execution_succeeds_with(world: &ExecutionWorld, output: String) -> Result<(), eyre::Report> {
    let result = last_result(world)?;
    if result.data() != Some(&output) {
        return Err(eyre::eyre!("expected output '{output}', got {result:?}"));
    }
    Ok(())
}

#[then("the capability call count is {count:usize}")]
fn capability_call_count(world: &ExecutionWorld, count: usize) -> Result<(), eyre::Report> {
    let calls = world.script.calls();
    if calls != count {
        return Err(eyre::eyre!("expected {count} capability calls, found {calls}"));
    }
    Ok(())
}

#[then("the retry count is {count:u32}")]
fn retry_count(world: &ExecutionWorld, count: u32) -> Result<(), eyre::Report> {
    let actual = last_result(world)?.metadata().retry_count();
    if actual != count {
        return Err(eyre::eyre!("expected retry count {count}, found {actual}"));
    }
    Ok(())
}

#[then("the executor backed off for {first:u64} then {second:u64} milliseconds")]
fn executor_backed_off(world: &ExecutionWorld, first: u64, second: u64) -> Result<(), eyre::Report> {
    let expected = vec![Duration::from_millis(first), Duration::from_millis(second)];
    let requested = world.retry_delay.requested();
    if requested != expected {
        return Err(eyre::eyre!("expected backoff {expected:?}, found {requested:?}"));
    }
    Ok(())
}

#[then("{succeeded:usize} batch items succeed and {failed:usize} fails")]
fn batch_counts(world: &ExecutionWorld, succeeded: usize, failed: usize) -> Result<(), eyre::Report> {
    let outcome = world
        .batch_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no batch outcome in scenario world"))?;
    if outcome.succeeded_count() != succeeded || outcome.failed_count() != failed {
        return Err(eyre::eyre!(
            "expected {succeeded} succeeded and {failed} failed, found {} and {}",
            outcome.succeeded_count(),
            outcome.failed_count()
        ));
    }
    Ok(())
}

#[then(r#"batch item "{key}" failed"#)]
fn batch_item_failed(world: &ExecutionWorld, key: String) -> Result<(), eyre::Report> {
    let result = world
        .batch_outcome
        .as_ref()
        .and_then(|outcome| outcome.get(&key))
        .ok_or_else(|| eyre::eyre!("no batch result for '{key}'"))?;
    if result.is_success() {
        return Err(eyre::eyre!("expected '{key}' to fail, got {result:?}"));
    }
    Ok(())
}

#[then("progress was reported {count:usize} times")]
fn progress_reported(world: &ExecutionWorld, count: usize) -> Result<(), eyre::Report> {
    let updates = world
        .progress
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    let completed: Vec<usize> = updates.iter().map(|update| update.completed()).collect();
    let expected: Vec<usize> = (1..=count).collect();
    if completed != expected {
        return Err(eyre::eyre!("expected progress {expected:?}, found {completed:?}"));
    }
    Ok(())
}

#[then("the orchestrator paused {count:usize} times between chunks")]
fn orchestrator_paused(world: &ExecutionWorld, count: usize) -> Result<(), eyre::Report> {
    let pauses = world.batch_delay.requested().len();
    if pauses != count {
        return Err(eyre::eyre!("expected {count} pauses, found {pauses}"));
    }
    Ok(())
}

#[then(r#"the resolved agent is "{key}""#)]
fn resolved_agent_is(world: &ExecutionWorld, key: String) -> Result<(), eyre::Report> {
    let resolved = world
        .resolved
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no agent was resolved"))?;
    if resolved.key() != key {
        return Err(eyre::eyre!("expected '{key}', resolved '{}'", resolved.key()));
    }
    Ok(())
}

#[then("no agent is resolved")]
fn no_agent_resolved(world: &ExecutionWorld) -> Result<(), eyre::Report> {
    if let Some(descriptor) = &world.resolved {
        return Err(eyre::eyre!("expected no agent, resolved '{}'", descriptor.key()));
    }
    Ok(())
}
