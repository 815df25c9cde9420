//! Given steps for agent execution BDD scenarios.

use super::world::{ExecutionWorld, Reply, scripted};
use lectern::agent::{domain::{AgentDescriptor, RetryPolicy}, services::BatchItem};
use lectern::validation::{FieldRule, Schema};
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"an agent requiring a non-empty "{field}""#)]
fn agent_requiring_field(world: &mut ExecutionWorld, field: String) {
    world.schema = Schema::new([FieldRule::non_empty_string(field)]);
}

#[given("an agent allowing {retries:u32} retries")]
fn agent_allowing_retries(world: &mut ExecutionWorld, retries: u32) {
    world.policy = RetryPolicy::new(retries);
}

#[given(r#"the capability fails with "{message}" {times:usize} times before returning "{output}""#)]
fn capability_fails_then_succeeds(
    world: &mut ExecutionWorld,
    message: String,
    times: usize,
    output: String,
) {
    world.script.push(&Reply::Fail(message), times);
    world.script.push(&Reply::Succeed(output), 1);
}

#[given(r#"the capability always fails with "{message}""#)]
fn capability_always_fails(world: &mut ExecutionWorld, message: String) {
    world.script.push(&Reply::Fail(message), 1);
}

#[given(r#"a batch of {count:usize} papers where paper "{failing}" fails"#)]
fn batch_with_failing_paper(world: &mut ExecutionWorld, count: usize, failing: String) {
    world.batch_items = (1..=count)
        .map(|index| {
            let key = format!("p{index}");
            let input = json!({
                "title": format!("Paper {index}"),
                "fail": key == failing,
            });
            BatchItem::new(key, input)
        })
        .collect();
}

#[given(r#"agent "{name}" version "{version}" is registered"#)]
fn agent_registered(
    world: &mut ExecutionWorld,
    name: String,
    version: String,
) -> Result<(), eyre::Report> {
    let descriptor = AgentDescriptor::new(name, version, "scenario agent")
        .map_err(|err| eyre::eyre!("invalid descriptor: {err}"))?;
    world.registry.register(descriptor, scripted(&world.script));
    Ok(())
}
