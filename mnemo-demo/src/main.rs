//! Demonstration client: initialize, persist, query against a local server.
//!
//! Purely illustrative. Expects a running `mnemo-server` and an
//! `OPENAI_API_KEY` in the environment; takes an optional memory file path
//! as the first argument.

use anyhow::Context;
use serde_json::{Value, json};
use uuid::Uuid;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_MEMORY_PATH: &str = "mnemo-demo/data/Memory.json";

/// The planning prompt a game agent sends to recall and re-plan.
const PLANNING_QUERY: &str = "\
Find the sequence of actions that will accomplish your goal according to the current states, \
return as an array.

Your current States: {\"HasFood\":false,\"HasWater\":false,\"TargetIsHungry\":false,\"HasEnergy\":true}
Your current Goal is: Follow Target and stand front of Target
Your current Plan: []
Your current Action: Null

You must follow the following criteria:
1. You should tell me in array format. [\"a\",\"b\"]
2. Only give me the array!";

/// POST a JSON body and print the response, or status and text on failure.
async fn post(client: &reqwest::Client, base: &str, route: &str, body: Value) -> anyhow::Result<()> {
    let response = client
        .post(format!("{base}{route}"))
        .json(&body)
        .send()
        .await
        .with_context(|| format!("request to {route} failed"))?;

    if response.status().is_success() {
        let result: Value = response.json().await.with_context(|| "invalid JSON response")?;
        println!("{result}");
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        println!("Error: {status} {text}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base = std::env::var("MNEMO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let api_key =
        std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set for the demo")?;
    let memory_path =
        std::env::args().nth(1).unwrap_or_else(|| DEFAULT_MEMORY_PATH.to_string());
    let guid = Uuid::new_v4().to_string();

    let client = reqwest::Client::new();
    post(&client, &base, "/initialize", json!({"apiKey": api_key})).await?;
    post(&client, &base, "/persist", json!({"path": memory_path, "guid": guid})).await?;
    post(&client, &base, "/query", json!({"query": PLANNING_QUERY, "guid": guid})).await?;

    Ok(())
}
