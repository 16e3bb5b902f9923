//! A door that announces every state it enters.
//!
//! Run with `RUST_LOG=fsm_engine=debug cargo run --example door` to see
//! the engine's own logging alongside the output.

use fsm_engine::{FsmBuilder, Hook, Phase};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let door = FsmBuilder::new()
        .initial("closed")
        .event("open", ["closed"], "open")
        .event("close", ["open"], "closed")
        .on(Hook::Any(Phase::Enter), |_, e| {
            println!("The door to heaven is {}", e.dst());
        })
        .build()?;

    door.event("open")?;
    door.event("close")?;

    if let Err(err) = door.event("close") {
        println!("{err}");
    }

    Ok(())
}
