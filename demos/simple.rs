//! Opening and closing a door with no callbacks.
//!
//! Run with `cargo run --example simple`.

use fsm_engine::{events, Callbacks, Fsm};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fsm = Fsm::new(
        "closed",
        events! {
            "open": ["closed"] => "open",
            "close": ["open"] => "closed",
        },
        Callbacks::new(),
    );

    println!("{}", fsm.current());

    fsm.event("open")?;
    println!("{}", fsm.current());

    fsm.event("close")?;
    println!("{}", fsm.current());

    Ok(())
}
