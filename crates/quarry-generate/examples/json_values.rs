//! Samples random JSON documents.
//!
//! ```text
//! RUST_LOG=quarry_generate=debug cargo run -p quarry-generate --example json_values -- [options.toml] [count]
//! ```

use std::error::Error;

use quarry_generate::{
    GenerateOptions, ObjectSpec, SampleEngine, Value, array, bool, constant, int, maybe, object,
    record, recurse, symbol, unicode, weighted,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(layer)
        .try_init()?;

    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) => GenerateOptions::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => GenerateOptions::default(),
    };
    let count = match args.next() {
        Some(count) => count.parse()?,
        None => 5,
    };

    let json = recurse(3, |node| {
        weighted([
            (constant(Value::Null), 1),
            (bool(), 1),
            (int(-1_000..=1_000)?, 2),
            (unicode(0..=12)?, 2),
            (array(0..=4, &node)?, 1),
            (object(ObjectSpec::new(0..=3, symbol(1..=8)?, &node))?, 1),
            (
                record([
                    ("id", int(1..=9_999)?),
                    ("name", symbol(3..=10)?),
                    ("children", maybe(array(1..=3, &node)?)),
                ])?,
                1,
            ),
        ])
    })?;

    let engine = SampleEngine::new(options);
    let result = engine.run(&json, count)?;
    for value in &result.values {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    eprintln!("{}", serde_json::to_string_pretty(&result.report)?);
    Ok(())
}
