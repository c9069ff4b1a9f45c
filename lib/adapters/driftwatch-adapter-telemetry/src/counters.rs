use anyhow::{Context, Result};
use std::time::Duration;

use redis::Commands;

use driftwatch_ports::CounterStorePort;

/// Reads integer counters from Redis. Each lookup opens a short-lived
/// connection bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct RedisCounterStore {
    client: redis::Client,
    timeout: Duration,
}

impl RedisCounterStore {
    pub fn open(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)
            .with_context(|| format!("invalid redis url {url}"))?;
        Ok(Self { client, timeout })
    }
}

impl CounterStorePort for RedisCounterStore {
    fn get(&self, name: &str) -> Result<Option<i64>> {
        let mut connection = self
            .client
            .get_connection_with_timeout(self.timeout)
            .context("failed to connect to redis")?;
        connection.set_read_timeout(Some(self.timeout))?;
        let raw: Option<String> = connection.get(name)?;
        raw.map(|value| parse_counter(&value))
            .transpose()
            .with_context(|| format!("counter {name} is not a number"))
    }
}

fn parse_counter(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    let value: f64 = trimmed.parse()?;
    if !value.is_finite() || value.fract() != 0.0 {
        anyhow::bail!("{trimmed} is not a whole number");
    }
    Ok(value as i64)
}
