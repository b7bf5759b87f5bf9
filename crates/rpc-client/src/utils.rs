use std::time::Duration;

use anyhow::{anyhow, Result};
use async_jsonrpc_client::Output;
use serde::de::DeserializeOwned;
use serde_json::from_value;

pub(crate) const DEFAULT_QUERY_LIMIT: usize = 500;
pub(crate) const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) fn to_result<T: DeserializeOwned>(output: Output) -> Result<T> {
    match output {
        Output::Success(success) => Ok(from_value(success.result)?),
        Output::Failure(failure) => Err(anyhow!("JSONRPC error: {}", failure.error)),
    }
}
