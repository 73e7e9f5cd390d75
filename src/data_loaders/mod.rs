use std::{sync::OnceLock, time::Duration};

use reqwest::blocking::Client;

use crate::{warn, DEBUG_NAME};

pub mod rates;
pub mod settings;
pub mod weather;

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "Mozilla/5.0";

static HTTP: OnceLock<Option<Client>> = OnceLock::new();

/// Shared blocking HTTP client. Built once; `None` means client construction
/// failed and every fetch in this process will report the failure sentinel.
pub(crate) fn http_client() -> Option<&'static Client> {
    HTTP.get_or_init(|| {
        match Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
        {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("[{}] Failed to build HTTP client: {e}", DEBUG_NAME);
                None
            }
        }
    })
    .as_ref()
}
