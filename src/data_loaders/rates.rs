use std::collections::HashMap;

use serde::Deserialize;

use crate::{warn, DEBUG_NAME};

use super::http_client;

/// Central Bank of Russia daily quotes, JSON keyed by `Valute.<CODE>.Value`.
const EXCHANGE_RATE_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

/// One fetched exchange rate, rounded to 2 decimal places. Ephemeral; built
/// fresh each render cycle and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyQuote {
    pub code: String,
    pub rate: f64,
}

#[derive(Debug, Deserialize)]
struct DailyQuotes {
    #[serde(rename = "Valute")]
    valute: HashMap<String, ValuteEntry>,
}

#[derive(Debug, Deserialize)]
struct ValuteEntry {
    #[serde(rename = "Value")]
    value: f64,
}

/// Fetch quotes for the requested codes, preserving request order. `None` is
/// the failure sentinel for any network, status, parse, or missing-code
/// problem; callers omit the currency block rather than aborting the render.
pub fn fetch_currency_rates(codes: &[String]) -> Option<Vec<CurrencyQuote>> {
    let client = http_client()?;

    let response = match client.get(EXCHANGE_RATE_URL).send() {
        Ok(response) => response,
        Err(e) => {
            warn!("[{}][RATES] Request to {EXCHANGE_RATE_URL} failed: {e}", DEBUG_NAME);
            return None;
        }
    };

    if !response.status().is_success() {
        warn!(
            "[{}][RATES] {EXCHANGE_RATE_URL} answered {}",
            DEBUG_NAME,
            response.status()
        );
        return None;
    }

    let body = match response.text() {
        Ok(body) => body,
        Err(e) => {
            warn!("[{}][RATES] Failed to read response body: {e}", DEBUG_NAME);
            return None;
        }
    };

    quotes_from_payload(codes, &body)
}

/// Parse the upstream payload for the requested codes. Codes are matched
/// uppercase; a single missing code fails the whole fetch, matching the
/// all-or-nothing contract of the currency line.
pub(crate) fn quotes_from_payload(codes: &[String], payload: &str) -> Option<Vec<CurrencyQuote>> {
    let document: DailyQuotes = match serde_json::from_str(payload) {
        Ok(document) => document,
        Err(e) => {
            warn!("[{}][RATES] Malformed quotes payload: {e}", DEBUG_NAME);
            return None;
        }
    };

    let mut quotes = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.to_ascii_uppercase();
        let Some(entry) = document.valute.get(&code) else {
            warn!("[{}][RATES] Requested code {code} missing from payload", DEBUG_NAME);
            return None;
        };
        quotes.push(CurrencyQuote {
            code,
            rate: round_rate(entry.value),
        });
    }

    Some(quotes)
}

pub(crate) fn round_rate(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "Date": "2026-08-25T11:30:00+03:00",
        "Valute": {
            "USD": {"Name": "Доллар США", "Value": 95.4963},
            "EUR": {"Name": "Евро", "Value": 104.203},
            "GBP": {"Name": "Фунт", "Value": 121.9999}
        }
    }"#;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn preserves_request_order_and_rounds() {
        let quotes = quotes_from_payload(&codes(&["EUR", "USD"]), PAYLOAD).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0], CurrencyQuote { code: "EUR".to_string(), rate: 104.2 });
        assert_eq!(quotes[1], CurrencyQuote { code: "USD".to_string(), rate: 95.5 });
    }

    #[test]
    fn lowercase_request_codes_are_uppercased() {
        let quotes = quotes_from_payload(&codes(&["gbp"]), PAYLOAD).unwrap();
        assert_eq!(quotes[0].code, "GBP");
        assert_eq!(quotes[0].rate, 122.0);
    }

    #[test]
    fn missing_code_fails_the_whole_fetch() {
        assert!(quotes_from_payload(&codes(&["USD", "JPY"]), PAYLOAD).is_none());
    }

    #[test]
    fn malformed_payload_is_a_sentinel_not_a_panic() {
        assert!(quotes_from_payload(&codes(&["USD"]), "not json").is_none());
        assert!(quotes_from_payload(&codes(&["USD"]), r#"{"Valute": 3}"#).is_none());
    }

    #[test]
    fn rounding_is_two_decimal_places() {
        assert_eq!(round_rate(95.4963), 95.5);
        assert_eq!(round_rate(104.203), 104.2);
        assert_eq!(round_rate(11.115), 11.11);
        assert_eq!(round_rate(7.0), 7.0);
    }
}
