use serde::Deserialize;

use crate::{warn, DEBUG_NAME};

use super::http_client;

/// Marker preceding the JSON literal embedded in a gismeteo city page. The
/// literal starts at the `{` and runs to the end of that line.
const WEATHER_MARKER: &str = "M.state.weather.cw = ";

/// Fixed city table; indexes are stable and referenced by callers directly.
pub const WEATHER_CITIES: [(&str, &str); 3] = [
    ("Самара", "https://www.gismeteo.ru/weather-samara-4618/"),
    ("Тольятти", "https://www.gismeteo.ru/weather-tolyatti-4429/"),
    ("Москва", "https://www.gismeteo.ru/weather-moscow-4368/"),
];

/// Current conditions for one city. Produced per fetch, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature: f64,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct CityWeather {
    #[serde(rename = "temperatureAir")]
    temperature_air: Vec<f64>,
    description: Vec<String>,
}

/// Fetch current weather for a city in `WEATHER_CITIES`. Same sentinel
/// contract as the rates fetch: any failure logs and yields `None`.
pub fn fetch_current_weather(index: usize) -> Option<WeatherSnapshot> {
    let (city, url) = WEATHER_CITIES.get(index)?;
    let client = http_client()?;

    let response = match client.get(*url).send() {
        Ok(response) => response,
        Err(e) => {
            warn!("[{}][WEATHER] Request to {url} failed: {e}", DEBUG_NAME);
            return None;
        }
    };

    if !response.status().is_success() {
        warn!("[{}][WEATHER] {url} answered {}", DEBUG_NAME, response.status());
        return None;
    }

    let body = match response.text() {
        Ok(body) => body,
        Err(e) => {
            warn!("[{}][WEATHER] Failed to read response body: {e}", DEBUG_NAME);
            return None;
        }
    };

    snapshot_from_page(city, &body)
}

pub(crate) fn snapshot_from_page(city: &str, html: &str) -> Option<WeatherSnapshot> {
    let Some(raw) = extract_embedded_json(html) else {
        warn!("[{}][WEATHER] Marker not found in page for {city}", DEBUG_NAME);
        return None;
    };

    let parsed: CityWeather = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("[{}][WEATHER] Malformed embedded weather JSON for {city}: {e}", DEBUG_NAME);
            return None;
        }
    };

    Some(WeatherSnapshot {
        city: city.to_string(),
        temperature: *parsed.temperature_air.first()?,
        description: parsed.description.first()?.clone(),
    })
}

/// Slice the embedded JSON assignment out of the page: everything between the
/// marker and the next newline.
pub(crate) fn extract_embedded_json(html: &str) -> Option<&str> {
    let start = html.find(WEATHER_MARKER)? + WEATHER_MARKER.len();
    let rest = &html[start..];
    let end = rest.find('\n').unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = concat!(
        "<html><script>\n",
        "M.state.weather.cw = {\"temperatureAir\":[12.4],\"description\":[\"облачно\"]}\n",
        "M.state.other = {}\n",
        "</script></html>"
    );

    #[test]
    fn extracts_json_up_to_newline() {
        let raw = extract_embedded_json(PAGE).unwrap();
        assert_eq!(raw, "{\"temperatureAir\":[12.4],\"description\":[\"облачно\"]}");
    }

    #[test]
    fn parses_first_temperature_and_description() {
        let snapshot = snapshot_from_page("Самара", PAGE).unwrap();
        assert_eq!(snapshot.city, "Самара");
        assert_eq!(snapshot.temperature, 12.4);
        assert_eq!(snapshot.description, "облачно");
    }

    #[test]
    fn missing_marker_is_a_sentinel() {
        assert!(snapshot_from_page("Самара", "<html>no weather here</html>").is_none());
    }

    #[test]
    fn malformed_embedded_json_is_a_sentinel() {
        let page = "M.state.weather.cw = {broken\nrest";
        assert!(snapshot_from_page("Самара", page).is_none());
    }

    #[test]
    fn empty_series_is_a_sentinel() {
        let page = "M.state.weather.cw = {\"temperatureAir\":[],\"description\":[]}\n";
        assert!(snapshot_from_page("Самара", page).is_none());
    }
}
