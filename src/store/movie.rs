// Movie record module
// Wire representation of a single movie

use serde::de::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single movie record
///
/// `id` is assigned by the store and never trusted from input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Movie {
    #[serde(skip_serializing_if = "is_unassigned")]
    pub id: i64,
    pub title: String,
    pub year: i64,
}

#[cfg(test)]
impl Movie {
    pub fn new(title: impl Into<String>, year: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            year,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_unassigned(id: &i64) -> bool {
    *id == 0
}

/// Decode the first JSON value in `body` as a movie.
///
/// Bytes after the first complete value are not inspected. Decoding is
/// lenient about shape:
/// - a top-level `null`, a missing field or a `null` field gives the zero value
/// - a repeated key keeps its last value
/// - keys match field names case-insensitively, an exact match wins
/// - unknown keys are ignored
///
/// A field holding the wrong JSON type is an error.
pub fn decode_first(body: &[u8]) -> serde_json::Result<Movie> {
    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
    match stream.next() {
        Some(Ok(Value::Null)) => Ok(Movie::default()),
        Some(Ok(Value::Object(fields))) => from_fields(&fields),
        Some(Ok(other)) => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {other}"
        ))),
        Some(Err(e)) => Err(e),
        None => Err(serde_json::Error::custom("empty JSON input")),
    }
}

fn from_fields(fields: &Map<String, Value>) -> serde_json::Result<Movie> {
    let mut movie = Movie::default();
    if let Some(value) = field(fields, "id") {
        movie.id = int_field("id", value)?;
    }
    if let Some(value) = field(fields, "title") {
        movie.title = match value {
            Value::String(s) => s.clone(),
            other => {
                return Err(serde_json::Error::custom(format!(
                    "title: expected a string, found {other}"
                )))
            }
        };
    }
    if let Some(value) = field(fields, "year") {
        movie.year = int_field("year", value)?;
    }
    Ok(movie)
}

/// Look up `name`, preferring an exact key over a case-folded one.
/// `null` counts as absent.
fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields
        .get(name)
        .or_else(|| {
            fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .filter(|value| !value.is_null())
}

fn int_field(name: &str, value: &Value) -> serde_json::Result<i64> {
    value.as_i64().ok_or_else(|| {
        serde_json::Error::custom(format!("{name}: expected an integer, found {value}"))
    })
}
