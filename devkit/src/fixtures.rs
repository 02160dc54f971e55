/*!
Fixture builders for WebID documents and search API payloads

Produces bodies shaped like the ones the real services return:
- Turtle profile documents served at a WebID
- `/api/search` success and error bodies
- snapshot files as written by the refresher
*/

use serde_json::{json, Value};

/// Minimal FOAF profile document
pub fn turtle_profile(name: &str) -> String {
    format!(
        "@prefix foaf: <http://xmlns.com/foaf/0.1/> .\n\n<#me> a foaf:Person ;\n    foaf:name \"{}\" .\n",
        name
    )
}

/// Builds a `/api/search` success body
pub struct SearchBodyBuilder {
    query: String,
    results: Vec<Value>,
}

impl SearchBodyBuilder {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            results: Vec::new(),
        }
    }

    pub fn result(mut self, webid: &str, name: &str, img: Option<&str>) -> Self {
        self.results.push(json!({
            "webid": webid,
            "name": name,
            "img": img,
        }));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "query": self.query,
            "count": self.results.len(),
            "results": self.results,
        })
    }
}

/// `{ "error": message }` body returned with a non-2xx status
pub fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

/// Snapshot file content with the given `(url, status)` pairs
pub fn snapshot_json(entries: &[(&str, &str)]) -> Value {
    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let entries: Vec<Value> = entries
        .iter()
        .map(|(url, status)| json!({
            "url": url,
            "lastUpdated": now,
            "status": status,
        }))
        .collect();

    json!({
        "lastCrawl": now,
        "entries": entries,
    })
}
