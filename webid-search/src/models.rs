use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebIdResult {
    pub webid: String,
    pub name: String,
    #[serde(default)]
    pub img: Option<String>,
}

/// JSON body of a successful `/api/search` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub count: u64,
    pub results: Vec<WebIdResult>,
}

/// Body sent with a non-2xx status
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// Encodings the search API can answer with, selected through `Accept`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseFormat {
    Json,
    JsonLd,
    Turtle,
}

impl ResponseFormat {
    pub const ALL: [ResponseFormat; 3] = [ResponseFormat::Json, ResponseFormat::JsonLd, ResponseFormat::Turtle];

    pub fn accept(self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::JsonLd => "application/ld+json",
            ResponseFormat::Turtle => "text/turtle",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ResponseFormat::Json => "Simple JSON (default)",
            ResponseFormat::JsonLd => "JSON-LD with context",
            ResponseFormat::Turtle => "RDF Turtle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResponseFormat::Json => "JSON (default)",
            ResponseFormat::JsonLd => "JSON-LD",
            ResponseFormat::Turtle => "Turtle",
        }
    }
}
