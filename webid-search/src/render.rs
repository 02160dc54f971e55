//! HTML rendering of the search page

use crate::models::ResponseFormat;
use crate::view::SearchView;
use minijinja::{context, Environment};
use serde::Serialize;

pub const PUBLIC_ENDPOINT: &str = "https://webid-search.vercel.app/api/search";
pub const CATALOG_URL: &str = "https://solidproject.solidcommunity.net/catalog/";
pub const DOCS_URL: &str = "https://github.com/jeswr/webid-search";

#[derive(Serialize)]
struct FormatRow {
    accept: &'static str,
    description: &'static str,
    label: &'static str,
    curl: String,
}

fn format_rows() -> Vec<FormatRow> {
    ResponseFormat::ALL
        .iter()
        .map(|&format| {
            let curl = match format {
                ResponseFormat::Json => format!("curl \"{PUBLIC_ENDPOINT}?q=tim\""),
                _ => format!("curl \"{PUBLIC_ENDPOINT}?q=tim\" -H \"Accept: {}\"", format.accept()),
            };
            FormatRow {
                accept: format.accept(),
                description: format.description(),
                label: format.label(),
                curl,
            }
        })
        .collect()
}

pub fn render_page(view: &SearchView) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    // the .html suffix turns on auto-escaping
    env.add_template("search.html", PAGE_TEMPLATE)?;
    let template = env.get_template("search.html")?;

    template.render(context! {
        query => view.query(),
        results => view.results(),
        loading => view.is_loading(),
        error => view.error(),
        show_info => view.show_info(),
        location => view.location(),
        formats => format_rows(),
        catalog_url => CATALOG_URL,
        docs_url => DOCS_URL,
    })
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>WebID Search</title>
</head>
<body data-location="{{ location }}">
<main class="search">
  <header>
    <h1>WebID Search</h1>
    <button type="button" class="info-toggle" title="API Documentation" onclick="document.getElementById('api-docs').showModal()">?</button>
    <p>Search for WebIDs by name or content</p>
  </header>
  <dialog id="api-docs" class="modal" aria-labelledby="api-docs-title"{% if show_info %} open{% endif %}>
    <div class="modal-body">
      <h2 id="api-docs-title">API Documentation</h2>
      <form method="dialog"><button class="modal-close" title="Close">&times;</button></form>
      <section>
        <h3>Endpoint</h3>
        <code>GET /api/search?q=&#123;query&#125;</code>
      </section>
      <section>
        <h3>Response Formats</h3>
        <p>Use the <code>Accept</code> header to specify the response format:</p>
        <table>
          <thead><tr><th>Accept Header</th><th>Format</th></tr></thead>
          <tbody>
{% for format in formats %}
            <tr><td><code>{{ format.accept }}</code></td><td>{{ format.description }}</td></tr>
{% endfor %}
          </tbody>
        </table>
      </section>
      <section>
        <h3>Examples</h3>
{% for format in formats %}
        <p>{{ format.label }}:</p>
        <code>{{ format.curl }}</code>
{% endfor %}
      </section>
      <section>
        <h3>JSON Response</h3>
{% raw %}
        <pre>{
  "query": "tim",
  "count": 1,
  "results": [
    {
      "webid": "https://example.com/tim#me",
      "name": "Tim Example",
      "img": "https://example.com/photo.jpg"
    }
  ]
}</pre>
{% endraw %}
      </section>
      <section class="callout">
        <h3>Want Your WebID Listed?</h3>
        <p>Submit your information to the <a href="{{ catalog_url }}" target="_blank" rel="noopener noreferrer">Solid Catalog</a> to have your WebID appear in search results.</p>
      </section>
      <section>
        <p><a href="{{ docs_url }}" target="_blank" rel="noopener noreferrer">View full documentation on GitHub &rarr;</a></p>
      </section>
    </div>
  </dialog>
  <form method="get" action="/">
    <input type="text" name="q" value="{{ query }}" placeholder="Enter search query...">
    <input type="hidden" name="submitted" value="1">
    <button type="submit"{% if loading %} disabled{% endif %}>{% if loading %}Searching...{% else %}Search{% endif %}</button>
  </form>
{% if error %}
  <div class="error"><p>{{ error }}</p></div>
{% endif %}
{% if results %}
  <section class="results">
    <div class="summary">Found {{ results.count }} result{% if results.count != 1 %}s{% endif %} for &quot;{{ results.query }}&quot;</div>
{% if results.results|length == 0 %}
    <div class="empty"><p>No WebIDs found matching your search query.</p></div>
{% else %}
    <ul class="result-list">
{% for result in results.results %}
      <li class="result">
{% if result.img %}
        <img src="{{ result.img }}" alt="Profile picture of {{ result.name }}" width="64" height="64">
{% endif %}
        <h3>{{ result.name }}</h3>
        <a href="{{ result.webid }}" target="_blank" rel="noopener noreferrer">{{ result.webid }}</a>
      </li>
{% endfor %}
    </ul>
{% endif %}
  </section>
{% endif %}
</main>
<script>history.replaceState(null, "", document.body.dataset.location);</script>
</body>
</html>
"#;
