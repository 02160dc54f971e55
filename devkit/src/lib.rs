/*!
# WebID DevKit - stubs and helpers for tests

Shared by the refresher and search crates:
- Stub HTTP server standing in for WebID documents and the search API
- Fixture builders for profiles, search bodies and snapshot files
- Test harness with a scratch directory
*/

pub mod http_stub;
pub mod fixtures;
pub mod test_utils;

pub use http_stub::{unreachable_url, RecordedRequest, StubServer, StubServerBuilder};
pub use fixtures::{error_body, snapshot_json, turtle_profile, SearchBodyBuilder};
pub use test_utils::TestHarness;
