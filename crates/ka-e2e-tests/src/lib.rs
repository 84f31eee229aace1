//! Test-only crate. The suites live under `tests/` and drive the HTTP
//! router through `tower::ServiceExt::oneshot` with mock or wiremock
//! backends.
