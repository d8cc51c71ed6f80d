//! Integration tests for relform-api
//!
//! Uses wiremock to simulate the backend and verifies end-to-end behavior
//! of the HTTP adapters, including the session refresh path driven by the
//! retry guard.

mod common;

mod test_related_user;
mod test_session_refresh;
