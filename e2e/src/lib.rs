//! End-to-end checks against a backend listening on `INSTAMARK_API_URL`.
//! Run with `cargo test -p e2e -- --ignored` once the server is up.

pub mod util;
