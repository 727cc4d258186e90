//! Unit tests against the public API.

mod hit_index_tests;
mod perf_tests;
mod settings_watcher_tests;
mod snapshot_tests;
