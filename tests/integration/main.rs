//! Integration tests for readalong

mod cli_test;
mod helpers;
mod playback_test;
mod timeindex_test;
