#![allow(clippy::unwrap_used, clippy::expect_used)]

mod commands_tests;
