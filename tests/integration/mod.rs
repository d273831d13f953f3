//! Integration tests against a wiremock permission repository

mod cache_tests;
mod menu_admin_tests;
