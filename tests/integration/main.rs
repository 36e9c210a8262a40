//! Integration test target

mod router_tests;
