//! Functional tests


mod api_test;
