
// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - engine_scenarios: End-to-end conflict, suggestion and intent behaviour
// - audit_mock: A recording audit sink standing in for the audit actor
