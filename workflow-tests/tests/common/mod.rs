//! Common test utilities for workflow integration tests.

use workflow_tests::TestEnv;

/// Bootstrap a fresh archive environment for one test.
pub async fn setup() -> TestEnv {
    TestEnv::new().await
}
