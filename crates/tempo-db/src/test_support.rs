//! Shared test utilities for tempo-db repo tests.
