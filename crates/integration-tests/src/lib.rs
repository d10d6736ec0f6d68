//! Test-only crate; the interesting parts live under tests/.
