mod clouds;
pub(crate) use clouds::{sample_scan, TestScan};
