pub mod checksum;
pub mod retest_id;
pub mod similarity;
