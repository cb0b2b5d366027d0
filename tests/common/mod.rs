#![allow(dead_code)]

pub mod builders;
pub mod log_capture;
