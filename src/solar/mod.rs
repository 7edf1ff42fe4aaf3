//! 태양광 설비 경제성 계산 모듈 모음.

pub mod roi;

pub use roi::*;
