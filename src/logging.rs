//! 로그 구독자 초기화. 두 실행 파일이 공통으로 사용한다.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG`가 없을 때 쓰는 필터.
pub const DEFAULT_FILTER: &str = "warn";

/// 표준 에러로 출력하는 tracing 구독자를 설치한다. 이미 설치돼 있으면 아무것도 하지 않는다.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
