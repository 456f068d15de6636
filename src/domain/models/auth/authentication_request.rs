/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 유효한 토큰이 반드시 필요함
    Required,
    /// 토큰이 있으면 검증하고, 없거나 잘못되어도 통과
    Optional,
    /// 로그인하지 않은 요청만 허용 (가입/로그인 화면)
    GuestOnly,
}

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to continue";
pub const ALREADY_LOGGED_IN_MESSAGE: &str = "You're already logged in, just go to dashboard.";
