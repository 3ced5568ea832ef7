pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, StudentSignupRequest, TeacherSignupRequest};
pub use responses::{LoginResponse, RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse};
