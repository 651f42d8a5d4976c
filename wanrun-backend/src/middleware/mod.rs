pub mod session_auth;
