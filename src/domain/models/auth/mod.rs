pub mod authenticated_user;
pub mod role_policy;
