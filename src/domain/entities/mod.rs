//! 도메인 엔티티
//!
//! 영속 계층 협력자가 저장하는 레코드 타입들입니다.

pub mod users;
