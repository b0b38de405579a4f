//! Admin session lifecycle: durable storage, the serialized auth context and
//! the access rules applied to protected pages.

pub mod context;
pub mod guard;
pub mod storage;
